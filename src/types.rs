use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// One CSV row: position index plus the artist/song pair to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRequest {
    pub position: usize,
    pub artist: String,
    pub song: String,
}

/// The selected best match for a row; immutable once chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub uri: String,
    pub name: String,
    pub artist: String,
}

/// Name plus the ordered track sequence handed to the playlist-creation task.
#[derive(Debug, Clone)]
pub struct PlaylistSpec {
    pub name: String,
    pub tracks: Vec<TrackMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<TrackItem>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub artists: Vec<ItemArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

impl From<TrackItem> for TrackMatch {
    fn from(item: TrackItem) -> Self {
        let artist = item
            .artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_default();
        TrackMatch {
            uri: item.uri,
            name: item.name,
            artist,
        }
    }
}
