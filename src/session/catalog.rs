use chrono::Utc;
use reqwest::blocking::Client;

use crate::{
    Res, config, session_log,
    session::{CredentialStore, SessionClient},
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        SearchResponse, Token, TrackMatch,
    },
};

/// Production session client speaking HTTP to the catalog Web API.
///
/// Holds the blocking HTTP client and the access token of the current
/// authenticated session. Lives exclusively on the dispatcher worker thread.
pub struct CatalogSession {
    http: Client,
    token: Option<Token>,
}

impl CatalogSession {
    pub fn connect() -> Res<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(CatalogSession { http, token: None })
    }

    fn access_token(&self) -> Res<&str> {
        match &self.token {
            Some(token) => Ok(&token.access_token),
            None => Err("not logged in".into()),
        }
    }

    /// Runs a grant against the token endpoint and parses the token payload.
    fn token_grant(&self, form: &[(&str, &str)]) -> Result<Token, String> {
        let res = self
            .http
            .post(config::catalog_token_url())
            .form(form)
            .send()
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            return Err(format!("token request rejected: {}", res.status()));
        }

        let json: serde_json::Value = res.json().map_err(|e| e.to_string())?;

        Ok(Token {
            access_token: json["access_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            scope: json["scope"].as_str().unwrap_or_default().to_string(),
            expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

impl SessionClient for CatalogSession {
    fn login(&mut self, username: &str, password: &str, remember_me: bool) -> Result<(), String> {
        let client_id = config::catalog_client_id();
        let token = self.token_grant(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
            ("client_id", &client_id),
        ])?;

        if remember_me {
            let _ = CredentialStore::new(token.clone()).persist();
        }

        session_log!("logged in as {}", username);
        self.token = Some(token);
        Ok(())
    }

    fn relogin(&mut self) -> Result<(), String> {
        let store = CredentialStore::load()
            .map_err(|e| format!("no stored credentials, log in without -p first: {}", e))?;

        let token = if store.is_expired() {
            let client_id = config::catalog_client_id();
            let refreshed = self.token_grant(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &store.token().refresh_token),
                ("client_id", &client_id),
            ])?;
            let _ = CredentialStore::new(refreshed.clone()).persist();
            refreshed
        } else {
            store.token().clone()
        };

        session_log!("relogged in with stored credentials");
        self.token = Some(token);
        Ok(())
    }

    fn logout(&mut self) -> Res<()> {
        // The Web API is stateless; dropping the bearer token ends the
        // authenticated session. Stored credentials stay for the next -p run.
        self.token = None;
        session_log!("logged out");
        Ok(())
    }

    fn search(&mut self, artist: &str, song: &str) -> Res<Vec<TrackMatch>> {
        let query = format!("artist:\"{}\" track:\"{}\"", artist, song);
        let token = self.access_token()?.to_string();

        let res = self
            .http
            .get(format!("{}/search", config::catalog_api_url()))
            .query(&[("q", query.as_str()), ("type", "track"), ("limit", "10")])
            .bearer_auth(token)
            .send()?
            .error_for_status()?;

        let response: SearchResponse = res.json()?;
        session_log!("search {:?} -> {} tracks", query, response.tracks.total);

        Ok(response
            .tracks
            .items
            .into_iter()
            .map(TrackMatch::from)
            .collect())
    }

    fn create_playlist(&mut self, name: &str) -> Res<String> {
        let token = self.access_token()?.to_string();
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Created by mixcli from a CSV track list.".to_string(),
            public: false,
            collaborative: false,
        };

        let res = self
            .http
            .post(format!(
                "{}/users/{}/playlists",
                config::catalog_api_url(),
                config::catalog_user()
            ))
            .bearer_auth(token)
            .json(&body)
            .send()?
            .error_for_status()?;

        let created: CreatePlaylistResponse = res.json()?;
        session_log!("playlist {:?} created as {}", created.name, created.id);
        Ok(created.id)
    }

    fn add_tracks(&mut self, playlist_id: &str, tracks: &[TrackMatch]) -> Res<()> {
        if tracks.is_empty() {
            return Ok(());
        }

        let token = self.access_token()?.to_string();
        let body = AddTracksRequest {
            uris: tracks.iter().map(|t| t.uri.clone()).collect(),
        };

        let res = self
            .http
            .post(format!(
                "{}/playlists/{}/tracks",
                config::catalog_api_url(),
                playlist_id
            ))
            .bearer_auth(token)
            .json(&body)
            .send()?
            .error_for_status()?;

        let added: AddTracksResponse = res.json()?;
        session_log!(
            "{} tracks added to {} (snapshot {})",
            tracks.len(),
            playlist_id,
            added.snapshot_id
        );
        Ok(())
    }

    fn load_playlist(&mut self, playlist_id: &str) -> Res<()> {
        let token = self.access_token()?.to_string();

        self.http
            .get(format!(
                "{}/playlists/{}",
                config::catalog_api_url(),
                playlist_id
            ))
            .bearer_auth(token)
            .send()?
            .error_for_status()?;

        session_log!("playlist {} loaded", playlist_id);
        Ok(())
    }
}
