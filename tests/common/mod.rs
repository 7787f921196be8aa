#![allow(dead_code)] // not every test binary uses every helper

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use mixcli::{
    Res,
    session::SessionClient,
    types::{TrackMatch, TrackRequest},
};

/// Everything a fake session observed, inspectable from the test thread
/// after the worker shut down.
#[derive(Debug, Default)]
pub struct Recorder {
    pub logins: Vec<(String, String, bool)>,
    pub relogins: usize,
    pub logouts: usize,
    pub process_events: usize,
    pub searches: Vec<(String, String)>,
    pub playlists: Vec<CreatedPlaylist>,
}

#[derive(Debug)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<TrackMatch>,
    pub loaded: bool,
}

/// In-memory session client with canned search results.
pub struct FakeSession {
    recorder: Arc<Mutex<Recorder>>,
    results: HashMap<(String, String), Vec<TrackMatch>>,
    login_error: Option<String>,
    search_delay: Option<Duration>,
    next_id: usize,
}

impl FakeSession {
    pub fn new(recorder: Arc<Mutex<Recorder>>) -> Self {
        FakeSession {
            recorder,
            results: HashMap::new(),
            login_error: None,
            search_delay: None,
            next_id: 0,
        }
    }

    pub fn with_result(mut self, artist: &str, song: &str, tracks: Vec<TrackMatch>) -> Self {
        self.results
            .insert((artist.to_string(), song.to_string()), tracks);
        self
    }

    pub fn with_login_error(mut self, error: &str) -> Self {
        self.login_error = Some(error.to_string());
        self
    }

    /// Makes every search take this long to resolve, so callers can observe
    /// the unloaded state of pending results.
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = Some(delay);
        self
    }
}

impl SessionClient for FakeSession {
    fn login(&mut self, username: &str, password: &str, remember_me: bool) -> Result<(), String> {
        self.recorder.lock().unwrap().logins.push((
            username.to_string(),
            password.to_string(),
            remember_me,
        ));
        match &self.login_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn relogin(&mut self) -> Result<(), String> {
        self.recorder.lock().unwrap().relogins += 1;
        match &self.login_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn logout(&mut self) -> Res<()> {
        self.recorder.lock().unwrap().logouts += 1;
        Ok(())
    }

    fn search(&mut self, artist: &str, song: &str) -> Res<Vec<TrackMatch>> {
        if let Some(delay) = self.search_delay {
            std::thread::sleep(delay);
        }
        self.recorder
            .lock()
            .unwrap()
            .searches
            .push((artist.to_string(), song.to_string()));
        Ok(self
            .results
            .get(&(artist.to_string(), song.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn create_playlist(&mut self, name: &str) -> Res<String> {
        self.next_id += 1;
        let id = format!("playlist-{}", self.next_id);
        self.recorder.lock().unwrap().playlists.push(CreatedPlaylist {
            id: id.clone(),
            name: name.to_string(),
            tracks: Vec::new(),
            loaded: false,
        });
        Ok(id)
    }

    fn add_tracks(&mut self, playlist_id: &str, tracks: &[TrackMatch]) -> Res<()> {
        let mut recorder = self.recorder.lock().unwrap();
        let playlist = recorder
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or("unknown playlist id")?;
        playlist.tracks.extend_from_slice(tracks);
        Ok(())
    }

    fn load_playlist(&mut self, playlist_id: &str) -> Res<()> {
        let mut recorder = self.recorder.lock().unwrap();
        let playlist = recorder
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or("unknown playlist id")?;
        playlist.loaded = true;
        Ok(())
    }

    fn process_events(&mut self) -> Res<()> {
        self.recorder.lock().unwrap().process_events += 1;
        Ok(())
    }
}

pub fn track(uri: &str, name: &str, artist: &str) -> TrackMatch {
    TrackMatch {
        uri: uri.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

pub fn requests(rows: &[(&str, &str)]) -> Vec<TrackRequest> {
    rows.iter()
        .enumerate()
        .map(|(position, (artist, song))| TrackRequest {
            position,
            artist: artist.to_string(),
            song: song.to_string(),
        })
        .collect()
}
