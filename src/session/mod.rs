//! # Session Client Module
//!
//! This module defines the capability surface of the remote catalog session
//! and provides its production implementation. The application never calls a
//! session directly; every invocation is wrapped in a task and executed on
//! the dispatcher worker thread, which is the only execution context allowed
//! to touch the session.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (Authenticator, Playlist Builder)
//!          ↓ tasks via the Dispatcher queue
//! Session Client trait (this module)
//!     ├── CatalogSession  (HTTP Web API, production)
//!     └── fake sessions   (integration tests)
//!          ↓
//! HTTP Layer (reqwest blocking, JSON)
//!          ↓
//! Catalog Web API
//! ```
//!
//! ## Capability surface
//!
//! - `login(user, pass, remember_me)` / `relogin()` - password grant, or a
//!   refresh using the credentials persisted by an earlier `remember_me`
//!   login. Failures are authentication errors, reported to the caller and
//!   never fatal to the worker.
//! - `logout()` - confirms teardown of the authenticated session; the task
//!   wrapping it signals the logout gate only after this returns.
//! - `search(artist, song)` - one catalog query per CSV row, artist filter
//!   plus title filter, returning zero or more matched tracks.
//! - `create_playlist` / `add_tracks` / `load_playlist` - the three steps of
//!   the playlist-creation task: add a new playlist to the user's container,
//!   attach the matched tracks, request the playlist be loaded remotely.
//! - `process_events` - the pending-events pump invoked through the
//!   dispatcher's self-notification hook.
//!
//! Log lines produced by the session implementation go through the
//! process-wide `session_log!` sink with a fixed origin prefix.

pub mod catalog;
pub mod creds;

pub use catalog::CatalogSession;
pub use creds::CredentialStore;

use crate::{Res, types::TrackMatch};

/// Operations the remote session exposes.
///
/// Implementations are not required to be thread safe; the dispatcher
/// guarantees all calls happen on its worker thread.
pub trait SessionClient {
    /// Authenticates with username and password. With `remember_me` the
    /// obtained credentials are persisted for a later [`SessionClient::relogin`].
    fn login(&mut self, username: &str, password: &str, remember_me: bool) -> Result<(), String>;

    /// Authenticates using previously stored credentials.
    fn relogin(&mut self) -> Result<(), String>;

    /// Tears down the authenticated session; returns once the remote side
    /// has confirmed.
    fn logout(&mut self) -> Res<()>;

    /// Issues one catalog query filtered by artist and song title.
    fn search(&mut self, artist: &str, song: &str) -> Res<Vec<TrackMatch>>;

    /// Adds a new, empty playlist to the user's container and returns its id.
    fn create_playlist(&mut self, name: &str) -> Res<String>;

    /// Appends tracks to the playlist, preserving their order.
    fn add_tracks(&mut self, playlist_id: &str, tracks: &[TrackMatch]) -> Res<()>;

    /// Requests the playlist be loaded remotely, confirming it materialized.
    fn load_playlist(&mut self, playlist_id: &str) -> Res<()>;

    /// Processes pending client-library events. Default: nothing pending.
    fn process_events(&mut self) -> Res<()> {
        Ok(())
    }
}
