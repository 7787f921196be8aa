use std::path::PathBuf;

use chrono::Utc;

use crate::types::Token;

/// Persisted credentials backing `-p`/`--relogin`.
///
/// Stored as JSON in the local data directory. Everything here runs on the
/// session worker thread, which is plain blocking code, hence synchronous
/// filesystem access.
pub struct CredentialStore {
    token: Token,
}

impl CredentialStore {
    pub fn new(token: Token) -> Self {
        CredentialStore { token }
    }

    pub fn load() -> Result<Self, String> {
        let path = Self::credentials_path();
        let content = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub fn persist(&self) -> Result<(), String> {
        let path = Self::credentials_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Expired means within 240 seconds of the nominal expiry, so a token
    /// about to lapse mid-run counts as expired too.
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - 240
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    fn credentials_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("mixcli/cache/credentials.json");
        path
    }
}
