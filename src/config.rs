//! Configuration management for the CSV playlist builder.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including catalog API endpoints, client credentials, and other
//! runtime parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `mixcli/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values. A missing
/// `.env` file is not an error; configuration may come entirely from the
/// process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/mixcli/.env`
/// - macOS: `~/Library/Application Support/mixcli/.env`
/// - Windows: `%LOCALAPPDATA%/mixcli/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded or absent,
/// or an error string if directory creation or file parsing fails.
///
/// # Example
///
/// ```
/// use mixcli::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mixcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.exists() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the catalog Web API base URL.
///
/// Retrieves the `CATALOG_API_URL` environment variable which contains the
/// base URL for the remote catalog's Web API endpoints. This is used for
/// search and playlist operations after authentication.
///
/// # Panics
///
/// Panics if the `CATALOG_API_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let api_url = catalog_api_url(); // e.g., "https://api.example.com/v1"
/// ```
pub fn catalog_api_url() -> String {
    env::var("CATALOG_API_URL").expect("CATALOG_API_URL must be set")
}

/// Returns the catalog token endpoint URL.
///
/// Retrieves the `CATALOG_TOKEN_URL` environment variable which contains
/// the URL used for the password and refresh-token grants during login
/// and relogin.
///
/// # Panics
///
/// Panics if the `CATALOG_TOKEN_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let token_url = catalog_token_url(); // e.g., "https://accounts.example.com/api/token"
/// ```
pub fn catalog_token_url() -> String {
    env::var("CATALOG_TOKEN_URL").expect("CATALOG_TOKEN_URL must be set")
}

/// Returns the catalog API client ID for authentication.
///
/// Retrieves the `CATALOG_CLIENT_ID` environment variable which contains
/// the client ID obtained when registering the application with the
/// catalog's developer platform.
///
/// # Panics
///
/// Panics if the `CATALOG_CLIENT_ID` environment variable is not set.
///
/// # Example
///
/// ```
/// let client_id = catalog_client_id(); // e.g., "abc123..."
/// ```
pub fn catalog_client_id() -> String {
    env::var("CATALOG_CLIENT_ID").expect("CATALOG_CLIENT_ID must be set")
}

/// Returns the catalog user ID for playlist operations.
///
/// Retrieves the `CATALOG_USER_ID` environment variable which identifies
/// the user account in whose container playlists are created.
///
/// # Panics
///
/// Panics if the `CATALOG_USER_ID` environment variable is not set.
///
/// # Example
///
/// ```
/// let user_id = catalog_user(); // e.g., "username"
/// ```
pub fn catalog_user() -> String {
    env::var("CATALOG_USER_ID").expect("CATALOG_USER_ID must be set")
}
