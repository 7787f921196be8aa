//! CSV Playlist Builder CLI Library
//!
//! This library builds a playlist on a remote streaming catalog from a CSV
//! file of artist/song pairs. The client library for the remote session is
//! not thread safe, so every call into it is serialized onto one dedicated
//! worker thread through a task queue; the rest of the program talks to that
//! worker via one-shot synchronization gates.
//!
//! # Modules
//!
//! - `app` - Application controller: startup/shutdown ordering, interruption
//! - `auth` - Login, relogin and logout orchestration over the dispatcher
//! - `builder` - Turns parsed CSV rows into a created remote playlist
//! - `config` - Configuration management and environment variables
//! - `csvfile` - CSV input parsing
//! - `dispatch` - The single-consumer session task queue and worker thread
//! - `session` - Session client trait and the HTTP catalog implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use mixcli::{app, config};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await.ok();
//!     app::App::new("tracks.csv".into(), "Road Trip".to_string(), false)
//!         .run()
//!         .await;
//! }
//! ```

pub mod app;
pub mod auth;
pub mod builder;
pub mod config;
pub mod csvfile;
pub mod dispatch;
pub mod session;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds so errors can cross
/// the dispatcher thread boundary.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use mixcli::Res;
///
/// fn read_rows() -> Res<usize> {
///     Ok(0)
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Queuing searches...");
/// info!("Loaded {} rows", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Logged in!");
/// success!("Playlist {} created", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination, such as a failing session
/// task that leaves the remote session in an undefined state.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("Session task failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program
/// termination, such as a CSV row whose search yielded no matches.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("No matches found for {} - {}", artist, song);
/// warning!("Interrupted, shutting down...");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a log line originating from the session client library.
///
/// Every log message coming out of the remote-catalog client is routed
/// through this sink with a fixed `session` prefix identifying its origin.
/// Fire-and-forget; safe to call from any thread.
///
/// # Example
///
/// ```
/// session_log!("POST {} -> {}", url, status);
/// ```
#[macro_export]
macro_rules! session_log {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "session".magenta(), std::format_args!($($arg)*));
  })
}
