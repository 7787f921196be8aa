//! Application controller: startup and shutdown ordering.
//!
//! Startup runs prompt-or-reuse-credentials, then starts the dispatcher,
//! authenticates, and builds the playlist. Shutdown always runs, on success,
//! on authentication failure, and on interruption: log out, wait for the
//! confirmation, stop the dispatcher, join the worker. Ctrl-C received after
//! the dispatcher started abandons in-progress playlist building and goes
//! straight to that shutdown sequence; already-submitted tasks cannot be
//! retracted and still execute ahead of the logout.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use tokio::signal;

use crate::{
    Res, auth::Authenticator, builder, csvfile, dispatch::Dispatcher, error,
    session::CatalogSession, warning,
};

pub struct App {
    file: PathBuf,
    name: String,
    relogin: bool,
}

impl App {
    pub fn new(file: PathBuf, name: String, relogin: bool) -> Self {
        App {
            file,
            name,
            relogin,
        }
    }

    pub async fn run(self) {
        let credentials = if self.relogin {
            None
        } else {
            match prompt_credentials() {
                Ok(credentials) => Some(credentials),
                Err(e) => error!("Failed to read credentials: {}", e),
            }
        };

        let dispatcher = match Dispatcher::start(CatalogSession::connect) {
            Ok(dispatcher) => dispatcher,
            Err(e) => error!("Failed to start session worker: {}", e),
        };

        tokio::select! {
            _ = signal::ctrl_c() => {
                warning!("Interrupted, shutting down...");
            }
            _ = authenticate_and_build(&dispatcher, credentials, &self.file, &self.name) => {}
        }

        let auth = Authenticator::new(&dispatcher);
        if let Err(e) = auth.logout().await {
            warning!("Logout did not complete cleanly: {}", e);
        }
        dispatcher.request_stop();
        if let Err(e) = dispatcher.join() {
            warning!("{}", e);
        }
    }
}

async fn authenticate_and_build(
    dispatcher: &Dispatcher<CatalogSession>,
    credentials: Option<(String, String)>,
    file: &Path,
    name: &str,
) {
    let auth = Authenticator::new(dispatcher);
    let logged_in = match &credentials {
        Some((username, password)) => auth.login(username, password).await,
        None => auth.relogin().await,
    };
    if let Err(e) = logged_in {
        warning!("Error logging in: {}", e);
        return;
    }

    let requests = match csvfile::load_requests(file) {
        Ok(requests) => requests,
        Err(e) => {
            warning!("Failed to read {}: {}", file.display(), e);
            return;
        }
    };

    if let Err(e) = builder::build(dispatcher, requests, name).await {
        warning!("Failed to build playlist: {}", e);
    }
}

fn prompt_credentials() -> Res<(String, String)> {
    print!("Username: ");
    io::stdout().flush()?;
    let mut username = String::new();
    io::stdin().read_line(&mut username)?;

    let password = rpassword::prompt_password("Password: ")?;
    Ok((username.trim().to_string(), password))
}
