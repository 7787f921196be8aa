//! Login, relogin and logout orchestration.
//!
//! The actual session calls run asynchronously on the dispatcher worker, but
//! callers here get blocking wait-for-completion semantics: each operation
//! submits one task and parks on a one-shot gate that the task signals once
//! the client library reported an outcome. The outcome travels through the
//! gate itself, so the waiting side can never miss it.

use tokio::sync::oneshot;

use crate::{Res, dispatch::Dispatcher, info, session::SessionClient, success};

pub struct Authenticator<'a, S> {
    dispatcher: &'a Dispatcher<S>,
}

impl<'a, S: SessionClient + 'static> Authenticator<'a, S> {
    pub fn new(dispatcher: &'a Dispatcher<S>) -> Self {
        Authenticator { dispatcher }
    }

    /// Logs in with username and password; blocks until the outcome is known.
    ///
    /// Credentials are remembered on success so a later run can use
    /// [`Authenticator::relogin`]. A rejected login is reported to the
    /// caller, not treated as a fatal task failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), String> {
        info!("Logging in...");

        let (gate, wait) = oneshot::channel();
        let username = username.to_string();
        let password = password.to_string();
        self.dispatcher.submit(Box::new(move |host| {
            // Capture the error before signaling the gate; the login task
            // itself never fails the worker.
            let outcome = host.session.login(&username, &password, true);
            let _ = gate.send(outcome);
            Ok(())
        }));

        Self::await_login(wait).await
    }

    /// Logs in using the credentials stored by a previous run.
    pub async fn relogin(&self) -> Result<(), String> {
        info!("Logging in with stored credentials...");

        let (gate, wait) = oneshot::channel();
        self.dispatcher.submit(Box::new(move |host| {
            let outcome = host.session.relogin();
            let _ = gate.send(outcome);
            Ok(())
        }));

        Self::await_login(wait).await
    }

    async fn await_login(wait: oneshot::Receiver<Result<(), String>>) -> Result<(), String> {
        match wait.await {
            Ok(Ok(())) => {
                success!("Logged in!");
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err("login gate closed before an outcome arrived".to_string()),
        }
    }

    /// Logs out and blocks until the client library confirmed it.
    ///
    /// Submit this only after in-flight login or playlist work completed,
    /// and observe the returned confirmation before stopping the dispatcher;
    /// otherwise the remote session may not flush pending state.
    pub async fn logout(&self) -> Res<()> {
        info!("Waiting for logout...");

        let (gate, wait) = oneshot::channel();
        self.dispatcher.submit(Box::new(move |host| {
            host.session.logout()?;
            let _ = gate.send(());
            Ok(())
        }));

        wait.await
            .map_err(|_| "logout gate closed before confirmation")?;
        info!("Logged out");
        Ok(())
    }
}
