//! Single-consumer task queue for the session worker thread.
//!
//! The session client library is not thread safe: every call into the session
//! must happen on exactly one thread. This module provides that thread. Work
//! is submitted from anywhere as boxed tasks onto an unbounded channel; one
//! dedicated worker dequeues and executes them strictly in submission order.
//! The session value itself is constructed on the worker thread and never
//! leaves it, so the affinity constraint is enforced structurally rather than
//! with locks.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

use crate::{Res, error, info, session::SessionClient};

/// A deferred unit of work executed on the session worker thread.
///
/// Tasks receive exclusive access to the [`SessionHost`] and are consumed
/// exactly once. A task returning `Err` is fatal: the session is left in an
/// undefined state, so the process terminates.
pub type Task<S> = Box<dyn FnOnce(&mut SessionHost<S>) -> Res<()> + Send + 'static>;

/// Owner of the session value on the worker thread.
///
/// Tasks mutate the session through this host; the halt flag is how the
/// stop marker ends the worker loop.
pub struct SessionHost<S> {
    pub session: S,
    halted: bool,
}

impl<S> SessionHost<S> {
    /// Marks the worker loop for exit after the current task completes.
    pub fn halt(&mut self) {
        self.halted = true;
    }
}

/// Handle to the session worker thread and its task queue.
///
/// Cloneable producers are available through [`Dispatcher::notifier`]; the
/// dispatcher itself is kept by the application controller, which is also
/// responsible for joining the worker during shutdown.
pub struct Dispatcher<S> {
    tx: Sender<Task<S>>,
    handle: JoinHandle<()>,
}

impl<S: SessionClient + 'static> Dispatcher<S> {
    /// Spawns the worker thread and constructs the session on it.
    ///
    /// The factory runs on the worker thread, so the session type does not
    /// have to be `Send`. `start` blocks until construction finished and
    /// reports a factory failure to the caller. One process-events task is
    /// queued right away, mirroring how the client library primes its own
    /// event pump.
    pub fn start<F>(factory: F) -> Res<Self>
    where
        F: FnOnce() -> Res<S> + Send + 'static,
    {
        let (tx, rx) = unbounded::<Task<S>>();
        let (ready_tx, ready_rx) = bounded::<Result<(), String>>(1);

        let handle = thread::Builder::new()
            .name("session".to_string())
            .spawn(move || {
                let session = match factory() {
                    Ok(session) => {
                        let _ = ready_tx.send(Ok(()));
                        session
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                run(
                    SessionHost {
                        session,
                        halted: false,
                    },
                    rx,
                );
            })?;

        ready_rx.recv().map_err(|e| e.to_string())??;

        let dispatcher = Dispatcher { tx, handle };
        dispatcher.notifier().notify();
        Ok(dispatcher)
    }

    /// Enqueues a task for execution on the worker thread.
    ///
    /// Thread safe and non-blocking; FIFO order is preserved relative to all
    /// other submissions. Submitting after the worker has exited is a no-op,
    /// matching the rule that tasks queued behind the halt marker are never
    /// executed.
    pub fn submit(&self, task: Task<S>) {
        let _ = self.tx.send(task);
    }

    /// Enqueues the halt marker.
    ///
    /// Tasks already in the queue ahead of the marker still run; the worker
    /// loop exits once the marker itself has executed. Does not drain or
    /// cancel anything. Log out before calling this so the remote session
    /// gets to flush pending state.
    pub fn request_stop(&self) {
        self.submit(Box::new(|host| {
            info!("Halting session worker");
            host.halt();
            Ok(())
        }));
    }

    /// Returns a cloneable producer handle for the self-notification hook.
    ///
    /// Threads spawned internally by the client library signal readiness
    /// through this handle; the signal is serialized onto the worker as a
    /// process-events task like everything else.
    pub fn notifier(&self) -> SessionNotifier<S> {
        SessionNotifier {
            tx: self.tx.clone(),
        }
    }

    /// Waits for the worker thread to exit.
    ///
    /// Call after [`Dispatcher::request_stop`]; dropping the handle also
    /// closes the queue for any remaining producers.
    pub fn join(self) -> Res<()> {
        drop(self.tx);
        self.handle
            .join()
            .map_err(|_| "session worker panicked".into())
    }
}

/// Producer handle for the client library's pending-events signal.
pub struct SessionNotifier<S> {
    tx: Sender<Task<S>>,
}

impl<S> Clone for SessionNotifier<S> {
    fn clone(&self) -> Self {
        SessionNotifier {
            tx: self.tx.clone(),
        }
    }
}

impl<S: SessionClient + 'static> SessionNotifier<S> {
    /// Funnels a process-events task through the queue.
    pub fn notify(&self) {
        let _ = self
            .tx
            .send(Box::new(|host| host.session.process_events()));
    }
}

/// The worker loop: blocks on an empty queue, executes one task at a time,
/// exits once the halt flag is set or every producer hung up.
fn run<S>(mut host: SessionHost<S>, rx: Receiver<Task<S>>) {
    while !host.halted {
        let task = match rx.recv() {
            Ok(task) => task,
            Err(_) => break,
        };
        if let Err(e) = task(&mut host) {
            error!("Session task failed, remote session state is undefined: {}", e);
        }
    }
}
