//! Hand work to the thread that owns the canvases.
//!
//! All canvas state lives on one thread (the UI thread). Other threads,
//! such as the autosave task and HTTP handlers, never touch it directly;
//! they queue closures through a [`UiDispatcher`] and the UI thread runs
//! them from its [`UiLoop`]. Requests that need an answer carry a timeout,
//! so a stalled UI thread shows up as [`UiError::Timeout`] instead of a hung
//! caller.
//!
//! A closure must never call back into [`UiDispatcher::call`] on the same
//! dispatcher: the loop is busy running it and the call would time out.

use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use paintkit_core::UiError;

type Task<S> = Box<dyn FnOnce(&mut S) + Send>;

enum UiMessage<S> {
    Task(Task<S>),
    Shutdown,
}

/// Sending half, cheap to clone and shareable across threads.
pub struct UiDispatcher<S> {
    sender: mpsc::Sender<UiMessage<S>>,
}

impl<S> Clone for UiDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Receiving half, owned by the UI thread.
pub struct UiLoop<S> {
    receiver: mpsc::Receiver<UiMessage<S>>,
}

/// Create a connected dispatcher and loop.
pub fn channel<S>() -> (UiDispatcher<S>, UiLoop<S>) {
    let (sender, receiver) = mpsc::channel();
    (UiDispatcher { sender }, UiLoop { receiver })
}

fn timeout_error(timeout: Duration) -> UiError {
    UiError::Timeout {
        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
    }
}

impl<S: 'static> UiDispatcher<S> {
    /// Queue `f` without waiting for it.
    pub fn post<F>(&self, f: F) -> Result<(), UiError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.sender
            .send(UiMessage::Task(Box::new(f)))
            .map_err(|_| UiError::Disconnected)
    }

    /// Run `f` on the UI thread and block until it returns or `timeout`
    /// passes.
    pub fn call<T, F>(&self, f: F, timeout: Duration) -> Result<T, UiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut S) -> T + Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.post(move |state| {
            // the caller may have given up already
            let _ = reply_tx.send(f(state));
        })?;

        reply_rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => timeout_error(timeout),
            RecvTimeoutError::Disconnected => UiError::Disconnected,
        })
    }

    /// Async form of [`call`](Self::call) for tokio tasks.
    pub async fn call_async<T, F>(&self, f: F, timeout: Duration) -> Result<T, UiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut S) -> T + Send + 'static,
    {
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.post(move |state| {
            let _ = reply_tx.send(f(state));
        })?;

        match tokio::time::timeout(timeout, reply_rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(UiError::Disconnected),
            Err(_) => Err(timeout_error(timeout)),
        }
    }

    /// Ask the loop to stop after the work already queued.
    pub fn shutdown(&self) {
        if self.sender.send(UiMessage::Shutdown).is_err() {
            tracing::debug!("UI loop already stopped");
        }
    }
}

impl<S> UiLoop<S> {
    /// Run queued work until [`UiDispatcher::shutdown`] is called or every
    /// dispatcher is dropped.
    pub fn run(self, state: &mut S) {
        tracing::debug!("UI loop started");
        while let Ok(message) = self.receiver.recv() {
            match message {
                UiMessage::Task(task) => task(state),
                UiMessage::Shutdown => break,
            }
        }
        tracing::debug!("UI loop stopped");
    }

    /// Run whatever is queued right now without blocking. Returns the number
    /// of tasks run and whether a shutdown was requested.
    pub fn run_pending(&self, state: &mut S) -> (usize, bool) {
        let mut ran = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(UiMessage::Task(task)) => {
                    task(state);
                    ran += 1;
                }
                Ok(UiMessage::Shutdown) => return (ran, true),
                Err(TryRecvError::Empty) => return (ran, false),
                Err(TryRecvError::Disconnected) => return (ran, true),
            }
        }
    }
}
