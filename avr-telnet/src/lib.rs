//! Private telnet client for Denon/Marantz AVR control
//!
//! This crate provides a minimal client for the line-oriented telnet
//! control port found on Denon and Marantz receivers. Requests are queued
//! and executed one at a time over a single TCP session, in the order they
//! were submitted, and each request completes through a callback that fires
//! exactly once.
//!
//! ```rust,no_run
//! use avr_telnet::{commands::GetVolume, TelnetClient};
//!
//! # async fn example() -> Result<(), avr_telnet::TelnetError> {
//! let client = TelnetClient::new("192.168.1.50");
//! let volume = client.execute(GetVolume).await?;
//! println!("volume: {volume}");
//! # Ok(())
//! # }
//! ```

pub mod commands;
mod config;
mod error;
mod queue;

pub use commands::{InputStatus, TelnetCommand};
pub use config::{ClientConfig, DEFAULT_PORT};
pub use error::TelnetError;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use queue::Job;

/// Handle to one AVR
///
/// Construction does no I/O. The session is opened by the queue worker when
/// the first request arrives and closed again after `idle_timeout` without
/// requests. Clones share the same queue and session.
///
/// The queue worker runs on the runtime that issued the first request. If
/// that runtime shuts down, the next request starts a fresh worker on the
/// caller's runtime.
#[derive(Debug, Clone)]
pub struct TelnetClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    host: String,
    config: ClientConfig,
    queue: Mutex<Option<mpsc::UnboundedSender<Job>>>,
}

impl TelnetClient {
    /// Create a client for the AVR at `host` with default configuration
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_config(host, ClientConfig::default())
    }

    pub fn with_config(host: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                host: host.into(),
                config,
                queue: Mutex::new(None),
            }),
        }
    }

    pub fn host(&self) -> &str {
        &self.inner.host
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Queue `command` and call `callback` with its decoded answer
    ///
    /// Returns as soon as the request is queued. Invalid parameters, a
    /// missing runtime, or a stopped worker are reported through the
    /// callback as well, so it always fires exactly once.
    pub fn submit<C, F>(&self, command: C, callback: F)
    where
        C: TelnetCommand + 'static,
        F: FnOnce(Result<C::Response, TelnetError>) + Send + 'static,
    {
        let line = match command.encode() {
            Ok(line) => line,
            Err(error) => return callback(Err(error)),
        };
        let queue = match self.queue() {
            Ok(queue) => queue,
            Err(error) => return callback(Err(error)),
        };

        let job = Job {
            line,
            accepts: C::accepts,
            respond: Box::new(move |result: Result<String, TelnetError>| {
                callback(result.and_then(|line| C::parse_response(&line)))
            }),
        };

        if let Err(mpsc::error::SendError(job)) = queue.send(job) {
            (job.respond)(Err(TelnetError::QueueClosed));
        }
    }

    /// Queue `command` and wait for its decoded answer
    pub async fn execute<C>(&self, command: C) -> Result<C::Response, TelnetError>
    where
        C: TelnetCommand + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.submit(command, move |result| {
            let _ = tx.send(result);
        });
        rx.await.map_err(|_| TelnetError::QueueClosed)?
    }

    /// The queue sender, starting a worker when none is running
    fn queue(&self) -> Result<mpsc::UnboundedSender<Job>, TelnetError> {
        let mut slot = self
            .inner
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(queue) = slot.as_ref().filter(|queue| !queue.is_closed()) {
            return Ok(queue.clone());
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| TelnetError::NoRuntime)?;

        if slot.take().is_some() {
            debug!(host = %self.inner.host, "Queue worker gone, starting a new one");
        }
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(queue::run(
            self.inner.host.clone(),
            self.inner.config.clone(),
            rx,
        ));
        *slot = Some(tx.clone());
        Ok(tx)
    }

    #[cfg(test)]
    fn worker_started(&self) -> bool {
        self.inner
            .queue
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}
