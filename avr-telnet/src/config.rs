//! Configuration for the telnet client
//!
//! Controls the socket timeouts and pacing used by the request queue worker.

use std::time::Duration;

/// Default Denon/Marantz telnet control port
pub const DEFAULT_PORT: u16 = 23;

/// Configuration for a `TelnetClient`
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// TCP port of the AVR control endpoint
    /// Default: 23
    pub port: u16,

    /// Maximum time to establish the TCP connection
    /// Default: 3 seconds
    pub connect_timeout: Duration,

    /// Maximum time to wait for the line answering a command
    /// Default: 2 seconds
    pub response_timeout: Duration,

    /// Minimum gap between two commands on the wire. The AVR drops
    /// commands that arrive back to back.
    /// Default: 50 milliseconds
    pub command_interval: Duration,

    /// Close the session after the queue has been empty this long, so the
    /// AVR's single telnet slot is free for other controllers
    /// Default: 2 seconds
    pub idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(3),
            response_timeout: Duration::from_secs(2),
            command_interval: Duration::from_millis(50),
            idle_timeout: Duration::from_secs(2),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Short timeouts for receivers on the local segment
    pub fn fast_local() -> Self {
        Self {
            connect_timeout: Duration::from_millis(500),
            response_timeout: Duration::from_millis(500),
            command_interval: Duration::from_millis(10),
            idle_timeout: Duration::from_millis(500),
            ..Default::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_command_interval(mut self, interval: Duration) -> Self {
        self.command_interval = interval;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}
