//! Connection capability set
//!
//! The core never talks to a socket. It drives whatever implements
//! [`AvrConnection`]: eight single-shot operations that answer through a
//! callback, queued and serialized by the implementation.

use std::fmt;
use std::sync::Arc;

use avr_telnet::commands::{
    GetInput, GetMute, GetPower, GetVolume, SetInput, SetMute, SetPower, SetVolume,
};
use avr_telnet::{ClientConfig, InputStatus, TelnetClient, TelnetError};

/// Completion callback for one connection operation. Called exactly once.
pub type Reply<T, E> = Box<dyn FnOnce(Result<T, E>) + Send + 'static>;

/// Operations an AVR connection must offer
///
/// Implementations must run requests in the order the methods are called;
/// [`refresh_state`](crate::refresh_state) issues four reads back to back
/// and relies on that.
pub trait AvrConnection {
    /// Failure detail. Only ever rendered into diagnostics.
    type Error: fmt::Display + Send + 'static;

    fn get_power_state(&self, reply: Reply<bool, Self::Error>);

    fn set_power_state(&self, on: bool, reply: Reply<bool, Self::Error>);

    fn get_volume(&self, reply: Reply<f64, Self::Error>);

    fn set_volume(&self, level: f64, reply: Reply<f64, Self::Error>);

    fn get_mute_state(&self, reply: Reply<bool, Self::Error>);

    fn set_mute_state(&self, muted: bool, reply: Reply<bool, Self::Error>);

    /// Answers with the input status; the selected source is its `SI` field
    fn get_input(&self, reply: Reply<InputStatus, Self::Error>);

    fn set_input(&self, input: &str, reply: Reply<String, Self::Error>);
}

impl AvrConnection for TelnetClient {
    type Error = TelnetError;

    fn get_power_state(&self, reply: Reply<bool, TelnetError>) {
        self.submit(GetPower, reply);
    }

    fn set_power_state(&self, on: bool, reply: Reply<bool, TelnetError>) {
        self.submit(SetPower(on), reply);
    }

    fn get_volume(&self, reply: Reply<f64, TelnetError>) {
        self.submit(GetVolume, reply);
    }

    fn set_volume(&self, level: f64, reply: Reply<f64, TelnetError>) {
        self.submit(SetVolume(level), reply);
    }

    fn get_mute_state(&self, reply: Reply<bool, TelnetError>) {
        self.submit(GetMute, reply);
    }

    fn set_mute_state(&self, muted: bool, reply: Reply<bool, TelnetError>) {
        self.submit(SetMute(muted), reply);
    }

    fn get_input(&self, reply: Reply<InputStatus, TelnetError>) {
        self.submit(GetInput, reply);
    }

    fn set_input(&self, input: &str, reply: Reply<String, TelnetError>) {
        self.submit(SetInput(input.to_string()), reply);
    }
}

impl<C: AvrConnection + ?Sized> AvrConnection for Arc<C> {
    type Error = C::Error;

    fn get_power_state(&self, reply: Reply<bool, C::Error>) {
        (**self).get_power_state(reply)
    }

    fn set_power_state(&self, on: bool, reply: Reply<bool, C::Error>) {
        (**self).set_power_state(on, reply)
    }

    fn get_volume(&self, reply: Reply<f64, C::Error>) {
        (**self).get_volume(reply)
    }

    fn set_volume(&self, level: f64, reply: Reply<f64, C::Error>) {
        (**self).set_volume(level, reply)
    }

    fn get_mute_state(&self, reply: Reply<bool, C::Error>) {
        (**self).get_mute_state(reply)
    }

    fn set_mute_state(&self, muted: bool, reply: Reply<bool, C::Error>) {
        (**self).set_mute_state(muted, reply)
    }

    fn get_input(&self, reply: Reply<InputStatus, C::Error>) {
        (**self).get_input(reply)
    }

    fn set_input(&self, input: &str, reply: Reply<String, C::Error>) {
        (**self).set_input(input, reply)
    }
}

/// Create a connection to the AVR at `host`
///
/// Returns immediately; the telnet session is opened by the first request.
pub fn create_client(host: impl Into<String>) -> TelnetClient {
    TelnetClient::new(host)
}

pub fn create_client_with_config(host: impl Into<String>, config: ClientConfig) -> TelnetClient {
    TelnetClient::with_config(host, config)
}
