//! AVR telnet commands
//!
//! Each command knows how to encode itself as a request line and which
//! response line answers it. The queue worker only moves lines around;
//! all protocol knowledge lives here.

mod input;
mod mute;
mod power;
mod volume;

pub use input::{GetInput, InputStatus, SetInput, CURRENT_SOURCE_FIELD};
pub use mute::{GetMute, SetMute};
pub use power::{GetPower, SetPower};
pub use volume::{GetVolume, SetVolume, MAX_VOLUME};

use crate::TelnetError;

/// Base trait for all AVR telnet commands
pub trait TelnetCommand {
    /// Decoded answer
    type Response: Send + 'static;

    /// Two letter command prefix shared by the request and its answer
    const PREFIX: &'static str;

    /// Build the request line, without the trailing carriage return.
    /// Parameters are validated here so nothing invalid reaches the wire.
    fn encode(&self) -> Result<String, TelnetError>;

    /// Whether `line` is the answer to this command. The AVR also pushes
    /// unsolicited status lines, which the worker skips.
    fn accepts(line: &str) -> bool {
        line.starts_with(Self::PREFIX)
    }

    /// Decode the accepted answer line
    fn parse_response(line: &str) -> Result<Self::Response, TelnetError>;
}

/// Decode an `<PREFIX><on>` / `<PREFIX><off>` style answer
pub(crate) fn parse_switch(
    line: &str,
    prefix: &str,
    on: &str,
    off: &str,
) -> Result<bool, TelnetError> {
    match line.strip_prefix(prefix) {
        Some(value) if value == on => Ok(true),
        Some(value) if value == off => Ok(false),
        _ => Err(TelnetError::Parse(format!(
            "expected {prefix}{on} or {prefix}{off}, got {line:?}"
        ))),
    }
}
