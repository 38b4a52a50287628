//! Main zone mute (MU)

use super::{parse_switch, TelnetCommand};
use crate::TelnetError;

const ON: &str = "ON";
const OFF: &str = "OFF";

/// Query mute, answers `true` when muted
pub struct GetMute;

/// Mute (`true`) or unmute (`false`)
pub struct SetMute(pub bool);

impl TelnetCommand for GetMute {
    type Response = bool;

    const PREFIX: &'static str = "MU";

    fn encode(&self) -> Result<String, TelnetError> {
        Ok(format!("{}?", Self::PREFIX))
    }

    fn parse_response(line: &str) -> Result<bool, TelnetError> {
        parse_switch(line, Self::PREFIX, ON, OFF)
    }
}

impl TelnetCommand for SetMute {
    type Response = bool;

    const PREFIX: &'static str = "MU";

    fn encode(&self) -> Result<String, TelnetError> {
        Ok(format!("{}{}", Self::PREFIX, if self.0 { ON } else { OFF }))
    }

    fn parse_response(line: &str) -> Result<bool, TelnetError> {
        parse_switch(line, Self::PREFIX, ON, OFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_round_trip_lines() {
        assert_eq!(GetMute.encode().unwrap(), "MU?");
        assert_eq!(SetMute(true).encode().unwrap(), "MUON");
        assert_eq!(SetMute(false).encode().unwrap(), "MUOFF");
        assert!(GetMute::parse_response("MUON").unwrap());
        assert!(!GetMute::parse_response("MUOFF").unwrap());
    }
}
