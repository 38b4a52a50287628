//! Main power (PW)

use super::{parse_switch, TelnetCommand};
use crate::TelnetError;

const ON: &str = "ON";
const STANDBY: &str = "STANDBY";

/// Query power, answers `true` when the AVR is on
pub struct GetPower;

/// Switch power on (`true`) or to standby (`false`)
pub struct SetPower(pub bool);

impl TelnetCommand for GetPower {
    type Response = bool;

    const PREFIX: &'static str = "PW";

    fn encode(&self) -> Result<String, TelnetError> {
        Ok(format!("{}?", Self::PREFIX))
    }

    fn parse_response(line: &str) -> Result<bool, TelnetError> {
        parse_switch(line, Self::PREFIX, ON, STANDBY)
    }
}

impl TelnetCommand for SetPower {
    type Response = bool;

    const PREFIX: &'static str = "PW";

    fn encode(&self) -> Result<String, TelnetError> {
        Ok(format!("{}{}", Self::PREFIX, if self.0 { ON } else { STANDBY }))
    }

    fn parse_response(line: &str) -> Result<bool, TelnetError> {
        parse_switch(line, Self::PREFIX, ON, STANDBY)
    }
}
