//! Master volume (MV)
//!
//! Levels are sent as two digits, with a third digit `5` for half steps:
//! `MV45` is 45.0 and `MV455` is 45.5. The AVR follows every volume answer
//! with an `MVMAX nn` line, which is not an answer to anything we ask.

use super::TelnetCommand;
use crate::TelnetError;

/// Highest level the protocol can express
pub const MAX_VOLUME: f64 = 98.0;

const PREFIX: &str = "MV";
const MAX_LINE_PREFIX: &str = "MVMAX";

/// Query master volume
pub struct GetVolume;

/// Set master volume, in 0.5 steps between 0 and [`MAX_VOLUME`]
pub struct SetVolume(pub f64);

impl TelnetCommand for GetVolume {
    type Response = f64;

    const PREFIX: &'static str = PREFIX;

    fn encode(&self) -> Result<String, TelnetError> {
        Ok(format!("{}?", Self::PREFIX))
    }

    fn accepts(line: &str) -> bool {
        accepts_level(line)
    }

    fn parse_response(line: &str) -> Result<f64, TelnetError> {
        parse_level(line)
    }
}

impl TelnetCommand for SetVolume {
    type Response = f64;

    const PREFIX: &'static str = PREFIX;

    fn encode(&self) -> Result<String, TelnetError> {
        encode_level(self.0)
    }

    fn accepts(line: &str) -> bool {
        accepts_level(line)
    }

    fn parse_response(line: &str) -> Result<f64, TelnetError> {
        parse_level(line)
    }
}

fn accepts_level(line: &str) -> bool {
    line.starts_with(PREFIX) && !line.starts_with(MAX_LINE_PREFIX)
}

fn encode_level(level: f64) -> Result<String, TelnetError> {
    if !level.is_finite() || !(0.0..=MAX_VOLUME).contains(&level) {
        return Err(TelnetError::InvalidParameter(format!(
            "volume {level} outside 0..={MAX_VOLUME}"
        )));
    }
    if (level * 2.0).fract() != 0.0 {
        return Err(TelnetError::InvalidParameter(format!(
            "volume {level} is not a multiple of 0.5"
        )));
    }

    let whole = level.trunc() as u32;
    if level.fract() == 0.0 {
        Ok(format!("{PREFIX}{whole:02}"))
    } else {
        Ok(format!("{PREFIX}{whole:02}5"))
    }
}

fn parse_level(line: &str) -> Result<f64, TelnetError> {
    let digits = line
        .strip_prefix(PREFIX)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| TelnetError::Parse(format!("not a volume line: {line:?}")))?;

    let value: u32 = digits
        .parse()
        .map_err(|_| TelnetError::Parse(format!("not a volume line: {line:?}")))?;

    match digits.len() {
        2 => Ok(f64::from(value)),
        3 => Ok(f64::from(value) / 10.0),
        _ => Err(TelnetError::Parse(format!("unexpected volume digits: {line:?}"))),
    }
}
