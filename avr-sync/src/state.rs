//! Device state snapshot
//!
//! Field names follow the JSON shape host bridges already consume:
//!
//! ```json
//! {
//!   "volume_state": { "volume_value": 45.0, "is_muted": false },
//!   "source_state": { "power": "ON", "input": "CD" }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Main power as reported by the AVR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    On,
    Standby,
}

impl PowerState {
    pub fn is_on(self) -> bool {
        self == PowerState::On
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerState::On => "ON",
            PowerState::Standby => "STANDBY",
        }
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on {
            PowerState::On
        } else {
            PowerState::Standby
        }
    }
}

impl From<PowerState> for bool {
    fn from(state: PowerState) -> Self {
        state.is_on()
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeState {
    /// Master volume in protocol units (0.0 - 98.0, half steps)
    pub volume_value: f64,
    pub is_muted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceState {
    pub power: PowerState,
    /// Protocol name of the selected input (`CD`, `TUNER`, ...)
    pub input: String,
}

/// One consistent reading of power, volume, mute and input
///
/// Only ever built with all four readings present; see
/// [`refresh_state`](crate::refresh_state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub volume_state: VolumeState,
    pub source_state: SourceState,
}
