//! Full state refresh
//!
//! Reads power, volume, mute and input in one go. All four requests are put
//! on the connection before the first answer is awaited, so the connection
//! queue runs them back to back instead of one round trip at a time.

use tracing::{info, warn};

use crate::connection::AvrConnection;
use crate::operation;
use crate::state::{DeviceState, SourceState, VolumeState};

/// Outcome of [`refresh_state`]
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    /// All four readings succeeded
    Snapshot(DeviceState),
    /// There was no connection to read from
    NoConnection,
    /// The connection was there but a reading failed
    Failed,
}

impl Refresh {
    pub fn is_snapshot(&self) -> bool {
        matches!(self, Refresh::Snapshot(_))
    }

    pub fn snapshot(&self) -> Option<&DeviceState> {
        match self {
            Refresh::Snapshot(state) => Some(state),
            _ => None,
        }
    }

    pub fn into_snapshot(self) -> Option<DeviceState> {
        match self {
            Refresh::Snapshot(state) => Some(state),
            _ => None,
        }
    }
}

/// Read a complete [`DeviceState`] from `connection`
///
/// Answers are consumed in a fixed order (power, volume, mute, input) and
/// the first failure in that order ends the refresh. Requests still in
/// flight at that point are left to the connection to finish.
pub async fn refresh_state<C: AvrConnection + ?Sized>(connection: Option<&C>) -> Refresh {
    info!("Refreshing AVR state");

    let Some(connection) = connection else {
        warn!("No connection to AVR");
        return Refresh::NoConnection;
    };

    let power = operation::get_power(connection);
    let volume = operation::get_volume(connection);
    let mute = operation::get_mute(connection);
    let input = operation::get_input(connection);

    let Some(power) = power.await else {
        warn!("failed to get power");
        return Refresh::Failed;
    };
    let Some(volume_value) = volume.await else {
        warn!("failed to get volume");
        return Refresh::Failed;
    };
    let Some(is_muted) = mute.await else {
        warn!("failed to get mute");
        return Refresh::Failed;
    };
    let Some(input) = input.await else {
        warn!("failed to get input");
        return Refresh::Failed;
    };

    let state = DeviceState {
        volume_state: VolumeState {
            volume_value,
            is_muted,
        },
        source_state: SourceState { power, input },
    };

    info!(?state, "Got AVR state");
    Refresh::Snapshot(state)
}
