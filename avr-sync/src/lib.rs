//! # AVR Sync - state snapshots for Denon/Marantz receivers
//!
//! Turns the callback-driven control operations of an AVR connection into
//! awaitable calls, and reads the whole device state in one round:
//!
//! ```rust,no_run
//! use avr_sync::{create_client, refresh_state, Refresh};
//!
//! #[tokio::main]
//! async fn main() {
//!     let avr = create_client("192.168.1.50");
//!
//!     match refresh_state(Some(&avr)).await {
//!         Refresh::Snapshot(state) => {
//!             println!("{} on {}", state.source_state.power, state.source_state.input);
//!         }
//!         Refresh::NoConnection => println!("nothing to talk to"),
//!         Refresh::Failed => println!("AVR did not answer, try again later"),
//!     }
//!
//!     // Single properties answer `None` on any failure
//!     if let Some(level) = avr_sync::set_volume(&avr, 40.0).await {
//!         println!("volume now {level}");
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! refresh_state (snapshot, short-circuits on the first failed read)
//!     ↓
//! operation::* (one awaitable per property, None on failure)
//!     ↓
//! AvrConnection (callback capability set, ordered queue)
//!     ↓
//! avr_telnet::TelnetClient (line protocol over TCP)
//! ```
//!
//! Failures never surface as errors from this crate. Their details go to
//! `tracing`; see [`logging`] to install a subscriber.

pub mod connection;
pub mod logging;
pub mod operation;
mod refresh;
mod state;

pub use connection::{create_client, create_client_with_config, AvrConnection, Reply};
pub use operation::{
    get_input, get_mute, get_power, get_volume, set_input, set_mute, set_power, set_volume,
    Pending,
};
pub use refresh::{refresh_state, Refresh};
pub use state::{DeviceState, PowerState, SourceState, VolumeState};

// Re-export the connection implementation shipped with the crate
pub use avr_telnet::{ClientConfig, InputStatus, TelnetClient, TelnetError};
