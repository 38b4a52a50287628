//! Awaitable single-property operations
//!
//! Each function issues its request on the connection right away and hands
//! back a [`Pending`] future for the answer. The answer is `Some(value)` on
//! success and `None` on any failure, whatever the cause; the cause is only
//! logged.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use avr_telnet::InputStatus;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::connection::{AvrConnection, Reply};
use crate::state::PowerState;

/// Answer of an issued operation
///
/// The request is already on its way when this is created; dropping it
/// abandons the answer, not the request.
#[derive(Debug)]
pub struct Pending<T> {
    operation: &'static str,
    rx: oneshot::Receiver<Option<T>>,
}

impl<T> Pending<T> {
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl<T> Future for Pending<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(value),
            Poll::Ready(Err(_)) => {
                warn!(operation = self.operation, "Connection dropped the request without answering");
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Hand `call` a reply that logs the outcome and resolves the returned future
fn issue<T, U, E>(
    operation: &'static str,
    map: impl FnOnce(T) -> Option<U> + Send + 'static,
    call: impl FnOnce(Reply<T, E>),
) -> Pending<U>
where
    T: fmt::Debug + 'static,
    U: Send + 'static,
    E: fmt::Display + 'static,
{
    let (tx, rx) = oneshot::channel();

    call(Box::new(move |result: Result<T, E>| {
        let value = match result {
            Ok(data) => {
                debug!(operation, ?data, "AVR answered");
                map(data)
            }
            Err(error) => {
                debug!(operation, %error, "Error when talking to AVR");
                None
            }
        };
        // The caller may have stopped waiting
        let _ = tx.send(value);
    }));

    Pending { operation, rx }
}

pub fn get_power<C: AvrConnection + ?Sized>(connection: &C) -> Pending<PowerState> {
    debug!(operation = "GetPower", "Issuing");
    issue(
        "GetPower",
        |on: bool| Some(PowerState::from(on)),
        |reply: Reply<bool, C::Error>| connection.get_power_state(reply),
    )
}

pub fn set_power<C: AvrConnection + ?Sized>(connection: &C, desired: PowerState) -> Pending<PowerState> {
    debug!(operation = "SetPower", %desired, "Issuing");
    issue(
        "SetPower",
        |on: bool| Some(PowerState::from(on)),
        |reply: Reply<bool, C::Error>| connection.set_power_state(desired.is_on(), reply),
    )
}

pub fn get_volume<C: AvrConnection + ?Sized>(connection: &C) -> Pending<f64> {
    debug!(operation = "GetVolume", "Issuing");
    issue("GetVolume", Some, |reply: Reply<f64, C::Error>| {
        connection.get_volume(reply)
    })
}

pub fn set_volume<C: AvrConnection + ?Sized>(connection: &C, level: f64) -> Pending<f64> {
    debug!(operation = "SetVolume", level, "Issuing");
    issue("SetVolume", Some, |reply: Reply<f64, C::Error>| {
        connection.set_volume(level, reply)
    })
}

pub fn get_mute<C: AvrConnection + ?Sized>(connection: &C) -> Pending<bool> {
    debug!(operation = "GetMuteState", "Issuing");
    issue("GetMuteState", Some, |reply: Reply<bool, C::Error>| {
        connection.get_mute_state(reply)
    })
}

pub fn set_mute<C: AvrConnection + ?Sized>(connection: &C, muted: bool) -> Pending<bool> {
    debug!(operation = "SetMuteState", muted, "Issuing");
    issue("SetMuteState", Some, |reply: Reply<bool, C::Error>| {
        connection.set_mute_state(muted, reply)
    })
}

/// Selected input source, taken from the `SI` field of the input status
pub fn get_input<C: AvrConnection + ?Sized>(connection: &C) -> Pending<String> {
    debug!(operation = "GetInput", "Issuing");
    issue(
        "GetInput",
        |status: InputStatus| {
            let source = status.current_source().map(str::to_owned);
            if source.is_none() {
                warn!(operation = "GetInput", ?status, "Input status has no current source");
            }
            source
        },
        |reply: Reply<InputStatus, C::Error>| connection.get_input(reply),
    )
}

pub fn set_input<C: AvrConnection + ?Sized>(connection: &C, input: &str) -> Pending<String> {
    debug!(operation = "SetInput", input, "Issuing");
    issue("SetInput", Some, |reply: Reply<String, C::Error>| {
        connection.set_input(input, reply)
    })
}
