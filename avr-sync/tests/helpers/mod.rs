//! Fake AVR connection for testing the adapter and the refresh logic
//! without a network.
//!
//! Every call is recorded in issue order. Replies are either delivered
//! immediately or parked until the test releases them, which lets tests
//! choose the completion order.

#![allow(dead_code)]

use std::sync::Mutex;

use avr_sync::{AvrConnection, InputStatus, Reply};

#[derive(Debug, thiserror::Error)]
#[error("fake AVR failure: {0}")]
pub struct FakeError(pub String);

type Parked = (&'static str, Box<dyn FnOnce() + Send>);

pub struct FakeConnection {
    power: Result<bool, String>,
    volume: Result<f64, String>,
    mute: Result<bool, String>,
    input: Result<InputStatus, String>,
    fail_writes: bool,
    park_replies: bool,
    issued: Mutex<Vec<&'static str>>,
    parked: Mutex<Vec<Parked>>,
}

impl FakeConnection {
    /// power=on, volume=45, mute=off, input=CD; writes echo their argument
    pub fn healthy() -> Self {
        Self {
            power: Ok(true),
            volume: Ok(45.0),
            mute: Ok(false),
            input: Ok(InputStatus::new().with_field("SI", "CD")),
            fail_writes: false,
            park_replies: false,
            issued: Mutex::new(Vec::new()),
            parked: Mutex::new(Vec::new()),
        }
    }

    /// Every operation, read or write, fails
    pub fn broken() -> Self {
        Self {
            power: Err("connection reset".to_string()),
            volume: Err("connection reset".to_string()),
            mute: Err("connection reset".to_string()),
            input: Err("connection reset".to_string()),
            fail_writes: true,
            ..Self::healthy()
        }
    }

    pub fn with_power(mut self, answer: Result<bool, &str>) -> Self {
        self.power = answer.map_err(str::to_string);
        self
    }

    pub fn with_volume(mut self, answer: Result<f64, &str>) -> Self {
        self.volume = answer.map_err(str::to_string);
        self
    }

    pub fn with_mute(mut self, answer: Result<bool, &str>) -> Self {
        self.mute = answer.map_err(str::to_string);
        self
    }

    pub fn with_input(mut self, answer: Result<InputStatus, &str>) -> Self {
        self.input = answer.map_err(str::to_string);
        self
    }

    /// Hold every reply until [`release`](Self::release) is called
    pub fn parked(mut self) -> Self {
        self.park_replies = true;
        self
    }

    pub fn issued(&self) -> Vec<&'static str> {
        self.issued.lock().unwrap().clone()
    }

    pub fn parked_count(&self) -> usize {
        self.parked.lock().unwrap().len()
    }

    /// Deliver the parked reply of `operation`. Returns false if none is parked.
    pub fn release(&self, operation: &str) -> bool {
        let reply = {
            let mut parked = self.parked.lock().unwrap();
            parked
                .iter()
                .position(|(name, _)| *name == operation)
                .map(|index| parked.remove(index).1)
        };
        match reply {
            Some(reply) => {
                reply();
                true
            }
            None => false,
        }
    }

    fn answer<T: Send + 'static>(
        &self,
        operation: &'static str,
        answer: Result<T, String>,
        reply: Reply<T, FakeError>,
    ) {
        self.issued.lock().unwrap().push(operation);
        let deliver = move || reply(answer.map_err(FakeError));
        if self.park_replies {
            self.parked
                .lock()
                .unwrap()
                .push((operation, Box::new(deliver)));
        } else {
            deliver();
        }
    }

    fn echo<T: Send + 'static>(&self, operation: &'static str, value: T, reply: Reply<T, FakeError>) {
        let answer = if self.fail_writes {
            Err("write rejected".to_string())
        } else {
            Ok(value)
        };
        self.answer(operation, answer, reply);
    }
}

impl AvrConnection for FakeConnection {
    type Error = FakeError;

    fn get_power_state(&self, reply: Reply<bool, FakeError>) {
        self.answer("GetPower", self.power.clone(), reply);
    }

    fn set_power_state(&self, on: bool, reply: Reply<bool, FakeError>) {
        self.echo("SetPower", on, reply);
    }

    fn get_volume(&self, reply: Reply<f64, FakeError>) {
        self.answer("GetVolume", self.volume.clone(), reply);
    }

    fn set_volume(&self, level: f64, reply: Reply<f64, FakeError>) {
        self.echo("SetVolume", level, reply);
    }

    fn get_mute_state(&self, reply: Reply<bool, FakeError>) {
        self.answer("GetMute", self.mute.clone(), reply);
    }

    fn set_mute_state(&self, muted: bool, reply: Reply<bool, FakeError>) {
        self.echo("SetMute", muted, reply);
    }

    fn get_input(&self, reply: Reply<InputStatus, FakeError>) {
        self.answer("GetInput", self.input.clone(), reply);
    }

    fn set_input(&self, input: &str, reply: Reply<String, FakeError>) {
        self.echo("SetInput", input.to_string(), reply);
    }
}

/// A connection that loses every request without ever replying
pub struct BlackHoleConnection;

impl AvrConnection for BlackHoleConnection {
    type Error = FakeError;

    fn get_power_state(&self, _reply: Reply<bool, FakeError>) {}

    fn set_power_state(&self, _on: bool, _reply: Reply<bool, FakeError>) {}

    fn get_volume(&self, _reply: Reply<f64, FakeError>) {}

    fn set_volume(&self, _level: f64, _reply: Reply<f64, FakeError>) {}

    fn get_mute_state(&self, _reply: Reply<bool, FakeError>) {}

    fn set_mute_state(&self, _muted: bool, _reply: Reply<bool, FakeError>) {}

    fn get_input(&self, _reply: Reply<InputStatus, FakeError>) {}

    fn set_input(&self, _input: &str, _reply: Reply<String, FakeError>) {}
}
