//! Input source (SI)

use std::collections::BTreeMap;

use super::TelnetCommand;
use crate::TelnetError;

/// Field of [`InputStatus`] holding the selected source
pub const CURRENT_SOURCE_FIELD: &str = "SI";

/// Query the input source
pub struct GetInput;

/// Select an input source by its protocol name (`CD`, `TUNER`, `SAT/CBL`, ...)
pub struct SetInput(pub String);

/// Input status keyed by response prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputStatus {
    fields: BTreeMap<String, String>,
}

impl InputStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The selected source, if the AVR reported one
    pub fn current_source(&self) -> Option<&str> {
        self.field(CURRENT_SOURCE_FIELD)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InputStatus {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TelnetCommand for GetInput {
    type Response = InputStatus;

    const PREFIX: &'static str = CURRENT_SOURCE_FIELD;

    fn encode(&self) -> Result<String, TelnetError> {
        Ok(format!("{}?", Self::PREFIX))
    }

    fn parse_response(line: &str) -> Result<InputStatus, TelnetError> {
        let source = source_name(line)?;
        Ok(InputStatus::new().with_field(CURRENT_SOURCE_FIELD, source))
    }
}

impl TelnetCommand for SetInput {
    type Response = String;

    const PREFIX: &'static str = CURRENT_SOURCE_FIELD;

    fn encode(&self) -> Result<String, TelnetError> {
        let name = self.0.trim();
        if name.is_empty() || name == "?" || name.contains(['\r', '\n']) {
            return Err(TelnetError::InvalidParameter(format!(
                "invalid input name {:?}",
                self.0
            )));
        }
        Ok(format!("{}{}", Self::PREFIX, name))
    }

    fn parse_response(line: &str) -> Result<String, TelnetError> {
        source_name(line).map(str::to_owned)
    }
}

fn source_name(line: &str) -> Result<&str, TelnetError> {
    match line.strip_prefix(CURRENT_SOURCE_FIELD) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(TelnetError::Parse(format!("not an input line: {line:?}"))),
    }
}
