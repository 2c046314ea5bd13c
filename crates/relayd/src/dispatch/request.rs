//! Inbound message classification.
//!
//! The host delivers either a warmup probe (`{"warmup": ...}`) sent by the
//! platform scheduler to keep the function resident, or a directive envelope
//! (`{"directive": {...}}`). Classification is by key presence, so a warmup
//! probe is recognised whatever its value.

use relay_types::Directive;
use serde_json::{Map, Value};

use super::errors::DispatchError;

/// Parsed inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// Keep-alive probe; answered without touching collaborators.
    Warmup,
    /// A directive to classify and handle.
    Directive(Box<Directive>),
}

impl InboundMessage {
    /// Parses one message line.
    ///
    /// Trailing whitespace, including the newline delimiter, is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedMessage` for empty lines, invalid
    /// JSON, and objects that are neither warmups nor directives.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = trim_trailing_whitespace(line);
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty message line"));
        }

        let value = serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)?;
        Self::from_value(value)
    }

    /// Classifies an already-decoded message.
    ///
    /// # Errors
    ///
    /// See [`InboundMessage::parse`].
    pub fn from_value(value: Value) -> Result<Self, DispatchError> {
        let Value::Object(mut fields) = value else {
            return Err(DispatchError::malformed(
                "unknown message: expected a JSON object",
            ));
        };

        if fields.contains_key("warmup") {
            return Ok(Self::Warmup);
        }

        match fields.remove("directive") {
            Some(directive) => serde_json::from_value(directive)
                .map(|directive| Self::Directive(Box::new(directive)))
                .map_err(DispatchError::from_json_error),
            None => Err(DispatchError::malformed(format!(
                "unknown message with fields [{}]",
                field_names(&fields)
            ))),
        }
    }
}

fn field_names(fields: &Map<String, Value>) -> String {
    fields.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Trims trailing ASCII whitespace from a byte slice.
fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or_default()
}
