//! Domain error types

use thiserror::Error;

use crate::message::RawMessage;

/// Raised when an incoming message does not pass the schema check.
///
/// Carries the rejected record so callers can report or dead-letter it.
#[derive(Debug, Clone, Error)]
#[error("Invalid message format")]
pub struct FormatError {
    message: RawMessage,
}

impl FormatError {
    pub fn new(message: RawMessage) -> Self {
        Self { message }
    }

    /// The record that failed validation
    pub fn message(&self) -> &RawMessage {
        &self.message
    }

    pub fn into_message(self) -> RawMessage {
        self.message
    }
}
