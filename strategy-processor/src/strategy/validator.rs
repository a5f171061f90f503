//! Message schema validation

use serde_json::Value;
use tracing::{debug, error};

use crate::error::FormatError;
use crate::message::{RawMessage, SignalMessage, SignalSlot, ValidatedMessage, SYMBOL_FIELD};

/// Schema check capability injected into the validator
pub trait SchemaCheck: Send + Sync {
    /// Whether the record has the expected shape
    fn is_valid(&self, message: &RawMessage) -> bool;
}

impl<F> SchemaCheck for F
where
    F: Fn(&RawMessage) -> bool + Send + Sync,
{
    fn is_valid(&self, message: &RawMessage) -> bool {
        self(message)
    }
}

/// Stock schema for signal messages.
///
/// Requires the configured fields to be present and non-null, a non-empty
/// string `symbol` when one is given, and string-or-null signal slots.
#[derive(Debug, Clone)]
pub struct MessageSchema {
    required_fields: Vec<String>,
}

impl MessageSchema {
    pub fn new<I, T>(required_fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            required_fields: required_fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }
}

impl Default for MessageSchema {
    fn default() -> Self {
        Self::new([SYMBOL_FIELD])
    }
}

impl SchemaCheck for MessageSchema {
    fn is_valid(&self, message: &RawMessage) -> bool {
        if let Some(missing) = self
            .required_fields
            .iter()
            .find(|field| message.get(field.as_str()).map_or(true, Value::is_null))
        {
            debug!("Schema check failed: missing required field '{}'", missing);
            return false;
        }

        match message.get(SYMBOL_FIELD) {
            None => {}
            Some(Value::String(symbol)) if !symbol.trim().is_empty() => {}
            Some(other) => {
                debug!("Schema check failed: symbol must be a non-empty string, got {}", other);
                return false;
            }
        }

        for slot in SignalSlot::ALL {
            match message.get(slot.field_name()) {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(other) => {
                    debug!("Schema check failed: {} must be a string, got {}", slot, other);
                    return false;
                }
            }
        }

        true
    }
}

/// Gate between raw input and the strategy evaluator
pub struct MessageValidator<S = MessageSchema> {
    schema: S,
}

impl<S: SchemaCheck> MessageValidator<S> {
    pub fn new(schema: S) -> Self {
        Self { schema }
    }

    /// Validate the incoming raw message against the schema.
    ///
    /// The record is returned unchanged, typed as validated. Fails with
    /// [`FormatError`] carrying the record when the schema check rejects it.
    pub fn validate(&self, message: RawMessage) -> Result<ValidatedMessage, FormatError> {
        debug!("Validating message schema...");
        if !self.schema.is_valid(&message) {
            let rejected = Value::Object(message.clone());
            error!("Invalid message schema: {}", rejected);
            return Err(FormatError::new(message));
        }
        Ok(ValidatedMessage::new(SignalMessage::from(message)))
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }
}

impl Default for MessageValidator<MessageSchema> {
    fn default() -> Self {
        Self::new(MessageSchema::default())
    }
}
