//! Message records flowing through the processor

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Deref;

use super::decision::{DecisionResult, DECISION_FIELD, VOTES_FIELD};
use super::slot::SignalSlot;

/// Untyped record as received from upstream
pub type RawMessage = Map<String, Value>;

pub const SYMBOL_FIELD: &str = "symbol";
/// Symbol reported when a message carries none
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// Typed view of a signal record.
///
/// The symbol and the six signal slots get named fields; every other key is
/// kept in the passthrough bag so converting back to a [`RawMessage`] is lossless.
/// A `symbol` that is not a string stays in the passthrough bag.
///
/// `order` lists every key held by the message in first-insertion order and
/// drives the key sequence of the converted record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMessage", into = "RawMessage")]
pub struct SignalMessage {
    symbol: Option<String>,
    signals: BTreeMap<SignalSlot, Value>,
    extra: RawMessage,
    order: Vec<String>,
}

impl SignalMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.extra.remove(SYMBOL_FIELD);
        self.symbol = Some(symbol.into());
        self.track(SYMBOL_FIELD);
        self
    }

    pub fn with_signal(mut self, slot: SignalSlot, value: impl Into<Value>) -> Self {
        self.signals.insert(slot, value.into());
        self.track(slot.field_name());
        self
    }

    /// Attach an arbitrary passthrough field. Keys owned by the symbol or a
    /// signal slot are routed to their typed field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();

        if let Some(slot) = SignalSlot::from_field_name(&key) {
            return self.with_signal(slot, value);
        }
        if key == SYMBOL_FIELD {
            if let Value::String(symbol) = value {
                return self.with_symbol(symbol);
            }
            self.symbol = None;
        }
        self.track(&key);
        self.extra.insert(key, value);
        self
    }

    fn track(&mut self, key: &str) {
        if !self.order.iter().any(|known| known == key) {
            self.order.push(key.to_string());
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Symbol for diagnostics, falling back to [`UNKNOWN_SYMBOL`]
    pub fn symbol_or_unknown(&self) -> &str {
        self.symbol().unwrap_or(UNKNOWN_SYMBOL)
    }

    /// Raw value of a slot, `None` when the key is absent
    pub fn signal(&self, slot: SignalSlot) -> Option<&Value> {
        self.signals.get(&slot)
    }

    /// Slot value when it is a string
    pub fn signal_token(&self, slot: SignalSlot) -> Option<&str> {
        self.signal(slot).and_then(Value::as_str)
    }

    /// Present slots with their values
    pub fn signals(&self) -> impl Iterator<Item = (SignalSlot, &Value)> {
        self.signals.iter().map(|(slot, value)| (*slot, value))
    }

    pub fn extra(&self) -> &RawMessage {
        &self.extra
    }

    /// Keys in the order they were first seen
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_raw(self) -> RawMessage {
        self.into()
    }
}

impl From<RawMessage> for SignalMessage {
    fn from(raw: RawMessage) -> Self {
        raw.into_iter()
            .fold(SignalMessage::new(), |message, (key, value)| message.with_extra(key, value))
    }
}

impl From<SignalMessage> for RawMessage {
    fn from(message: SignalMessage) -> Self {
        let SignalMessage {
            mut symbol,
            mut signals,
            mut extra,
            order,
        } = message;

        let mut raw = RawMessage::new();
        for key in order {
            let value = if let Some(slot) = SignalSlot::from_field_name(&key) {
                signals.remove(&slot)
            } else if key == SYMBOL_FIELD {
                symbol
                    .take()
                    .map(Value::String)
                    .or_else(|| extra.remove(SYMBOL_FIELD))
            } else {
                extra.remove(&key)
            };
            if let Some(value) = value {
                raw.insert(key, value);
            }
        }
        raw
    }
}

/// A message that passed the schema check.
///
/// Only [`MessageValidator`](crate::strategy::MessageValidator) creates these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedMessage(SignalMessage);

impl ValidatedMessage {
    pub(crate) fn new(message: SignalMessage) -> Self {
        Self(message)
    }

    pub fn into_inner(self) -> SignalMessage {
        self.0
    }
}

impl Deref for ValidatedMessage {
    type Target = SignalMessage;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Validated record with the strategy decision overlaid.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMessage {
    record: RawMessage,
    decision: DecisionResult,
}

impl EnrichedMessage {
    /// Shallow merge: decision keys overwrite same-named input keys
    pub fn new(message: ValidatedMessage, decision: DecisionResult) -> Self {
        let mut record = message.into_inner().into_raw();
        record.insert(
            DECISION_FIELD.to_string(),
            Value::String(decision.final_strategy_decision.as_str().to_string()),
        );
        record.insert(VOTES_FIELD.to_string(), Value::from(decision.strategy_votes));

        Self { record, decision }
    }

    pub fn decision(&self) -> &DecisionResult {
        &self.decision
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub fn record(&self) -> &RawMessage {
        &self.record
    }

    pub fn into_record(self) -> RawMessage {
        self.record
    }
}

impl Serialize for EnrichedMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}
