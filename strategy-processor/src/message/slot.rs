//! Named sub-signal slots

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six sub-signals that take part in the strategy vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSlot {
    Alpha,
    Momentum,
    Sentiment,
    Composite,
    Beta,
    Factor,
}

impl SignalSlot {
    /// Every slot, in the order they are read from a message
    pub const ALL: [SignalSlot; 6] = [
        SignalSlot::Alpha,
        SignalSlot::Momentum,
        SignalSlot::Sentiment,
        SignalSlot::Composite,
        SignalSlot::Beta,
        SignalSlot::Factor,
    ];

    /// Message key holding this slot's value
    pub fn field_name(self) -> &'static str {
        match self {
            SignalSlot::Alpha => "alpha_signal",
            SignalSlot::Momentum => "momentum_signal",
            SignalSlot::Sentiment => "sentiment_signal",
            SignalSlot::Composite => "composite_signal",
            SignalSlot::Beta => "beta_signal",
            SignalSlot::Factor => "factor_signal",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.field_name() == name)
    }
}

impl fmt::Display for SignalSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
