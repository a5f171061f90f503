//! Strategy Processor: validation and majority-vote decisions for trading-signal messages
//!
//! A message is checked against a schema, then the six sub-signals it carries
//! (alpha, momentum, sentiment, composite, beta, factor) are tallied. Enough
//! affirmative votes turn into a `BUY`, anything less is a `HOLD`.
//!
//! # Features
//!
//! - **Message Model**: typed view over raw JSON records with lossless passthrough
//! - **Validation**: pluggable schema check, `FormatError` on rejection
//! - **Evaluation**: configurable accepted tokens per slot and vote threshold
//!
//! # Example
//!
//! ```
//! use strategy_processor::prelude::*;
//! use serde_json::json;
//!
//! let processor: Processor = Processor::default();
//! let raw = match json!({"symbol": "AAPL", "alpha_signal": "BUY"}) {
//!     serde_json::Value::Object(map) => map,
//!     _ => unreachable!(),
//! };
//!
//! let enriched = processor.process(raw).unwrap();
//! assert_eq!(enriched.decision().final_strategy_decision, StrategyDecision::Hold);
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::message::*;
    pub use crate::strategy::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
