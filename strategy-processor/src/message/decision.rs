//! Strategy decision types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output key carrying the decision
pub const DECISION_FIELD: &str = "final_strategy_decision";
/// Output key carrying the vote count
pub const VOTES_FIELD: &str = "strategy_votes";

/// Final trade action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyDecision {
    /// Enough sub-signals agree
    Buy,
    /// No action
    Hold,
}

impl StrategyDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyDecision::Buy => "BUY",
            StrategyDecision::Hold => "HOLD",
        }
    }
}

impl fmt::Display for StrategyDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision plus the vote tally it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub final_strategy_decision: StrategyDecision,
    pub strategy_votes: usize,
}

impl DecisionResult {
    /// Apply an inclusive threshold to a vote count
    pub fn from_votes(votes: usize, threshold: usize) -> Self {
        let final_strategy_decision = if votes >= threshold {
            StrategyDecision::Buy
        } else {
            StrategyDecision::Hold
        };

        Self {
            final_strategy_decision,
            strategy_votes: votes,
        }
    }
}
