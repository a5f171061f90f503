//! Strategy configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::message::SignalSlot;
use crate::Result;

/// Tokens that count as an affirmative vote unless configured otherwise
pub const DEFAULT_AFFIRMATIVE_TOKENS: [&str; 4] = ["BUY", "INCLUDE", "OVEREXPOSED", "REVERT_UP"];

/// Minimum number of affirmative votes for a BUY
pub const DEFAULT_VOTE_THRESHOLD: usize = 3;

/// Vote rule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Inclusive BUY threshold
    pub vote_threshold: usize,
    /// Accepted tokens per slot. A slot without an entry never votes.
    pub affirmative_tokens: BTreeMap<SignalSlot, BTreeSet<String>>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        let tokens: BTreeSet<String> = DEFAULT_AFFIRMATIVE_TOKENS
            .iter()
            .map(|token| token.to_string())
            .collect();

        Self {
            vote_threshold: DEFAULT_VOTE_THRESHOLD,
            affirmative_tokens: SignalSlot::ALL
                .into_iter()
                .map(|slot| (slot, tokens.clone()))
                .collect(),
        }
    }
}

impl StrategyConfig {
    /// Parse a JSON document; omitted fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse strategy config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read strategy config {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid strategy config {}", path.display()))
    }

    pub fn with_threshold(mut self, vote_threshold: usize) -> Self {
        self.vote_threshold = vote_threshold;
        self
    }

    /// Replace the accepted tokens of one slot
    pub fn with_tokens<I, T>(mut self, slot: SignalSlot, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.affirmative_tokens
            .insert(slot, tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `value` is an affirmative vote for `slot`. Only strings can vote.
    pub fn accepts(&self, slot: SignalSlot, value: &Value) -> bool {
        match (value.as_str(), self.affirmative_tokens.get(&slot)) {
            (Some(token), Some(accepted)) => accepted.contains(token),
            _ => false,
        }
    }

    /// Check the threshold is reachable and non-trivial
    pub fn validate(&self) -> Result<()> {
        let slots = SignalSlot::ALL.len();
        if self.vote_threshold == 0 {
            anyhow::bail!("Vote threshold must be at least 1");
        }
        if self.vote_threshold > slots {
            anyhow::bail!(
                "Vote threshold {} exceeds the number of signal slots ({})",
                self.vote_threshold,
                slots
            );
        }
        Ok(())
    }
}
