//! Majority-vote strategy evaluation

use tracing::{debug, info};

use crate::config::StrategyConfig;
use crate::message::{DecisionResult, EnrichedMessage, SignalMessage, ValidatedMessage};

/// Counts affirmative sub-signals and applies the BUY threshold.
///
/// Stateless: the same message always yields the same decision.
#[derive(Debug, Clone, Default)]
pub struct StrategyEvaluator {
    config: StrategyConfig,
}

impl StrategyEvaluator {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Number of slots holding an accepted token
    pub fn tally(&self, message: &SignalMessage) -> usize {
        message
            .signals()
            .filter(|(slot, value)| self.config.accepts(*slot, value))
            .count()
    }

    pub fn decide(&self, message: &ValidatedMessage) -> DecisionResult {
        DecisionResult::from_votes(self.tally(message), self.config.vote_threshold)
    }

    /// Evaluate the strategy and overlay the decision onto the message
    pub fn evaluate(&self, message: ValidatedMessage) -> EnrichedMessage {
        let symbol = message.symbol_or_unknown().to_string();
        info!("Evaluating strategy for {}", symbol);

        let result = self.decide(&message);
        debug!(
            "Final strategy decision for {}: {} ({} votes)",
            symbol, result.final_strategy_decision, result.strategy_votes
        );

        EnrichedMessage::new(message, result)
    }
}
