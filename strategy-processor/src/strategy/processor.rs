//! Validate-then-evaluate pipeline

use crate::error::FormatError;
use crate::message::{EnrichedMessage, RawMessage};
use crate::strategy::evaluator::StrategyEvaluator;
use crate::strategy::validator::{MessageSchema, MessageValidator, SchemaCheck};

/// Runs a raw message through the validator and then the evaluator
pub struct Processor<S = MessageSchema> {
    validator: MessageValidator<S>,
    evaluator: StrategyEvaluator,
}

impl<S: SchemaCheck> Processor<S> {
    pub fn new(validator: MessageValidator<S>, evaluator: StrategyEvaluator) -> Self {
        Self {
            validator,
            evaluator,
        }
    }

    /// Validate and evaluate one message. A rejected message gets no decision fields.
    pub fn process(&self, message: RawMessage) -> Result<EnrichedMessage, FormatError> {
        let validated = self.validator.validate(message)?;
        Ok(self.evaluator.evaluate(validated))
    }

    pub fn validator(&self) -> &MessageValidator<S> {
        &self.validator
    }

    pub fn evaluator(&self) -> &StrategyEvaluator {
        &self.evaluator
    }
}

impl Default for Processor<MessageSchema> {
    fn default() -> Self {
        Self::new(MessageValidator::default(), StrategyEvaluator::default())
    }
}
