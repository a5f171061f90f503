//! Run a handful of signal messages through the processor and print the outcome

use serde_json::{json, Value};
use strategy_processor::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = StrategyConfig::default().with_threshold(3);
    config.validate()?;

    let processor = Processor::new(MessageValidator::default(), StrategyEvaluator::new(config));

    let messages = vec![
        json!({"symbol": "AAPL", "alpha_signal": "BUY", "momentum_signal": "BUY", "sentiment_signal": "BUY"}),
        json!({"symbol": "MSFT", "alpha_signal": "SELL", "momentum_signal": "HOLD"}),
        json!({"symbol": "NVDA", "composite_signal": "INCLUDE", "beta_signal": "OVEREXPOSED", "factor_signal": "REVERT_UP"}),
        json!({"alpha_signal": "BUY"}),
    ];

    for message in messages {
        let Value::Object(raw) = message else {
            continue;
        };
        match processor.process(raw) {
            Ok(enriched) => println!("{}", serde_json::to_string(&enriched)?),
            Err(e) => println!("rejected: {} ({})", e, Value::Object(e.message().clone())),
        }
    }

    Ok(())
}
