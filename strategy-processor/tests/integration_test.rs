//! Integration tests for strategy-processor

mod common;

use common::raw;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strategy_processor::config::StrategyConfig;
use strategy_processor::message::{RawMessage, SignalSlot, StrategyDecision};
use strategy_processor::strategy::{MessageValidator, Processor, StrategyEvaluator};

const TOKENS: [&str; 7] = ["BUY", "INCLUDE", "OVEREXPOSED", "REVERT_UP", "SELL", "HOLD", "EXCLUDE"];

fn accept_all() -> MessageValidator<fn(&RawMessage) -> bool> {
    fn always(_: &RawMessage) -> bool {
        true
    }
    MessageValidator::new(always as fn(&RawMessage) -> bool)
}

/// Deterministic spread of messages covering every slot/token combination pattern
fn create_test_messages(count: usize) -> Vec<RawMessage> {
    (0..count)
        .map(|i| {
            let mut message = RawMessage::new();
            message.insert("symbol".to_string(), json!(format!("SYM{}", i)));
            message.insert("seq".to_string(), json!(i));
            for (n, slot) in SignalSlot::ALL.iter().enumerate() {
                let pick = (i / (n + 1) + n) % (TOKENS.len() + 1);
                if pick < TOKENS.len() {
                    message.insert(slot.field_name().to_string(), json!(TOKENS[pick]));
                }
            }
            message
        })
        .collect()
}

#[test]
fn test_scenario_three_buys() {
    let processor: Processor = Processor::default();
    let enriched = processor
        .process(raw(json!({
            "symbol": "AAPL",
            "alpha_signal": "BUY",
            "momentum_signal": "BUY",
            "sentiment_signal": "BUY"
        })))
        .unwrap();

    assert_eq!(enriched.decision().strategy_votes, 3);
    assert_eq!(enriched.get("final_strategy_decision"), Some(&json!("BUY")));
}

#[test]
fn test_scenario_no_affirmative_votes() {
    let processor: Processor = Processor::default();
    let enriched = processor
        .process(raw(json!({
            "symbol": "MSFT",
            "alpha_signal": "SELL",
            "momentum_signal": "HOLD"
        })))
        .unwrap();

    assert_eq!(enriched.get("strategy_votes"), Some(&json!(0)));
    assert_eq!(enriched.get("final_strategy_decision"), Some(&json!("HOLD")));
}

#[test]
fn test_scenario_missing_symbol() {
    let processor = Processor::new(accept_all(), StrategyEvaluator::default());
    let enriched = processor
        .process(raw(json!({
            "alpha_signal": "INCLUDE",
            "beta_signal": "OVEREXPOSED"
        })))
        .unwrap();

    assert_eq!(enriched.decision().strategy_votes, 2);
    assert_eq!(enriched.decision().final_strategy_decision, StrategyDecision::Hold);
    assert!(enriched.get("symbol").is_none());
}

#[test]
fn test_scenario_schema_failure() {
    let processor = Processor::new(
        MessageValidator::new(|_: &RawMessage| false),
        StrategyEvaluator::default(),
    );
    let input = raw(json!({"symbol": "AAPL", "alpha_signal": "BUY"}));

    let err = processor.process(input.clone()).unwrap_err();
    assert_eq!(err.into_message(), input);
}

#[test]
fn test_evaluation_is_deterministic() {
    let validator = accept_all();
    let evaluator = StrategyEvaluator::default();

    for message in create_test_messages(200) {
        let first = evaluator.evaluate(validator.validate(message.clone()).unwrap());
        let second = evaluator.evaluate(validator.validate(message).unwrap());
        assert_eq!(first, second);
    }
}

#[test]
fn test_votes_bounded_and_threshold_law() {
    let validator = accept_all();

    for threshold in 1..=6 {
        let evaluator = StrategyEvaluator::new(StrategyConfig::default().with_threshold(threshold));
        for message in create_test_messages(200) {
            let enriched = evaluator.evaluate(validator.validate(message).unwrap());
            let votes = enriched.get("strategy_votes").and_then(Value::as_u64).unwrap();
            let decision = enriched.get("final_strategy_decision").and_then(Value::as_str).unwrap();

            assert!(votes <= 6);
            if votes >= threshold as u64 {
                assert_eq!(decision, "BUY");
            } else {
                assert_eq!(decision, "HOLD");
            }
        }
    }
}

#[test]
fn test_merge_preserves_other_keys() {
    let validator = accept_all();
    let evaluator = StrategyEvaluator::default();

    let mut input = create_test_messages(1).remove(0);
    input.insert("nested".to_string(), json!({"a": [1, 2, {"b": null}]}));
    input.insert("final_strategy_decision".to_string(), json!("SELL"));
    input.insert("strategy_votes".to_string(), json!(-1));

    let output = evaluator
        .evaluate(validator.validate(input.clone()).unwrap())
        .into_record();

    for (key, value) in &input {
        if key == "final_strategy_decision" || key == "strategy_votes" {
            continue;
        }
        assert_eq!(output.get(key), Some(value), "key {} changed", key);
    }
    assert_eq!(output.len(), input.len());
    assert_ne!(output.get("final_strategy_decision"), Some(&json!("SELL")));
    assert_ne!(output.get("strategy_votes"), Some(&json!(-1)));
}

#[test]
fn test_validator_gate_follows_schema_check() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let validator = MessageValidator::new(move |message: &RawMessage| {
        counter.fetch_add(1, Ordering::SeqCst);
        message.get("seq").and_then(Value::as_u64).map_or(false, |seq| seq % 2 == 0)
    });

    for message in create_test_messages(20) {
        let even = message["seq"].as_u64().unwrap() % 2 == 0;
        match validator.validate(message.clone()) {
            Ok(validated) => {
                assert!(even);
                assert_eq!(validated.into_inner().into_raw(), message);
            }
            Err(err) => {
                assert!(!even);
                assert_eq!(err.message(), &message);
            }
        }
    }
    assert_eq!(calls.load(Ordering::SeqCst), 20);
}

#[test]
fn test_non_string_signals_are_not_affirmative() {
    let processor = Processor::new(accept_all(), StrategyEvaluator::default());
    let enriched = processor
        .process(raw(json!({
            "symbol": "AAPL",
            "alpha_signal": 1,
            "momentum_signal": {"value": "BUY"},
            "sentiment_signal": ["BUY"],
            "composite_signal": true,
            "beta_signal": null,
            "factor_signal": "BUY"
        })))
        .unwrap();

    assert_eq!(enriched.decision().strategy_votes, 1);
    assert_eq!(enriched.get("alpha_signal"), Some(&json!(1)));
    assert_eq!(enriched.get("beta_signal"), Some(&Value::Null));
}

#[test]
fn test_per_slot_tokens_from_config_file() {
    let config = StrategyConfig::from_json_str(
        r#"{
            "vote_threshold": 2,
            "affirmative_tokens": {
                "alpha": ["LONG"],
                "momentum": ["LONG", "BUY"]
            }
        }"#,
    )
    .unwrap();
    config.validate().unwrap();

    let processor: Processor = Processor::new(MessageValidator::default(), StrategyEvaluator::new(config));
    let enriched = processor
        .process(raw(json!({
            "symbol": "BTC",
            "alpha_signal": "LONG",
            "momentum_signal": "BUY",
            "sentiment_signal": "BUY"
        })))
        .unwrap();

    assert_eq!(enriched.decision().strategy_votes, 2);
    assert_eq!(enriched.decision().final_strategy_decision, StrategyDecision::Buy);
}

#[test]
fn test_processor_is_shareable_across_threads() {
    let processor: Arc<Processor> = Arc::new(Processor::default());
    let messages = create_test_messages(64);

    let handles: Vec<_> = messages
        .chunks(16)
        .map(|chunk| {
            let processor = Arc::clone(&processor);
            let chunk = chunk.to_vec();
            std::thread::spawn(move || {
                chunk
                    .into_iter()
                    .map(|message| processor.process(message).unwrap().decision().strategy_votes)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let threaded: Vec<usize> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    let sequential: Vec<usize> = messages
        .into_iter()
        .map(|message| processor.process(message).unwrap().decision().strategy_votes)
        .collect();

    assert_eq!(threaded, sequential);
}

#[test]
fn test_output_keeps_input_key_order() {
    let processor: Processor = Processor::default();
    let input: RawMessage = serde_json::from_str(
        r#"{"symbol":"AAPL","zeta":1,"momentum_signal":"BUY","alpha_signal":"BUY","venue":"XNAS"}"#,
    )
    .unwrap();

    let enriched = processor.process(input).unwrap();
    let keys: Vec<&str> = enriched.record().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "symbol",
            "zeta",
            "momentum_signal",
            "alpha_signal",
            "venue",
            "final_strategy_decision",
            "strategy_votes"
        ]
    );
}
