use anyhow::{Context, Result};
use serde_json::Value;
use shared::{init_tracing, Config};
use strategy_processor::prelude::{
    MessageSchema, MessageValidator, Processor, RawMessage, SchemaCheck, StrategyConfig,
    StrategyEvaluator,
};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info};

/// Outcome counters for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RunStats {
    processed: usize,
    rejected: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    info!(
        git_hash = env!("GIT_HASH"),
        git_branch = env!("GIT_BRANCH"),
        rustc = env!("RUSTC_VERSION"),
        profile = env!("PROFILE"),
        built_at = env!("BUILD_TIME"),
        "Starting strategy processor v{}",
        env!("CARGO_PKG_VERSION")
    );

    let strategy = load_strategy_config(&config)?;
    info!(
        "Vote threshold {} across {} signal slots",
        strategy.vote_threshold,
        strategy.affirmative_tokens.len()
    );

    let processor = Processor::new(
        MessageValidator::new(MessageSchema::new(config.schema_required_fields.clone())),
        StrategyEvaluator::new(strategy),
    );

    let stats = match select_input(std::env::args().nth(1), &config) {
        InputSource::File(path) => {
            info!("Reading messages from {}", path);
            let file = File::open(&path)
                .await
                .with_context(|| format!("Failed to open input {}", path))?;
            run(&processor, BufReader::new(file), tokio::io::stdout()).await?
        }
        InputSource::Stdin => {
            info!("Reading messages from stdin");
            run(&processor, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?
        }
    };

    info!(
        processed = stats.processed,
        rejected = stats.rejected,
        "Finished processing messages"
    );

    ensure_all_accepted(&stats)
}

/// Where messages are read from
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputSource {
    File(String),
    Stdin,
}

/// CLI argument first, then `INPUT_PATH`, then stdin
fn select_input(arg: Option<String>, config: &Config) -> InputSource {
    match arg.filter(|path| !path.trim().is_empty()) {
        Some(path) => InputSource::File(path),
        None => match &config.input_path {
            Some(path) => InputSource::File(path.clone()),
            None => InputSource::Stdin,
        },
    }
}

/// Fails the run when any line was rejected so the exit status is non-zero
fn ensure_all_accepted(stats: &RunStats) -> Result<()> {
    if stats.rejected > 0 {
        anyhow::bail!("{} message(s) rejected", stats.rejected);
    }
    Ok(())
}

fn load_strategy_config(config: &Config) -> Result<StrategyConfig> {
    let mut strategy = match &config.strategy_config_path {
        Some(path) => {
            info!("Loading strategy config from {}", path);
            StrategyConfig::load(path)?
        }
        None => StrategyConfig::default(),
    };

    if let Some(threshold) = config.vote_threshold {
        strategy = strategy.with_threshold(threshold);
    }

    strategy.validate()?;
    Ok(strategy)
}

/// Parse one NDJSON line into a record; only JSON objects are accepted
fn parse_record(line: &str) -> Result<RawMessage> {
    match serde_json::from_str::<Value>(line).context("Malformed JSON")? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("Expected a JSON object, got {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Feed every non-blank line through the processor, writing enriched records
/// as NDJSON. Bad lines are logged and counted, never fatal.
async fn run<S, R, W>(processor: &Processor<S>, reader: R, mut writer: W) -> Result<RunStats>
where
    S: SchemaCheck,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = RunStats::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let record = match parse_record(&line) {
            Ok(record) => record,
            Err(e) => {
                error!(line = line_no, "Skipping unreadable message: {:#}", e);
                stats.rejected += 1;
                continue;
            }
        };

        match processor.process(record) {
            Ok(enriched) => {
                let mut out = serde_json::to_vec(&enriched)?;
                out.push(b'\n');
                writer.write_all(&out).await.context("Failed to write output")?;
                stats.processed += 1;
            }
            Err(e) => {
                error!(line = line_no, "Rejected message: {}", e);
                stats.rejected += 1;
            }
        }
    }

    writer.flush().await.context("Failed to flush output")?;
    Ok(stats)
}
