use anyhow::Context;
use dotenv::dotenv;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unsupported LOG_FORMAT '{}', expected 'text' or 'json'", other),
        }
    }
}

pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub input_path: Option<String>,
    pub strategy_config_path: Option<String>,
    pub vote_threshold: Option<usize>,
    pub schema_required_fields: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup instead of the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vote_threshold = match lookup("STRATEGY_VOTE_THRESHOLD") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<usize>()
                    .with_context(|| format!("STRATEGY_VOTE_THRESHOLD must be an integer, got '{}'", raw))?,
            ),
            None => None,
        };

        let schema_required_fields = lookup("SCHEMA_REQUIRED_FIELDS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| vec!["symbol".to_string()]);

        Ok(Config {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: LogFormat::parse(&lookup("LOG_FORMAT").unwrap_or_default())?,
            input_path: lookup("INPUT_PATH").filter(|path| !path.trim().is_empty()),
            strategy_config_path: lookup("STRATEGY_CONFIG_PATH").filter(|path| !path.trim().is_empty()),
            vote_threshold,
            schema_required_fields,
        })
    }
}
