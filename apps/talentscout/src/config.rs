use anyhow::{bail, Context, Result};

use crate::interview::generator::BatchFailurePolicy;

const DEFAULT_INFERENCE_API_URL: &str =
    "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-alpha";

/// Application configuration loaded from environment variables.
/// Startup fails if the inference API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub inference_api_url: String,
    pub inference_api_key: String,
    pub inference_timeout_secs: u64,
    pub min_questions: usize,
    pub max_questions: usize,
    pub batch_failure_policy: BatchFailurePolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            inference_api_url: std::env::var("INFERENCE_API_URL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_API_URL.to_string()),
            inference_api_key: require_env("HF_API_KEY")?,
            inference_timeout_secs: parse_env("INFERENCE_TIMEOUT_SECS", 120)?,
            min_questions: parse_env("MIN_QUESTIONS", 3)?,
            max_questions: parse_env("MAX_QUESTIONS", 5)?,
            batch_failure_policy: std::env::var("BATCH_FAILURE_POLICY")
                .ok()
                .map(|v| v.parse::<BatchFailurePolicy>())
                .transpose()?
                .unwrap_or_default(),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Question counts map one-to-one onto prompt tiers, so the range must fit in 1..=5.
    fn validate(&self) -> Result<()> {
        if self.min_questions == 0 || self.min_questions > self.max_questions {
            bail!(
                "MIN_QUESTIONS ({}) must be at least 1 and no greater than MAX_QUESTIONS ({})",
                self.min_questions,
                self.max_questions
            );
        }
        if self.max_questions > 5 {
            bail!(
                "MAX_QUESTIONS ({}) cannot exceed the number of question tiers (5)",
                self.max_questions
            );
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            inference_api_url: "http://127.0.0.1:9/models/test".to_string(),
            inference_api_key: "test-key".to_string(),
            inference_timeout_secs: 5,
            min_questions: 3,
            max_questions: 5,
            batch_failure_policy: BatchFailurePolicy::DiscardAll,
            port: 8080,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
