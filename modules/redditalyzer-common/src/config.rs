use std::env;

use crate::error::{RedditalyzerError, Result};

const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_PUSHSHIFT_BASE_URL: &str = "https://api.pushshift.io";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Reddit
    pub reddit_base_url: String,
    pub reddit_user_agent: String,

    // Pushshift
    pub pushshift_base_url: String,
    pub pushshift_token: Option<String>,

    // Attribution
    pub reference_community: String,
    pub contribution_limit: u32,
    pub fetch_concurrency: usize,

    // Harvest
    pub max_pages: u32,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| RedditalyzerError::Config(format!("{key} environment variable is required")))
        };

        Ok(Self {
            reddit_base_url: lookup("REDDIT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_REDDIT_BASE_URL.to_string()),
            reddit_user_agent: required("REDDIT_USER_AGENT")?,
            pushshift_base_url: lookup("PUSHSHIFT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PUSHSHIFT_BASE_URL.to_string()),
            pushshift_token: lookup("PUSHSHIFT_TOKEN").filter(|v| !v.is_empty()),
            reference_community: required("REFERENCE_COMMUNITY")?,
            contribution_limit: parse_or(&lookup, "CONTRIBUTION_LIMIT", 100)?,
            fetch_concurrency: parse_or(&lookup, "FETCH_CONCURRENCY", 1usize)?.max(1),
            max_pages: parse_or(&lookup, "MAX_PAGES", 50)?,
        })
    }

    /// Log config values with secrets truncated.
    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  REDDIT_BASE_URL: {}", self.reddit_base_url);
        tracing::info!("  REDDIT_USER_AGENT: {}", self.reddit_user_agent);
        tracing::info!("  PUSHSHIFT_BASE_URL: {}", self.pushshift_base_url);
        tracing::info!("  PUSHSHIFT_TOKEN: {}", preview_opt(&self.pushshift_token));
        tracing::info!("  REFERENCE_COMMUNITY: {}", self.reference_community);
        tracing::info!("  CONTRIBUTION_LIMIT: {}", self.contribution_limit);
        tracing::info!("  FETCH_CONCURRENCY: {}", self.fetch_concurrency);
        tracing::info!("  MAX_PAGES: {}", self.max_pages);
    }
}

fn preview_opt(val: &Option<String>) -> String {
    match val {
        Some(v) if !v.is_empty() => {
            let head: String = v.chars().take(5).collect();
            format!("{}...({} chars)", head, v.chars().count())
        }
        _ => "<not set>".to_string(),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| RedditalyzerError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}
