use anyhow::{Context, Result};

use crate::layout::ReconcilePolicy;

/// Application configuration loaded from environment variables.
/// Every variable has a default; without `PERSISTENCE_API_URL` resumes are kept in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub persistence_api_url: Option<String>,
    pub persistence_api_token: Option<String>,
    pub persistence_timeout_secs: u64,
    pub export_timeout_secs: u64,
    pub reconcile_policy: ReconcilePolicy,
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            persistence_api_url: optional_env("PERSISTENCE_API_URL"),
            persistence_api_token: optional_env("PERSISTENCE_API_TOKEN"),
            persistence_timeout_secs: parse_env("PERSISTENCE_TIMEOUT_SECS", 30)?,
            export_timeout_secs: parse_env("EXPORT_TIMEOUT_SECS", 60)?,
            reconcile_policy: match optional_env("RECONCILE_POLICY") {
                Some(raw) => raw
                    .parse()
                    .map_err(anyhow::Error::msg)
                    .context("RECONCILE_POLICY must be 'clear' or 'preserve'")?,
                None => ReconcilePolicy::default(),
            },
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 3600)?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        assert_eq!(
            parse_env::<u64>("BUILDER_TEST_UNSET_VARIABLE", 42).unwrap(),
            42
        );
    }
}
