//! Environment-driven configuration.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

/// Default redemptions per child per calendar day. The product copy quotes
/// two per day; `DAILY_USAGE_LIMIT` overrides it.
pub const DEFAULT_DAILY_USAGE_LIMIT: u32 = 2;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origin: String,
    pub daily_usage_limit: u32,
    pub keyword_ignore_case: bool,
    /// Optional JSON file of accounts/children/stores loaded at startup.
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: try_load("PORT", "3000"),
            allowed_origin: try_load("ALLOWED_ORIGIN", "http://localhost:8080"),
            daily_usage_limit: try_load(
                "DAILY_USAGE_LIMIT",
                &DEFAULT_DAILY_USAGE_LIMIT.to_string(),
            ),
            keyword_ignore_case: try_load("KEYWORD_IGNORE_CASE", "true"),
            seed_path: env::var("SEED_PATH").ok().map(PathBuf::from),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            allowed_origin: "http://localhost:8080".to_string(),
            daily_usage_limit: DEFAULT_DAILY_USAGE_LIMIT,
            keyword_ignore_case: true,
            seed_path: None,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = match env::var(key) {
        Ok(value) => value,
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?} ({e}), using default: {default}");
        default
            .parse()
            .unwrap_or_else(|e| panic!("Default for {key} does not parse: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.daily_usage_limit, 2);
        assert!(config.keyword_ignore_case);
        assert!(config.seed_path.is_none());
    }
}
