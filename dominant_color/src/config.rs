use std::{env, fmt::Display, num::NonZeroU64, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::core_modules::quantizer::quantizer::DEFAULT_MAX_DEPTH;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("dominant_color/", env!("CARGO_PKG_VERSION"));

/// Configuration for the ColorPipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// How many times a bucket may be split. 1 means a single split.
    pub max_depth: usize,
    /// Upper bound on a single image fetch, connect through body.
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Overlays `ACCENT_MAX_DEPTH` and `ACCENT_FETCH_TIMEOUT_SECS` on the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_depth: try_load("ACCENT_MAX_DEPTH", defaults.max_depth),
            // Zero would time every request out immediately, so it parses as invalid.
            fetch_timeout: Duration::from_secs(
                try_load(
                    "ACCENT_FETCH_TIMEOUT_SECS",
                    NonZeroU64::new(defaults.fetch_timeout.as_secs()).unwrap_or(NonZeroU64::MIN),
                )
                .get(),
            ),
            ..defaults
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or(key, env::var(key).ok(), default)
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_split_once() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("dominant_color/"));
    }

    #[test]
    fn parses_set_values() {
        assert_eq!(parse_or("DEPTH", Some(" 3 ".to_string()), 1usize), 3);
    }

    #[test]
    fn falls_back_when_missing_or_invalid() {
        assert_eq!(parse_or("DEPTH", None, 1usize), 1);
        assert_eq!(parse_or("DEPTH", Some("deep".to_string()), 1usize), 1);
        assert_eq!(parse_or("TIMEOUT", Some("-5".to_string()), 10u64), 10);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let ten = NonZeroU64::new(10).unwrap();
        assert_eq!(parse_or("TIMEOUT", Some("0".to_string()), ten), ten);
        assert_eq!(parse_or("TIMEOUT", Some("3".to_string()), ten).get(), 3);
    }
}
