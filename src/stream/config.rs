//! Stream configuration from environment variables

use std::env;
use std::time::Duration;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for the transaction stream
///
/// Loaded from environment variables with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Period between ticks in milliseconds
    pub tick_interval_ms: u64,

    /// Transactions produced synchronously at startup
    pub seed_batch_size: usize,

    /// Transactions kept in the rolling window
    pub window_capacity: usize,

    /// Alerts kept in the alert feed
    pub alert_capacity: usize,

    /// Pending pause/resume commands before senders wait
    pub command_buffer: usize,

    /// Fixed RNG seed for reproducible runs (entropy when unset)
    pub rng_seed: Option<u64>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2_500,
            seed_batch_size: 8,
            window_capacity: 50,
            alert_capacity: 10,
            command_buffer: 32,
            rng_seed: None,
        }
    }
}

impl StreamConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `TICK_INTERVAL_MS` (default: 2500)
    /// - `SEED_BATCH_SIZE` (default: 8)
    /// - `WINDOW_CAPACITY` (default: 50)
    /// - `ALERT_CAPACITY` (default: 10)
    /// - `COMMAND_BUFFER` (default: 32)
    /// - `RNG_SEED` (default: unset)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            tick_interval_ms: parse_or(&lookup, "TICK_INTERVAL_MS", defaults.tick_interval_ms)?,
            seed_batch_size: parse_or(&lookup, "SEED_BATCH_SIZE", defaults.seed_batch_size)?,
            window_capacity: parse_or(&lookup, "WINDOW_CAPACITY", defaults.window_capacity)?,
            alert_capacity: parse_or(&lookup, "ALERT_CAPACITY", defaults.alert_capacity)?,
            command_buffer: parse_or(&lookup, "COMMAND_BUFFER", defaults.command_buffer)?,
            rng_seed: match lookup("RNG_SEED") {
                Some(raw) => Some(parse_value("RNG_SEED", &raw)?),
                None => None,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "TICK_INTERVAL_MS must be greater than 0".to_string(),
            ));
        }
        if self.window_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "WINDOW_CAPACITY must be greater than 0".to_string(),
            ));
        }
        if self.alert_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "ALERT_CAPACITY must be greater than 0".to_string(),
            ));
        }
        if self.command_buffer == 0 {
            return Err(ConfigError::InvalidValue(
                "COMMAND_BUFFER must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StreamConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, StreamConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(2_500));
        assert_eq!(config.seed_batch_size, 8);
        assert_eq!(config.window_capacity, 50);
        assert_eq!(config.alert_capacity, 10);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_custom_config() {
        let config = StreamConfig::from_lookup(lookup_from(&[
            ("TICK_INTERVAL_MS", "1000"),
            ("SEED_BATCH_SIZE", "3"),
            ("WINDOW_CAPACITY", " 20 "),
            ("RNG_SEED", "42"),
        ]))
        .unwrap();

        assert_eq!(config.tick_interval_ms, 1_000);
        assert_eq!(config.seed_batch_size, 3);
        assert_eq!(config.window_capacity, 20);
        assert_eq!(config.alert_capacity, 10);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = StreamConfig::from_lookup(lookup_from(&[("TICK_INTERVAL_MS", "fast")])).unwrap_err();
        assert!(err.to_string().contains("TICK_INTERVAL_MS"));
    }

    #[test]
    fn test_rejects_zero_interval_and_capacity() {
        assert!(StreamConfig::from_lookup(lookup_from(&[("TICK_INTERVAL_MS", "0")])).is_err());
        assert!(StreamConfig::from_lookup(lookup_from(&[("WINDOW_CAPACITY", "0")])).is_err());
        assert!(StreamConfig::from_lookup(lookup_from(&[("ALERT_CAPACITY", "0")])).is_err());
    }

    #[test]
    fn test_zero_seed_batch_is_allowed() {
        let config = StreamConfig::from_lookup(lookup_from(&[("SEED_BATCH_SIZE", "0")])).unwrap();
        assert_eq!(config.seed_batch_size, 0);
    }
}
