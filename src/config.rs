//! Runtime configuration read from environment variables.

use std::time::Duration;

use thiserror::Error;

use crate::domain::SelectionConfig;
use crate::infra::{nominatim, osrm};
use crate::util::version::default_user_agent;

pub const GEOCODER_URL_VAR: &str = "ROUTES_GEOCODER_URL";
pub const ROUTER_URL_VAR: &str = "ROUTES_ROUTER_URL";
pub const TIMEOUT_VAR: &str = "ROUTES_PROVIDER_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "ROUTES_USER_AGENT";
pub const DENSITY_MID_VAR: &str = "ROUTES_DENSITY_MID";
pub const DENSITY_HIGH_VAR: &str = "ROUTES_DENSITY_HIGH";

const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_ROAD_ALTERNATIVES: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub geocoder_url: String,
    pub router_url: String,
    pub provider_timeout: Duration,
    pub user_agent: String,
    pub road_alternatives: usize,
    pub selection: SelectionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoder_url: nominatim::DEFAULT_BASE_URL.to_string(),
            router_url: osrm::DEFAULT_BASE_URL.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            road_alternatives: DEFAULT_ROAD_ALTERNATIVES,
            selection: SelectionConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = read(GEOCODER_URL_VAR) {
            config.geocoder_url = url;
        }
        if let Some(url) = read(ROUTER_URL_VAR) {
            config.router_url = url;
        }
        if let Some(agent) = read(USER_AGENT_VAR) {
            config.user_agent = agent;
        }
        if let Some(raw) = read(TIMEOUT_VAR) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    var: TIMEOUT_VAR,
                    expected: "a positive number of seconds",
                    value: raw.clone(),
                })?;
            config.provider_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = read(DENSITY_MID_VAR) {
            config.selection.mid_density_threshold = parse_threshold(DENSITY_MID_VAR, &raw)?;
        }
        if let Some(raw) = read(DENSITY_HIGH_VAR) {
            config.selection.high_density_threshold = parse_threshold(DENSITY_HIGH_VAR, &raw)?;
        }
        if config.selection.high_density_threshold < config.selection.mid_density_threshold {
            return Err(ConfigError::Invalid {
                var: DENSITY_HIGH_VAR,
                expected: "at least the mid threshold",
                value: config.selection.high_density_threshold.to_string(),
            });
        }

        Ok(config)
    }
}

fn parse_threshold(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or(ConfigError::Invalid {
            var,
            expected: "a non-negative number",
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert_eq!(config.selection.mid_density_threshold, 60.0);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            (GEOCODER_URL_VAR, "http://geo.local/"),
            (TIMEOUT_VAR, " 2 "),
            (DENSITY_HIGH_VAR, "150"),
        ]))
        .unwrap();
        assert_eq!(config.geocoder_url, "http://geo.local/");
        assert_eq!(config.provider_timeout, Duration::from_secs(2));
        assert_eq!(config.selection.high_density_threshold, 150.0);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(Config::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(DENSITY_MID_VAR, "-3")])).is_err());
        assert!(Config::from_lookup(lookup(&[(DENSITY_MID_VAR, "200")])).is_err());
    }
}
