//! Process configuration, read once at cold start.

use std::env;

use crate::Error;

const LOG_LEVEL: &str = "LOG_LEVEL";
const ENDPOINT_URL: &str = "WAFV2_ENDPOINT_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: tracing::Level,
    /// Overrides the WAFv2 endpoint, e.g. for a local emulator.
    pub endpoint_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            endpoint_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset and empty
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_level = match value(LOG_LEVEL) {
            Some(level) => level
                .trim()
                .parse::<tracing::Level>()
                .map_err(|e| Error::InvalidConfig {
                    key: LOG_LEVEL,
                    message: e.to_string(),
                })?,
            None => Self::default().log_level,
        };

        Ok(Self {
            log_level,
            endpoint_url: value(ENDPOINT_URL),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
        assert_eq!(
            Config::from_lookup(lookup(&[("WAFV2_ENDPOINT_URL", " ")])).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn reads_values() {
        let config = Config::from_lookup(lookup(&[
            ("LOG_LEVEL", "debug"),
            ("WAFV2_ENDPOINT_URL", "http://localhost:4566"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("LOG_LEVEL", "chatty")])),
            Err(Error::InvalidConfig {
                key: "LOG_LEVEL",
                ..
            })
        ));
    }
}
