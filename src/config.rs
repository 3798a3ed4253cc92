// Runtime configuration: remote service locations and HTTP behaviour.
// Everything comes from environment variables with sensible defaults so
// the tool works out of the box against the public services.

use crate::error::{Error, Result};
use std::time::Duration;

pub const DEFAULT_HLTB_BASE_URL: &str = "https://howlongtobeat.com/";
pub const DEFAULT_STEAM_API_URL: &str = "https://api.steampowered.com/";
pub const DEFAULT_STEAM_STORE_URL: &str = "https://store.steampowered.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "steam backlog rust cli";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub hltb_base_url: String,
    pub steam_api_url: String,
    pub steam_store_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hltb_base_url: DEFAULT_HLTB_BASE_URL.into(),
            steam_api_url: DEFAULT_STEAM_API_URL.into(),
            steam_store_url: DEFAULT_STEAM_STORE_URL.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Unset or blank
    /// keys fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout = match get("BACKLOG_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "BACKLOG_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            hltb_base_url: with_trailing_slash(
                &get("HLTB_BASE_URL").unwrap_or_else(|| DEFAULT_HLTB_BASE_URL.into()),
            ),
            steam_api_url: with_trailing_slash(
                &get("STEAM_API_URL").unwrap_or_else(|| DEFAULT_STEAM_API_URL.into()),
            ),
            steam_store_url: with_trailing_slash(
                &get("STEAM_STORE_URL").unwrap_or_else(|| DEFAULT_STEAM_STORE_URL.into()),
            ),
            request_timeout,
            user_agent: get("BACKLOG_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.into()),
        })
    }
}

fn with_trailing_slash(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
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
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn overrides_are_normalized() {
        let config = Config::from_lookup(lookup_from(&[
            ("HLTB_BASE_URL", "http://localhost:9000///"),
            ("STEAM_API_URL", "http://localhost:9001"),
            ("BACKLOG_TIMEOUT_SECS", " 5 "),
            ("BACKLOG_USER_AGENT", "tester"),
        ]))
        .unwrap();

        assert_eq!(config.hltb_base_url, "http://localhost:9000/");
        assert_eq!(config.steam_api_url, "http://localhost:9001/");
        assert_eq!(config.steam_store_url, DEFAULT_STEAM_STORE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "tester");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("HLTB_BASE_URL", "   ")])).unwrap();
        assert_eq!(config.hltb_base_url, DEFAULT_HLTB_BASE_URL);
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        for bad in ["0", "-3", "soon"] {
            let err = Config::from_lookup(lookup_from(&[("BACKLOG_TIMEOUT_SECS", bad)]))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "accepted {bad}");
        }
    }
}
