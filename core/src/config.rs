//! Process-wide client configuration.
//!
//! Applied once when the transport and executor are built and read-only
//! afterwards. There is no per-call override.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";
const USER_AGENT_ENV: &str = "REQUEST_USER_AGENT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Whole-call timeout, in seconds.
    pub timeout_secs: u64,
    /// Connection establishment timeout, in seconds. Capped by `timeout_secs`.
    pub connect_timeout_secs: u64,
    pub user_agent: Option<String>,
    /// Extra headers sent with every call.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: None,
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `REQUEST_TIMEOUT_SECS` and `REQUEST_USER_AGENT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: TIMEOUT_ENV,
                        value: raw,
                    })
                }
            };
        }
        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|a| !a.is_empty()) {
            config.user_agent = Some(agent);
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.min(self.timeout_secs))
    }

    /// Configured headers, followed by `User-Agent` when one is set.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();
        if let Some(agent) = &self.user_agent {
            headers.push(("User-Agent".to_string(), agent.clone()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn environment_overrides_timeout_and_agent() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("REQUEST_TIMEOUT_SECS", "15"),
            ("REQUEST_USER_AGENT", "client/2.0"),
        ]))
        .unwrap();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.user_agent.as_deref(), Some("client/2.0"));
    }

    #[test]
    fn rejects_bad_timeout() {
        for raw in ["abc", "0", "-5"] {
            let err = ClientConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { name: "REQUEST_TIMEOUT_SECS", .. }));
        }
    }

    #[test]
    fn connect_timeout_never_exceeds_call_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let short = ClientConfig {
            timeout_secs: 2,
            ..ClientConfig::default()
        };
        assert_eq!(short.connect_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn user_agent_is_appended_to_headers() {
        let config = ClientConfig {
            user_agent: Some("client/1.0".to_string()),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            ..ClientConfig::default()
        };
        assert_eq!(
            config.default_headers(),
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), "client/1.0".to_string()),
            ]
        );
    }

    #[test]
    fn deserializes_partial_json() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs":15}"#).unwrap();
        assert_eq!(config.timeout_secs, 15);
        assert!(config.user_agent.is_none());
        assert!(config.headers.is_empty());
    }
}
