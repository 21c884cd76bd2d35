//! Gateway configuration read from the process environment.

use std::time::Duration;

/// Environment variable holding the API base URL.
pub const API_ROOT_VAR: &str = "MIRLO_API_DOMAIN";
/// Environment variable holding an optional request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "MIRLO_API_TIMEOUT_SECS";
/// Environment variable overriding the user agent.
pub const USER_AGENT_VAR: &str = "MIRLO_API_USER_AGENT";

const DEFAULT_USER_AGENT: &str = concat!("mirlo-api/", env!("CARGO_PKG_VERSION"));

/// Transport settings for a [`Client`](crate::Client).
///
/// The gateway itself never times out; `timeout` is handed to the transport
/// as-is and `None` leaves requests unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Config pointing at `base_url`, with the same normalization as the
    /// environment value.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            ..Self::default()
        }
    }

    /// Reads [`API_ROOT_VAR`], [`TIMEOUT_VAR`] and [`USER_AGENT_VAR`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_ROOT_VAR)
            .map(|raw| normalize_base_url(&raw))
            .unwrap_or_default();
        let timeout = lookup(TIMEOUT_VAR)
            .and_then(|val| val.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let user_agent = lookup(USER_AGENT_VAR)
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        Self {
            base_url,
            timeout,
            user_agent,
        }
    }

    /// Replaces the base URL, normalized like the environment value.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

/// Removes the first literal space from a configured base URL. Any other
/// whitespace, and any later space, is kept.
pub fn normalize_base_url(raw: &str) -> String {
    raw.replacen(' ', "", 1)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn strips_only_the_first_space() {
        assert_eq!(normalize_base_url(" https://api.mirlo.space"), "https://api.mirlo.space");
        assert_eq!(normalize_base_url("https://api. mirlo. space"), "https://api.mirlo. space");
        assert_eq!(normalize_base_url("https://api.mirlo.space"), "https://api.mirlo.space");
    }

    #[test]
    fn reads_all_values_from_lookup() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            (API_ROOT_VAR, "https://api.mirlo.space/v1 "),
            (TIMEOUT_VAR, "15"),
            (USER_AGENT_VAR, "mirlo-test"),
        ]));
        assert_eq!(config.base_url, "https://api.mirlo.space/v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.user_agent, "mirlo-test");
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = GatewayConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, "soon")]));
        assert_eq!(config.base_url, "");
        assert_eq!(config.timeout, None);
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn builder_overrides() {
        let config = GatewayConfig::new("http://localhost:3000")
            .with_base_url(" http://localhost:4000")
            .with_timeout(Duration::from_secs(2))
            .with_user_agent("ua");
        assert_eq!(config.base_url, "http://localhost:4000");
        assert_eq!(config.timeout, Some(Duration::from_secs(2)));
        assert_eq!(config.user_agent, "ua");
    }
}
