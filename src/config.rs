use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Host every request path is resolved against.
pub const DEFAULT_BASE_URL: &str = "https://e621.net/";

/// The API allows roughly one request per second.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Requests are fully serialized unless configured otherwise.
pub const DEFAULT_MAX_CONCURRENT: usize = 1;

/// Everything needed to build a [`Client`](crate::Client).
///
/// Deserializable so it can live in a config file; only `user_agent` is
/// required there, every other field falls back to its default.
///
/// ```
/// use dot621::config::Config;
///
/// let config: Config = serde_json::from_str(r#"{
///     "user_agent": "my-tool/1.0 (by someone)",
///     "min_interval": "500ms"
/// }"#).unwrap();
///
/// assert_eq!(config.min_interval, std::time::Duration::from_millis(500));
/// assert_eq!(config.max_concurrent, 1);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sent as `User-Agent` with every request. The API rejects
    /// anonymous agents, so name your project and yourself.
    pub user_agent: String,

    /// Root of the API; request paths are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum spacing between the start of two requests.
    #[serde(default = "default_min_interval", with = "humantime_serde")]
    pub min_interval: Duration,

    /// Maximum number of requests in flight at once. Must be at least 1.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Send every unauthenticated request as `GET`, whatever its method.
    #[serde(default)]
    pub force_get_when_unauthenticated: bool,

    /// Account name. Must be given together with `api_key`.
    #[serde(default)]
    pub username: Option<String>,

    /// API key for `username`.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_min_interval() -> Duration {
    DEFAULT_MIN_INTERVAL
}

const fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT
}

impl Config {
    /// Default settings for the given user agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Config {
            user_agent: user_agent.into(),
            base_url: default_base_url(),
            min_interval: DEFAULT_MIN_INTERVAL,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            force_get_when_unauthenticated: false,
            username: None,
            api_key: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url)
            .field("min_interval", &self.min_interval)
            .field("max_concurrent", &self.max_concurrent)
            .field(
                "force_get_when_unauthenticated",
                &self.force_get_when_unauthenticated,
            )
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"user_agent": "tests/1.0"}"#).unwrap();
        assert_eq!(config, Config::new("tests/1.0"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.min_interval, Duration::from_secs(1));
        assert!(!config.force_get_when_unauthenticated);
    }

    #[test]
    fn durations_are_human_readable() {
        let config: Config = serde_json::from_str(
            r#"{"user_agent": "tests/1.0", "min_interval": "2s 500ms", "max_concurrent": 4}"#,
        )
        .unwrap();
        assert_eq!(config.min_interval, Duration::from_millis(2500));
        assert_eq!(config.max_concurrent, 4);
    }

    #[test]
    fn user_agent_is_required() {
        assert!(serde_json::from_str::<Config>("{}").is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<Config>(r#"{"user_agent": "a", "min_time": 10}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn debug_hides_api_key() {
        let mut config = Config::new("tests/1.0");
        config.username = Some("someone".into());
        config.api_key = Some("hunter2".into());
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
