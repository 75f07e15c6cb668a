use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

/// NeoWs refuses feed windows longer than a week.
pub const MAX_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    pub n2yo: N2yoConfig,
    pub nasa: NasaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
    /// Upstream request timeout, e.g. `10s`.
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub upstream_timeout: Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: default_origins(),
            upstream_timeout: default_timeout(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_origins() -> Vec<String> {
    ["http://localhost:5173", "http://localhost:5174", "http://localhost:5177"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(text.trim()).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Deserialize)]
pub struct N2yoConfig {
    pub api_key: String,
    #[serde(default = "default_n2yo_url")]
    pub base_url: String,
    /// N2YO category id; 1 is the brightest objects.
    #[serde(default = "default_category")]
    pub category: u32,
}

fn default_n2yo_url() -> String {
    "https://api.n2yo.com/rest/v1".to_string()
}

fn default_category() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct NasaConfig {
    pub api_key: String,
    #[serde(default = "default_nasa_url")]
    pub base_url: String,
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_nasa_url() -> String {
    "https://api.nasa.gov/neo/rest/v1".to_string()
}

fn default_window_days() -> i64 {
    7
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_WINDOW_DAYS).contains(&self.nasa.window_days) {
            return Err(ConfigError::Invalid(format!(
                "nasa.window_days must be between 0 and {}, got {}",
                MAX_WINDOW_DAYS, self.nasa.window_days
            )));
        }
        if self.web.upstream_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "web.upstream_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = Config::from_yaml(
            "n2yo:\n  api_key: abc\nnasa:\n  api_key: DEMO_KEY\n",
        )
        .unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.web.allowed_origins.len(), 3);
        assert_eq!(config.n2yo.category, 1);
        assert_eq!(config.n2yo.base_url, "https://api.n2yo.com/rest/v1");
        assert_eq!(config.nasa.window_days, 7);
        assert_eq!(config.web.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_yaml(
            r#"
web:
  bind: 127.0.0.1:9000
  allowed_origins: ["https://globe.example"]
  upstream_timeout: 2s 500ms
n2yo:
  api_key: abc
  category: 2
nasa:
  api_key: xyz
  window_days: 3
"#,
        )
        .unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.web.allowed_origins, ["https://globe.example"]);
        assert_eq!(config.web.upstream_timeout, Duration::from_millis(2500));
        assert_eq!(config.n2yo.category, 2);
        assert_eq!(config.nasa.window_days, 3);
    }

    #[test]
    fn missing_keys_fail() {
        assert!(matches!(
            Config::from_yaml("web:\n  bind: 0.0.0.0:1\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn unparseable_timeout_is_rejected() {
        let result = Config::from_yaml(
            "web:\n  upstream_timeout: ten seconds\nn2yo:\n  api_key: a\nnasa:\n  api_key: b\n",
        );
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Config::from_yaml(
            "web:\n  upstream_timeout: 0s\nn2yo:\n  api_key: a\nnasa:\n  api_key: b\n",
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn window_outside_a_week_is_rejected() {
        for days in [-3, 8, i64::MAX] {
            let yaml = format!("n2yo:\n  api_key: a\nnasa:\n  api_key: b\n  window_days: {days}\n");
            assert!(
                matches!(Config::from_yaml(&yaml), Err(ConfigError::Invalid(_))),
                "window_days {days}"
            );
        }
        let yaml = "n2yo:\n  api_key: a\nnasa:\n  api_key: b\n  window_days: 0\n";
        assert_eq!(Config::from_yaml(yaml).unwrap().nasa.window_days, 0);
    }
}
