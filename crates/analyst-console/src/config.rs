use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub analysis: AnalysisDefaults,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.service.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("service.base_url must not be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("service.base_url must start with http:// or https://");
        }
        if self.service.timeout_ms == 0 {
            anyhow::bail!("service.timeout_ms must be greater than zero");
        }
        if self.service.connect_timeout_ms == 0 {
            anyhow::bail!("service.connect_timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Optional fields attached to every analysis request.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnalysisDefaults {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    2_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.service.request_timeout(), Duration::from_secs(30));
        assert!(config.analysis.context.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_reads_service_section() {
        let input = r#"
[service]
base_url = "https://fraud.internal:8443/"
timeout_ms = 5000

[analysis]
context = "transaction"
amount = 120.5
"#;
        let config: Config = toml::from_str(input).unwrap();
        assert_eq!(config.service.base_url, "https://fraud.internal:8443/");
        assert_eq!(config.service.timeout_ms, 5000);
        assert_eq!(config.service.connect_timeout_ms, 2000);
        assert_eq!(config.analysis.context.as_deref(), Some("transaction"));
        assert_eq!(config.analysis.amount, Some(120.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_zero_timeout() {
        let input = r#"
[service]
timeout_ms = 0
"#;
        let config: Config = toml::from_str(input).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_rejects_non_http_base_url() {
        let input = r#"
[service]
base_url = "localhost:8000"
"#;
        let config: Config = toml::from_str(input).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_rejects_blank_base_url() {
        let input = r#"
[service]
base_url = "  "
"#;
        let config: Config = toml::from_str(input).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
