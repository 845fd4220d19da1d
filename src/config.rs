use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENDPOINT_HOST: &str = "m.client.10010.com";
pub const DEFAULT_LOGIN_URL: &str = "http://wap.10010.com/mobileService/myunicom.htm";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1";

/// Runtime configuration. Every field has a default, so an absent or
/// partial `config.yaml` is fine.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Host serving `queryUserInfoSeven.htm`
    pub endpoint_host: String,
    /// Page opened in the login window
    pub login_url: String,
    /// Sent on the usage request and by the login window
    pub user_agent: String,
    /// Global timeout for the usage request
    pub request_timeout_secs: u64,
    pub login: LoginConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoginConfig {
    /// Delay between probe injections. Default: 1000
    pub poll_interval_ms: u64,
    /// Probe injections before giving up. Default: 600 (ten minutes)
    pub max_poll_attempts: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// How long until the widget asks to be refreshed. Default: 60
    pub refresh_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint_host: DEFAULT_ENDPOINT_HOST.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 15,
            login: LoginConfig::default(),
            widget: WidgetConfig::default(),
        }
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_poll_attempts: 600,
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(yaml).context("Failed to parse config file as YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.endpoint_host.trim().is_empty() {
            anyhow::bail!("endpoint_host must not be empty");
        }
        if self.login_url.trim().is_empty() {
            anyhow::bail!("login_url must not be empty");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        if self.login.poll_interval_ms == 0 {
            anyhow::bail!("login.poll_interval_ms must be at least 1");
        }
        if self.login.max_poll_attempts == 0 {
            anyhow::bail!("login.max_poll_attempts must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
