//! Dashboard client configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every backend path; empty means same origin.
    pub api_base_url: String,
    /// How long success alerts stay up before dismissing themselves.
    pub success_alert_ms: u32,
    /// Where log records are forwarded, if anywhere.
    pub log_endpoint: Option<String>,
    /// Element ids that get the currency input behaviour.
    pub currency_field_ids: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            success_alert_ms: 2000,
            log_endpoint: None,
            currency_field_ids: vec!["valor".to_string(), "edit-valor".to_string()],
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!(base_url = %config.api_base_url, "loaded dashboard config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.ends_with('/') {
            return Err(ConfigError::Invalid(
                "api_base_url must not end with '/'".to_string(),
            ));
        }
        if self.success_alert_ms == 0 {
            return Err(ConfigError::Invalid(
                "success_alert_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute or same-origin URL for a backend path starting with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}
