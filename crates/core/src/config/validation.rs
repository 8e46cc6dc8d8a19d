//! Configuration validation rules.
//!
//! This module provides validation logic for `PortalConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::PortalConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl PortalConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `bucket` is empty or contains path separators
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.is_empty() {
            return Err(ConfigError::Invalid { field: "bucket".into(), reason: "must not be empty".into() });
        }
        if self.bucket.contains('/') || self.bucket.contains('\\') || self.bucket.contains("..") {
            return Err(ConfigError::Invalid {
                field: "bucket".into(),
                reason: "must not contain path separators".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.data_dir.as_os_str().is_empty() {
            tracing::warn!("data_dir is empty; bucket files will land in the working directory");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_bucket() {
        let config = PortalConfig { bucket: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bucket"));
    }

    #[test]
    fn test_validate_bucket_with_separator() {
        let config = PortalConfig { bucket: "a/b".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bucket"));
    }

    #[test]
    fn test_validate_bucket_with_traversal() {
        let config = PortalConfig { bucket: "..".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bucket"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = PortalConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }
}
