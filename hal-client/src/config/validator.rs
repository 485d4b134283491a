use crate::config::types::ClientConfig;
use crate::error::{HalError, Result};
use crate::traits::ConfigValidator;
use reqwest::header::{HeaderName, HeaderValue};
use std::path::Path;

/// Upper bound accepted for `max_location_follows`
pub const MAX_LOCATION_FOLLOWS_LIMIT: usize = 20;

/// Configuration validator implementation
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = ClientConfig;

    fn validate(&self, config: &ClientConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }
}

impl ConfigValidatorImpl {
    pub fn new() -> Self {
        Self
    }

    /// Validate, naming `config_path` in error messages
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &ClientConfig,
        config_path: P,
    ) -> Result<()> {
        let config_path_str = config_path.as_ref().to_string_lossy();

        if config.root_url.trim().is_empty() {
            return Err(HalError::invalid_config(format!(
                "No root_url configured in {}.",
                config_path_str
            )));
        }

        match url::Url::parse(&config.root_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => {
                return Err(HalError::invalid_config(format!(
                    "Invalid root_url '{}' in {}. Must be an absolute http(s) URL.",
                    config.root_url, config_path_str
                )));
            }
        }

        if let Some(timeout) = config.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(HalError::invalid_config(
                    "timeout_seconds must be between 1 and 300 seconds".to_string(),
                ));
            }
        }

        if let Some(max) = config.max_location_follows {
            if max > MAX_LOCATION_FOLLOWS_LIMIT {
                return Err(HalError::invalid_config(format!(
                    "max_location_follows must be at most {}",
                    MAX_LOCATION_FOLLOWS_LIMIT
                )));
            }
        }

        if let Some(headers) = &config.headers {
            for (name, value) in headers {
                if HeaderName::from_bytes(name.as_bytes()).is_err() {
                    return Err(HalError::invalid_config(format!(
                        "Invalid header name '{}' in {}",
                        name, config_path_str
                    )));
                }
                if HeaderValue::from_str(value).is_err() {
                    return Err(HalError::invalid_config(format!(
                        "Invalid value for header '{}' in {}",
                        name, config_path_str
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidatorImpl::new().validate(self)
    }
}
