use crate::config::types::ClientConfig;
use crate::error::{HalError, Result};
use std::path::Path;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a TOML file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| HalError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load and validate, naming the file in errors
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(HalError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            HalError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        crate::config::ConfigValidatorImpl::new().validate_with_context(&config, path_ref)?;
        Ok(config)
    }
}

impl ClientConfig {
    pub fn builder() -> crate::config::builder::ClientConfigBuilder {
        crate::config::builder::ClientConfigBuilder::new()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }
}
