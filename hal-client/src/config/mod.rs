pub mod types;
pub mod loader;
pub mod builder;
pub mod validator;
pub mod templates;

pub use types::ClientConfig;
pub use loader::{ConfigLoader, DefaultConfigLoader};
pub use builder::ClientConfigBuilder;
pub use validator::ConfigValidatorImpl;
pub use templates::{ensure_config_file_exists, generate_default_config_template};
