use crate::cli::{DEFAULT_CONFIG_PATH, GlobalArgs};
use crate::error::{CliError, Result};
use crate::ui;
use hal_client::ClientConfig;
use hal_client::config::ensure_config_file_exists;
use std::path::{Path, PathBuf};

const PLACEHOLDER_ROOT_URL: &str = "http://localhost:8080/";

/// Write a starter configuration file
pub fn execute(global: &GlobalArgs, force: bool) -> Result<()> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let written = write_config(&path, global.root.as_deref(), force)?;
    if written {
        ui::success_message(&format!("Created {}", path.display()));
        if global.root.is_none() {
            ui::info_message(&format!(
                "Edit root_url in {} to point at your API",
                path.display()
            ));
        }
    } else {
        ui::warning_message(&format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        ));
    }

    Ok(())
}

fn write_config(path: &Path, root: Option<&str>, force: bool) -> Result<bool> {
    let root = root.unwrap_or(PLACEHOLDER_ROOT_URL);
    if url_is_invalid(root) {
        return Err(CliError::InvalidArgument(format!("'{}' is not an absolute URL", root)));
    }

    Ok(ensure_config_file_exists(path, root, force)?)
}

fn url_is_invalid(root: &str) -> bool {
    ClientConfig::new(root).validate().is_err()
}
