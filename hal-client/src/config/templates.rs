use crate::error::Result;
use std::path::Path;

/// Starter `hal.toml` for `root_url`
pub fn generate_default_config_template(root_url: &str) -> String {
    format!(
        r#"# HAL client configuration

# Root URL of the API; relative URIs are resolved against it
root_url = "{root_url}"

# Request timeout in seconds
timeout_seconds = 30

# Whether HTTP redirects are followed by the transport
follow_redirects = true

# How many consecutive "201 Created" Location headers are followed
max_location_follows = 5

# Default headers sent with every request
# [headers]
# Authorization = "Bearer <token>"
"#
    )
}

/// Write the starter configuration unless the file exists.
///
/// Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P, root_url: &str, force: bool) -> Result<bool> {
    let path = path.as_ref();

    if path.exists() && !force {
        return Ok(false);
    }

    std::fs::write(path, generate_default_config_template(root_url))?;
    Ok(true)
}
