use crate::client::DEFAULT_MAX_LOCATION_FOLLOWS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Client configuration, usually read from `hal.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Root URL of the API; relative URIs resolve against it
    pub root_url: String,
    /// Default headers sent with every request
    pub headers: Option<HashMap<String, String>>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Whether the transport follows 3xx redirects
    pub follow_redirects: Option<bool>,
    /// Bound on consecutive `201 Created` Location follows
    pub max_location_follows: Option<usize>,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the root URL
    pub fn new<S: Into<String>>(root_url: S) -> Self {
        Self {
            root_url: root_url.into(),
            headers: None,
            timeout_seconds: None,
            follow_redirects: None,
            max_location_follows: None,
        }
    }

    pub fn timeout(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn follows_redirects(&self) -> bool {
        self.follow_redirects.unwrap_or(true)
    }

    pub fn location_follow_limit(&self) -> usize {
        self.max_location_follows
            .unwrap_or(DEFAULT_MAX_LOCATION_FOLLOWS)
    }
}
