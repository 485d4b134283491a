use crate::error::{Result, TransportError};
use crate::types::{HalRequest, HttpResponse};
use futures::future::BoxFuture;

/// Trait for HTTP transport implementations
///
/// `send` must return a response for every status code the server produces and
/// fail only when no response could be obtained (DNS, connection, TLS errors).
/// The future is boxed so the trait stays object safe and clients can share a
/// transport behind an `Arc<dyn HttpTransport>`.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: HalRequest) -> BoxFuture<'_, std::result::Result<HttpResponse, TransportError>>;
}

/// Trait for configuration validation
pub trait ConfigValidator: Send + Sync {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> Result<()>;
}
