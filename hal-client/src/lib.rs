//! HAL Client - navigate hypermedia APIs that speak `application/hal+json`
//!
//! A `HalClient` fetches documents relative to a root URL and turns them into
//! immutable `HalResource` values. Resources expose their properties, their
//! links (with curie and URI template support) and their embedded resources,
//! and can follow links to fetch further resources.

// Core modules
pub mod config;
pub mod error;
pub mod types;
pub mod traits;

// Shared utility modules
pub mod url_builder;
pub mod template;
pub mod relation;
mod entries;

// Main functionality modules
pub mod client;
pub mod classifier;
pub mod http;
pub mod link;
pub mod options;
pub mod resource;
pub mod testing;

// Re-export main types for convenience
pub use classifier::{Classification, ResponseClassifier, VALID_CONTENT_TYPES};
pub use client::HalClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{BadResponse, HalError, Result, TransportError};
pub use http::ReqwestTransport;
pub use link::HalLink;
pub use options::{Query, QueryValue, RequestBody, RequestOptions};
pub use resource::HalResource;
pub use template::{VarValue, Variables};
pub use traits::HttpTransport;
pub use types::{HalRequest, HttpResponse, Outcome};
pub use reqwest::{Method, Version};

// Re-export utility modules for advanced usage
pub use url_builder::UrlBuilder;

/// GET `uri` relative to `root_url` with a default client
pub async fn fetch(root_url: &str, uri: &str) -> Result<Outcome> {
    HalClient::new(root_url)?
        .get(uri, RequestOptions::default())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Test that error types work correctly
    #[test]
    fn test_error_types() {
        let error = HalError::invalid_config("test error");
        assert!(error.to_string().contains("Invalid configuration"));

        let error = HalError::unknown_link("next");
        assert!(error.is_invalid_argument());
        assert_eq!(error.to_string(), "Unknown link \"next\".");
    }

    /// Test that validation rejects an empty configuration
    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("http://example.com").validate().is_ok());
    }

    /// Test the pieces working together without a network
    #[tokio::test]
    async fn test_navigate_with_mock_transport() {
        let transport = testing::MockTransport::new().with_response(
            HttpResponse::new(200)
                .with_header("Content-Type", "application/hal+json")
                .with_body(
                    json!({
                        "_links": {"documents": {"href": "/documents{?page}", "templated": true}}
                    })
                    .to_string(),
                ),
        );
        let client = HalClient::with_transport("http://example.com", transport.clone()).unwrap();

        let root = client.root(RequestOptions::new()).await.unwrap().into_resource().unwrap();
        let link = root.first_link("documents").unwrap().unwrap();
        link.get(&Variables::new().with("page", "2"), RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().unwrap().url.as_str(),
            "http://example.com/documents?page=2"
        );
    }
}
