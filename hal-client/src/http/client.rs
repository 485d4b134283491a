use crate::config::ClientConfig;
use crate::error::{HalError, Result, TransportError};
use crate::http::{RequestBuilderImpl, ResponseConverterImpl};
use crate::traits::HttpTransport;
use crate::types::{HalRequest, HttpResponse};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

/// HTTP transport backed by reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    request_builder: RequestBuilderImpl,
    response_converter: ResponseConverterImpl,
}

impl ReqwestTransport {
    /// Create a transport with timeout and redirect policy from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout()))
            .redirect(if config.follows_redirects() {
                reqwest::redirect::Policy::default()
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| HalError::invalid_config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            request_builder: RequestBuilderImpl::new(),
            response_converter: ResponseConverterImpl::new(),
        }
    }

    async fn execute(&self, request: HalRequest) -> std::result::Result<HttpResponse, TransportError> {
        let request = self.request_builder.build_request(request);
        trace!(method = %request.method(), url = %request.url(), "executing reqwest request");

        let response = self.client.execute(request).await?;
        Ok(self.response_converter.convert_response(response).await)
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HalRequest) -> BoxFuture<'_, std::result::Result<HttpResponse, TransportError>> {
        self.execute(request).boxed()
    }
}
