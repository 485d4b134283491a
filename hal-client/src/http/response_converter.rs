use crate::types::HttpResponse;
use reqwest::Response;
use tracing::warn;

/// Converts reqwest responses, reading the whole body
#[derive(Clone, Default)]
pub struct ResponseConverterImpl;

impl ResponseConverterImpl {
    pub fn new() -> Self {
        Self
    }

    /// A failed body read is kept on the response instead of failing the send
    pub async fn convert_response(&self, response: Response) -> HttpResponse {
        let converted = HttpResponse::new(response.status().as_u16())
            .with_url(response.url().to_string())
            .with_headers(response.headers().clone());

        match response.bytes().await {
            Ok(body) => converted.with_body(body.to_vec()),
            Err(e) => {
                warn!(error = %e, "failed to read response body");
                converted.with_unreadable_body(e.to_string())
            }
        }
    }
}
