use crate::resource::HalResource;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Version};
use thiserror::Error;
use url::Url;

/// Request handed to a transport
#[derive(Debug, Clone)]
pub struct HalRequest {
    pub method: Method,
    pub url: Url,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl HalRequest {
    /// Create a new request without headers or body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Origin-form request target: the path (at least `/`) plus the query, if any
    pub fn request_target(&self) -> String {
        let mut target = match self.url.path() {
            "" => "/".to_string(),
            path => path.to_string(),
        };

        if let Some(query) = self.url.query() {
            target.push('?');
            target.push_str(query);
        }

        target
    }

    /// All values of a header, in the order they were added
    pub fn header(&self, name: &str) -> Vec<String> {
        header_values(&self.headers, name)
    }
}

/// Response body as delivered by the transport
#[derive(Debug, Clone)]
enum ResponseBody {
    Complete(Vec<u8>),
    Unreadable(String),
}

/// Failure to read a response body
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct BodyError(String);

/// HTTP response data with metadata
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub url: String,
    body: ResponseBody,
}

impl HttpResponse {
    /// Create an empty response with the given status
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            url: String::new(),
            body: ResponseBody::Complete(Vec::new()),
        }
    }

    /// Append a header value. Names or values that are not valid HTTP are skipped.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => tracing::warn!(name, "skipping invalid response header"),
        }
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = ResponseBody::Complete(body.into());
        self
    }

    /// Mark the body as unreadable, e.g. when the connection dropped mid-body
    #[must_use]
    pub fn with_unreadable_body<S: Into<String>>(mut self, cause: S) -> Self {
        self.body = ResponseBody::Unreadable(cause.into());
        self
    }

    #[must_use]
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Check if the response indicates an error (non-2xx status code)
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Canonical reason phrase for the status code, empty when unknown
    pub fn reason_phrase(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("")
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// All values of a header, in the order received
    pub fn header(&self, name: &str) -> Vec<String> {
        header_values(&self.headers, name)
    }

    /// Raw body bytes
    pub fn bytes(&self) -> Result<&[u8], BodyError> {
        match &self.body {
            ResponseBody::Complete(bytes) => Ok(bytes),
            ResponseBody::Unreadable(cause) => Err(BodyError(cause.clone())),
        }
    }

    /// Body decoded as UTF-8
    pub fn text(&self) -> Result<String, BodyError> {
        let bytes = self.bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|e| BodyError(e.to_string()))
    }
}

fn header_values(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect()
}

/// Result of a successful request: either a parsed resource or the untouched
/// transport response when `return_raw_response` was requested
#[derive(Debug, Clone)]
pub enum Outcome {
    Resource(HalResource),
    Raw(HttpResponse),
}

impl Outcome {
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    pub fn as_resource(&self) -> Option<&HalResource> {
        match self {
            Self::Resource(resource) => Some(resource),
            Self::Raw(_) => None,
        }
    }

    pub fn into_resource(self) -> Option<HalResource> {
        match self {
            Self::Resource(resource) => Some(resource),
            Self::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<HttpResponse> {
        match self {
            Self::Raw(response) => Some(response),
            Self::Resource(_) => None,
        }
    }
}
