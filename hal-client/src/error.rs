use crate::resource::HalResource;
use crate::types::{HalRequest, HttpResponse};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hal-client operations
pub type Result<T> = std::result::Result<T, HalError>;

/// Error types for HAL navigation
#[derive(Debug, Error)]
pub enum HalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown relation or resource name, malformed template or option.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// The transport could not produce a response at all.
    #[error("{message}")]
    HttpClient {
        message: String,
        request: Box<HalRequest>,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    BadResponse(Box<BadResponse>),
}

impl HalError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Error for a link relation that neither exists nor resolves through a curie
    pub fn unknown_link(rel: &str) -> Self {
        Self::invalid_argument(format!("Unknown link {}.", json_quote(rel)))
    }

    /// Error for an embedded resource name that is not present
    pub fn unknown_resource(name: &str) -> Self {
        Self::invalid_argument(format!("Unknown resource {}.", json_quote(name)))
    }

    /// Wrap a transport failure together with the request that triggered it
    pub fn http_client(request: HalRequest, source: TransportError) -> Self {
        Self::HttpClient {
            message: format!(
                "Exception thrown by the http client while sending request: {}.",
                source
            ),
            request: Box::new(request),
            source,
        }
    }

    pub fn bad_response(error: BadResponse) -> Self {
        Self::BadResponse(Box::new(error))
    }

    /// The bad response details, if this is a `BadResponse` error
    pub fn as_bad_response(&self) -> Option<&BadResponse> {
        match self {
            Self::BadResponse(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// The request attached to this error, if any
    pub fn request(&self) -> Option<&HalRequest> {
        match self {
            Self::HttpClient { request, .. } => Some(request),
            Self::BadResponse(error) => error.request(),
            _ => None,
        }
    }
}

fn json_quote(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Failure raised by a transport when no response could be obtained
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

/// A response that could not be turned into a usable resource.
///
/// Carries the request and response when they exist, plus a best-effort resource
/// rebuilt from the response body so callers can still inspect error payloads
/// (e.g. `application/vnd.error+json` documents).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BadResponse {
    message: String,
    request: Option<HalRequest>,
    response: Option<HttpResponse>,
    resource: HalResource,
}

impl BadResponse {
    pub fn new<S: Into<String>>(
        message: S,
        request: Option<HalRequest>,
        response: Option<HttpResponse>,
        resource: HalResource,
    ) -> Self {
        Self {
            message: message.into(),
            request,
            response,
            resource,
        }
    }

    /// Build the error for a response whose status is outside the 2xx range
    pub fn from_status(request: HalRequest, response: HttpResponse, resource: HalResource) -> Self {
        let class = match response.status {
            400..=499 => "Client error",
            500..=599 => "Server error",
            _ => "Unsuccessful response",
        };

        let message = format!(
            "{} [url] {} [http method] {} [status code] {} [reason phrase] {}.",
            class,
            request.request_target(),
            request.method,
            response.status,
            response.reason_phrase()
        );

        Self::new(message, Some(request), Some(response), resource)
    }

    /// Build the error for navigating a resource that has no `self` link
    pub fn missing_self_link(resource: HalResource) -> Self {
        Self::new(
            "Response links does not contain key 'self'.",
            None,
            None,
            resource,
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn request(&self) -> Option<&HalRequest> {
        self.request.as_ref()
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    /// Best-effort resource decoded from the response body
    pub fn resource(&self) -> &HalResource {
        &self.resource
    }

    pub fn into_resource(self) -> HalResource {
        self.resource
    }

    /// Status code of the response, `0` when there is none
    pub fn status_code(&self) -> u16 {
        self.response.as_ref().map_or(0, |response| response.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }
}
