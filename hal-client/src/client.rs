use crate::classifier::{Classification, ResponseClassifier, VALID_CONTENT_TYPES};
use crate::config::ClientConfig;
use crate::error::{BadResponse, HalError, Result};
use crate::http::ReqwestTransport;
use crate::options::RequestOptions;
use crate::resource::HalResource;
use crate::traits::HttpTransport;
use crate::types::{HalRequest, HttpResponse, Outcome};
use crate::url_builder::UrlBuilder;
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Method;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Default bound on consecutive `201 Created` Location follows
pub const DEFAULT_MAX_LOCATION_FOLLOWS: usize = 5;

static ACCEPT_HEADER: Lazy<HeaderValue> = Lazy::new(|| {
    HeaderValue::from_str(&VALID_CONTENT_TYPES.join(", "))
        .expect("content types are valid header values")
});

/// Client for a HAL API rooted at one URL.
///
/// Cheap to clone; resources and links keep a clone so they can navigate
/// further. The `with_*` methods return modified copies and leave the original
/// untouched.
#[derive(Clone)]
pub struct HalClient {
    transport: Arc<dyn HttpTransport>,
    classifier: Arc<ResponseClassifier>,
    root_url: Url,
    default_headers: HeaderMap,
    max_location_follows: usize,
}

impl fmt::Debug for HalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HalClient")
            .field("root_url", &self.root_url.as_str())
            .field("default_headers", &self.default_headers)
            .field("max_location_follows", &self.max_location_follows)
            .finish_non_exhaustive()
    }
}

impl HalClient {
    /// Create a client using the default reqwest transport
    pub fn new(root_url: &str) -> Result<Self> {
        Self::from_config(&ClientConfig::new(root_url))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport<T: HttpTransport + 'static>(root_url: &str, transport: T) -> Result<Self> {
        Self::with_shared_transport(root_url, Arc::new(transport))
    }

    pub fn with_shared_transport(root_url: &str, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("hal-client/", env!("CARGO_PKG_VERSION"))),
        );
        default_headers.insert(ACCEPT, ACCEPT_HEADER.clone());

        Ok(Self {
            transport,
            classifier: Arc::new(ResponseClassifier::default()),
            root_url: Url::parse(root_url)?,
            default_headers,
            max_location_follows: DEFAULT_MAX_LOCATION_FOLLOWS,
        })
    }

    /// Create a client from validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let transport = ReqwestTransport::new(config)?;
        let mut client = Self::with_transport(&config.root_url, transport)?
            .with_max_location_follows(config.location_follow_limit());

        if let Some(headers) = &config.headers {
            for (name, value) in headers {
                client = client.with_header(name, &[value.as_str()])?;
            }
        }

        Ok(client)
    }

    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    /// Copy of this client with another root URL
    pub fn with_root_url(&self, root_url: &str) -> Result<Self> {
        let mut client = self.clone();
        client.root_url = Url::parse(root_url)?;
        Ok(client)
    }

    /// All values of a default header
    pub fn header(&self, name: &str) -> Vec<String> {
        self.default_headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect()
    }

    /// Copy of this client with a default header replaced
    pub fn with_header(&self, name: &str, values: &[&str]) -> Result<Self> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HalError::invalid_argument(format!("Invalid header name '{}'.", name)))?;

        let mut client = self.clone();
        client.default_headers.remove(&header_name);
        for value in values {
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                HalError::invalid_argument(format!("Invalid value for header '{}'.", name))
            })?;
            client.default_headers.append(header_name.clone(), header_value);
        }

        Ok(client)
    }

    /// Copy of this client with a different bound on Location follows
    #[must_use]
    pub fn with_max_location_follows(mut self, max_location_follows: usize) -> Self {
        self.max_location_follows = max_location_follows;
        self
    }

    pub fn max_location_follows(&self) -> usize {
        self.max_location_follows
    }

    /// GET the root URL
    pub async fn root(&self, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::GET, "", options).await
    }

    pub async fn get(&self, uri: &str, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::GET, uri, options).await
    }

    pub async fn post(&self, uri: &str, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::POST, uri, options).await
    }

    pub async fn put(&self, uri: &str, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::PUT, uri, options).await
    }

    pub async fn delete(&self, uri: &str, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::DELETE, uri, options).await
    }

    /// Send a request and classify the response.
    ///
    /// A `201 Created` with an empty body and a Location header is followed with
    /// a GET (at most `max_location_follows` times in a row) and the followed
    /// response takes its place.
    pub async fn request(&self, method: Method, uri: &str, options: RequestOptions) -> Result<Outcome> {
        let mut request = self.create_request(method, uri, &options)?;
        let mut return_raw_response = options.return_raw_response;
        let mut follows = 0;

        loop {
            let response = self.send(&request).await?;

            if !response.is_success() {
                return Err(self.status_error(request, response));
            }

            if return_raw_response {
                return Ok(Outcome::Raw(response));
            }

            match self.classifier.classify(self, &request, &response, false)? {
                Classification::Resource(resource) => return Ok(Outcome::Resource(resource)),
                Classification::FollowLocation(location) => {
                    if follows >= self.max_location_follows {
                        let message = format!(
                            "Exceeded the maximum of {} Location follows [url] {} [http method] {}.",
                            self.max_location_follows,
                            request.request_target(),
                            request.method
                        );
                        return Err(HalError::bad_response(BadResponse::new(
                            message,
                            Some(request),
                            Some(response),
                            HalResource::new(self.clone()),
                        )));
                    }

                    follows += 1;
                    request = self.create_request(Method::GET, &location, &RequestOptions::default())?;
                    return_raw_response = false;
                }
            }
        }
    }

    /// Build the request that `request` would send
    pub fn create_request(&self, method: Method, uri: &str, options: &RequestOptions) -> Result<HalRequest> {
        let url = UrlBuilder::resolve(&self.root_url, uri)?.build();

        let mut request = HalRequest::new(method, url);
        request.headers = self.default_headers.clone();
        options.apply(&mut request)?;

        Ok(request)
    }

    async fn send(&self, request: &HalRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self
            .transport
            .send(request.clone())
            .await
            .map_err(|source| HalError::http_client(request.clone(), source))?;

        debug!(status = response.status, url = %request.url, "received response");
        Ok(response)
    }

    fn status_error(&self, request: HalRequest, response: HttpResponse) -> HalError {
        let resource = match self.classifier.classify(self, &request, &response, true) {
            Ok(Classification::Resource(resource)) => resource,
            Ok(Classification::FollowLocation(_)) => HalResource::new(self.clone()),
            Err(error) => {
                warn!(%error, "could not decode error response body");
                HalResource::new(self.clone())
            }
        };

        HalError::bad_response(BadResponse::from_status(request, response, resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;

    fn client() -> HalClient {
        HalClient::with_transport("http://propilex.herokuapp.com", MockTransport::new()).unwrap()
    }

    #[test]
    fn test_default_headers() {
        let client = client();
        assert_eq!(
            client.header("Accept"),
            vec!["application/hal+json, application/json, application/vnd.error+json".to_string()]
        );
        assert!(client.header("User-Agent")[0].starts_with("hal-client/"));
    }

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let client = client();
        let changed = client.with_header("Foo", &["bar"]).unwrap();

        assert_eq!(changed.header("Foo"), vec!["bar".to_string()]);
        assert!(client.header("Foo").is_empty());

        let moved = changed.with_root_url("http://example.com").unwrap();
        assert_eq!(moved.root_url().as_str(), "http://example.com/");
        assert_eq!(changed.root_url().as_str(), "http://propilex.herokuapp.com/");
        assert_eq!(moved.header("Foo"), vec!["bar".to_string()]);
    }

    #[test]
    fn test_invalid_root_url() {
        let result = HalClient::with_transport("not a url", MockTransport::new());
        assert!(matches!(result, Err(HalError::UrlParse(_))));
    }

    #[test]
    fn test_create_request_applies_defaults_and_options() {
        let request = client()
            .create_request(
                Method::PATCH,
                "documents",
                &RequestOptions::new().header("Accept", "application/json"),
            )
            .unwrap();

        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.url.as_str(), "http://propilex.herokuapp.com/documents");
        assert_eq!(request.header("Accept"), vec!["application/json".to_string()]);
        assert_eq!(request.header("User-Agent").len(), 1);
    }

    #[test]
    fn test_debug_does_not_require_debug_transport() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("propilex.herokuapp.com"));
    }
}
