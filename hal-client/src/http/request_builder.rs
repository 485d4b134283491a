use crate::types::HalRequest;
use reqwest::{Body, Request};

/// Converts a `HalRequest` into a reqwest request
#[derive(Clone, Default)]
pub struct RequestBuilderImpl;

impl RequestBuilderImpl {
    pub fn new() -> Self {
        Self
    }

    pub fn build_request(&self, request: HalRequest) -> Request {
        let HalRequest {
            method,
            url,
            version,
            headers,
            body,
        } = request;

        let mut built = Request::new(method, url);
        *built.version_mut() = version;
        *built.headers_mut() = headers;
        if let Some(body) = body {
            *built.body_mut() = Some(Body::from(body));
        }
        built
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use reqwest::{Method, Version};
    use url::Url;

    #[test]
    fn test_build_request_copies_every_part() {
        let mut request = HalRequest::new(
            Method::PUT,
            Url::parse("http://example.com/documents/1?x=1").unwrap(),
        );
        request.version = Version::HTTP_10;
        request
            .headers
            .append("accept", HeaderValue::from_static("application/hal+json"));
        request.body = Some("{}".to_string());

        let built = RequestBuilderImpl::new().build_request(request);

        assert_eq!(built.method(), Method::PUT);
        assert_eq!(built.url().as_str(), "http://example.com/documents/1?x=1");
        assert_eq!(built.version(), Version::HTTP_10);
        assert_eq!(built.headers()["accept"], "application/hal+json");
        assert_eq!(built.body().and_then(|body| body.as_bytes()), Some(&b"{}"[..]));
    }

    #[test]
    fn test_build_request_without_body() {
        let request = HalRequest::new(Method::GET, Url::parse("http://example.com/").unwrap());
        assert!(RequestBuilderImpl::new().build_request(request).body().is_none());
    }
}
