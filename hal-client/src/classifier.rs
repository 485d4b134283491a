//! Turns a transport response into a resource, a Location to follow, or a
//! `BadResponse` failure.

use crate::client::HalClient;
use crate::error::{BadResponse, HalError, Result};
use crate::resource::HalResource;
use crate::types::{HalRequest, HttpResponse};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use tracing::debug;

/// Content types accepted as HAL documents
pub const VALID_CONTENT_TYPES: [&str; 3] = [
    "application/hal+json",
    "application/json",
    "application/vnd.error+json",
];

static CONTENT_TYPE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^;]+)(;\s?(charset|boundary)=(.+))?$").expect("content type pattern is valid")
});

/// Outcome of classifying one response
#[derive(Debug)]
pub enum Classification {
    Resource(HalResource),
    /// `201 Created` with an empty body: the created resource lives at this Location
    FollowLocation(String),
}

/// Classifies responses against a set of accepted content types
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    valid_content_types: Vec<String>,
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new(VALID_CONTENT_TYPES)
    }
}

impl ResponseClassifier {
    pub fn new<I, S>(valid_content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid_content_types: valid_content_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn valid_content_types(&self) -> &[String] {
        &self.valid_content_types
    }

    /// Classify `response`.
    ///
    /// With `ignore_invalid_content_type` an unacceptable content type yields an
    /// empty resource instead of a failure; this is how the diagnostic resource
    /// attached to status errors is built.
    pub fn classify(
        &self,
        client: &HalClient,
        request: &HalRequest,
        response: &HttpResponse,
        ignore_invalid_content_type: bool,
    ) -> Result<Classification> {
        if response.status == 204 {
            return Ok(Classification::Resource(HalResource::new(client.clone())));
        }

        let body = response.bytes().map_err(|e| {
            bad_response(
                client,
                request,
                response,
                format!("Error getting response body: {}.", e),
            )
        })?;
        let body = body.trim_ascii();

        if body.is_empty() && response.status == 201 {
            if let Some(location) = response.header(LOCATION.as_str()).into_iter().next() {
                debug!(%location, "following Location of created resource");
                return Ok(Classification::FollowLocation(location));
            }
        }

        if !self.is_valid_content_type(response) {
            if ignore_invalid_content_type {
                return Ok(Classification::Resource(HalResource::new(client.clone())));
            }

            let types = response.header(CONTENT_TYPE.as_str());
            let types = if types.is_empty() {
                "none".to_string()
            } else {
                types.join(", ")
            };

            return Err(bad_response(
                client,
                request,
                response,
                format!(
                    "Request did not return a valid content type. Returned content type: {}.",
                    types
                ),
            ));
        }

        if body.is_empty() {
            return Ok(Classification::Resource(HalResource::new(client.clone())));
        }

        let value = serde_json::from_slice(body).map_err(|e| {
            bad_response(client, request, response, format!("JSON parse error: {}.", e))
        })?;

        Ok(Classification::Resource(HalResource::from_value(
            client.clone(),
            value,
        )))
    }

    /// Check the `Content-Type` header, ignoring a `charset` or `boundary` parameter
    pub fn is_valid_content_type(&self, response: &HttpResponse) -> bool {
        let values = response.header(CONTENT_TYPE.as_str());
        if values.is_empty() {
            return false;
        }

        let header = values.join(", ");
        let content_type = CONTENT_TYPE_PATTERN
            .captures(&header)
            .and_then(|captures| captures.get(1))
            .map_or(header.as_str(), |media_type| media_type.as_str());

        self.valid_content_types
            .iter()
            .any(|valid| valid == content_type)
    }
}

fn bad_response(
    client: &HalClient,
    request: &HalRequest,
    response: &HttpResponse,
    message: String,
) -> HalError {
    HalError::bad_response(BadResponse::new(
        message,
        Some(request.clone()),
        Some(response.clone()),
        HalResource::new(client.clone()),
    ))
}
