use crate::error::{HalError, Result};
use crate::types::HalRequest;
use crate::url_builder::UrlBuilder;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Version;
use serde_json::Value;

/// A query parameter value; lists are sent as one pair per element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Query to merge into the request URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Raw query string such as `page=2&limit=10`
    Raw(String),
    /// Ordered parameters
    Params(Vec<(String, QueryValue)>),
}

impl From<&str> for Query {
    fn from(query: &str) -> Self {
        Self::Raw(query.to_string())
    }
}

impl From<String> for Query {
    fn from(query: String) -> Self {
        Self::Raw(query)
    }
}

impl<K: Into<String>, V: Into<QueryValue>> From<Vec<(K, V)>> for Query {
    fn from(params: Vec<(K, V)>) -> Self {
        Self::Params(
            params
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent verbatim
    Text(String),
    /// Serialized to JSON; `Content-Type: application/json` is added unless set
    Json(Value),
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub version: Option<Version>,
    pub query: Option<Query>,
    pub headers: Vec<(String, Vec<String>)>,
    pub body: Option<RequestBody>,
    pub return_raw_response: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP protocol version
    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Replace the query to merge into the URI
    #[must_use]
    pub fn query<Q: Into<Query>>(mut self, query: Q) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add one query parameter, switching a raw query over to parameters
    #[must_use]
    pub fn query_param<K: Into<String>, V: Into<QueryValue>>(mut self, key: K, value: V) -> Self {
        let mut params = match self.query.take() {
            Some(Query::Params(params)) => params,
            Some(Query::Raw(raw)) => url::form_urlencoded::parse(raw.as_bytes())
                .map(|(key, value)| (key.into_owned(), QueryValue::Single(value.into_owned())))
                .collect(),
            None => Vec::new(),
        };
        params.push((key.into(), value.into()));
        self.query = Some(Query::Params(params));
        self
    }

    /// Set a header, replacing any default of the same name
    #[must_use]
    pub fn header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.push((name.into(), vec![value.into()]));
        self
    }

    /// Set a multi-valued header, replacing any default of the same name
    #[must_use]
    pub fn header_values<N: Into<String>>(mut self, name: N, values: Vec<String>) -> Self {
        self.headers.push((name.into(), values));
        self
    }

    /// Send `body` verbatim
    #[must_use]
    pub fn body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Send `value` as JSON
    #[must_use]
    pub fn json(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Return the transport response untouched on success
    #[must_use]
    pub fn return_raw_response(mut self, raw: bool) -> Self {
        self.return_raw_response = raw;
        self
    }

    /// Apply version, query, headers and body to `request`
    pub fn apply(&self, request: &mut HalRequest) -> Result<()> {
        if let Some(version) = self.version {
            request.version = version;
        }

        if let Some(query) = &self.query {
            request.url = UrlBuilder::new(request.url.clone()).merge_query(query).build();
        }

        for (name, values) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HalError::invalid_argument(format!("Invalid header name '{}'.", name)))?;

            request.headers.remove(&header_name);
            for value in values {
                let header_value = HeaderValue::from_str(value).map_err(|_| {
                    HalError::invalid_argument(format!("Invalid value for header '{}'.", name))
                })?;
                request.headers.append(header_name.clone(), header_value);
            }
        }

        match &self.body {
            Some(RequestBody::Text(text)) => request.body = Some(text.clone()),
            Some(RequestBody::Json(value)) => {
                request.body = Some(value.to_string());
                if !request.headers.contains_key(CONTENT_TYPE) {
                    request
                        .headers
                        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
            }
            None => {}
        }

        Ok(())
    }
}
