use crate::error::Result;
use crate::options::{Query, QueryValue};
use url::form_urlencoded;
use url::Url;

/// Builder for request URLs: reference resolution against the root URL and
/// query merging
pub struct UrlBuilder {
    url: Url,
}

impl UrlBuilder {
    /// Start from an absolute URL
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Resolve `reference` against `root` (RFC 3986 reference resolution)
    pub fn resolve(root: &Url, reference: &str) -> Result<Self> {
        Ok(Self::new(root.join(reference)?))
    }

    /// Merge `query` into the existing query string.
    ///
    /// Keys already present are replaced in place, new keys are appended.
    #[must_use]
    pub fn merge_query(mut self, query: &Query) -> Self {
        let mut merged = utils::parse_query(self.url.query().unwrap_or(""));

        let additions = match query {
            Query::Raw(raw) => utils::parse_query(raw),
            Query::Params(params) => params.clone(),
        };

        for (key, value) in additions {
            match merged.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => merged.push((key, value)),
            }
        }

        let encoded = utils::build_query(&merged);
        self.url
            .set_query(if encoded.is_empty() { None } else { Some(&encoded) });
        self
    }

    pub fn build(self) -> Url {
        self.url
    }
}

pub mod utils {
    use super::*;

    /// Parse a query string, grouping repeated keys into lists
    pub fn parse_query(query: &str) -> Vec<(String, QueryValue)> {
        let mut params: Vec<(String, QueryValue)> = Vec::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match params.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, slot)) => {
                    let previous = std::mem::replace(slot, QueryValue::List(Vec::new()));
                    *slot = match previous {
                        QueryValue::Single(first) => QueryValue::List(vec![first, value]),
                        QueryValue::List(mut values) => {
                            values.push(value);
                            QueryValue::List(values)
                        }
                    };
                }
                None => params.push((key.into_owned(), QueryValue::Single(value))),
            }
        }

        params
    }

    /// Encode parameters as `application/x-www-form-urlencoded`
    pub fn build_query(params: &[(String, QueryValue)]) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            match value {
                QueryValue::Single(value) => {
                    serializer.append_pair(key, value);
                }
                QueryValue::List(values) => {
                    for value in values {
                        serializer.append_pair(key, value);
                    }
                }
            }
        }
        serializer.finish()
    }
}
