//! RFC 6570 URI template expansion for templated links.

use crate::error::{HalError, Result};
use iri_string::spec::UriSpec;
use iri_string::template::simple_context::{SimpleContext, Value as TemplateValue};
use iri_string::template::UriTemplateStr;
use std::collections::BTreeMap;

/// Value bound to a template variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    String(String),
    List(Vec<String>),
    Assoc(Vec<(String, String)>),
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

macro_rules! var_value_from_display {
    ($($ty:ty),*) => {
        $(impl From<$ty> for VarValue {
            fn from(value: $ty) -> Self {
                Self::String(value.to_string())
            }
        })*
    };
}

var_value_from_display!(i32, i64, u32, u64, usize, bool);

impl From<Vec<String>> for VarValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for VarValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<(String, String)>> for VarValue {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Assoc(pairs)
    }
}

impl VarValue {
    fn to_template_value(&self) -> TemplateValue {
        match self {
            Self::String(value) => TemplateValue::String(value.clone()),
            Self::List(values) => TemplateValue::List(values.clone()),
            Self::Assoc(pairs) => TemplateValue::Assoc(pairs.clone()),
        }
    }
}

/// Variables available to a template expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, VarValue>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, builder style
    #[must_use]
    pub fn with<K: Into<String>, V: Into<VarValue>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<VarValue>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VarValue)> {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<VarValue>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Self::new();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}

/// Expand `template` with `variables`.
///
/// Variables the template does not reference are ignored and variables it
/// references but that are not bound expand to nothing. A malformed template is
/// an `InvalidArgument` error.
pub fn expand(template: &str, variables: &Variables) -> Result<String> {
    let parsed = UriTemplateStr::new(template).map_err(|e| invalid_template(template, e))?;

    let mut context = SimpleContext::new();
    for (name, value) in variables.iter() {
        context.insert(name.clone(), value.to_template_value());
    }

    let expanded = parsed
        .expand::<UriSpec, _>(&context)
        .map_err(|e| invalid_template(template, e))?;

    Ok(expanded.to_string())
}

fn invalid_template(template: &str, error: impl std::fmt::Display) -> HalError {
    HalError::invalid_argument(format!(
        "Invalid URI template {}: {}.",
        serde_json::Value::from(template),
        error
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_expansion() {
        let variables = Variables::new().with("id", 42);
        let uri = expand("/documents/{id}", &variables).unwrap();
        assert_eq!(uri, "/documents/42");
    }

    #[test]
    fn test_query_expansion_with_list() {
        let variables = Variables::new()
            .with("page", 2)
            .with("tags", vec!["a", "b"]);
        let uri = expand("/documents{?page,tags*}", &variables).unwrap();
        assert_eq!(uri, "/documents?page=2&tags=a&tags=b");
    }

    #[test]
    fn test_undefined_variables_expand_to_nothing() {
        let uri = expand("/documents{?page}", &Variables::new()).unwrap();
        assert_eq!(uri, "/documents");
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let variables = Variables::new().with("q", "a b/c");
        let uri = expand("/search/{q}", &variables).unwrap();
        assert_eq!(uri, "/search/a%20b%2Fc");
    }

    #[test]
    fn test_malformed_template_is_invalid_argument() {
        let error = expand("/documents/{id", &Variables::new()).unwrap_err();
        assert!(error.is_invalid_argument());
        assert!(error.to_string().starts_with("Invalid URI template"));
    }

    #[test]
    fn test_variables_from_iterator() {
        let variables: Variables = [("rel", "widgets"), ("id", "7")].into_iter().collect();
        assert_eq!(variables.len(), 2);
        assert_eq!(variables.get("rel"), Some(&VarValue::from("widgets")));
    }
}
