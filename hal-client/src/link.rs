use crate::client::HalClient;
use crate::entries::LinkEntry;
use crate::error::Result;
use crate::options::RequestOptions;
use crate::template::{self, Variables};
use crate::types::Outcome;
use reqwest::Method;
use serde_json::{Map, Value};

/// A single HAL link.
///
/// Built fresh from the raw link data every time it is read from a resource.
#[derive(Debug, Clone)]
pub struct HalLink {
    client: HalClient,
    href: String,
    templated: bool,
    link_type: Option<String>,
    deprecation: Option<String>,
    name: Option<String>,
    profile: Option<String>,
    title: Option<String>,
    hreflang: Option<String>,
}

impl HalLink {
    /// Create a plain, untemplated link
    pub fn new<S: Into<String>>(client: HalClient, href: S) -> Self {
        Self {
            client,
            href: href.into(),
            templated: false,
            link_type: None,
            deprecation: None,
            name: None,
            profile: None,
            title: None,
            hreflang: None,
        }
    }

    /// Build a link from a link object. Members of the wrong JSON type are ignored.
    pub fn from_object(client: HalClient, object: &Map<String, Value>) -> Self {
        let string = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            client,
            href: string("href").unwrap_or_default(),
            templated: object
                .get("templated")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            link_type: string("type"),
            deprecation: string("deprecation"),
            name: string("name"),
            profile: string("profile"),
            title: string("title"),
            hreflang: string("hreflang"),
        }
    }

    pub(crate) fn from_entry(client: &HalClient, entry: LinkEntry<'_>) -> Self {
        match entry {
            LinkEntry::Href(href) => Self::new(client.clone(), href),
            LinkEntry::Full(object) => Self::from_object(client.clone(), object),
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn templated(&self) -> bool {
        self.templated
    }

    pub fn link_type(&self) -> Option<&str> {
        self.link_type.as_deref()
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    /// Target URI. Templated links are expanded with `variables`; untemplated
    /// links return their href unchanged and ignore `variables`.
    pub fn uri(&self, variables: &Variables) -> Result<String> {
        if self.templated {
            template::expand(&self.href, variables)
        } else {
            Ok(self.href.clone())
        }
    }

    pub async fn get(&self, variables: &Variables, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::GET, variables, options).await
    }

    pub async fn post(&self, variables: &Variables, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::POST, variables, options).await
    }

    pub async fn put(&self, variables: &Variables, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::PUT, variables, options).await
    }

    pub async fn delete(&self, variables: &Variables, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::DELETE, variables, options).await
    }

    /// Resolve the target URI and send `method` to it through the owning client
    pub async fn request(
        &self,
        method: Method,
        variables: &Variables,
        options: RequestOptions,
    ) -> Result<Outcome> {
        let uri = self.uri(variables)?;
        self.client.request(method, &uri, options).await
    }
}
