use crate::client::HalClient;
use crate::entries::{self, link_entries, resource_entries};
use crate::error::{BadResponse, HalError, Result};
use crate::link::HalLink;
use crate::options::RequestOptions;
use crate::relation;
use crate::template::Variables;
use crate::types::Outcome;
use reqwest::Method;
use serde_json::{Map, Value};

const LINKS: &str = "_links";
const EMBEDDED: &str = "_embedded";

/// An immutable HAL resource: properties, links and embedded resources.
///
/// Links and embedded resources are kept as raw JSON; every accessor builds new
/// `HalLink` / `HalResource` values from it, so nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct HalResource {
    client: HalClient,
    properties: Map<String, Value>,
    links: Map<String, Value>,
    embedded: Map<String, Value>,
}

impl HalResource {
    /// Create an empty resource
    pub fn new(client: HalClient) -> Self {
        Self::with_parts(client, Map::new(), Map::new(), Map::new())
    }

    pub fn with_parts(
        client: HalClient,
        properties: Map<String, Value>,
        links: Map<String, Value>,
        embedded: Map<String, Value>,
    ) -> Self {
        Self {
            client,
            properties,
            links,
            embedded,
        }
    }

    /// Split a decoded document into properties, `_links` and `_embedded`
    pub fn from_value(client: HalClient, value: Value) -> Self {
        let mut properties = entries::into_map(value);
        let links = properties.remove(LINKS).map(entries::into_map).unwrap_or_default();
        let embedded = properties
            .remove(EMBEDDED)
            .map(entries::into_map)
            .unwrap_or_default();

        Self::with_parts(client, properties, links, embedded)
    }

    /// Reassemble the resource into a HAL document
    pub fn to_value(&self) -> Value {
        let mut document = self.properties.clone();
        if !self.links.is_empty() {
            document.insert(LINKS.to_string(), Value::Object(self.links.clone()));
        }
        if !self.embedded.is_empty() {
            document.insert(EMBEDDED.to_string(), Value::Object(self.embedded.clone()));
        }
        Value::Object(document)
    }

    pub fn client(&self) -> &HalClient {
        &self.client
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Properties set to `null` count as absent
    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).filter(|value| !value.is_null())
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// Every relation physically present, in document order. Curie-prefixed
    /// relations are listed under their full key.
    pub fn links(&self) -> Vec<(String, Vec<HalLink>)> {
        self.links
            .iter()
            .map(|(rel, data)| (rel.clone(), self.build_links(data)))
            .collect()
    }

    pub fn has_link(&self, rel: &str) -> bool {
        relation::resolve(&self.links, rel).is_some()
    }

    /// All links of a relation, resolving curie shorthand
    pub fn link(&self, rel: &str) -> Result<Vec<HalLink>> {
        Ok(self.build_links(self.link_data(rel)?))
    }

    /// First link of a relation; `None` when the relation holds no entries
    pub fn first_link(&self, rel: &str) -> Result<Option<HalLink>> {
        Ok(link_entries(self.link_data(rel)?)
            .next()
            .map(|entry| HalLink::from_entry(&self.client, entry)))
    }

    fn link_data(&self, rel: &str) -> Result<&Value> {
        relation::resolve(&self.links, rel)
            .and_then(|key| self.links.get(key))
            .ok_or_else(|| HalError::unknown_link(rel))
    }

    fn build_links(&self, data: &Value) -> Vec<HalLink> {
        link_entries(data)
            .map(|entry| HalLink::from_entry(&self.client, entry))
            .collect()
    }

    pub fn has_resources(&self) -> bool {
        !self.embedded.is_empty()
    }

    /// Every embedded relation, in document order
    pub fn resources(&self) -> Vec<(String, Vec<HalResource>)> {
        self.embedded
            .iter()
            .map(|(name, data)| (name.clone(), self.build_resources(data)))
            .collect()
    }

    /// Exact name match only; embedded names are not curie-resolved
    pub fn has_resource(&self, name: &str) -> bool {
        self.resource_data(name).is_ok()
    }

    pub fn resource(&self, name: &str) -> Result<Vec<HalResource>> {
        Ok(self.build_resources(self.resource_data(name)?))
    }

    pub fn first_resource(&self, name: &str) -> Result<Option<HalResource>> {
        Ok(resource_entries(self.resource_data(name)?)
            .next()
            .map(|data| Self::from_value(self.client.clone(), data.clone())))
    }

    fn resource_data(&self, name: &str) -> Result<&Value> {
        self.embedded
            .get(name)
            .filter(|data| !data.is_null())
            .ok_or_else(|| HalError::unknown_resource(name))
    }

    fn build_resources(&self, data: &Value) -> Vec<HalResource> {
        resource_entries(data)
            .map(|data| Self::from_value(self.client.clone(), data.clone()))
            .collect()
    }

    pub async fn get(&self, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::GET, options).await
    }

    pub async fn post(&self, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::POST, options).await
    }

    pub async fn put(&self, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::PUT, options).await
    }

    pub async fn delete(&self, options: RequestOptions) -> Result<Outcome> {
        self.request(Method::DELETE, options).await
    }

    /// Send `method` to this resource's `self` link
    pub async fn request(&self, method: Method, options: RequestOptions) -> Result<Outcome> {
        let self_link = if self.has_link("self") {
            self.first_link("self")?
        } else {
            None
        };

        let Some(self_link) = self_link else {
            return Err(HalError::bad_response(BadResponse::missing_self_link(
                self.clone(),
            )));
        };

        self_link.request(method, &Variables::new(), options).await
    }
}
