//! Relation name resolution, including curie shorthand.

use crate::entries::link_entries;
use serde_json::{Map, Value};

/// Relation under which curies are declared
pub const CURIES: &str = "curies";

/// Resolve `rel` to the key it is stored under in `links`.
///
/// A direct key wins. Otherwise every named curie is tried in declaration order
/// and the first `"{name}:{rel}"` present is returned. Keys holding `null` count
/// as absent.
pub fn resolve<'a>(links: &'a Map<String, Value>, rel: &str) -> Option<&'a str> {
    if let Some(key) = present_key(links, rel) {
        return Some(key);
    }

    let curies = links.get(CURIES)?;

    link_entries(curies)
        .filter_map(|curie| curie.string_member("name"))
        .filter(|name| !name.is_empty())
        .find_map(|name| present_key(links, &format!("{}:{}", name, rel)))
}

fn present_key<'a>(links: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    links
        .get_key_value(key)
        .filter(|(_, value)| !value.is_null())
        .map(|(key, _)| key.as_str())
}
