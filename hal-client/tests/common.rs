//! Shared helpers for hal-client integration tests

#![allow(dead_code)]

use hal_client::testing::MockTransport;
use hal_client::{HalClient, HttpResponse};
use serde_json::{json, Value};
use wiremock::ResponseTemplate;

pub const ROOT_URL: &str = "http://propilex.herokuapp.com";

/// Client over a recording transport, plus a handle on that transport
pub fn mock_client(transport: MockTransport) -> (HalClient, MockTransport) {
    let client = HalClient::with_transport(ROOT_URL, transport.clone()).unwrap();
    (client, transport)
}

/// A response carrying `body` as `application/hal+json`
pub fn hal_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse::new(status)
        .with_header("Content-Type", "application/hal+json")
        .with_body(body.to_string())
}

/// wiremock reply carrying `body` as `application/hal+json`
pub fn hal_template(status: u16, body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/hal+json")
}

/// Root document of the documents API
pub fn root_document() -> Value {
    json!({
        "_links": {
            "self": {"href": "/"},
            "curies": [{"name": "p", "href": "/rels/{rel}", "templated": true}],
            "p:documents": {"href": "/documents{?page,limit}", "templated": true},
            "p:document": {"href": "/documents/{id}", "templated": true}
        }
    })
}

/// One page of the document collection
pub fn documents_page() -> Value {
    json!({
        "page": 1,
        "limit": 10,
        "pages": 1,
        "_links": {
            "self": {"href": "/documents?page=1&limit=10"},
            "first": {"href": "/documents?page=1&limit=10"},
            "last": {"href": "/documents?page=1&limit=10"}
        },
        "_embedded": {
            "documents": [document(1, "Test 1"), document(2, "Test 2")]
        }
    })
}

pub fn document(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body": "Lorem ipsum",
        "_links": {"self": {"href": format!("/documents/{}", id)}}
    })
}
