//! Client behaviour against a recording transport

mod common;

use common::*;
use hal_client::testing::MockTransport;
use hal_client::{HalError, HttpResponse, Outcome, RequestOptions, Variables};
use reqwest::{Method, Version};
use serde_json::json;

fn full_options() -> RequestOptions {
    RequestOptions::new()
        .version(Version::HTTP_10)
        .header("Foo", "bar")
        .body("Body")
        .query("key1=key2")
}

async fn assert_request_options(method: Method) {
    let (client, transport) = mock_client(MockTransport::new());

    let outcome = if method == Method::GET {
        client.get("", full_options()).await
    } else if method == Method::POST {
        client.post("", full_options()).await
    } else if method == Method::PUT {
        client.put("", full_options()).await
    } else if method == Method::DELETE {
        client.delete("", full_options()).await
    } else {
        client.request(method.clone(), "", full_options()).await
    }
    .unwrap();
    assert!(outcome.as_resource().is_some());

    let request = transport.last_request().unwrap();
    assert_eq!(request.version, Version::HTTP_10);
    assert_eq!(request.method, method);
    assert_eq!(request.url.as_str(), "http://propilex.herokuapp.com/?key1=key2");
    assert_eq!(request.body.as_deref(), Some("Body"));
    assert_eq!(request.header("Foo"), vec!["bar".to_string()]);
}

#[tokio::test]
async fn test_request_options_per_method() {
    for method in [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
    ] {
        assert_request_options(method).await;
    }
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let (client, transport) = mock_client(MockTransport::new());
    client.root(RequestOptions::new()).await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(
        request.header("Accept"),
        vec!["application/hal+json, application/json, application/vnd.error+json".to_string()]
    );
    assert!(request.header("User-Agent")[0].starts_with("hal-client/"));
}

#[tokio::test]
async fn test_created_with_location_is_followed() {
    let transport = MockTransport::new()
        .with_response(HttpResponse::new(201).with_header("Location", "http://propilex.herokuapp.com/resource"))
        .with_response(hal_response(200, &json!({"foo": "bar"})));
    let (client, transport) = mock_client(transport);

    let resource = client
        .post("/documents", RequestOptions::new().json(json!({"title": "Test"})))
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(resource.property("foo"), Some(&json!("bar")));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(requests[1].url.as_str(), "http://propilex.herokuapp.com/resource");
    assert!(requests[1].body.is_none());
}

#[tokio::test]
async fn test_created_with_body_is_not_followed() {
    let transport = MockTransport::new().with_response(
        hal_response(201, &json!({"foo": "bar"}))
            .with_header("Location", "http://propilex.herokuapp.com/resource"),
    );
    let (client, transport) = mock_client(transport);

    let resource = client
        .post("/documents", RequestOptions::new())
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(resource.property("foo"), Some(&json!("bar")));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_location_follows_are_bounded() {
    let transport = MockTransport::new();
    for _ in 0..3 {
        transport.push_response(HttpResponse::new(201).with_header("Location", "/again"));
    }
    let (client, transport) = mock_client(transport);
    let client = client.with_max_location_follows(2);

    let error = client.post("/loop", RequestOptions::new()).await.unwrap_err();

    assert!(error.as_bad_response().is_some());
    assert!(error.to_string().starts_with("Exceeded the maximum of 2 Location follows"));
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_raw_response_is_returned_untouched() {
    let response = HttpResponse::new(200).with_header("Content-Type", "text/csv").with_body("a,b");
    let (client, _) = mock_client(MockTransport::new().with_response(response));

    let outcome = client
        .get("/export", RequestOptions::new().return_raw_response(true))
        .await
        .unwrap();

    assert!(outcome.is_raw());
    let raw = outcome.into_raw().unwrap();
    assert_eq!(raw.status, 200);
    assert_eq!(raw.text().unwrap(), "a,b");
}

#[tokio::test]
async fn test_raw_response_skips_location_follow() {
    let response = HttpResponse::new(201).with_header("Location", "/resource");
    let (client, transport) = mock_client(MockTransport::new().with_response(response));

    let outcome = client
        .post("/documents", RequestOptions::new().return_raw_response(true))
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Raw(ref raw) if raw.status == 201));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_transport_failure() {
    let (client, _) = mock_client(MockTransport::new().with_failure("Error"));

    let error = client.get("/", RequestOptions::new()).await.unwrap_err();

    assert_eq!(
        error.to_string(),
        "Exception thrown by the http client while sending request: Error."
    );
    match &error {
        HalError::HttpClient { source, request, .. } => {
            assert_eq!(source.message(), "Error");
            assert_eq!(request.url.as_str(), "http://propilex.herokuapp.com/");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(std::error::Error::source(&error).is_some());
}

#[tokio::test]
async fn test_status_errors() {
    let cases = [
        (404, "Client error [url] / [http method] GET [status code] 404 [reason phrase] Not Found.", true, false),
        (500, "Server error [url] / [http method] GET [status code] 500 [reason phrase] Internal Server Error.", false, true),
        (303, "Unsuccessful response [url] / [http method] GET [status code] 303 [reason phrase] See Other.", false, false),
    ];

    for (status, message, client_error, server_error) in cases {
        let response = hal_response(status, &json!({"msg": "error"}));
        let (client, _) = mock_client(MockTransport::new().with_response(response));

        let error = client.get("/", RequestOptions::new()).await.unwrap_err();
        assert_eq!(error.to_string(), message);

        let bad_response = error.as_bad_response().unwrap();
        assert_eq!(bad_response.status_code(), status);
        assert_eq!(bad_response.is_client_error(), client_error);
        assert_eq!(bad_response.is_server_error(), server_error);
        assert_eq!(bad_response.resource().property("msg"), Some(&json!("error")));
        assert!(!bad_response.resource().has_link("self"));
        assert!(bad_response.request().is_some());
    }
}

#[tokio::test]
async fn test_status_error_with_unparseable_body_has_empty_resource() {
    let response = HttpResponse::new(502)
        .with_header("Content-Type", "application/json")
        .with_body("<html>");
    let (client, _) = mock_client(MockTransport::new().with_response(response));

    let error = client.get("/", RequestOptions::new()).await.unwrap_err();
    let bad_response = error.as_bad_response().unwrap();

    assert!(bad_response.is_server_error());
    assert!(bad_response.resource().properties().is_empty());
}

#[tokio::test]
async fn test_invalid_content_type() {
    let response = HttpResponse::new(200).with_header("Content-Type", "text/plain");
    let (client, _) = mock_client(MockTransport::new().with_response(response));

    let error = client.get("/", RequestOptions::new()).await.unwrap_err();
    assert_eq!(
        error.to_string(),
        "Request did not return a valid content type. Returned content type: text/plain."
    );
}

#[tokio::test]
async fn test_body_read_failure() {
    let response = HttpResponse::new(200)
        .with_header("Content-Type", "application/hal+json")
        .with_unreadable_body("Error");
    let (client, _) = mock_client(MockTransport::new().with_response(response));

    let error = client.get("/", RequestOptions::new()).await.unwrap_err();
    assert_eq!(error.to_string(), "Error getting response body: Error.");
}

#[tokio::test]
async fn test_invalid_json() {
    let response = HttpResponse::new(200)
        .with_header("Content-Type", "application/hal+json")
        .with_body("{");
    let (client, _) = mock_client(MockTransport::new().with_response(response));

    let error = client.get("/", RequestOptions::new()).await.unwrap_err();
    assert!(error.to_string().starts_with("JSON parse error: "));
}

#[tokio::test]
async fn test_with_header_does_not_affect_original() {
    let (client, transport) = mock_client(MockTransport::new());
    let changed = client.with_header("Foo", &["bar"]).unwrap();

    client.get("/", RequestOptions::new()).await.unwrap();
    assert!(transport.last_request().unwrap().header("Foo").is_empty());

    changed.get("/", RequestOptions::new()).await.unwrap();
    assert_eq!(transport.last_request().unwrap().header("Foo"), vec!["bar".to_string()]);
}

#[tokio::test]
async fn test_navigate_curie_link_and_embedded() {
    let transport = MockTransport::new()
        .with_response(hal_response(200, &root_document()))
        .with_response(hal_response(200, &documents_page()))
        .with_response(hal_response(200, &document(2, "Test 2")));
    let (client, transport) = mock_client(transport);

    let root = client.root(RequestOptions::new()).await.unwrap().into_resource().unwrap();
    let documents_link = root.first_link("documents").unwrap().unwrap();
    assert!(documents_link.templated());

    let page = documents_link
        .get(
            &Variables::new().with("page", "1").with("limit", "10"),
            RequestOptions::new(),
        )
        .await
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(
        transport.last_request().unwrap().url.as_str(),
        "http://propilex.herokuapp.com/documents?page=1&limit=10"
    );

    let documents = page.resource("documents").unwrap();
    assert_eq!(documents.len(), 2);

    let refreshed = documents[1]
        .get(RequestOptions::new())
        .await
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(refreshed.property("title"), Some(&json!("Test 2")));
    assert_eq!(
        transport.last_request().unwrap().url.as_str(),
        "http://propilex.herokuapp.com/documents/2"
    );
}
