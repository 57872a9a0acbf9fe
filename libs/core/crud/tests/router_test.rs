use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use crud::{CrudService, InMemoryRepository, Resource, handlers};
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::ServiceExt;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
struct Location {
    #[validate(length(min = 1, max = 32), custom(function = "crud::validate_key"))]
    name: String,
    #[validate(length(max = 64))]
    description: Option<String>,
}

impl Resource for Location {
    type Id = String;
    const NAME: &'static str = "Location";

    fn id(&self) -> String {
        self.name.clone()
    }

    fn set_id(&mut self, id: String) {
        self.name = id;
    }
}

fn app() -> Router {
    let repo = InMemoryRepository::with_items([Location {
        name: "Tavern".into(),
        description: Some("Smoky".into()),
    }]);
    handlers::router(CrudService::new(repo))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn list_returns_stored_resources() {
    let (status, body) = send(app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Tavern");
}

#[tokio::test]
async fn get_missing_is_404_with_resource_code() {
    let (status, body) = send(app(), "GET", "/Castle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().starts_with("ERR:RESOURCE:01"));
}

#[tokio::test]
async fn post_body_creates_then_conflicts() {
    let app = app();
    let location = json!({ "name": "Forest", "description": "Dark" });

    let (status, body) = send(app.clone(), "POST", "/", Some(location.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Forest");

    let (status, body) = send(app, "POST", "/", Some(location)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().starts_with("ERR:RESOURCE:02"));
}

#[tokio::test]
async fn post_invalid_body_lists_violations() {
    let invalid = json!({ "name": "", "description": "x".repeat(80) });
    let (status, body) = send(app(), "POST", "/", Some(invalid)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["description"].is_array());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let request = Request::post("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_id_creates_default_element() {
    let app = app();
    let (status, body) = send(app.clone(), "POST", "/Castle", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Castle");
    assert_eq!(body["description"], Value::Null);

    let (status, _) = send(app, "POST", "/Tavern", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn generated_without_strategy_is_not_implemented() {
    let (status, body) = send(app(), "POST", "/generated", None).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["message"].as_str().unwrap().starts_with("ERR:RESOURCE:03"));
}

#[tokio::test]
async fn put_overwrites_fields_and_keeps_key() {
    let app = app();
    let (status, body) = send(
        app.clone(),
        "PUT",
        "/Tavern",
        Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["name"], "Tavern");
    assert_eq!(body["description"], Value::Null);

    let (status, _) = send(app, "PUT", "/Nowhere", Some(json!({ "name": "Nowhere" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    let (status, _) = send(app.clone(), "DELETE", "/Tavern", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app.clone(), "DELETE", "/Tavern", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app, "GET", "/Tavern", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn key_equal_to_generated_segment_is_rejected() {
    let (status, body) = send(app(), "POST", "/", Some(json!({ "name": "generated" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());

    let (status, _) = send(app(), "GET", "/generated", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
