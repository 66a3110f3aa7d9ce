mod api_tests;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::handlers::api_routes;
use crate::core::models::user::CreateUserAttrs;
use crate::core::services::UsersService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> UsersService<InMemoryStorage> {
    UsersService::new(InMemoryStorage::new())
}

pub fn create_test_app() -> Router {
    api_routes(Arc::new(create_test_service()))
}

pub fn create_attrs(name: &str, email: &str) -> CreateUserAttrs {
    CreateUserAttrs {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some("password".to_string()),
        password_confirmation: Some("password".to_string()),
    }
}

/// Sends one request through the router. `json` is sent with a JSON content type; `None`
/// sends no body and no content type.
pub async fn send(app: &Router, method: Method, uri: &str, json: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match json {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
