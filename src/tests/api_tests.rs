use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::tests::{create_test_app, send};

const VALID_INPUT: &str =
    r#"{"name":"Test name","email":"testuser@example.test","password":"password","passwordConfirmation":"password"}"#;

#[tokio::test]
async fn test_index_when_empty() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_then_index() {
    let app = create_test_app();
    let (status, created) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Test name");
    assert_eq!(created["email"], "testuser@example.test");
    assert!(created["id"].is_i64());
    assert!(created.get("password").is_none());

    let (status, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([created]));
}

#[tokio::test]
async fn test_create_with_no_body() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::POST, "/users", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({"code": 422, "message": "Request body cannot be blank", "trace": {}})
    );
}

#[tokio::test]
async fn test_create_with_empty_or_broken_body() {
    let app = create_test_app();
    for raw in ["", "{\"name\":", "null", "\"user\""] {
        let (status, body) = send(&app, Method::POST, "/users", Some(raw)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {raw:?}");
        assert_eq!(body["message"], "Request body cannot be blank", "body {raw:?}");
    }
}

#[tokio::test]
async fn test_create_with_empty_json() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::POST, "/users", Some("{}")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "code": 422,
            "message": "Validation failed",
            "trace": {
                "name": "Name cannot be blank",
                "email": "Email cannot be blank",
                "password": "Password is required"
            }
        })
    );
}

#[tokio::test]
async fn test_create_with_only_name() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::POST, "/users", Some(r#"{"name":"Test name"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["trace"],
        json!({"email": "Email cannot be blank", "password": "Password is required"})
    );
}

#[tokio::test]
async fn test_create_with_only_email() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::POST, "/users", Some(r#"{"email":"testuser@example.test"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["trace"],
        json!({"name": "Name cannot be blank", "password": "Password is required"})
    );
}

#[tokio::test]
async fn test_create_without_password_confirmation() {
    let app = create_test_app();
    let input = r#"{"name":"Test name","email":"testuser@example.test","password":"password"}"#;
    let (status, body) = send(&app, Method::POST, "/users", Some(input)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "code": 422,
            "message": "Validation failed",
            "trace": {"passwordConfirmation": "Passwords must match"}
        })
    );
}

#[tokio::test]
async fn test_create_when_passwords_mismatch() {
    let app = create_test_app();
    let input = r#"{"name":"Test name","email":"testuser@example.test","password":"password","passwordConfirmation":"drowssap"}"#;
    let (status, body) = send(&app, Method::POST, "/users", Some(input)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["trace"], json!({"passwordConfirmation": "Passwords must match"}));
}

#[tokio::test]
async fn test_create_with_malformed_email() {
    let app = create_test_app();
    let input = r#"{"name":"Test name","email":"testuser","password":"password","passwordConfirmation":"password"}"#;
    let (status, body) = send(&app, Method::POST, "/users", Some(input)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["trace"], json!({"email": "must be a well-formed email address"}));
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let app = create_test_app();
    let (status, _) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({"code": 422, "message": "Validation error", "trace": {"email": "Already registered"}})
    );

    let (_, users) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_get_user() {
    let app = create_test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, body) = send(&app, Method::GET, "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": 404, "message": "Not found", "trace": {}}));
}

#[tokio::test]
async fn test_update_when_user_does_not_exist() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::PUT, "/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": 404, "message": "Not found", "trace": {}}));

    let (status, _) = send(&app, Method::PUT, "/users/42", Some(r#"{"name":"Someone"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_non_numeric_id() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::PUT, "/users/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found");
}

#[tokio::test]
async fn test_update_with_no_body() {
    let app = create_test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_update_with_empty_json_or_blank_name() {
    let app = create_test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    let uri = format!("/users/{}", created["id"]);

    for input in ["{}", r#"{"name":""}"#, r#"{"name":"   "}"#] {
        let (status, body) = send(&app, Method::PUT, &uri, Some(input)).await;
        assert_eq!(status, StatusCode::OK, "body {input}");
        assert_eq!(body, created, "body {input}");
    }
}

#[tokio::test]
async fn test_update_with_name_in_json() {
    let app = create_test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(r#"{"name":"Updated test name"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": created["id"], "name": "Updated test name", "email": "testuser@example.test"})
    );

    let (_, users) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(users, json!([body]));
}

#[tokio::test]
async fn test_update_with_broken_json() {
    let app = create_test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(VALID_INPUT)).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(r#"{"name":"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Request body cannot be blank");
}
