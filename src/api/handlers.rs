use crate::{
    api::{errors::ApiError, models::ErrorPayload},
    core::{
        errors::AppError,
        models::user::{CreateUserAttrs, UpdateUserAttrs, User},
        services::{UsersService, ensure_valid},
    },
    infrastructure::storage::Storage,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use tracing::debug;

// Define API routes
pub fn api_routes<S: Storage + 'static>(service: Arc<UsersService<S>>) -> Router {
    Router::new()
        .route("/users", get(list_users::<S>).post(create_user::<S>))
        .route("/users/{user_id}", get(get_user::<S>).put(update_user::<S>))
        .with_state(service)
}

// A path id that is not an integer cannot name an existing user.
fn user_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        debug!(error = %rejection, "unparsable user id");
        ApiError(AppError::NotFound)
    })
}

/// Reads an optional update body. Empty or whitespace-only bodies and a JSON `null` mean
/// "no change".
fn parse_update_body(body: &[u8]) -> Result<Option<UpdateUserAttrs>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<UpdateUserAttrs>>(body).map_err(|e| {
        debug!(error = %e, "unparsable update body");
        AppError::MalformedBody
    })
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users, ordered by id", body = [User]),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    )
)]
pub async fn list_users<S: Storage>(State(service): State<Arc<UsersService<S>>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    )
)]
pub async fn get_user<S: Storage>(
    State(service): State<Arc<UsersService<S>>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let user = service.get_user(user_id(path)?).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserAttrs,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 422, description = "Blank body, failed validation or email already registered", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    )
)]
pub async fn create_user<S: Storage>(
    State(service): State<Arc<UsersService<S>>>,
    payload: Result<Json<CreateUserAttrs>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(attrs) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected create body");
        AppError::MalformedBody
    })?;
    ensure_valid(&attrs)?;
    let user = service.create_user(attrs).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "ID of the user to update")
    ),
    request_body(content = UpdateUserAttrs, description = "May be omitted; blank fields are ignored"),
    responses(
        (status = 200, description = "Updated or unchanged user", body = User),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 422, description = "Unparsable body or rejected by the store", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    )
)]
pub async fn update_user<S: Storage>(
    State(service): State<Arc<UsersService<S>>>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let user_id = user_id(path)?;
    let attrs = parse_update_body(&body)?;
    let user = service.update_user(user_id, attrs).await?;
    Ok(Json(user))
}
