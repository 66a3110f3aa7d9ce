use utoipa::OpenApi;

use crate::{
    api::models::ErrorPayload,
    core::models::user::{CreateUserAttrs, UpdateUserAttrs, User},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_users,
        super::handlers::get_user,
        super::handlers::create_user,
        super::handlers::update_user
    ),
    components(schemas(CreateUserAttrs, UpdateUserAttrs, User, ErrorPayload)),
    info(
        title = "Userbase API",
        description = "API for creating, listing and updating user records",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
