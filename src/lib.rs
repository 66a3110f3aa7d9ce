pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::api::handlers::api_routes;
pub use crate::core::errors::AppError;
pub use crate::core::services::UsersService;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;
pub use crate::infrastructure::storage::postgres::PostgresStorage;

#[cfg(test)]
mod tests;
