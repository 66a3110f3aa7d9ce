pub mod user;

pub use user::{CreateUserAttrs, NewUser, UpdateUserAttrs, User};
