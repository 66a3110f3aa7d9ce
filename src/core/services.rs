use tracing::{debug, info, warn};

use crate::core::errors::AppError;
use crate::core::models::user::{CreateUserAttrs, NewUser, UpdateUserAttrs, User};
use crate::core::validation::Validate;
use crate::infrastructure::storage::Storage;

/// Turns a non-empty violation set into [`AppError::ValidationFailed`].
pub fn ensure_valid<T: Validate>(input: &T) -> Result<(), AppError> {
    let violations = input.validate()?;
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationFailed(violations))
    }
}

pub struct UsersService<S: Storage> {
    storage: S,
}

impl<S: Storage> UsersService<S> {
    pub fn new(storage: S) -> Self {
        UsersService { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.storage.list_users().await?)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, AppError> {
        self.storage.get_user(user_id).await?.ok_or(AppError::NotFound)
    }

    /// Persists a user from already-checked request attributes. The password fields are only
    /// used for request validation and are not stored.
    pub async fn create_user(&self, attrs: CreateUserAttrs) -> Result<User, AppError> {
        let new_user = NewUser::from(attrs);
        ensure_valid(&new_user)?;

        info!(email = %new_user.email, "creating user");
        match self.storage.insert_user(new_user).await {
            Ok(user) => {
                debug!(user_id = user.id, "user created");
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "user insert rejected");
                Err(err.into())
            }
        }
    }

    /// Applies `attrs` to the user. Missing or blank attributes leave the record unchanged.
    pub async fn update_user(&self, user_id: i64, attrs: Option<UpdateUserAttrs>) -> Result<User, AppError> {
        let mut user = self.get_user(user_id).await?;
        let Some(attrs) = attrs.filter(|attrs| !attrs.is_blank()) else {
            debug!(user_id, "blank update, returning current record");
            return Ok(user);
        };
        // Blank updates never reach here; rules other than the name check still apply.
        ensure_valid(&attrs)?;

        if let Some(name) = attrs.name {
            user.name = name;
        }
        info!(user_id, "updating user");
        self.storage
            .update_user(&user)
            .await?
            .ok_or(AppError::NotFound)
    }
}
