use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::models::user::{NewUser, User};
use crate::infrastructure::storage::{Storage, StorageError};

#[derive(Default)]
struct UsersTable {
    rows: BTreeMap<i64, User>,
    ids_by_email: HashMap<String, i64>,
    last_id: i64,
}

impl UsersTable {
    // Mirrors the CHECK constraints of the relational schema.
    fn check_columns(name: &str, email: &str) -> Result<(), StorageError> {
        if name.is_empty() {
            return Err(StorageError::IntegrityViolation("users.name must not be empty".to_string()));
        }
        if email.is_empty() {
            return Err(StorageError::IntegrityViolation("users.email must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Process-local store. Check-and-write happens under one write lock, so colliding inserts
/// resolve to exactly one success.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<UsersTable>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.rows.values().cloned().collect())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.rows.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users
            .ids_by_email
            .get(email)
            .and_then(|id| users.rows.get(id).cloned()))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StorageError> {
        UsersTable::check_columns(&user.name, &user.email)?;
        let mut users = self.users.write().await;
        if users.ids_by_email.contains_key(&user.email) {
            return Err(StorageError::UniqueViolation {
                column: "email".to_string(),
            });
        }
        users.last_id += 1;
        let created = User {
            id: users.last_id,
            name: user.name,
            email: user.email,
        };
        users.ids_by_email.insert(created.email.clone(), created.id);
        users.rows.insert(created.id, created.clone());
        debug!(user_id = created.id, "inserted user row");
        Ok(created)
    }

    async fn update_user(&self, user: &User) -> Result<Option<User>, StorageError> {
        UsersTable::check_columns(&user.name, &user.email)?;
        let mut users = self.users.write().await;
        let Some(previous_email) = users.rows.get(&user.id).map(|row| row.email.clone()) else {
            return Ok(None);
        };
        if previous_email != user.email {
            if users.ids_by_email.contains_key(&user.email) {
                return Err(StorageError::UniqueViolation {
                    column: "email".to_string(),
                });
            }
            users.ids_by_email.remove(&previous_email);
            users.ids_by_email.insert(user.email.clone(), user.id);
        }
        users.rows.insert(user.id, user.clone());
        Ok(Some(user.clone()))
    }
}
