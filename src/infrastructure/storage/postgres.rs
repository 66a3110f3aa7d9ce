use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, Pool, Postgres};
use tracing::{error, info};

use crate::core::models::user::{NewUser, User};
use crate::infrastructure::storage::{Storage, StorageError};

pub type PgPool = Pool<Postgres>;

const USERS_TABLE: &str = "users";

#[derive(Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and applies the embedded migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::Backend(format!("migration failed: {}", e)))?;
        info!("database migrations applied");
        Ok(Self::new(pool))
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

/// Maps a `users_<column>_key` unique constraint name to its column.
fn unique_column(constraint: &str) -> Option<&str> {
    constraint
        .strip_prefix(USERS_TABLE)?
        .strip_prefix('_')?
        .strip_suffix("_key")
        .filter(|column| !column.is_empty())
}

fn classify(kind: ErrorKind, constraint: Option<&str>, message: &str) -> StorageError {
    match kind {
        ErrorKind::UniqueViolation => match constraint.and_then(unique_column) {
            Some(column) => StorageError::UniqueViolation {
                column: column.to_string(),
            },
            None => StorageError::IntegrityViolation(message.to_string()),
        },
        ErrorKind::ForeignKeyViolation | ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
            StorageError::IntegrityViolation(message.to_string())
        }
        _ => StorageError::Backend(message.to_string()),
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) => classify(db_err.kind(), db_err.constraint(), db_err.message()),
        _ => {
            error!(error = %err, "database call failed");
            StorageError::Backend(err.to_string())
        }
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let records = sqlx::query_as::<_, UserRecord>(r#"SELECT id, name, email FROM users ORDER BY id"#)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(records.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, StorageError> {
        let record = sqlx::query_as::<_, UserRecord>(r#"SELECT id, name, email FROM users WHERE id = $1"#)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(record.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let record = sqlx::query_as::<_, UserRecord>(r#"SELECT id, name, email FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(record.map(User::from))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StorageError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(record.into())
    }

    async fn update_user(&self, user: &User) -> Result<Option<User>, StorageError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET name = $2,
                email = $3
            WHERE id = $1
            RETURNING id, name, email
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(record.map(User::from))
    }
}
