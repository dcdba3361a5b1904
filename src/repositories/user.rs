// src/repositories/user.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::user::User};

const COLUMNS: &str = "id, first_name, last_name, email, password, cgu";

/// Fields of a user about to be inserted. `password` is already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub cgu: bool,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Case-insensitive lookup by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            COLUMNS
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Inserts the user with a lower-cased email.
    /// An already registered email fails with `AppError::Conflict`.
    pub async fn create(&self, user: NewUser<'_>) -> Result<User, AppError> {
        let email = user.email.trim().to_lowercase();

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password, cgu)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(&email)
        .bind(user.password)
        .bind(user.cgu)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Email '{}' is already registered", email))
            }
            other => {
                tracing::error!("Failed to create user: {}", other);
                other
            }
        })
    }
}
