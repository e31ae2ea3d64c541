//! User repository trait for dependency injection and testing.
//!
//! This module defines the UserRepositoryTrait which can be mocked
//! using mockall for testing purposes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::user::{UpdateUser, User};
use crate::types::UserId;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, bio, phone, \
     location, experience_level, hourly_rate, is_instructor, is_admin, created_at, updated_at";

/// Repository trait for User operations.
///
/// Use `MockUserRepositoryTrait` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Find all users
    async fn find_all(&self, db: &PgPool) -> Result<Vec<User>, AppError>;

    /// Find a user by ID
    async fn find_by_id(&self, db: &PgPool, id: UserId) -> Result<Option<User>, AppError>;

    /// Find a user by email
    async fn find_by_email(&self, db: &PgPool, email: &str) -> Result<Option<User>, AppError>;

    /// Check whether an email is already registered
    async fn email_exists(&self, db: &PgPool, email: &str) -> Result<bool, AppError>;

    /// Persist a new user
    async fn create(&self, db: &PgPool, user: &User) -> Result<User, AppError>;

    /// Apply a partial update to a user
    async fn update(
        &self,
        db: &PgPool,
        id: UserId,
        fields: &UpdateUser,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Delete a user by ID
    async fn delete(&self, db: &PgPool, id: UserId) -> Result<u64, AppError>;
}

/// Concrete implementation of UserRepositoryTrait
#[derive(Debug, Default, Clone, Copy)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_all(&self, db: &PgPool) -> Result<Vec<User>, AppError> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        );
        let rows = sqlx::query_as::<_, User>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: UserId) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn find_by_email(&self, db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let query = format!(
            "SELECT {} FROM users WHERE email = LOWER($1)",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn email_exists(&self, db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = LOWER($1))")
                .bind(email)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    async fn create(&self, db: &PgPool, user: &User) -> Result<User, AppError> {
        let query = format!(
            "INSERT INTO users ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {}",
            USER_COLUMNS, USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.bio)
            .bind(&user.phone)
            .bind(&user.location)
            .bind(user.experience_level)
            .bind(user.hourly_rate)
            .bind(user.is_instructor)
            .bind(user.is_admin)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        db: &PgPool,
        id: UserId,
        fields: &UpdateUser,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE users SET \
             first_name = COALESCE($1, first_name), \
             last_name = COALESCE($2, last_name), \
             bio = COALESCE($3, bio), \
             phone = COALESCE($4, phone), \
             location = COALESCE($5, location), \
             experience_level = COALESCE($6, experience_level), \
             hourly_rate = COALESCE($7, hourly_rate), \
             is_instructor = COALESCE($8, is_instructor), \
             updated_at = $9 \
             WHERE id = $10",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.bio)
        .bind(&fields.phone)
        .bind(&fields.location)
        .bind(fields.experience_level)
        .bind(fields.hourly_rate)
        .bind(fields.is_instructor)
        .bind(timestamp)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, db: &PgPool, id: UserId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_user_repository_can_be_created() {
        let _mock = MockUserRepositoryTrait::new();
    }

    #[test]
    fn mock_user_repository_trait_bounds() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockUserRepositoryTrait>();
    }
}
