//! Skill session repository trait for dependency injection and testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::skill_session::{SkillSession, UpdateSkillSession};
use crate::types::{SessionId, SkillId};

pub(crate) const SESSION_COLUMNS: &str = "id, title, description, price, duration, \
     max_participants, session_type, difficulty_level, location, latitude, longitude, \
     instructor_id, is_active, created_at, updated_at";

/// Repository trait for SkillSession operations.
///
/// Use `MockSessionRepositoryTrait` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepositoryTrait: Send + Sync {
    /// Find all sessions
    async fn find_all(&self, db: &PgPool) -> Result<Vec<SkillSession>, AppError>;

    /// Find a session by ID
    async fn find_by_id(&self, db: &PgPool, id: SessionId)
        -> Result<Option<SkillSession>, AppError>;

    /// Find all active sessions
    async fn find_active(&self, db: &PgPool) -> Result<Vec<SkillSession>, AppError>;

    /// Find sessions offered by an instructor
    async fn find_by_instructor(
        &self,
        db: &PgPool,
        instructor_id: crate::types::UserId,
    ) -> Result<Vec<SkillSession>, AppError>;

    /// Find sessions tagged with a skill
    async fn find_by_skill(&self, db: &PgPool, skill_id: SkillId)
        -> Result<Vec<SkillSession>, AppError>;

    /// Persist a new session
    async fn create(&self, db: &PgPool, session: &SkillSession)
        -> Result<SkillSession, AppError>;

    /// Apply a partial update to a session
    async fn update(
        &self,
        db: &PgPool,
        id: SessionId,
        fields: &UpdateSkillSession,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Flip the active flag
    async fn set_active(
        &self,
        db: &PgPool,
        id: SessionId,
        is_active: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Delete a session by ID
    async fn delete(&self, db: &PgPool, id: SessionId) -> Result<u64, AppError>;

    /// Tag a session with a skill (idempotent)
    async fn attach_skill(
        &self,
        db: &PgPool,
        session_id: SessionId,
        skill_id: SkillId,
    ) -> Result<(), AppError>;

    /// Count confirmed bookings for a session.
    ///
    /// Snapshot read; booking creation uses its own locked count.
    async fn count_confirmed_bookings(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<i64, AppError>;
}

/// Concrete implementation of SessionRepositoryTrait
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionRepository;

impl SessionRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionRepository {
    async fn find_all(&self, db: &PgPool) -> Result<Vec<SkillSession>, AppError> {
        let query = format!(
            "SELECT {} FROM skill_sessions ORDER BY created_at DESC",
            SESSION_COLUMNS
        );
        let rows = sqlx::query_as::<_, SkillSession>(&query)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        db: &PgPool,
        id: SessionId,
    ) -> Result<Option<SkillSession>, AppError> {
        let query = format!(
            "SELECT {} FROM skill_sessions WHERE id = $1",
            SESSION_COLUMNS
        );
        let row = sqlx::query_as::<_, SkillSession>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn find_active(&self, db: &PgPool) -> Result<Vec<SkillSession>, AppError> {
        let query = format!(
            "SELECT {} FROM skill_sessions WHERE is_active = TRUE ORDER BY created_at DESC",
            SESSION_COLUMNS
        );
        let rows = sqlx::query_as::<_, SkillSession>(&query)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_instructor(
        &self,
        db: &PgPool,
        instructor_id: crate::types::UserId,
    ) -> Result<Vec<SkillSession>, AppError> {
        let query = format!(
            "SELECT {} FROM skill_sessions WHERE instructor_id = $1 ORDER BY created_at DESC",
            SESSION_COLUMNS
        );
        let rows = sqlx::query_as::<_, SkillSession>(&query)
            .bind(instructor_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_skill(
        &self,
        db: &PgPool,
        skill_id: SkillId,
    ) -> Result<Vec<SkillSession>, AppError> {
        let query = format!(
            "SELECT s.{} FROM skill_sessions s \
             INNER JOIN session_skills ss ON ss.session_id = s.id \
             WHERE ss.skill_id = $1 ORDER BY s.created_at DESC",
            SESSION_COLUMNS.replace(", ", ", s.")
        );
        let rows = sqlx::query_as::<_, SkillSession>(&query)
            .bind(skill_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn create(&self, db: &PgPool, session: &SkillSession) -> Result<SkillSession, AppError> {
        let query = format!(
            "INSERT INTO skill_sessions ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {}",
            SESSION_COLUMNS, SESSION_COLUMNS
        );
        let row = sqlx::query_as::<_, SkillSession>(&query)
            .bind(session.id)
            .bind(&session.title)
            .bind(&session.description)
            .bind(session.price)
            .bind(session.duration)
            .bind(session.max_participants)
            .bind(session.session_type)
            .bind(session.difficulty_level)
            .bind(&session.location)
            .bind(session.latitude)
            .bind(session.longitude)
            .bind(session.instructor_id)
            .bind(session.is_active)
            .bind(session.created_at)
            .bind(session.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        db: &PgPool,
        id: SessionId,
        fields: &UpdateSkillSession,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE skill_sessions SET \
             title = COALESCE($1, title), \
             description = COALESCE($2, description), \
             price = COALESCE($3, price), \
             duration = COALESCE($4, duration), \
             max_participants = COALESCE($5, max_participants), \
             session_type = COALESCE($6, session_type), \
             difficulty_level = COALESCE($7, difficulty_level), \
             location = COALESCE($8, location), \
             is_active = COALESCE($9, is_active), \
             updated_at = $10 \
             WHERE id = $11",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.duration)
        .bind(fields.max_participants)
        .bind(fields.session_type)
        .bind(fields.difficulty_level)
        .bind(&fields.location)
        .bind(fields.is_active)
        .bind(timestamp)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn set_active(
        &self,
        db: &PgPool,
        id: SessionId,
        is_active: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE skill_sessions SET is_active = $1, updated_at = $2 WHERE id = $3")
                .bind(is_active)
                .bind(timestamp)
                .bind(id)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, db: &PgPool, id: SessionId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM skill_sessions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn attach_skill(
        &self,
        db: &PgPool,
        session_id: SessionId,
        skill_id: SkillId,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO session_skills (session_id, skill_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(session_id)
        .bind(skill_id)
        .execute(db)
        .await?;
        Ok(())
    }

    async fn count_confirmed_bookings(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE session_id = $1 AND status = 'confirmed'",
        )
        .bind(session_id)
        .fetch_one(db)
        .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_session_repository_can_be_created() {
        let _mock = MockSessionRepositoryTrait::new();
    }

    #[test]
    fn mock_session_repository_trait_bounds() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockSessionRepositoryTrait>();
    }
}
