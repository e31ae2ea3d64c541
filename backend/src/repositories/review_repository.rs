//! Review repository trait for dependency injection and testing.
//!
//! The unique index on `reviews.booking_id` is the authoritative guard for
//! the one-review-per-booking invariant; `create` maps a unique violation to
//! `DuplicateReview` so the race between pre-check and insert stays safe.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::review::{Review, UpdateReview};
use crate::types::{BookingId, ReviewId, SessionId, UserId};

const REVIEW_COLUMNS: &str = "id, text, rating, user_id, instructor_id, session_id, \
     booking_id, created_at, updated_at";

/// Repository trait for Review operations.
///
/// Use `MockReviewRepositoryTrait` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepositoryTrait: Send + Sync {
    /// Find all reviews
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Review>, AppError>;

    /// Find a review by ID
    async fn find_by_id(&self, db: &PgPool, id: ReviewId) -> Result<Option<Review>, AppError>;

    /// Whether the booking already has a review attached
    async fn exists_for_booking(
        &self,
        db: &PgPool,
        booking_id: BookingId,
    ) -> Result<bool, AppError>;

    /// Find reviews for a session
    async fn find_by_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Vec<Review>, AppError>;

    /// Find reviews received by an instructor
    async fn find_by_instructor(
        &self,
        db: &PgPool,
        instructor_id: UserId,
    ) -> Result<Vec<Review>, AppError>;

    /// Find reviews written by a user
    async fn find_by_user(&self, db: &PgPool, user_id: UserId) -> Result<Vec<Review>, AppError>;

    /// Persist a new review
    async fn create(&self, db: &PgPool, review: &Review) -> Result<Review, AppError>;

    /// Apply a partial update to a review
    async fn update(
        &self,
        db: &PgPool,
        id: ReviewId,
        fields: &UpdateReview,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Delete a review by ID
    async fn delete(&self, db: &PgPool, id: ReviewId) -> Result<u64, AppError>;

    /// Average rating over a session's reviews, if any exist
    async fn average_rating_for_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Option<f64>, AppError>;
}

/// Concrete implementation of ReviewRepositoryTrait
#[derive(Debug, Default, Clone, Copy)]
pub struct ReviewRepository;

impl ReviewRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReviewRepositoryTrait for ReviewRepository {
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Review>, AppError> {
        let query = format!(
            "SELECT {} FROM reviews ORDER BY created_at DESC",
            REVIEW_COLUMNS
        );
        let rows = sqlx::query_as::<_, Review>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: ReviewId) -> Result<Option<Review>, AppError> {
        let query = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
        let row = sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn exists_for_booking(
        &self,
        db: &PgPool,
        booking_id: BookingId,
    ) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reviews WHERE booking_id = $1)")
                .bind(booking_id)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    async fn find_by_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Vec<Review>, AppError> {
        let query = format!(
            "SELECT {} FROM reviews WHERE session_id = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        );
        let rows = sqlx::query_as::<_, Review>(&query)
            .bind(session_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_instructor(
        &self,
        db: &PgPool,
        instructor_id: UserId,
    ) -> Result<Vec<Review>, AppError> {
        let query = format!(
            "SELECT {} FROM reviews WHERE instructor_id = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        );
        let rows = sqlx::query_as::<_, Review>(&query)
            .bind(instructor_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_user(&self, db: &PgPool, user_id: UserId) -> Result<Vec<Review>, AppError> {
        let query = format!(
            "SELECT {} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        );
        let rows = sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn create(&self, db: &PgPool, review: &Review) -> Result<Review, AppError> {
        let query = format!(
            "INSERT INTO reviews ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            REVIEW_COLUMNS, REVIEW_COLUMNS
        );
        let row = sqlx::query_as::<_, Review>(&query)
            .bind(review.id)
            .bind(&review.text)
            .bind(review.rating)
            .bind(review.user_id)
            .bind(review.instructor_id)
            .bind(review.session_id)
            .bind(review.booking_id)
            .bind(review.created_at)
            .bind(review.updated_at)
            .fetch_one(db)
            .await
            .map_err(|err| {
                if let sqlx::Error::Database(ref db_err) = err {
                    if db_err.is_unique_violation() {
                        return AppError::DuplicateReview(
                            "This booking has already been reviewed".to_string(),
                        );
                    }
                }
                err.into()
            })?;
        Ok(row)
    }

    async fn update(
        &self,
        db: &PgPool,
        id: ReviewId,
        fields: &UpdateReview,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reviews SET \
             text = COALESCE($1, text), \
             rating = COALESCE($2, rating), \
             updated_at = $3 \
             WHERE id = $4",
        )
        .bind(&fields.text)
        .bind(fields.rating)
        .bind(timestamp)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, db: &PgPool, id: ReviewId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn average_rating_for_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Option<f64>, AppError> {
        let avg: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(rating)::DOUBLE PRECISION FROM reviews WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_one(db)
        .await?;
        Ok(avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_review_repository_can_be_created() {
        let _mock = MockReviewRepositoryTrait::new();
    }

    #[test]
    fn mock_review_repository_trait_bounds() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockReviewRepositoryTrait>();
    }
}
