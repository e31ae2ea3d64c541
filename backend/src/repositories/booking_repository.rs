//! Booking repository trait for dependency injection and testing.
//!
//! Besides plain lookups, this repository owns the two write paths that must
//! be atomic: capacity-checked insertion (session row lock) and status
//! transitions (compare-and-set UPDATEs with the permitted prior states in
//! the WHERE clause).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::booking::{Booking, BookingStatus, UpdateBooking};
use crate::models::skill_session::SkillSession;
use crate::repositories::session_repository::SESSION_COLUMNS;
use crate::repositories::transaction;
use crate::services::capacity;
use crate::types::{BookingId, SessionId, UserId};

const BOOKING_COLUMNS: &str = "id, user_id, session_id, booking_date, status, participants, \
     total_price, special_requests, created_at, updated_at";

/// Repository trait for Booking operations.
///
/// Use `MockBookingRepositoryTrait` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepositoryTrait: Send + Sync {
    /// Find all bookings
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Booking>, AppError>;

    /// Find a booking by ID
    async fn find_by_id(&self, db: &PgPool, id: BookingId) -> Result<Option<Booking>, AppError>;

    /// Find bookings made by a user
    async fn find_by_user(&self, db: &PgPool, user_id: UserId) -> Result<Vec<Booking>, AppError>;

    /// Find bookings for a session
    async fn find_by_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Vec<Booking>, AppError>;

    /// Find bookings in a given lifecycle state
    async fn find_by_status(
        &self,
        db: &PgPool,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, AppError>;

    /// Insert a booking, enforcing session capacity atomically.
    ///
    /// Locks the session row, counts confirmed bookings inside the same
    /// transaction, and only then inserts. Two concurrent calls serialize on
    /// the lock, so both can never pass the capacity check together.
    async fn insert_within_capacity(&self, db: &PgPool, booking: &Booking)
        -> Result<Booking, AppError>;

    /// Apply a partial update, guarded on `status = 'pending'`.
    ///
    /// Returns the number of rows affected; zero means the booking is either
    /// missing or no longer editable.
    async fn update_editable(
        &self,
        db: &PgPool,
        id: BookingId,
        fields: &UpdateBooking,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Compare-and-set status transition.
    ///
    /// Moves the booking to `to` only if its current status is one of
    /// `from`. Returns the number of rows affected.
    async fn transition(
        &self,
        db: &PgPool,
        id: BookingId,
        from: &[BookingStatus],
        to: BookingStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Cancel a booking if it is still pending/confirmed and future-dated.
    ///
    /// Both guards live in the WHERE clause so the check and the write are
    /// one atomic statement.
    async fn cancel(
        &self,
        db: &PgPool,
        id: BookingId,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;
}

/// Concrete implementation of BookingRepositoryTrait
#[derive(Debug, Default, Clone, Copy)]
pub struct BookingRepository;

impl BookingRepository {
    pub fn new() -> Self {
        Self
    }
}

fn status_names(statuses: &[BookingStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query_as::<_, Booking>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: BookingId) -> Result<Option<Booking>, AppError> {
        let query = format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS);
        let row = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn find_by_user(&self, db: &PgPool, user_id: UserId) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE session_id = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query_as::<_, Booking>(&query)
            .bind(session_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_status(
        &self,
        db: &PgPool,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE status = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query_as::<_, Booking>(&query)
            .bind(status)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn insert_within_capacity(
        &self,
        db: &PgPool,
        booking: &Booking,
    ) -> Result<Booking, AppError> {
        let mut tx = transaction::begin_transaction(db).await?;

        // Lock the session row; concurrent inserts for the same session
        // queue here until this transaction completes.
        let lock_query = format!(
            "SELECT {} FROM skill_sessions WHERE id = $1 FOR UPDATE",
            SESSION_COLUMNS
        );
        let session = sqlx::query_as::<_, SkillSession>(&lock_query)
            .bind(booking.session_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill session not found".to_string()))?;

        let confirmed: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE session_id = $1 AND status = 'confirmed'",
        )
        .bind(booking.session_id)
        .fetch_one(&mut *tx)
        .await?;

        if capacity::available_spots(session.max_participants, confirmed)
            < i64::from(booking.participants)
        {
            transaction::rollback_transaction(tx).await?;
            return Err(AppError::CapacityExceeded(
                "Not enough available spots".to_string(),
            ));
        }

        let insert_query = format!(
            "INSERT INTO bookings ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {}",
            BOOKING_COLUMNS, BOOKING_COLUMNS
        );
        let row = sqlx::query_as::<_, Booking>(&insert_query)
            .bind(booking.id)
            .bind(booking.user_id)
            .bind(booking.session_id)
            .bind(booking.booking_date)
            .bind(booking.status)
            .bind(booking.participants)
            .bind(booking.total_price)
            .bind(&booking.special_requests)
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .fetch_one(&mut *tx)
            .await?;

        transaction::commit_transaction(tx).await?;
        Ok(row)
    }

    async fn update_editable(
        &self,
        db: &PgPool,
        id: BookingId,
        fields: &UpdateBooking,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET \
             booking_date = COALESCE($1, booking_date), \
             participants = COALESCE($2, participants), \
             special_requests = COALESCE($3, special_requests), \
             updated_at = $4 \
             WHERE id = $5 AND status = 'pending'",
        )
        .bind(fields.booking_date)
        .bind(fields.participants)
        .bind(&fields.special_requests)
        .bind(timestamp)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn transition(
        &self,
        db: &PgPool,
        id: BookingId,
        from: &[BookingStatus],
        to: BookingStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = $1, updated_at = $2 \
             WHERE id = $3 AND status = ANY($4)",
        )
        .bind(to)
        .bind(timestamp)
        .bind(id)
        .bind(status_names(from))
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn cancel(
        &self,
        db: &PgPool,
        id: BookingId,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled', updated_at = $1 \
             WHERE id = $2 AND status = ANY($3) AND booking_date > $1",
        )
        .bind(timestamp)
        .bind(id)
        .bind(status_names(&BookingStatus::cancellable_states()))
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_booking_repository_can_be_created() {
        let _mock = MockBookingRepositoryTrait::new();
    }

    #[test]
    fn mock_booking_repository_trait_bounds() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockBookingRepositoryTrait>();
    }

    #[test]
    fn status_names_use_canonical_forms() {
        let names = status_names(&BookingStatus::cancellable_states());
        assert_eq!(names, vec!["pending".to_string(), "confirmed".to_string()]);
    }
}
