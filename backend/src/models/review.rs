//! Review model: user-authored feedback tied 1:1 to a completed booking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{BookingId, ReviewId, SessionId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub text: String,
    /// Integer rating in [1, 5].
    pub rating: i32,
    /// The reviewer. Must own the referenced booking.
    pub user_id: UserId,
    /// The instructor being reviewed. Never equal to the reviewer.
    pub instructor_id: UserId,
    pub session_id: SessionId,
    /// Exactly one review per booking, backed by a unique index.
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        text: String,
        rating: i32,
        user_id: UserId,
        instructor_id: UserId,
        session_id: SessionId,
        booking_id: BookingId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReviewId::new(),
            text,
            rating,
            user_id,
            instructor_id,
            session_id,
            booking_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(length(min = 1, max = 500))]
    pub text: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[schema(value_type = String)]
    pub session_id: SessionId,
    #[schema(value_type = String)]
    pub instructor_id: UserId,
    #[schema(value_type = String)]
    pub booking_id: BookingId,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(length(min = 1, max = 500))]
    pub text: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    #[schema(value_type = String)]
    pub id: ReviewId,
    pub text: String,
    pub rating: i32,
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub instructor_id: UserId,
    #[schema(value_type = String)]
    pub session_id: SessionId,
    #[schema(value_type = String)]
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id,
            text: review.text,
            rating: review.rating,
            user_id: review.user_id,
            instructor_id: review.instructor_id,
            session_id: review.session_id,
            booking_id: review.booking_id,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn payload(rating: i32, text: &str) -> CreateReview {
        CreateReview {
            text: text.to_string(),
            rating,
            session_id: SessionId::new(),
            instructor_id: UserId::new(),
            booking_id: BookingId::new(),
        }
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        assert!(payload(6, "great").validate().is_err());
        assert!(payload(0, "great").validate().is_err());
        assert!(payload(3, "great").validate().is_ok());
        assert!(payload(1, "great").validate().is_ok());
        assert!(payload(5, "great").validate().is_ok());
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(payload(4, "").validate().is_err());
    }
}
