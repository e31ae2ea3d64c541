//! Common validation rules for booking-domain fields.
//!
//! Kept as pure functions so the same checks apply on create and update
//! paths, independent of entity construction and persistence. The
//! lifecycle manager and review gate call these directly; payload structs
//! express the same bounds through `validator` derive attributes.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Validates a review rating.
///
/// Requirements:
/// - Integer between 1 and 5 inclusive
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::new("rating_out_of_range"));
    }
    Ok(())
}

/// Validates the number of participants on a booking.
///
/// Requirements:
/// - Positive integer
pub fn validate_participants(participants: i32) -> Result<(), ValidationError> {
    if participants <= 0 {
        return Err(ValidationError::new("participants_not_positive"));
    }
    Ok(())
}

/// Validates that a booking date is strictly in the future.
pub fn validate_booking_date(
    booking_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if booking_date <= now {
        return Err(ValidationError::new("booking_date_not_in_future"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn rating_accepts_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(3).is_ok());
        assert!(validate_rating(5).is_ok());
    }

    #[test]
    fn participants_rejects_non_positive() {
        assert!(validate_participants(0).is_err());
        assert!(validate_participants(-2).is_err());
    }

    #[test]
    fn participants_accepts_positive() {
        assert!(validate_participants(1).is_ok());
        assert!(validate_participants(8).is_ok());
    }

    #[test]
    fn booking_date_must_be_strictly_future() {
        let now = Utc::now();
        assert!(validate_booking_date(now, now).is_err());
        assert!(validate_booking_date(now - Duration::seconds(1), now).is_err());
        assert!(validate_booking_date(now + Duration::minutes(5), now).is_ok());
    }
}
