//! Booking model and lifecycle state machine.
//!
//! A booking reserves spots in a skill session. It is created `pending`,
//! and moves through the transition table in [`BookingStatus::can_transition_to`].
//! `cancelled` and `completed` are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{BookingId, SessionId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub session_id: SessionId,
    /// When the booked session takes place. Must be in the future at creation.
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    /// Number of spots booked.
    pub participants: i32,
    /// Frozen at creation: `session.price * participants`. Later session
    /// price changes never affect existing bookings.
    pub total_price: f64,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl BookingStatus {
    /// Returns the canonical snake_case representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Transition table for the booking lifecycle.
    ///
    /// Permitted: pending -> confirmed, pending -> cancelled,
    /// confirmed -> cancelled, confirmed -> completed. Everything else is
    /// rejected, so terminal states cannot be left.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
        )
    }

    /// Whether the status permits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Statuses from which a booking may still be cancelled.
    pub fn cancellable_states() -> [BookingStatus; 2] {
        [BookingStatus::Pending, BookingStatus::Confirmed]
    }
}

impl Booking {
    pub fn new(
        user_id: UserId,
        session_id: SessionId,
        booking_date: DateTime<Utc>,
        participants: i32,
        special_requests: Option<String>,
        total_price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BookingId::new(),
            user_id,
            session_id,
            booking_date,
            status: BookingStatus::Pending,
            participants,
            total_price,
            special_requests: special_requests
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Only pending bookings may be edited.
    pub fn is_editable(&self) -> bool {
        self.status == BookingStatus::Pending
    }

    /// Pending or confirmed bookings with a future date may be cancelled.
    pub fn is_cancellable(&self, now: DateTime<Utc>) -> bool {
        BookingStatus::cancellable_states().contains(&self.status) && self.booking_date > now
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    #[schema(value_type = String)]
    pub session_id: SessionId,
    pub booking_date: DateTime<Utc>,
    /// Number of spots to book (default: 1).
    #[validate(range(min = 1))]
    #[serde(default = "default_participants")]
    pub participants: i32,
    #[validate(length(max = 300))]
    pub special_requests: Option<String>,
}

fn default_participants() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBooking {
    pub booking_date: Option<DateTime<Utc>>,
    pub participants: Option<i32>,
    #[validate(length(max = 300))]
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    #[schema(value_type = String)]
    pub id: BookingId,
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub session_id: SessionId,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub participants: i32,
    pub total_price: f64,
    pub special_requests: Option<String>,
    pub is_editable: bool,
    pub is_cancellable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingResponse {
    /// Builds the response DTO, deriving the edit/cancel flags at `now`.
    pub fn from_booking(booking: Booking, now: DateTime<Utc>) -> Self {
        let is_editable = booking.is_editable();
        let is_cancellable = booking.is_cancellable(now);
        BookingResponse {
            id: booking.id,
            user_id: booking.user_id,
            session_id: booking.session_id,
            booking_date: booking.booking_date,
            status: booking.status,
            participants: booking.participants,
            total_price: booking.total_price,
            special_requests: booking.special_requests,
            is_editable,
            is_cancellable,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn future_booking(status: BookingStatus) -> Booking {
        let mut booking = Booking::new(
            UserId::new(),
            SessionId::new(),
            Utc::now() + Duration::days(3),
            1,
            None,
            25.0,
        );
        booking.status = status;
        booking
    }

    #[test]
    fn booking_status_serde_snake_case() {
        let status: BookingStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(status, BookingStatus::Confirmed);
        let value = serde_json::to_value(BookingStatus::Cancelled).unwrap();
        assert_eq!(value, serde_json::json!("cancelled"));
    }

    #[test]
    fn transition_table_permits_only_documented_edges() {
        use BookingStatus::*;
        let all = [Pending, Confirmed, Cancelled, Completed];
        let permitted = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, Cancelled),
            (Confirmed, Completed),
        ];
        for from in all {
            for to in all {
                let expected = permitted.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn terminal_states_have_no_outgoing_transitions() {
        use BookingStatus::*;
        for from in [Cancelled, Completed] {
            assert!(from.is_terminal());
            for to in [Pending, Confirmed, Cancelled, Completed] {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn only_pending_bookings_are_editable() {
        assert!(future_booking(BookingStatus::Pending).is_editable());
        assert!(!future_booking(BookingStatus::Confirmed).is_editable());
        assert!(!future_booking(BookingStatus::Cancelled).is_editable());
        assert!(!future_booking(BookingStatus::Completed).is_editable());
    }

    #[test]
    fn cancellable_requires_future_date_and_open_state() {
        let now = Utc::now();
        assert!(future_booking(BookingStatus::Pending).is_cancellable(now));
        assert!(future_booking(BookingStatus::Confirmed).is_cancellable(now));
        assert!(!future_booking(BookingStatus::Completed).is_cancellable(now));
        assert!(!future_booking(BookingStatus::Cancelled).is_cancellable(now));

        let mut past = future_booking(BookingStatus::Pending);
        past.booking_date = now - Duration::hours(1);
        assert!(!past.is_cancellable(now));
    }

    #[test]
    fn new_booking_starts_pending_and_trims_special_requests() {
        let booking = Booking::new(
            UserId::new(),
            SessionId::new(),
            Utc::now() + Duration::days(1),
            2,
            Some("  bring a laptop  ".to_string()),
            90.0,
        );
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.special_requests.as_deref(), Some("bring a laptop"));
        assert_eq!(booking.total_price, 90.0);

        let blank = Booking::new(
            UserId::new(),
            SessionId::new(),
            Utc::now() + Duration::days(1),
            1,
            Some("   ".to_string()),
            45.0,
        );
        assert_eq!(blank.special_requests, None);
    }

    #[test]
    fn response_flags_follow_status() {
        let now = Utc::now();
        let response = BookingResponse::from_booking(future_booking(BookingStatus::Pending), now);
        assert!(response.is_editable);
        assert!(response.is_cancellable);

        let response = BookingResponse::from_booking(future_booking(BookingStatus::Completed), now);
        assert!(!response.is_editable);
        assert!(!response.is_cancellable);
    }
}
