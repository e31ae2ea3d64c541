//! Session capacity calculator.
//!
//! Only confirmed bookings reserve spots: a confirmed booking counts once
//! against `max_participants`, while pending and cancelled bookings never
//! count. Capacity is enforced at booking-creation time inside the session
//! row lock (see the booking repository); the functions here are the shared
//! arithmetic for both that locked path and snapshot reads.

use crate::models::booking::{Booking, BookingStatus};
use crate::models::skill_session::SkillSession;

/// Number of spots still available given the confirmed-booking count.
pub fn available_spots(max_participants: i32, confirmed_count: i64) -> i64 {
    i64::from(max_participants) - confirmed_count
}

/// Whether the session has no spots left.
pub fn is_fully_booked(max_participants: i32, confirmed_count: i64) -> bool {
    available_spots(max_participants, confirmed_count) <= 0
}

/// In-memory variant over a session's loaded bookings.
pub fn available_spots_of(session: &SkillSession, bookings: &[Booking]) -> i64 {
    let confirmed = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .count() as i64;
    available_spots(session.max_participants, confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill_session::{DifficultyLevel, SessionType};
    use crate::types::{SessionId, UserId};
    use chrono::{Duration, Utc};

    fn session(max_participants: i32) -> SkillSession {
        SkillSession::new(
            "Knife skills".into(),
            "Chopping without fear".into(),
            30.0,
            60,
            UserId::new(),
            max_participants,
            SessionType::InPerson,
            DifficultyLevel::Beginner,
            None,
            None,
            None,
        )
    }

    fn booking_with_status(session_id: SessionId, status: BookingStatus) -> Booking {
        let mut booking = Booking::new(
            UserId::new(),
            session_id,
            Utc::now() + Duration::days(1),
            1,
            None,
            30.0,
        );
        booking.status = status;
        booking
    }

    #[test]
    fn available_spots_never_exceeds_max_participants() {
        for confirmed in 0..10 {
            assert!(available_spots(5, confirmed) <= 5);
        }
    }

    #[test]
    fn only_confirmed_bookings_count() {
        let session = session(3);
        let bookings = vec![
            booking_with_status(session.id, BookingStatus::Pending),
            booking_with_status(session.id, BookingStatus::Cancelled),
            booking_with_status(session.id, BookingStatus::Confirmed),
            booking_with_status(session.id, BookingStatus::Completed),
        ];
        assert_eq!(available_spots_of(&session, &bookings), 2);
    }

    #[test]
    fn fully_booked_at_zero_or_below() {
        assert!(!is_fully_booked(2, 1));
        assert!(is_fully_booked(2, 2));
        // Overbooked sessions (confirmed beyond capacity) still read as full.
        assert!(is_fully_booked(2, 3));
        assert_eq!(available_spots(2, 3), -1);
    }

    #[test]
    fn session_with_no_bookings_has_full_capacity() {
        let session = session(4);
        assert_eq!(available_spots_of(&session, &[]), 4);
    }
}
