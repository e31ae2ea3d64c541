//! Capacity calculator properties over the public service API.

use chrono::{Duration, Utc};
use skillshare_backend::models::booking::{Booking, BookingStatus};
use skillshare_backend::models::skill_session::{DifficultyLevel, SessionType, SkillSession};
use skillshare_backend::services::capacity;
use skillshare_backend::types::{SessionId, UserId};

fn session_with_capacity(max_participants: i32) -> SkillSession {
    SkillSession::new(
        "Conversational Spanish".into(),
        "Small-group practice".into(),
        20.0,
        45,
        UserId::new(),
        max_participants,
        SessionType::Online,
        DifficultyLevel::Intermediate,
        None,
        None,
        None,
    )
}

fn booking(session_id: SessionId, status: BookingStatus, participants: i32) -> Booking {
    let mut b = Booking::new(
        UserId::new(),
        session_id,
        Utc::now() + Duration::days(1),
        participants,
        None,
        20.0 * f64::from(participants),
    );
    b.status = status;
    b
}

#[test]
fn available_spots_never_exceeds_max() {
    let session = session_with_capacity(3);
    assert_eq!(capacity::available_spots_of(&session, &[]), 3);
    for confirmed in 0..20 {
        assert!(capacity::available_spots(3, confirmed) <= 3);
    }
}

#[test]
fn pending_and_cancelled_bookings_never_count() {
    let session = session_with_capacity(2);
    let bookings = vec![
        booking(session.id, BookingStatus::Pending, 1),
        booking(session.id, BookingStatus::Pending, 1),
        booking(session.id, BookingStatus::Cancelled, 1),
    ];
    assert_eq!(capacity::available_spots_of(&session, &bookings), 2);
    assert!(!capacity::is_fully_booked(2, 0));
}

#[test]
fn single_spot_session_fills_with_one_confirmed_booking() {
    let session = session_with_capacity(1);
    let bookings = vec![booking(session.id, BookingStatus::Confirmed, 1)];
    assert_eq!(capacity::available_spots_of(&session, &bookings), 0);
    assert!(capacity::is_fully_booked(1, 1));
}

#[test]
fn pending_bookings_can_exceed_capacity() {
    // Capacity only constrains confirmed bookings; an arbitrary number of
    // pending bookings may pile up beyond max_participants.
    let session = session_with_capacity(1);
    let bookings: Vec<_> = (0..5)
        .map(|_| booking(session.id, BookingStatus::Pending, 1))
        .collect();
    assert_eq!(capacity::available_spots_of(&session, &bookings), 1);
}
