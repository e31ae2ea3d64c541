//! Review eligibility pipeline, exercised through the public service API.

use chrono::{Duration, Utc};
use skillshare_backend::error::AppError;
use skillshare_backend::models::booking::{Booking, BookingStatus};
use skillshare_backend::models::user::{ExperienceLevel, User};
use skillshare_backend::services::review_gate::check_eligibility;
use skillshare_backend::types::{SessionId, UserId};

fn make_instructor(is_instructor: bool) -> User {
    User::new(
        "Ines".into(),
        "Moreno".into(),
        "ines@example.com".into(),
        "hash".into(),
        Some("Language coach".into()),
        None,
        None,
        ExperienceLevel::Advanced,
        Some(45.0),
        is_instructor,
        false,
    )
}

fn completed_booking(user_id: UserId, session_id: SessionId) -> Booking {
    let mut booking = Booking::new(
        user_id,
        session_id,
        Utc::now() + Duration::days(1),
        1,
        None,
        45.0,
    );
    booking.status = BookingStatus::Completed;
    booking
}

#[test]
fn completed_owned_booking_passes_all_checks() {
    let reviewer = UserId::new();
    let session = SessionId::new();
    let instructor = make_instructor(true);
    let booking = completed_booking(reviewer, session);

    assert!(check_eligibility(&booking, &instructor, reviewer, session, instructor.id).is_ok());
}

#[test]
fn booking_must_be_completed() {
    let reviewer = UserId::new();
    let session = SessionId::new();
    let instructor = make_instructor(true);

    let mut booking = completed_booking(reviewer, session);
    booking.status = BookingStatus::Confirmed;

    let err = check_eligibility(&booking, &instructor, reviewer, session, instructor.id)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[test]
fn reviewer_must_own_the_booking() {
    let session = SessionId::new();
    let instructor = make_instructor(true);
    let booking = completed_booking(UserId::new(), session);

    let stranger = UserId::new();
    let err =
        check_eligibility(&booking, &instructor, stranger, session, instructor.id).unwrap_err();
    assert!(matches!(err, AppError::OwnershipMismatch(_)));
}

#[test]
fn booking_must_match_the_session() {
    let reviewer = UserId::new();
    let instructor = make_instructor(true);
    let booking = completed_booking(reviewer, SessionId::new());

    let other_session = SessionId::new();
    let err = check_eligibility(&booking, &instructor, reviewer, other_session, instructor.id)
        .unwrap_err();
    assert!(matches!(err, AppError::SessionMismatch(_)));
}

#[test]
fn instructors_cannot_review_their_own_sessions() {
    let session = SessionId::new();
    let instructor = make_instructor(true);
    let booking = completed_booking(instructor.id, session);

    let err = check_eligibility(&booking, &instructor, instructor.id, session, instructor.id)
        .unwrap_err();
    assert!(matches!(err, AppError::SelfReview(_)));
}

#[test]
fn target_must_hold_the_instructor_role() {
    let reviewer = UserId::new();
    let session = SessionId::new();
    let not_instructor = make_instructor(false);
    let booking = completed_booking(reviewer, session);

    let err = check_eligibility(&booking, &not_instructor, reviewer, session, not_instructor.id)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidRole(_)));
}

#[test]
fn role_check_precedes_state_check() {
    // A non-instructor target on an incomplete booking reports the role
    // problem, matching the gate's documented ordering.
    let reviewer = UserId::new();
    let session = SessionId::new();
    let not_instructor = make_instructor(false);
    let mut booking = completed_booking(reviewer, session);
    booking.status = BookingStatus::Pending;

    let err = check_eligibility(&booking, &not_instructor, reviewer, session, not_instructor.id)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidRole(_)));
}
