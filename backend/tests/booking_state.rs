//! Booking lifecycle rules, exercised through the public model API.

use chrono::{Duration, Utc};
use skillshare_backend::models::booking::{Booking, BookingStatus};
use skillshare_backend::types::{SessionId, UserId};

fn booking_days_ahead(days: i64) -> Booking {
    Booking::new(
        UserId::new(),
        SessionId::new(),
        Utc::now() + Duration::days(days),
        1,
        None,
        20.0,
    )
}

#[test]
fn happy_path_pending_confirmed_completed() {
    use BookingStatus::*;
    assert!(Pending.can_transition_to(Confirmed));
    assert!(Confirmed.can_transition_to(Completed));
}

#[test]
fn cancellation_paths() {
    use BookingStatus::*;
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Confirmed.can_transition_to(Cancelled));
}

#[test]
fn completed_booking_rejects_further_transitions() {
    use BookingStatus::*;
    // create -> confirm -> complete -> cancel: the final step must be
    // impossible because completed is terminal.
    let mut status = Pending;
    for next in [Confirmed, Completed] {
        assert!(status.can_transition_to(next));
        status = next;
    }
    assert!(!status.can_transition_to(Cancelled));
    assert!(status.is_terminal());
}

#[test]
fn cancelled_booking_cannot_be_completed() {
    use BookingStatus::*;
    assert!(!Cancelled.can_transition_to(Completed));
    assert!(!Cancelled.can_transition_to(Confirmed));
    assert!(!Cancelled.can_transition_to(Pending));
}

#[test]
fn pending_cannot_skip_to_completed() {
    assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
}

#[test]
fn editability_is_pending_only() {
    let booking = booking_days_ahead(2);
    assert!(booking.is_editable());

    for status in [
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ] {
        let mut booking = booking_days_ahead(2);
        booking.status = status;
        assert!(!booking.is_editable(), "{:?}", status);
    }
}

#[test]
fn past_dated_booking_is_not_cancellable() {
    let now = Utc::now();
    let mut booking = booking_days_ahead(2);
    assert!(booking.is_cancellable(now));

    booking.booking_date = now - Duration::days(1);
    assert!(!booking.is_cancellable(now));
}

#[test]
fn confirmed_future_booking_is_cancellable() {
    let now = Utc::now();
    let mut booking = booking_days_ahead(5);
    booking.status = BookingStatus::Confirmed;
    assert!(booking.is_cancellable(now));
}
