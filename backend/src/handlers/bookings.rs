use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::booking::{Booking, BookingResponse, BookingStatus, CreateBooking, UpdateBooking},
    models::user::User,
    state::AppState,
    types::{BookingId, SessionId, UserId},
    utils::time,
};

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}

fn to_responses(bookings: Vec<Booking>, now: chrono::DateTime<chrono::Utc>) -> Vec<BookingResponse> {
    bookings
        .into_iter()
        .map(|b| BookingResponse::from_booking(b, now))
        .collect()
}

/// The authenticated user is always the booking owner; there is no way to
/// book on someone else's behalf.
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateBooking>,
) -> Result<Json<BookingResponse>, AppError> {
    payload.validate()?;
    let now = time::now_utc(&state.config.time_zone);
    let booking = state
        .facade
        .create_booking(&state.pool, user.id, payload, now)
        .await?;
    tracing::info!(booking_id = %booking.id, user_id = %user.id, "created booking");
    Ok(Json(BookingResponse::from_booking(booking, now)))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let now = time::now_utc(&state.config.time_zone);
    let bookings = match query.status {
        Some(status) => {
            state
                .facade
                .get_bookings_by_status(&state.pool, status)
                .await?
        }
        None => state.facade.get_all_bookings(&state.pool).await?,
    };
    Ok(Json(to_responses(bookings, now)))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.facade.get_booking(&state.pool, booking_id).await?;
    ensure_participant(&state, &booking, &user).await?;
    let now = time::now_utc(&state.config.time_zone);
    Ok(Json(BookingResponse::from_booking(booking, now)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(booking_id): Path<BookingId>,
    Json(payload): Json<UpdateBooking>,
) -> Result<Json<BookingResponse>, AppError> {
    payload.validate()?;
    let booking = state.facade.get_booking(&state.pool, booking_id).await?;
    ensure_owner(&booking, &user)?;

    let now = time::now_utc(&state.config.time_zone);
    let booking = state
        .facade
        .update_booking(&state.pool, booking_id, payload, now)
        .await?;
    Ok(Json(BookingResponse::from_booking(booking, now)))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.facade.get_booking(&state.pool, booking_id).await?;
    ensure_owner(&booking, &user)?;

    let now = time::now_utc(&state.config.time_zone);
    let booking = state
        .facade
        .cancel_booking(&state.pool, booking_id, now)
        .await?;
    tracing::info!(booking_id = %booking.id, "cancelled booking");
    Ok(Json(BookingResponse::from_booking(booking, now)))
}

pub async fn confirm_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.facade.get_booking(&state.pool, booking_id).await?;
    ensure_instructor(&state, &booking, &user).await?;

    let now = time::now_utc(&state.config.time_zone);
    let booking = state
        .facade
        .confirm_booking(&state.pool, booking_id, now)
        .await?;
    tracing::info!(booking_id = %booking.id, "confirmed booking");
    Ok(Json(BookingResponse::from_booking(booking, now)))
}

pub async fn complete_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.facade.get_booking(&state.pool, booking_id).await?;
    ensure_instructor(&state, &booking, &user).await?;

    let now = time::now_utc(&state.config.time_zone);
    let booking = state
        .facade
        .complete_booking(&state.pool, booking_id, now)
        .await?;
    tracing::info!(booking_id = %booking.id, "completed booking");
    Ok(Json(BookingResponse::from_booking(booking, now)))
}

pub async fn list_bookings_by_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    if current_user.id != user_id && !current_user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot view another user's bookings".to_string(),
        ));
    }
    let now = time::now_utc(&state.config.time_zone);
    let bookings = state
        .facade
        .get_bookings_by_user(&state.pool, user_id)
        .await?;
    Ok(Json(to_responses(bookings, now)))
}

pub async fn list_bookings_by_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let session = state
        .facade
        .get_skill_session(&state.pool, session_id)
        .await?;
    if session.instructor_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only the session's instructor can list its bookings".to_string(),
        ));
    }
    let now = time::now_utc(&state.config.time_zone);
    let bookings = state
        .facade
        .get_bookings_by_session(&state.pool, session_id)
        .await?;
    Ok(Json(to_responses(bookings, now)))
}

/// Owner-only mutations (update, cancel).
fn ensure_owner(booking: &Booking, user: &User) -> Result<(), AppError> {
    if booking.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot modify another user's booking".to_string(),
        ));
    }
    Ok(())
}

/// Instructor-only transitions (confirm, complete).
async fn ensure_instructor(
    state: &AppState,
    booking: &Booking,
    user: &User,
) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }
    let session = state
        .facade
        .get_skill_session(&state.pool, booking.session_id)
        .await?;
    if session.instructor_id != user.id {
        return Err(AppError::Forbidden(
            "Only the session's instructor can perform this transition".to_string(),
        ));
    }
    Ok(())
}

/// Read access: the owner, the session's instructor, or an admin.
async fn ensure_participant(
    state: &AppState,
    booking: &Booking,
    user: &User,
) -> Result<(), AppError> {
    if booking.user_id == user.id || user.is_admin() {
        return Ok(());
    }
    let session = state
        .facade
        .get_skill_session(&state.pool, booking.session_id)
        .await?;
    if session.instructor_id != user.id {
        return Err(AppError::Forbidden(
            "Cannot view another user's booking".to_string(),
        ));
    }
    Ok(())
}
