use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    models::review::{CreateReview, ReviewResponse, UpdateReview},
    models::user::User,
    state::AppState,
    types::{ReviewId, SessionId, UserId},
    utils::time,
};

/// The authenticated user is always the reviewer; the gate enforces that
/// they own the booking being reviewed.
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateReview>,
) -> Result<Json<ReviewResponse>, AppError> {
    payload.validate()?;
    let review = state
        .facade
        .create_review(&state.pool, user.id, payload)
        .await?;
    tracing::info!(review_id = %review.id, booking_id = %review.booking_id, "created review");
    Ok(Json(review.into()))
}

pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = state.facade.get_all_reviews(&state.pool).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<ReviewId>,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = state.facade.get_review(&state.pool, review_id).await?;
    Ok(Json(review.into()))
}

pub async fn update_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(review_id): Path<ReviewId>,
    Json(payload): Json<UpdateReview>,
) -> Result<Json<ReviewResponse>, AppError> {
    payload.validate()?;
    let review = state.facade.get_review(&state.pool, review_id).await?;
    if review.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot modify another user's review".to_string(),
        ));
    }

    let now = time::now_utc(&state.config.time_zone);
    let review = state
        .facade
        .update_review(&state.pool, review_id, payload, now)
        .await?;
    Ok(Json(review.into()))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(review_id): Path<ReviewId>,
) -> Result<Json<Value>, AppError> {
    let review = state.facade.get_review(&state.pool, review_id).await?;
    if review.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot delete another user's review".to_string(),
        ));
    }
    state.facade.delete_review(&state.pool, review_id).await?;
    Ok(Json(json!({"message": "Review deleted successfully"})))
}

pub async fn list_reviews_by_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = state
        .facade
        .get_reviews_by_session(&state.pool, session_id)
        .await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

pub async fn list_reviews_by_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<UserId>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = state
        .facade
        .get_reviews_by_instructor(&state.pool, instructor_id)
        .await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

pub async fn list_reviews_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = state
        .facade
        .get_reviews_by_user(&state.pool, user_id)
        .await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}
