use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{UpdateUser, User, UserResponse},
    state::AppState,
    types::UserId,
    utils::time,
};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.facade.get_all_users(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.facade.get_user(&state.pool, user_id).await?;
    Ok(Json(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<UserId>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<UserResponse>, AppError> {
    if current_user.id != user_id && !current_user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot modify another user's profile".to_string(),
        ));
    }
    payload.validate()?;

    let now = time::now_utc(&state.config.time_zone);
    let user = state
        .facade
        .update_user(&state.pool, user_id, payload, now)
        .await?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Value>, AppError> {
    if !current_user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can delete users".to_string(),
        ));
    }
    state.facade.delete_user(&state.pool, user_id).await?;
    Ok(Json(json!({"message": "User deleted successfully"})))
}
