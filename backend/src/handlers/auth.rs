use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{CreateUser, LoginRequest, LoginResponse, User, UserResponse},
    state::AppState,
    utils::{jwt::create_access_token, password::verify_password},
};

fn role_of(user: &User) -> &'static str {
    if user.is_admin() {
        "admin"
    } else if user.is_instructor() {
        "instructor"
    } else {
        "user"
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;
    let user = state.facade.create_user(&state.pool, payload).await?;
    tracing::info!(user_id = %user.id, "registered new user");
    Ok(Json(user.into()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let user = state
        .facade
        .get_user_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let access_token = create_access_token(
        user.id.to_string(),
        user.email.clone(),
        role_of(&user).to_string(),
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(Json(LoginResponse {
        access_token,
        user: user.into(),
    }))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}
