use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    models::skill_session::{
        CreateSkillSession, SessionAvailability, SkillSession, SkillSessionResponse,
        UpdateSkillSession,
    },
    models::user::User,
    state::AppState,
    types::{SessionId, SkillId, UserId},
    utils::time,
};

#[derive(Debug, Default, Deserialize)]
pub struct SessionListQuery {
    /// When true, only active sessions are returned.
    #[serde(default)]
    pub active: bool,
}

pub async fn create_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateSkillSession>,
) -> Result<Json<SkillSessionResponse>, AppError> {
    payload.validate()?;
    let session = state
        .facade
        .create_skill_session(&state.pool, user.id, payload)
        .await?;
    tracing::info!(session_id = %session.id, instructor_id = %user.id, "created skill session");
    Ok(Json(session.into()))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<SkillSessionResponse>>, AppError> {
    let sessions = if query.active {
        state.facade.get_active_sessions(&state.pool).await?
    } else {
        state.facade.get_all_skill_sessions(&state.pool).await?
    };
    Ok(Json(
        sessions
            .into_iter()
            .map(SkillSessionResponse::from)
            .collect(),
    ))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<SkillSessionResponse>, AppError> {
    let session = state
        .facade
        .get_skill_session(&state.pool, session_id)
        .await?;
    Ok(Json(session.into()))
}

pub async fn get_session_availability(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<SessionAvailability>, AppError> {
    let availability = state
        .facade
        .get_session_availability(&state.pool, session_id)
        .await?;
    Ok(Json(availability))
}

pub async fn get_session_rating(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Value>, AppError> {
    let average_rating = state
        .facade
        .get_session_average_rating(&state.pool, session_id)
        .await?;
    Ok(Json(json!({
        "session_id": session_id,
        "average_rating": average_rating,
    })))
}

pub async fn list_sessions_by_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<UserId>,
) -> Result<Json<Vec<SkillSessionResponse>>, AppError> {
    let sessions = state
        .facade
        .get_sessions_by_instructor(&state.pool, instructor_id)
        .await?;
    Ok(Json(
        sessions
            .into_iter()
            .map(SkillSessionResponse::from)
            .collect(),
    ))
}

pub async fn list_sessions_by_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<SkillId>,
) -> Result<Json<Vec<SkillSessionResponse>>, AppError> {
    let sessions = state
        .facade
        .get_sessions_by_skill(&state.pool, skill_id)
        .await?;
    Ok(Json(
        sessions
            .into_iter()
            .map(SkillSessionResponse::from)
            .collect(),
    ))
}

fn ensure_owner_or_admin(session: &SkillSession, user: &User) -> Result<(), AppError> {
    if session.instructor_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only the session's instructor can modify it".to_string(),
        ));
    }
    Ok(())
}

pub async fn update_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(session_id): Path<SessionId>,
    Json(payload): Json<UpdateSkillSession>,
) -> Result<Json<SkillSessionResponse>, AppError> {
    payload.validate()?;
    let session = state
        .facade
        .get_skill_session(&state.pool, session_id)
        .await?;
    ensure_owner_or_admin(&session, &user)?;

    let now = time::now_utc(&state.config.time_zone);
    let session = state
        .facade
        .update_skill_session(&state.pool, session_id, payload, now)
        .await?;
    Ok(Json(session.into()))
}

pub async fn deactivate_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<SkillSessionResponse>, AppError> {
    let session = state
        .facade
        .get_skill_session(&state.pool, session_id)
        .await?;
    ensure_owner_or_admin(&session, &user)?;

    let now = time::now_utc(&state.config.time_zone);
    let session = state
        .facade
        .deactivate_skill_session(&state.pool, session_id, now)
        .await?;
    Ok(Json(session.into()))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Value>, AppError> {
    let session = state
        .facade
        .get_skill_session(&state.pool, session_id)
        .await?;
    ensure_owner_or_admin(&session, &user)?;

    state
        .facade
        .delete_skill_session(&state.pool, session_id)
        .await?;
    Ok(Json(json!({"message": "Skill session deleted successfully"})))
}

pub async fn add_skill_to_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((session_id, skill_id)): Path<(SessionId, SkillId)>,
) -> Result<Json<SkillSessionResponse>, AppError> {
    let session = state
        .facade
        .get_skill_session(&state.pool, session_id)
        .await?;
    ensure_owner_or_admin(&session, &user)?;

    let session = state
        .facade
        .add_skill_to_session(&state.pool, session_id, skill_id)
        .await?;
    Ok(Json(session.into()))
}
