use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    models::skill::{CreateSkill, SkillCategory, SkillResponse, UpdateSkill},
    models::user::User,
    state::AppState,
    types::SkillId,
    utils::time,
};

pub async fn create_skill(
    State(state): State<AppState>,
    Json(payload): Json<CreateSkill>,
) -> Result<Json<SkillResponse>, AppError> {
    payload.validate()?;
    let skill = state.facade.create_skill(&state.pool, payload).await?;
    Ok(Json(skill.into()))
}

pub async fn list_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    let skills = state.facade.get_all_skills(&state.pool).await?;
    Ok(Json(skills.into_iter().map(SkillResponse::from).collect()))
}

pub async fn get_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<SkillId>,
) -> Result<Json<SkillResponse>, AppError> {
    let skill = state.facade.get_skill(&state.pool, skill_id).await?;
    Ok(Json(skill.into()))
}

pub async fn list_skills_by_category(
    State(state): State<AppState>,
    Path(category): Path<SkillCategory>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    let skills = state
        .facade
        .get_skills_by_category(&state.pool, category)
        .await?;
    Ok(Json(skills.into_iter().map(SkillResponse::from).collect()))
}

pub async fn update_skill(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(skill_id): Path<SkillId>,
    Json(payload): Json<UpdateSkill>,
) -> Result<Json<SkillResponse>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can modify skills".to_string(),
        ));
    }
    payload.validate()?;
    let now = time::now_utc(&state.config.time_zone);
    let skill = state
        .facade
        .update_skill(&state.pool, skill_id, payload, now)
        .await?;
    Ok(Json(skill.into()))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(skill_id): Path<SkillId>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can delete skills".to_string(),
        ));
    }
    state.facade.delete_skill(&state.pool, skill_id).await?;
    Ok(Json(json!({"message": "Skill deleted successfully"})))
}
