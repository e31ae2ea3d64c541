//! OpenAPI document for the HTTP surface, served as plain JSON.

use axum::Json;
use utoipa::OpenApi;

use crate::models::booking::{BookingResponse, BookingStatus, CreateBooking, UpdateBooking};
use crate::models::review::{CreateReview, ReviewResponse, UpdateReview};
use crate::models::skill::{CreateSkill, SkillCategory, SkillResponse, UpdateSkill};
use crate::models::skill_session::{
    CreateSkillSession, DifficultyLevel, SessionAvailability, SessionType, SkillSessionResponse,
    UpdateSkillSession,
};
use crate::models::user::{
    CreateUser, ExperienceLevel, LoginRequest, LoginResponse, UpdateUser, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skillshare Booking API",
        description = "Peer-to-peer skill-sharing sessions: instructors list sessions, \
                       users book them, and completed bookings can be reviewed."
    ),
    components(
        schemas(
            // auth & users
            CreateUser,
            UpdateUser,
            LoginRequest,
            LoginResponse,
            UserResponse,
            ExperienceLevel,
            // skills
            CreateSkill,
            UpdateSkill,
            SkillResponse,
            SkillCategory,
            // sessions
            CreateSkillSession,
            UpdateSkillSession,
            SkillSessionResponse,
            SessionAvailability,
            SessionType,
            DifficultyLevel,
            // bookings
            CreateBooking,
            UpdateBooking,
            BookingResponse,
            BookingStatus,
            // reviews
            CreateReview,
            UpdateReview,
            ReviewResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User directory"),
        (name = "skills", description = "Skill catalog"),
        (name = "sessions", description = "Skill sessions and availability"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "reviews", description = "Reviews of completed bookings"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialize openapi");
        assert!(json["components"]["schemas"].get("BookingStatus").is_some());
    }
}
