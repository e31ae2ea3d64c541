//! Skill session model: an offered skill-sharing activity with price,
//! duration, and capacity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{SessionId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillSession {
    pub id: SessionId,
    pub title: String,
    pub description: String,
    /// Price per participant per session.
    pub price: f64,
    /// Duration in minutes.
    pub duration: i32,
    /// Invariant: always positive.
    pub max_participants: i32,
    pub session_type: SessionType,
    pub difficulty_level: DifficultyLevel,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub instructor_id: UserId,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SessionType {
    Online,
    InPerson,
    Hybrid,
}

impl Default for SessionType {
    fn default() -> Self {
        SessionType::Online
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Beginner
    }
}

impl SkillSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: String,
        price: f64,
        duration: i32,
        instructor_id: UserId,
        max_participants: i32,
        session_type: SessionType,
        difficulty_level: DifficultyLevel,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            title: title.trim().to_string(),
            description,
            price,
            duration,
            max_participants,
            session_type,
            difficulty_level,
            location,
            latitude,
            longitude,
            instructor_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSkillSession {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 1))]
    #[serde(default = "default_max_participants")]
    pub max_participants: i32,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

fn default_max_participants() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSkillSession {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[validate(range(min = 1))]
    pub max_participants: Option<i32>,
    pub session_type: Option<SessionType>,
    pub difficulty_level: Option<DifficultyLevel>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SkillSessionResponse {
    #[schema(value_type = String)]
    pub id: SessionId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub max_participants: i32,
    pub session_type: SessionType,
    pub difficulty_level: DifficultyLevel,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[schema(value_type = String)]
    pub instructor_id: UserId,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SkillSession> for SkillSessionResponse {
    fn from(session: SkillSession) -> Self {
        SkillSessionResponse {
            id: session.id,
            title: session.title,
            description: session.description,
            price: session.price,
            duration: session.duration,
            max_participants: session.max_participants,
            session_type: session.session_type,
            difficulty_level: session.difficulty_level,
            location: session.location,
            latitude: session.latitude,
            longitude: session.longitude,
            instructor_id: session.instructor_id,
            is_active: session.is_active,
            created_at: session.created_at,
        }
    }
}

/// Availability snapshot for a session, derived from confirmed bookings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionAvailability {
    #[schema(value_type = String)]
    pub session_id: SessionId,
    pub max_participants: i32,
    pub available_spots: i64,
    pub is_fully_booked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_type_serde_kebab_case() {
        let t: SessionType = serde_json::from_str("\"in-person\"").unwrap();
        assert_eq!(t, SessionType::InPerson);
        let v = serde_json::to_value(SessionType::Online).unwrap();
        assert_eq!(v, serde_json::json!("online"));
    }

    #[test]
    fn difficulty_serde_snake_case() {
        let d: DifficultyLevel = serde_json::from_str("\"intermediate\"").unwrap();
        assert_eq!(d, DifficultyLevel::Intermediate);
    }

    #[test]
    fn new_session_is_active_and_trims_title() {
        let session = SkillSession::new(
            "  Sourdough basics  ".into(),
            "Hands-on baking".into(),
            40.0,
            90,
            UserId::new(),
            6,
            SessionType::InPerson,
            DifficultyLevel::Beginner,
            Some("Community kitchen".into()),
            None,
            None,
        );
        assert!(session.is_active);
        assert_eq!(session.title, "Sourdough basics");
    }

    #[test]
    fn create_payload_rejects_non_positive_capacity() {
        use validator::Validate;
        let payload = CreateSkillSession {
            title: "Title".into(),
            description: "Desc".into(),
            price: 10.0,
            duration: 60,
            max_participants: 0,
            session_type: SessionType::Online,
            difficulty_level: DifficultyLevel::Beginner,
            location: None,
            latitude: None,
            longitude: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_payload_rejects_zero_price() {
        use validator::Validate;
        let payload = CreateSkillSession {
            title: "Title".into(),
            description: "Desc".into(),
            price: 0.0,
            duration: 60,
            max_participants: 1,
            session_type: SessionType::Online,
            difficulty_level: DifficultyLevel::Beginner,
            location: None,
            latitude: None,
            longitude: None,
        };
        assert!(payload.validate().is_err());
    }
}
