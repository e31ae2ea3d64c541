//! Models that represent platform users (learners, instructors, admins)
//! and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique login identity.
    pub email: String,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub experience_level: ExperienceLevel,
    /// Advertised rate for instructors.
    pub hourly_rate: Option<f64>,
    pub is_instructor: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Default for ExperienceLevel {
    fn default() -> Self {
        ExperienceLevel::Beginner
    }
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        bio: Option<String>,
        phone: Option<String>,
        location: Option<String>,
        experience_level: ExperienceLevel,
        hourly_rate: Option<f64>,
        is_instructor: bool,
        is_admin: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            bio: bio.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            phone: phone.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            location: location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            experience_level,
            hourly_rate,
            is_instructor,
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_instructor(&self) -> bool {
        self.is_instructor
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[validate(range(exclusive_min = 0.0))]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub is_instructor: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    #[validate(range(exclusive_min = 0.0))]
    pub hourly_rate: Option<f64>,
    pub is_instructor: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String)]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub experience_level: ExperienceLevel,
    pub hourly_rate: Option<f64>,
    pub is_instructor: bool,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            bio: user.bio,
            location: user.location,
            experience_level: user.experience_level,
            hourly_rate: user.hourly_rate,
            is_instructor: user.is_instructor,
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(is_instructor: bool) -> User {
        User::new(
            "Ada".into(),
            "Lovelace".into(),
            "Ada@Example.com".into(),
            "hash".into(),
            None,
            None,
            None,
            ExperienceLevel::Expert,
            Some(55.0),
            is_instructor,
            false,
        )
    }

    #[test]
    fn experience_level_serde_snake_case() {
        let level: ExperienceLevel = serde_json::from_str("\"expert\"").unwrap();
        assert_eq!(level, ExperienceLevel::Expert);
        let value = serde_json::to_value(ExperienceLevel::Beginner).unwrap();
        assert_eq!(value, serde_json::json!("beginner"));
    }

    #[test]
    fn new_user_normalizes_email() {
        let user = sample_user(true);
        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_instructor());
        assert!(!user.is_admin());
    }

    #[test]
    fn create_user_payload_validates_email_and_password() {
        use validator::Validate;
        let payload = CreateUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            bio: None,
            phone: None,
            location: None,
            experience_level: ExperienceLevel::Beginner,
            hourly_rate: None,
            is_instructor: false,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn user_response_hides_password_hash() {
        let response: UserResponse = sample_user(false).into();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
