//! Skill model: a descriptive tag that categorizes sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::SkillId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: SkillId,
    /// Unique name, 1-50 characters after trimming.
    pub name: String,
    pub description: Option<String>,
    pub category: SkillCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT")]
pub enum SkillCategory {
    Technology,
    Arts,
    Language,
    Cooking,
    Music,
    Sports,
    Business,
    Photography,
    Writing,
    Other,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technology => "Technology",
            SkillCategory::Arts => "Arts",
            SkillCategory::Language => "Language",
            SkillCategory::Cooking => "Cooking",
            SkillCategory::Music => "Music",
            SkillCategory::Sports => "Sports",
            SkillCategory::Business => "Business",
            SkillCategory::Photography => "Photography",
            SkillCategory::Writing => "Writing",
            SkillCategory::Other => "Other",
        }
    }
}

impl Skill {
    pub fn new(name: String, description: Option<String>, category: SkillCategory) -> Self {
        let now = Utc::now();
        Self {
            id: SkillId::new(),
            name: name.trim().to_string(),
            description,
            category,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSkill {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    pub category: SkillCategory,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSkill {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SkillResponse {
    #[schema(value_type = String)]
    pub id: SkillId,
    pub name: String,
    pub description: Option<String>,
    pub category: SkillCategory,
    pub created_at: DateTime<Utc>,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        SkillResponse {
            id: skill.id,
            name: skill.name,
            description: skill.description,
            category: skill.category,
            created_at: skill.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_as_title_case() {
        let value = serde_json::to_value(SkillCategory::Photography).unwrap();
        assert_eq!(value, serde_json::json!("Photography"));
        let parsed: SkillCategory = serde_json::from_str("\"Cooking\"").unwrap();
        assert_eq!(parsed, SkillCategory::Cooking);
    }

    #[test]
    fn new_skill_trims_name() {
        let skill = Skill::new("  Rust  ".into(), None, SkillCategory::Technology);
        assert_eq!(skill.name, "Rust");
    }
}
