//! Skill repository: CRUD over the descriptive skill catalog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::skill::{Skill, SkillCategory, UpdateSkill};
use crate::types::SkillId;

const SKILL_COLUMNS: &str = "id, name, description, category, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepositoryTrait: Send + Sync {
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Skill>, AppError>;

    async fn find_by_id(&self, db: &PgPool, id: SkillId) -> Result<Option<Skill>, AppError>;

    async fn find_by_name(&self, db: &PgPool, name: &str) -> Result<Option<Skill>, AppError>;

    async fn find_by_category(
        &self,
        db: &PgPool,
        category: SkillCategory,
    ) -> Result<Vec<Skill>, AppError>;

    async fn create(&self, db: &PgPool, skill: &Skill) -> Result<Skill, AppError>;

    async fn update(
        &self,
        db: &PgPool,
        id: SkillId,
        fields: &UpdateSkill,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    async fn delete(&self, db: &PgPool, id: SkillId) -> Result<u64, AppError>;
}

/// Concrete implementation of SkillRepositoryTrait
#[derive(Debug, Default, Clone, Copy)]
pub struct SkillRepository;

impl SkillRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SkillRepositoryTrait for SkillRepository {
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Skill>, AppError> {
        let query = format!("SELECT {} FROM skills ORDER BY name", SKILL_COLUMNS);
        let rows = sqlx::query_as::<_, Skill>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: SkillId) -> Result<Option<Skill>, AppError> {
        let query = format!("SELECT {} FROM skills WHERE id = $1", SKILL_COLUMNS);
        let row = sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, db: &PgPool, name: &str) -> Result<Option<Skill>, AppError> {
        let query = format!("SELECT {} FROM skills WHERE name = $1", SKILL_COLUMNS);
        let row = sqlx::query_as::<_, Skill>(&query)
            .bind(name)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn find_by_category(
        &self,
        db: &PgPool,
        category: SkillCategory,
    ) -> Result<Vec<Skill>, AppError> {
        let query = format!(
            "SELECT {} FROM skills WHERE category = $1 ORDER BY name",
            SKILL_COLUMNS
        );
        let rows = sqlx::query_as::<_, Skill>(&query)
            .bind(category)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn create(&self, db: &PgPool, skill: &Skill) -> Result<Skill, AppError> {
        let query = format!(
            "INSERT INTO skills ({}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            SKILL_COLUMNS, SKILL_COLUMNS
        );
        let row = sqlx::query_as::<_, Skill>(&query)
            .bind(skill.id)
            .bind(&skill.name)
            .bind(&skill.description)
            .bind(skill.category)
            .bind(skill.created_at)
            .bind(skill.updated_at)
            .fetch_one(db)
            .await
            .map_err(|err| {
                if let sqlx::Error::Database(ref db_err) = err {
                    if db_err.is_unique_violation() {
                        return AppError::InvalidInput("Skill name already exists".to_string());
                    }
                }
                err.into()
            })?;
        Ok(row)
    }

    async fn update(
        &self,
        db: &PgPool,
        id: SkillId,
        fields: &UpdateSkill,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE skills SET \
             name = COALESCE($1, name), \
             description = COALESCE($2, description), \
             category = COALESCE($3, category), \
             updated_at = $4 \
             WHERE id = $5",
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.category)
        .bind(timestamp)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, db: &PgPool, id: SkillId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_skill_repository_can_be_created() {
        let _mock = MockSkillRepositoryTrait::new();
    }
}
