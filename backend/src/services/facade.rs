//! Facade over the booking domain.
//!
//! Composes the capacity calculator, booking lifecycle manager, and review
//! gate with the repositories, and adds the CRUD passthroughs for users,
//! skills, and sessions. HTTP handlers talk to this type only.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::booking::{Booking, BookingStatus, CreateBooking, UpdateBooking};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::skill::{CreateSkill, Skill, SkillCategory, UpdateSkill};
use crate::models::skill_session::{
    CreateSkillSession, SessionAvailability, SkillSession, UpdateSkillSession,
};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::{
    BookingRepository, BookingRepositoryTrait, ReviewRepository, ReviewRepositoryTrait,
    SessionRepository, SessionRepositoryTrait, SkillRepository, SkillRepositoryTrait,
    UserRepository, UserRepositoryTrait,
};
use crate::services::booking_lifecycle::BookingLifecycle;
use crate::services::capacity;
use crate::services::review_gate::ReviewGate;
use crate::types::{BookingId, ReviewId, SessionId, SkillId, UserId};
use crate::utils::password::hash_password;

#[derive(Debug, Default, Clone)]
pub struct Facade {
    users: UserRepository,
    skills: SkillRepository,
    sessions: SessionRepository,
    bookings: BookingRepository,
    reviews: ReviewRepository,
    lifecycle: BookingLifecycle<SessionRepository, BookingRepository>,
    gate: ReviewGate<UserRepository, SessionRepository, BookingRepository, ReviewRepository>,
}

impl Facade {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Users ---

    pub async fn create_user(&self, db: &PgPool, payload: CreateUser) -> Result<User, AppError> {
        if self.users.email_exists(db, &payload.email).await? {
            return Err(AppError::InvalidInput("Email already exists".to_string()));
        }
        let password_hash = hash_password(&payload.password)?;
        let user = User::new(
            payload.first_name,
            payload.last_name,
            payload.email,
            password_hash,
            payload.bio,
            payload.phone,
            payload.location,
            payload.experience_level,
            payload.hourly_rate,
            payload.is_instructor,
            false,
        );
        self.users.create(db, &user).await
    }

    pub async fn get_user(&self, db: &PgPool, id: UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_user_by_email(
        &self,
        db: &PgPool,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        self.users.find_by_email(db, email).await
    }

    pub async fn get_all_users(&self, db: &PgPool) -> Result<Vec<User>, AppError> {
        self.users.find_all(db).await
    }

    pub async fn update_user(
        &self,
        db: &PgPool,
        id: UserId,
        fields: UpdateUser,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        let affected = self.users.update(db, id, &fields, now).await?;
        if affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        self.get_user(db, id).await
    }

    pub async fn delete_user(&self, db: &PgPool, id: UserId) -> Result<(), AppError> {
        let affected = self.users.delete(db, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    // --- Skills ---

    pub async fn create_skill(&self, db: &PgPool, payload: CreateSkill) -> Result<Skill, AppError> {
        let skill = Skill::new(payload.name, payload.description, payload.category);
        self.skills.create(db, &skill).await
    }

    pub async fn get_skill(&self, db: &PgPool, id: SkillId) -> Result<Skill, AppError> {
        self.skills
            .find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
    }

    pub async fn get_skill_by_name(
        &self,
        db: &PgPool,
        name: &str,
    ) -> Result<Option<Skill>, AppError> {
        self.skills.find_by_name(db, name).await
    }

    pub async fn get_all_skills(&self, db: &PgPool) -> Result<Vec<Skill>, AppError> {
        self.skills.find_all(db).await
    }

    pub async fn get_skills_by_category(
        &self,
        db: &PgPool,
        category: SkillCategory,
    ) -> Result<Vec<Skill>, AppError> {
        self.skills.find_by_category(db, category).await
    }

    pub async fn update_skill(
        &self,
        db: &PgPool,
        id: SkillId,
        fields: UpdateSkill,
        now: DateTime<Utc>,
    ) -> Result<Skill, AppError> {
        let affected = self.skills.update(db, id, &fields, now).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Skill not found".to_string()));
        }
        self.get_skill(db, id).await
    }

    pub async fn delete_skill(&self, db: &PgPool, id: SkillId) -> Result<(), AppError> {
        let affected = self.skills.delete(db, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Skill not found".to_string()));
        }
        Ok(())
    }

    // --- Skill Sessions ---

    pub async fn create_skill_session(
        &self,
        db: &PgPool,
        instructor_id: UserId,
        payload: CreateSkillSession,
    ) -> Result<SkillSession, AppError> {
        let instructor = self
            .users
            .find_by_id(db, instructor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instructor not found".to_string()))?;
        if !instructor.is_instructor {
            return Err(AppError::InvalidRole(
                "User is not an instructor".to_string(),
            ));
        }

        let session = SkillSession::new(
            payload.title,
            payload.description,
            payload.price,
            payload.duration,
            instructor_id,
            payload.max_participants,
            payload.session_type,
            payload.difficulty_level,
            payload.location,
            payload.latitude,
            payload.longitude,
        );
        self.sessions.create(db, &session).await
    }

    pub async fn get_skill_session(
        &self,
        db: &PgPool,
        id: SessionId,
    ) -> Result<SkillSession, AppError> {
        self.sessions
            .find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill session not found".to_string()))
    }

    pub async fn get_all_skill_sessions(&self, db: &PgPool) -> Result<Vec<SkillSession>, AppError> {
        self.sessions.find_all(db).await
    }

    pub async fn get_active_sessions(&self, db: &PgPool) -> Result<Vec<SkillSession>, AppError> {
        self.sessions.find_active(db).await
    }

    pub async fn get_sessions_by_instructor(
        &self,
        db: &PgPool,
        instructor_id: UserId,
    ) -> Result<Vec<SkillSession>, AppError> {
        self.sessions.find_by_instructor(db, instructor_id).await
    }

    pub async fn get_sessions_by_skill(
        &self,
        db: &PgPool,
        skill_id: SkillId,
    ) -> Result<Vec<SkillSession>, AppError> {
        self.sessions.find_by_skill(db, skill_id).await
    }

    pub async fn update_skill_session(
        &self,
        db: &PgPool,
        id: SessionId,
        fields: UpdateSkillSession,
        now: DateTime<Utc>,
    ) -> Result<SkillSession, AppError> {
        let affected = self.sessions.update(db, id, &fields, now).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Skill session not found".to_string()));
        }
        self.get_skill_session(db, id).await
    }

    pub async fn deactivate_skill_session(
        &self,
        db: &PgPool,
        id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<SkillSession, AppError> {
        let affected = self.sessions.set_active(db, id, false, now).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Skill session not found".to_string()));
        }
        self.get_skill_session(db, id).await
    }

    pub async fn delete_skill_session(&self, db: &PgPool, id: SessionId) -> Result<(), AppError> {
        let affected = self.sessions.delete(db, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Skill session not found".to_string()));
        }
        Ok(())
    }

    pub async fn add_skill_to_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
        skill_id: SkillId,
    ) -> Result<SkillSession, AppError> {
        let session = self.get_skill_session(db, session_id).await?;
        self.get_skill(db, skill_id).await?;
        self.sessions.attach_skill(db, session_id, skill_id).await?;
        Ok(session)
    }

    /// Availability snapshot: spots left given the confirmed bookings.
    ///
    /// Read-only; booking creation re-derives this under the session lock.
    pub async fn get_session_availability(
        &self,
        db: &PgPool,
        id: SessionId,
    ) -> Result<SessionAvailability, AppError> {
        let session = self.get_skill_session(db, id).await?;
        let confirmed = self.sessions.count_confirmed_bookings(db, id).await?;
        Ok(SessionAvailability {
            session_id: id,
            max_participants: session.max_participants,
            available_spots: capacity::available_spots(session.max_participants, confirmed),
            is_fully_booked: capacity::is_fully_booked(session.max_participants, confirmed),
        })
    }

    pub async fn get_session_average_rating(
        &self,
        db: &PgPool,
        id: SessionId,
    ) -> Result<Option<f64>, AppError> {
        self.get_skill_session(db, id).await?;
        self.reviews.average_rating_for_session(db, id).await
    }

    // --- Bookings ---

    pub async fn create_booking(
        &self,
        db: &PgPool,
        user_id: UserId,
        payload: CreateBooking,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        self.lifecycle.create(db, user_id, payload, now).await
    }

    pub async fn get_booking(&self, db: &PgPool, id: BookingId) -> Result<Booking, AppError> {
        self.bookings
            .find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    pub async fn get_all_bookings(&self, db: &PgPool) -> Result<Vec<Booking>, AppError> {
        self.bookings.find_all(db).await
    }

    pub async fn get_bookings_by_user(
        &self,
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<Booking>, AppError> {
        self.bookings.find_by_user(db, user_id).await
    }

    pub async fn get_bookings_by_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Vec<Booking>, AppError> {
        self.bookings.find_by_session(db, session_id).await
    }

    pub async fn get_bookings_by_status(
        &self,
        db: &PgPool,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, AppError> {
        self.bookings.find_by_status(db, status).await
    }

    pub async fn update_booking(
        &self,
        db: &PgPool,
        id: BookingId,
        fields: UpdateBooking,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        self.lifecycle.update(db, id, fields, now).await
    }

    pub async fn confirm_booking(
        &self,
        db: &PgPool,
        id: BookingId,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        self.lifecycle.confirm(db, id, now).await
    }

    pub async fn cancel_booking(
        &self,
        db: &PgPool,
        id: BookingId,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        self.lifecycle.cancel(db, id, now).await
    }

    pub async fn complete_booking(
        &self,
        db: &PgPool,
        id: BookingId,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        self.lifecycle.complete(db, id, now).await
    }

    // --- Reviews ---

    pub async fn create_review(
        &self,
        db: &PgPool,
        reviewer_id: UserId,
        payload: CreateReview,
    ) -> Result<Review, AppError> {
        self.gate.create(db, reviewer_id, payload).await
    }

    pub async fn get_review(&self, db: &PgPool, id: ReviewId) -> Result<Review, AppError> {
        self.reviews
            .find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    pub async fn get_all_reviews(&self, db: &PgPool) -> Result<Vec<Review>, AppError> {
        self.reviews.find_all(db).await
    }

    pub async fn get_reviews_by_session(
        &self,
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Vec<Review>, AppError> {
        self.reviews.find_by_session(db, session_id).await
    }

    pub async fn get_reviews_by_instructor(
        &self,
        db: &PgPool,
        instructor_id: UserId,
    ) -> Result<Vec<Review>, AppError> {
        self.reviews.find_by_instructor(db, instructor_id).await
    }

    pub async fn get_reviews_by_user(
        &self,
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<Review>, AppError> {
        self.reviews.find_by_user(db, user_id).await
    }

    pub async fn update_review(
        &self,
        db: &PgPool,
        id: ReviewId,
        fields: UpdateReview,
        now: DateTime<Utc>,
    ) -> Result<Review, AppError> {
        if let Some(rating) = fields.rating {
            if crate::validation::rules::validate_rating(rating).is_err() {
                return Err(AppError::InvalidInput(
                    "Rating must be an integer between 1 and 5".to_string(),
                ));
            }
        }
        let affected = self.reviews.update(db, id, &fields, now).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Review not found".to_string()));
        }
        self.get_review(db, id).await
    }

    pub async fn delete_review(&self, db: &PgPool, id: ReviewId) -> Result<(), AppError> {
        let affected = self.reviews.delete(db, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Review not found".to_string()));
        }
        Ok(())
    }
}
