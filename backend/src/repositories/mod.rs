pub mod booking_repository;
pub mod review_repository;
pub mod session_repository;
pub mod skill_repository;
pub mod transaction;
pub mod user_repository;

pub use booking_repository::{BookingRepository, BookingRepositoryTrait};
pub use review_repository::{ReviewRepository, ReviewRepositoryTrait};
pub use session_repository::{SessionRepository, SessionRepositoryTrait};
pub use skill_repository::{SkillRepository, SkillRepositoryTrait};
pub use transaction::{begin_transaction, commit_transaction, rollback_transaction};
pub use user_repository::{UserRepository, UserRepositoryTrait};
