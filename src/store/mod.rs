pub mod memory;
pub mod seed;

use crate::error::Result;
use crate::models::quiz::Quiz;
use crate::models::result::QuizResult;
use crate::models::timetable::{SchoolClass, Subject, Teacher, TimeSlot, Timetable};
use crate::models::user::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Read/write access to the quiz catalog.
#[async_trait]
pub trait QuizCatalog: Send + Sync {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>>;
    async fn get_quiz(&self, id: Uuid) -> Result<Option<Quiz>>;
    async fn insert_quiz(&self, quiz: Quiz) -> Result<Quiz>;
    async fn update_quiz(&self, quiz: Quiz) -> Result<Quiz>;
    async fn delete_quiz(&self, id: Uuid) -> Result<()>;
}

/// Append-only record of finished attempts.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn append_result(&self, result: QuizResult) -> Result<()>;
    async fn list_results_for_user(&self, user_id: Uuid) -> Result<Vec<QuizResult>>;
    async fn list_results(&self) -> Result<Vec<QuizResult>>;
}

/// School roster the timetable engine schedules against.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn list_classes(&self) -> Result<Vec<SchoolClass>>;
}

/// Saved timetables. Implementations may fail; callers keep their in-memory
/// slot state intact and surface the failure.
#[async_trait]
pub trait TimetableStore: Send + Sync {
    async fn create_timetable(&self, timetable: Timetable) -> Result<Timetable>;
    async fn update_timetable(&self, id: Uuid, slots: Vec<TimeSlot>) -> Result<Timetable>;
    async fn delete_timetable(&self, id: Uuid) -> Result<()>;
    async fn get_timetable(&self, id: Uuid) -> Result<Option<Timetable>>;
    async fn list_timetables(&self) -> Result<Vec<Timetable>>;
}

/// Registered accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;
    async fn insert_user(&self, user: User) -> Result<User>;
    async fn count_users(&self) -> Result<usize>;
}
