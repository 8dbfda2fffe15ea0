use crate::error::{Error, Result};
use crate::models::quiz::Quiz;
use crate::models::result::QuizResult;
use crate::models::timetable::{SchoolClass, Subject, Teacher, TimeSlot, Timetable};
use crate::models::user::User;
use crate::store::{QuizCatalog, ResultStore, RosterProvider, TimetableStore, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryQuizCatalog {
    quizzes: RwLock<Vec<Quiz>>,
}

impl MemoryQuizCatalog {
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: RwLock::new(quizzes),
        }
    }
}

#[async_trait]
impl QuizCatalog for MemoryQuizCatalog {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        Ok(self.quizzes.read().await.clone())
    }

    async fn get_quiz(&self, id: Uuid) -> Result<Option<Quiz>> {
        Ok(self.quizzes.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn insert_quiz(&self, quiz: Quiz) -> Result<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn update_quiz(&self, quiz: Quiz) -> Result<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let slot = quizzes
            .iter_mut()
            .find(|q| q.id == quiz.id)
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        *slot = quiz.clone();
        Ok(quiz)
    }

    async fn delete_quiz(&self, id: Uuid) -> Result<()> {
        let mut quizzes = self.quizzes.write().await;
        let before = quizzes.len();
        quizzes.retain(|q| q.id != id);
        if quizzes.len() == before {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryResultStore {
    results: RwLock<Vec<QuizResult>>,
}

impl MemoryResultStore {
    pub fn new(results: Vec<QuizResult>) -> Self {
        Self {
            results: RwLock::new(results),
        }
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn append_result(&self, result: QuizResult) -> Result<()> {
        self.results.write().await.push(result);
        Ok(())
    }

    async fn list_results_for_user(&self, user_id: Uuid) -> Result<Vec<QuizResult>> {
        Ok(self
            .results
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_results(&self) -> Result<Vec<QuizResult>> {
        Ok(self.results.read().await.clone())
    }
}

pub struct MemoryRoster {
    subjects: Vec<Subject>,
    teachers: Vec<Teacher>,
    classes: Vec<SchoolClass>,
}

impl MemoryRoster {
    pub fn new(subjects: Vec<Subject>, teachers: Vec<Teacher>, classes: Vec<SchoolClass>) -> Self {
        Self {
            subjects,
            teachers,
            classes,
        }
    }
}

#[async_trait]
impl RosterProvider for MemoryRoster {
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        Ok(self.subjects.clone())
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.teachers.clone())
    }

    async fn list_classes(&self) -> Result<Vec<SchoolClass>> {
        Ok(self.classes.clone())
    }
}

#[derive(Default)]
pub struct MemoryTimetableStore {
    timetables: RwLock<Vec<Timetable>>,
}

#[async_trait]
impl TimetableStore for MemoryTimetableStore {
    async fn create_timetable(&self, timetable: Timetable) -> Result<Timetable> {
        // Newest first, matching the listing order.
        self.timetables.write().await.insert(0, timetable.clone());
        Ok(timetable)
    }

    async fn update_timetable(&self, id: Uuid, slots: Vec<TimeSlot>) -> Result<Timetable> {
        let mut timetables = self.timetables.write().await;
        let timetable = timetables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound("Timetable not found".to_string()))?;
        timetable.slots = slots;
        timetable.updated_at = Utc::now();
        Ok(timetable.clone())
    }

    async fn delete_timetable(&self, id: Uuid) -> Result<()> {
        let mut timetables = self.timetables.write().await;
        let before = timetables.len();
        timetables.retain(|t| t.id != id);
        if timetables.len() == before {
            return Err(Error::NotFound("Timetable not found".to_string()));
        }
        Ok(())
    }

    async fn get_timetable(&self, id: Uuid) -> Result<Option<Timetable>> {
        Ok(self
            .timetables
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list_timetables(&self) -> Result<Vec<Timetable>> {
        Ok(self.timetables.read().await.clone())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(Error::BadRequest("Email already registered".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn count_users(&self) -> Result<usize> {
        Ok(self.users.read().await.len())
    }
}
