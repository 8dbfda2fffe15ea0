use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub time_limit_minutes: i32,
    pub questions: Vec<Question>,
    pub created_by: Uuid,
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub points: i32,
}

impl Quiz {
    /// Total seconds a session gets for this quiz.
    pub fn time_limit_seconds(&self) -> i32 {
        self.time_limit_minutes * 60
    }

    pub fn max_score(&self) -> i32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    pub fn question_by_id(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
