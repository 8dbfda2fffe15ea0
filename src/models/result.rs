use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel stored in an answer record when the question was never answered.
pub const UNANSWERED: i32 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub max_score: i32,
    pub time_taken_seconds: i32,
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_option: i32,
    pub is_correct: bool,
}

impl QuizResult {
    pub fn percentage(&self) -> f64 {
        if self.max_score <= 0 {
            return 0.0;
        }
        self.score as f64 * 100.0 / self.max_score as f64
    }
}
