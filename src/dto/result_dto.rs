use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::result::AnswerRecord;

/// One of the caller's own attempts, with the quiz title resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResultView {
    pub id: uuid::Uuid,
    pub quiz_id: uuid::Uuid,
    pub quiz_title: String,
    pub percentage: f64,
    pub score: i32,
    pub max_score: i32,
    pub time_taken_seconds: i32,
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub quiz_id: uuid::Uuid,
    pub quiz_title: String,
    pub percentage: f64,
    pub score: i32,
    pub max_score: i32,
    pub time_taken_seconds: i32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LeaderboardQuery {
    pub quiz_id: Option<uuid::Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStatsResponse {
    pub total_quizzes: usize,
    pub published_quizzes: usize,
    pub total_users: usize,
    pub total_attempts: usize,
    pub average_percentage: f64,
}
