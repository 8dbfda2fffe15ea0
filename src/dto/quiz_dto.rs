use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quiz::{Question, Quiz};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub points: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    #[validate(range(min = 1, max = 480))]
    pub time_limit_minutes: i32,
    #[validate(length(min = 1))]
    pub questions: Vec<QuestionPayload>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuizPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 480))]
    pub time_limit_minutes: Option<i32>,
    #[validate(length(min = 1))]
    pub questions: Option<Vec<QuestionPayload>>,
    pub is_published: Option<bool>,
}

/// Catalog listing entry for students.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub time_limit_minutes: i32,
    pub question_count: usize,
}

/// A question as the client is allowed to see it while answering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub points: i32,
}

/// Full quiz body for taking it, with the answer key stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDetail {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub time_limit_minutes: i32,
    pub questions: Vec<PublicQuestion>,
}

impl From<Quiz> for QuizSummary {
    fn from(value: Quiz) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            time_limit_minutes: value.time_limit_minutes,
            question_count: value.questions.len(),
        }
    }
}

impl From<&Question> for PublicQuestion {
    fn from(value: &Question) -> Self {
        Self {
            id: value.id.clone(),
            text: value.text.clone(),
            options: value.options.clone(),
            points: value.points,
        }
    }
}

impl From<Quiz> for QuizDetail {
    fn from(value: Quiz) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            time_limit_minutes: value.time_limit_minutes,
            questions: value.questions.iter().map(Into::into).collect(),
        }
    }
}
