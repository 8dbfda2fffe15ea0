use crate::dto::quiz_dto::{CreateQuizPayload, QuestionPayload, UpdateQuizPayload};
use crate::error::{Error, Result};
use crate::models::quiz::{Question, Quiz, OPTIONS_PER_QUESTION};
use crate::store::QuizCatalog;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct QuizService {
    catalog: Arc<dyn QuizCatalog>,
}

impl QuizService {
    pub fn new(catalog: Arc<dyn QuizCatalog>) -> Self {
        Self { catalog }
    }

    /// Published quizzes only, for the student-facing catalog.
    pub async fn list_published(&self) -> Result<Vec<Quiz>> {
        let quizzes = self.catalog.list_quizzes().await?;
        Ok(quizzes.into_iter().filter(|q| q.is_published).collect())
    }

    pub async fn get_published(&self, id: Uuid) -> Result<Quiz> {
        self.catalog
            .get_quiz(id)
            .await?
            .filter(|q| q.is_published)
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    /// Everything, including drafts. Admin only.
    pub async fn list_all(&self) -> Result<Vec<Quiz>> {
        self.catalog.list_quizzes().await
    }

    pub async fn get_any(&self, id: Uuid) -> Result<Quiz> {
        self.catalog
            .get_quiz(id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    pub async fn create_quiz(&self, payload: CreateQuizPayload, created_by: Uuid) -> Result<Quiz> {
        let questions = build_questions(&payload.questions)?;
        let quiz = Quiz {
            id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            time_limit_minutes: payload.time_limit_minutes,
            questions,
            created_by,
            is_published: payload.is_published.unwrap_or(false),
        };
        let saved = self.catalog.insert_quiz(quiz).await?;
        tracing::info!(quiz = %saved.title, questions = saved.questions.len(), "Quiz created");
        Ok(saved)
    }

    pub async fn update_quiz(&self, id: Uuid, payload: UpdateQuizPayload) -> Result<Quiz> {
        let mut quiz = self.get_any(id).await?;

        if let Some(title) = payload.title {
            quiz.title = title;
        }
        if let Some(description) = payload.description {
            quiz.description = description;
        }
        if let Some(time_limit_minutes) = payload.time_limit_minutes {
            quiz.time_limit_minutes = time_limit_minutes;
        }
        if let Some(questions) = payload.questions.as_ref() {
            quiz.questions = build_questions(questions)?;
        }
        if let Some(is_published) = payload.is_published {
            quiz.is_published = is_published;
        }

        self.catalog.update_quiz(quiz).await
    }

    pub async fn delete_quiz(&self, id: Uuid) -> Result<()> {
        self.catalog.delete_quiz(id).await?;
        tracing::info!(quiz_id = %id, "Quiz deleted");
        Ok(())
    }
}

/// Assigns sequential ids (`q1`, `q2`, ...) and enforces what the derive
/// validators cannot express: exactly four non-empty options and a correct
/// option inside them.
fn build_questions(payloads: &[QuestionPayload]) -> Result<Vec<Question>> {
    payloads
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            if q.text.trim().is_empty() {
                return Err(Error::BadRequest(format!("Question {} has no text", idx + 1)));
            }
            if q.points < 0 {
                return Err(Error::BadRequest(format!(
                    "Question {} has negative points",
                    idx + 1
                )));
            }
            if q.options.len() != OPTIONS_PER_QUESTION {
                return Err(Error::BadRequest(format!(
                    "Question {} must have exactly {} options",
                    idx + 1,
                    OPTIONS_PER_QUESTION
                )));
            }
            if q.options.iter().any(|o| o.trim().is_empty()) {
                return Err(Error::BadRequest(format!(
                    "Question {} has an empty option",
                    idx + 1
                )));
            }
            if q.correct_option < 0 || q.correct_option as usize >= q.options.len() {
                return Err(Error::BadRequest(format!(
                    "Question {} has an out-of-range correct option",
                    idx + 1
                )));
            }
            Ok(Question {
                id: format!("q{}", idx + 1),
                text: q.text.clone(),
                options: q.options.clone(),
                correct_option: q.correct_option,
                points: q.points,
            })
        })
        .collect()
}
