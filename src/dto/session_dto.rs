use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::dto::quiz_dto::PublicQuestion;
use crate::models::result::{AnswerRecord, QuizResult};
use crate::models::session::{EndReason, SessionPhase};
use crate::services::session_service::EngineSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadQuizRequest {
    pub quiz_id: uuid::Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerRequest {
    #[validate(length(min = 1))]
    pub question_id: String,
    pub option_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRequest {
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultView {
    pub id: uuid::Uuid,
    pub quiz_id: uuid::Uuid,
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
    pub time_taken_seconds: i32,
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub result: ResultView,
    /// False when the result store rejected the write; the score above is
    /// still authoritative for this session.
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuizView {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub time_limit_minutes: i32,
    pub total_questions: usize,
}

/// Everything the client needs to render the attempt, derived from one
/// engine snapshot. The active question never includes the answer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub quiz: Option<SessionQuizView>,
    pub active_question: usize,
    pub question: Option<PublicQuestion>,
    pub answers: HashMap<String, i32>,
    pub answered_count: usize,
    pub total_questions: usize,
    pub time_remaining_seconds: i32,
    pub end_reason: Option<EndReason>,
    pub result: Option<ResultView>,
    pub result_persisted: bool,
}

impl From<QuizResult> for ResultView {
    fn from(value: QuizResult) -> Self {
        let percentage = value.percentage();
        Self {
            id: value.id,
            quiz_id: value.quiz_id,
            score: value.score,
            max_score: value.max_score,
            percentage,
            time_taken_seconds: value.time_taken_seconds,
            completed_at: value.completed_at,
            answers: value.answers,
        }
    }
}

impl From<EngineSnapshot> for SessionView {
    fn from(snapshot: EngineSnapshot) -> Self {
        let EngineSnapshot {
            state,
            result,
            persist_failed,
        } = snapshot;

        let quiz = state.quiz.as_deref().map(|q| SessionQuizView {
            id: q.id,
            title: q.title.clone(),
            description: q.description.clone(),
            time_limit_minutes: q.time_limit_minutes,
            total_questions: q.questions.len(),
        });
        let question = state
            .quiz
            .as_deref()
            .and_then(|q| q.questions.get(state.active_question))
            .map(PublicQuestion::from);
        let total_questions = quiz.as_ref().map(|q| q.total_questions).unwrap_or(0);
        let answered_count = state.answered_count();

        Self {
            phase: state.phase,
            quiz,
            active_question: state.active_question,
            question,
            answers: state.answers,
            answered_count,
            total_questions,
            time_remaining_seconds: state.time_remaining_seconds,
            end_reason: state.end_reason,
            result: result.map(Into::into),
            result_persisted: !persist_failed,
        }
    }
}
