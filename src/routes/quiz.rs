use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    dto::quiz_dto::{QuizDetail, QuizSummary},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_quizzes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let quizzes = state.quiz_service.list_published().await?;
    let summaries: Vec<QuizSummary> = quizzes.into_iter().map(Into::into).collect();
    Ok(Json(summaries))
}

#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let quiz = state.quiz_service.get_published(id).await?;
    Ok(Json(QuizDetail::from(quiz)))
}
