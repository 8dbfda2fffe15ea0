use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::session_dto::{
        AnswerRequest, LoadQuizRequest, SessionView, SubmitResponse, VisibilityRequest,
    },
    error::Result,
    middleware::auth::CurrentUser,
    models::session::SessionPhase,
    AppState,
};

/// Loads a quiz into a fresh session for the caller. An existing session
/// is replaced, whatever phase it was in.
#[axum::debug_handler]
pub async fn load_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<LoadQuizRequest>,
) -> Result<impl IntoResponse> {
    let snapshot = state
        .session_service
        .load_quiz(user.0.id, payload.quiz_id)
        .await?;
    Ok((StatusCode::CREATED, Json(SessionView::from(snapshot))))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let snapshot = state.session_service.snapshot(user.0.id).await?;
    Ok(Json(SessionView::from(snapshot)))
}

#[axum::debug_handler]
pub async fn start_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response> {
    let snapshot = state.session_service.snapshot(user.0.id).await?;
    if snapshot.state.phase == SessionPhase::Completed {
        return Ok(already_completed());
    }
    let snapshot = state.session_service.start(user.0.id).await?;
    Ok(Json(SessionView::from(snapshot)).into_response())
}

#[axum::debug_handler]
pub async fn pause_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let snapshot = state.session_service.pause(user.0.id).await?;
    Ok(Json(SessionView::from(snapshot)))
}

#[axum::debug_handler]
pub async fn resume_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let snapshot = state.session_service.resume(user.0.id).await?;
    Ok(Json(SessionView::from(snapshot)))
}

#[axum::debug_handler]
pub async fn next_question(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let snapshot = state.session_service.next_question(user.0.id).await?;
    Ok(Json(SessionView::from(snapshot)))
}

#[axum::debug_handler]
pub async fn prev_question(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let snapshot = state.session_service.prev_question(user.0.id).await?;
    Ok(Json(SessionView::from(snapshot)))
}

#[axum::debug_handler]
pub async fn save_answer(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let snapshot = state
        .session_service
        .select_answer(user.0.id, payload.question_id, payload.option_index)
        .await?;
    Ok(Json(SessionView::from(snapshot)))
}

/// Browser visibility report. Hidden while a quiz runs terminates the
/// attempt; anything else is a no-op echo of the current state.
#[axum::debug_handler]
pub async fn report_visibility(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<VisibilityRequest>,
) -> Result<impl IntoResponse> {
    let snapshot = state
        .session_service
        .report_visibility(user.0.id, payload.hidden)
        .await?;
    Ok(Json(SessionView::from(snapshot)))
}

#[axum::debug_handler]
pub async fn submit_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response> {
    let snapshot = state.session_service.snapshot(user.0.id).await?;
    if snapshot.state.phase == SessionPhase::Completed {
        return Ok(already_completed());
    }
    let (result, persisted) = state.session_service.submit(user.0.id).await?;
    Ok(Json(SubmitResponse {
        result: result.into(),
        persisted,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn reset_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    state.session_service.reset(user.0.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn already_completed() -> Response {
    (
        StatusCode::CONFLICT,
        Json(json!({
            "error": "already_completed",
            "message": "This quiz attempt has already finished"
        })),
    )
        .into_response()
}
