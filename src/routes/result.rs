use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    dto::result_dto::LeaderboardQuery, error::Result, middleware::auth::CurrentUser, AppState,
};

#[axum::debug_handler]
pub async fn list_my_results(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let results = state.result_service.list_for_user(user.0.id).await?;
    Ok(Json(results))
}

#[axum::debug_handler]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse> {
    let entries = state.result_service.leaderboard(query.quiz_id).await?;
    Ok(Json(entries))
}
