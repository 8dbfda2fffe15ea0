use crate::models::user::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// The authenticated account, injected into request extensions once the
/// bearer token resolves.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match resolve_user(&state, req.headers()).await {
        Ok(user) => user,
        Err(response) => return response,
    };
    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match resolve_user(&state, req.headers()).await {
        Ok(user) => user,
        Err(response) => return response,
    };
    if !user.is_admin() {
        return (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"}))).into_response();
    }
    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}

async fn resolve_user(
    state: &AppState,
    headers: &axum::http::HeaderMap,
) -> std::result::Result<User, Response> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response());
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response());
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response());
    };

    match state.auth_service.resolve_token(token).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_token"})),
        )
            .into_response()),
        Err(e) => Err(e.into_response()),
    }
}
