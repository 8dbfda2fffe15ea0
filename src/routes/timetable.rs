use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::timetable_dto::{
        into_slots, CheckRequest, CheckResponse, CreateTimetablePayload, GenerateResponse,
        SlotPayload, TimetableView, UpdateSlotsPayload,
    },
    error::Result,
    middleware::auth::CurrentUser,
    services::conflict_service::ConflictService,
    AppState,
};

#[axum::debug_handler]
pub async fn list_subjects(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.timetable_service.list_subjects().await?))
}

#[axum::debug_handler]
pub async fn list_teachers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.timetable_service.list_teachers().await?))
}

#[axum::debug_handler]
pub async fn list_classes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.timetable_service.list_classes().await?))
}

#[axum::debug_handler]
pub async fn list_timetables(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.timetable_service.list_timetables().await?))
}

#[axum::debug_handler]
pub async fn create_timetable(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateTimetablePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let slots = into_slots(payload.slots)?;
    let (timetable, conflicts) = state
        .timetable_service
        .create_timetable(user.0.id, payload.name, payload.semester, payload.year, slots)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(TimetableView {
            timetable,
            conflicts,
        }),
    ))
}

#[axum::debug_handler]
pub async fn get_timetable(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (timetable, conflicts) = state.timetable_service.get_timetable(id).await?;
    Ok(Json(TimetableView {
        timetable,
        conflicts,
    }))
}

#[axum::debug_handler]
pub async fn update_slots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSlotsPayload>,
) -> Result<impl IntoResponse> {
    let slots = into_slots(payload.slots)?;
    let (timetable, conflicts) = state.timetable_service.update_slots(id, slots).await?;
    Ok(Json(TimetableView {
        timetable,
        conflicts,
    }))
}

/// Swaps one slot in place. The path id wins over whatever id the payload
/// carries, so the client cannot retarget another slot by accident.
#[axum::debug_handler]
pub async fn replace_slot(
    State(state): State<AppState>,
    Path((id, slot_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SlotPayload>,
) -> Result<impl IntoResponse> {
    let mut slot = payload.into_slot()?;
    slot.id = slot_id;
    let (timetable, conflicts) = state.timetable_service.replace_slot(id, slot).await?;
    Ok(Json(TimetableView {
        timetable,
        conflicts,
    }))
}

#[axum::debug_handler]
pub async fn delete_timetable(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.timetable_service.delete_timetable(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stateless conflict scan over a proposed slot list. Nothing is stored.
#[axum::debug_handler]
pub async fn check_conflicts(Json(payload): Json<CheckRequest>) -> Result<impl IntoResponse> {
    let slots = into_slots(payload.slots)?;
    let conflicts = ConflictService::detect_conflicts(&slots);
    Ok(Json(CheckResponse { conflicts }))
}

#[axum::debug_handler]
pub async fn generate_timetable(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let (slots, conflicts) = state.timetable_service.generate().await?;
    Ok(Json(GenerateResponse { slots, conflicts }))
}

#[axum::debug_handler]
pub async fn export_timetable(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (timetable, _) = state.timetable_service.get_timetable(id).await?;

    let mut subject_names = HashMap::new();
    for subject in state.timetable_service.list_subjects().await? {
        subject_names.insert(subject.id, subject.name);
    }
    let mut teacher_names = HashMap::new();
    for teacher in state.timetable_service.list_teachers().await? {
        teacher_names.insert(teacher.id, teacher.name);
    }
    let mut class_names = HashMap::new();
    for class in state.timetable_service.list_classes().await? {
        class_names.insert(class.id, class.name);
    }

    let buffer = crate::services::export_service::ExportService::generate_timetable_xlsx(
        &timetable,
        &subject_names,
        &teacher_names,
        &class_names,
    )?;
    let filename = format!(
        "timetable_{}_{}.xlsx",
        timetable.name.replace(' ', "_"),
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
