use axum::extract::State;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState,
    auth::AdminUser,
    error::{AppError, AppResult, ensure_valid},
    extract::{Json, Path, Query},
    models::{
        Consultation, ConsultationFilter, CreateConsultation, CreateNoteRequest, MessageResponse,
        UpdateConsultation, UpdateStatusRequest,
    },
};

const RESOURCE: &str = "Consultation";

/// create_consultation
///
/// [Public Route] The consultation request form. New requests always start `pending`.
#[utoipa::path(
    post,
    path = "/api/consultations",
    tag = "consultations",
    request_body = CreateConsultation,
    responses(
        (status = 200, description = "Request received", body = Consultation),
        (status = 400, description = "Validation failed", body = MessageResponse)
    )
)]
pub async fn create_consultation(
    State(state): State<AppState>,
    Json(payload): Json<CreateConsultation>,
) -> AppResult<Json<Consultation>> {
    ensure_valid(&payload)?;
    let consultation = state
        .repo
        .insert_consultation(payload.into_consultation(Utc::now()))
        .await?;
    tracing::info!(id = %consultation.id, service = %consultation.service, "Consultation requested");
    Ok(Json(consultation))
}

#[utoipa::path(
    get,
    path = "/api/consultations",
    tag = "consultations",
    params(ConsultationFilter),
    responses((status = 200, description = "Consultations, newest first", body = [Consultation])),
    security(("bearer" = []))
)]
pub async fn list_consultations(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(filter): Query<ConsultationFilter>,
) -> AppResult<Json<Vec<Consultation>>> {
    Ok(Json(state.repo.list_consultations(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/consultations/{id}",
    tag = "consultations",
    params(("id" = Uuid, Path, description = "Consultation ID")),
    responses(
        (status = 200, description = "Found", body = Consultation),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_consultation(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Consultation>> {
    state
        .repo
        .get_consultation(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    put,
    path = "/api/consultations/{id}",
    tag = "consultations",
    params(("id" = Uuid, Path, description = "Consultation ID")),
    request_body = UpdateConsultation,
    responses(
        (status = 200, description = "Updated", body = Consultation),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_consultation(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateConsultation>,
) -> AppResult<Json<Consultation>> {
    ensure_valid(&payload)?;
    let mut consultation = load(&state, id).await?;
    payload.apply(&mut consultation);
    consultation.updated_at = Utc::now();
    save(&state, consultation).await
}

/// update_consultation_status
///
/// [Admin Route] Moves a request to another workflow column. Any status may follow any other.
#[utoipa::path(
    patch,
    path = "/api/consultations/{id}/status",
    tag = "consultations",
    params(("id" = Uuid, Path, description = "Consultation ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = Consultation),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_consultation_status(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Consultation>> {
    let mut consultation = load(&state, id).await?;
    let previous = consultation.status;
    consultation.status = payload.status;
    consultation.updated_at = Utc::now();

    let saved = save(&state, consultation).await?;
    tracing::info!(
        id = %id,
        from = previous.as_str(),
        to = payload.status.as_str(),
        by = %admin.id,
        "Consultation status changed"
    );
    Ok(saved)
}

/// add_consultation_note
///
/// [Admin Route] Appends a timestamped note authored by the calling admin and returns
/// the whole consultation.
#[utoipa::path(
    post,
    path = "/api/consultations/{id}/notes",
    tag = "consultations",
    params(("id" = Uuid, Path, description = "Consultation ID")),
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note added", body = Consultation),
        (status = 400, description = "Empty note", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn add_consultation_note(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateNoteRequest>,
) -> AppResult<Json<Consultation>> {
    ensure_valid(&payload)?;
    let mut consultation = load(&state, id).await?;
    consultation.add_note(payload.content.trim().to_string(), admin.name, Utc::now());
    save(&state, consultation).await
}

#[utoipa::path(
    delete,
    path = "/api/consultations/{id}",
    tag = "consultations",
    params(("id" = Uuid, Path, description = "Consultation ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_consultation(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repo.delete_consultation(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}

async fn load(state: &AppState, id: Uuid) -> AppResult<Consultation> {
    state
        .repo
        .get_consultation(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))
}

async fn save(state: &AppState, consultation: Consultation) -> AppResult<Json<Consultation>> {
    state
        .repo
        .save_consultation(consultation)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}
