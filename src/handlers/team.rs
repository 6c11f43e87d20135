use axum::extract::{Multipart, State};
use chrono::Utc;
use uuid::Uuid;

use super::{ImageUploadForm, read_image};
use crate::{
    AppState,
    auth::AdminUser,
    error::{AppError, AppResult, ensure_valid},
    extract::{Json, Path, Query},
    models::{ActiveFilter, CreateTeamMember, MessageResponse, TeamMember, UpdateTeamMember},
};

const RESOURCE: &str = "Team member";

/// list_team_members
///
/// [Public Route] Lists team members in display order.
#[utoipa::path(
    get,
    path = "/api/team",
    tag = "team",
    params(ActiveFilter),
    responses((status = 200, description = "Team members", body = [TeamMember]))
)]
pub async fn list_team_members(
    State(state): State<AppState>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<Json<Vec<TeamMember>>> {
    Ok(Json(state.repo.list_team_members(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/team/{id}",
    tag = "team",
    params(("id" = Uuid, Path, description = "Team member ID")),
    responses(
        (status = 200, description = "Found", body = TeamMember),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_team_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TeamMember>> {
    state
        .repo
        .get_team_member(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    post,
    path = "/api/team",
    tag = "team",
    request_body = CreateTeamMember,
    responses(
        (status = 200, description = "Created", body = TeamMember),
        (status = 400, description = "Validation failed", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_team_member(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateTeamMember>,
) -> AppResult<Json<TeamMember>> {
    ensure_valid(&payload)?;
    let member = state
        .repo
        .insert_team_member(payload.into_member(Utc::now()))
        .await?;
    Ok(Json(member))
}

/// update_team_member
///
/// [Admin Route] Partial update. Supplying `social_links` replaces the whole object.
#[utoipa::path(
    put,
    path = "/api/team/{id}",
    tag = "team",
    params(("id" = Uuid, Path, description = "Team member ID")),
    request_body = UpdateTeamMember,
    responses(
        (status = 200, description = "Updated", body = TeamMember),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_team_member(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTeamMember>,
) -> AppResult<Json<TeamMember>> {
    ensure_valid(&payload)?;
    let mut member = state
        .repo
        .get_team_member(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;
    payload.apply(&mut member);
    member.updated_at = Utc::now();

    state
        .repo
        .save_team_member(member)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    delete,
    path = "/api/team/{id}",
    tag = "team",
    params(("id" = Uuid, Path, description = "Team member ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_team_member(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repo.delete_team_member(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}

/// upload_team_image
///
/// [Admin Route] Stores a portrait on the media host and saves its URL.
#[utoipa::path(
    post,
    path = "/api/team/{id}/image",
    tag = "team",
    params(("id" = Uuid, Path, description = "Team member ID")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = TeamMember),
        (status = 400, description = "Missing or non-image file", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn upload_team_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<TeamMember>> {
    let mut member = state
        .repo
        .get_team_member(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;

    let upload = read_image(multipart).await?;
    member.image = state
        .storage
        .upload_image("team", &upload.filename, &upload.content_type, upload.bytes)
        .await?;
    member.updated_at = Utc::now();

    state
        .repo
        .save_team_member(member)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}
