use axum::extract::State;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState,
    auth::AdminUser,
    error::{AppError, AppResult, ensure_valid},
    extract::{Json, Path, Query},
    models::{ContactFilter, ContactMessage, CreateContactMessage, MessageResponse},
};

const RESOURCE: &str = "Contact message";

/// create_contact_message
///
/// [Public Route] The contact form. Messages arrive unread.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = CreateContactMessage,
    responses(
        (status = 200, description = "Message received", body = ContactMessage),
        (status = 400, description = "Validation failed", body = MessageResponse)
    )
)]
pub async fn create_contact_message(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactMessage>,
) -> AppResult<Json<ContactMessage>> {
    ensure_valid(&payload)?;
    let message = state
        .repo
        .insert_contact_message(payload.into_message(Utc::now()))
        .await?;
    Ok(Json(message))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "contact",
    params(ContactFilter),
    responses((status = 200, description = "Messages, newest first", body = [ContactMessage])),
    security(("bearer" = []))
)]
pub async fn list_contact_messages(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(filter): Query<ContactFilter>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    Ok(Json(state.repo.list_contact_messages(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    tag = "contact",
    params(("id" = Uuid, Path, description = "Contact message ID")),
    responses(
        (status = 200, description = "Found", body = ContactMessage),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_contact_message(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContactMessage>> {
    state
        .repo
        .get_contact_message(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

/// mark_contact_message_read
///
/// [Admin Route] Idempotent: marking an already read message is a no-op save.
#[utoipa::path(
    patch,
    path = "/api/contact/{id}/read",
    tag = "contact",
    params(("id" = Uuid, Path, description = "Contact message ID")),
    responses(
        (status = 200, description = "Marked read", body = ContactMessage),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn mark_contact_message_read(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContactMessage>> {
    let mut message = state
        .repo
        .get_contact_message(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;
    message.read = true;
    message.updated_at = Utc::now();

    state
        .repo
        .save_contact_message(message)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    tag = "contact",
    params(("id" = Uuid, Path, description = "Contact message ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_contact_message(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repo.delete_contact_message(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}
