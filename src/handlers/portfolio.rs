use axum::extract::{Multipart, State};
use chrono::Utc;
use uuid::Uuid;

use super::{ImageUploadForm, read_image};
use crate::{
    AppState,
    auth::AdminUser,
    error::{AppError, AppResult, ensure_valid},
    extract::{Json, Path, Query},
    models::{
        CreatePortfolioItem, MessageResponse, PortfolioFilter, PortfolioItem, UpdatePortfolioItem,
    },
};

const RESOURCE: &str = "Portfolio item";

/// list_portfolio_items
///
/// [Public Route] Lists portfolio items, newest first.
#[utoipa::path(
    get,
    path = "/api/portfolio",
    tag = "portfolio",
    params(PortfolioFilter),
    responses((status = 200, description = "Portfolio items", body = [PortfolioItem]))
)]
pub async fn list_portfolio_items(
    State(state): State<AppState>,
    Query(filter): Query<PortfolioFilter>,
) -> AppResult<Json<Vec<PortfolioItem>>> {
    Ok(Json(state.repo.list_portfolio_items(&filter).await?))
}

/// get_portfolio_item
///
/// [Public Route] Fetches a single portfolio item.
#[utoipa::path(
    get,
    path = "/api/portfolio/{id}",
    tag = "portfolio",
    params(("id" = Uuid, Path, description = "Portfolio item ID")),
    responses(
        (status = 200, description = "Found", body = PortfolioItem),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_portfolio_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PortfolioItem>> {
    state
        .repo
        .get_portfolio_item(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

/// create_portfolio_item
///
/// [Admin Route] Creates a portfolio item. `image` may be set directly or later via
/// the upload endpoint.
#[utoipa::path(
    post,
    path = "/api/portfolio",
    tag = "portfolio",
    request_body = CreatePortfolioItem,
    responses(
        (status = 200, description = "Created", body = PortfolioItem),
        (status = 400, description = "Validation failed", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = []))
)]
pub async fn create_portfolio_item(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePortfolioItem>,
) -> AppResult<Json<PortfolioItem>> {
    ensure_valid(&payload)?;
    let item = state
        .repo
        .insert_portfolio_item(payload.into_item(Utc::now()))
        .await?;
    tracing::info!(id = %item.id, "Portfolio item created");
    Ok(Json(item))
}

/// update_portfolio_item
///
/// [Admin Route] Overwrites only the supplied fields.
#[utoipa::path(
    put,
    path = "/api/portfolio/{id}",
    tag = "portfolio",
    params(("id" = Uuid, Path, description = "Portfolio item ID")),
    request_body = UpdatePortfolioItem,
    responses(
        (status = 200, description = "Updated", body = PortfolioItem),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_portfolio_item(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePortfolioItem>,
) -> AppResult<Json<PortfolioItem>> {
    ensure_valid(&payload)?;
    let mut item = state
        .repo
        .get_portfolio_item(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;
    payload.apply(&mut item);
    item.updated_at = Utc::now();

    state
        .repo
        .save_portfolio_item(item)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    delete,
    path = "/api/portfolio/{id}",
    tag = "portfolio",
    params(("id" = Uuid, Path, description = "Portfolio item ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_portfolio_item(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repo.delete_portfolio_item(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}

/// upload_portfolio_image
///
/// [Admin Route] Accepts a multipart `image` field, stores it on the media host and
/// saves the returned URL as the item's `image`.
#[utoipa::path(
    post,
    path = "/api/portfolio/{id}/image",
    tag = "portfolio",
    params(("id" = Uuid, Path, description = "Portfolio item ID")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = PortfolioItem),
        (status = 400, description = "Missing or non-image file", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn upload_portfolio_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<PortfolioItem>> {
    let mut item = state
        .repo
        .get_portfolio_item(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;

    let upload = read_image(multipart).await?;
    item.image = state
        .storage
        .upload_image("portfolio", &upload.filename, &upload.content_type, upload.bytes)
        .await?;
    item.updated_at = Utc::now();

    state
        .repo
        .save_portfolio_item(item)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}
