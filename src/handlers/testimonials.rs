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
        CreateTestimonial, MessageResponse, Testimonial, TestimonialFilter, UpdateTestimonial,
    },
};

const RESOURCE: &str = "Testimonial";

/// list_testimonials
///
/// [Public Route] Lists testimonials in display order.
#[utoipa::path(
    get,
    path = "/api/testimonials",
    tag = "testimonials",
    params(TestimonialFilter),
    responses((status = 200, description = "Testimonials", body = [Testimonial]))
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(filter): Query<TestimonialFilter>,
) -> AppResult<Json<Vec<Testimonial>>> {
    Ok(Json(state.repo.list_testimonials(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/testimonials/{id}",
    tag = "testimonials",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Found", body = Testimonial),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Testimonial>> {
    state
        .repo
        .get_testimonial(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

/// create_testimonial
///
/// [Admin Route] `rating` defaults to 5 and must lie within 1..=5.
#[utoipa::path(
    post,
    path = "/api/testimonials",
    tag = "testimonials",
    request_body = CreateTestimonial,
    responses(
        (status = 200, description = "Created", body = Testimonial),
        (status = 400, description = "Validation failed", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateTestimonial>,
) -> AppResult<Json<Testimonial>> {
    ensure_valid(&payload)?;
    let testimonial = state
        .repo
        .insert_testimonial(payload.into_testimonial(Utc::now()))
        .await?;
    Ok(Json(testimonial))
}

#[utoipa::path(
    put,
    path = "/api/testimonials/{id}",
    tag = "testimonials",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    request_body = UpdateTestimonial,
    responses(
        (status = 200, description = "Updated", body = Testimonial),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTestimonial>,
) -> AppResult<Json<Testimonial>> {
    ensure_valid(&payload)?;
    let mut testimonial = state
        .repo
        .get_testimonial(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;
    payload.apply(&mut testimonial);
    testimonial.updated_at = Utc::now();

    state
        .repo
        .save_testimonial(testimonial)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    delete,
    path = "/api/testimonials/{id}",
    tag = "testimonials",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repo.delete_testimonial(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}

/// upload_testimonial_image
///
/// [Admin Route] Stores the client's photo or logo and saves its URL.
#[utoipa::path(
    post,
    path = "/api/testimonials/{id}/image",
    tag = "testimonials",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = Testimonial),
        (status = 400, description = "Missing or non-image file", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn upload_testimonial_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<Testimonial>> {
    let mut testimonial = state
        .repo
        .get_testimonial(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;

    let upload = read_image(multipart).await?;
    testimonial.image = state
        .storage
        .upload_image("testimonials", &upload.filename, &upload.content_type, upload.bytes)
        .await?;
    testimonial.updated_at = Utc::now();

    state
        .repo
        .save_testimonial(testimonial)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}
