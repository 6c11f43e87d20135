use axum::{Json, extract::Multipart};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

// --- Handler Modules ---
//
// One module per resource. Content-management handlers take an `AdminUser` argument,
// which performs authentication and the admin role check before the body is read.

pub mod consultations;
pub mod contacts;
pub mod dashboard;
pub mod portfolio;
pub mod subscriptions;
pub mod team;
pub mod testimonials;
pub mod transactions;
pub mod users;

/// Multipart field name carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

/// ImageUploadForm
///
/// OpenAPI description of the multipart body accepted by the `/{id}/image` endpoints.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

/// An image read from a multipart request, not yet stored.
#[derive(Debug)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Reads the `image` field from a multipart body. Other fields are ignored.
///
/// Fails with 400 when the field is missing or the body cannot be parsed
/// (including bodies over the upload size limit).
pub async fn read_image(mut multipart: Multipart) -> AppResult<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        return Ok(ImageUpload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::BadRequest("No file uploaded".to_string()))
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe for load balancers.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
