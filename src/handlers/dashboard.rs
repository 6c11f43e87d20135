use axum::{Json, extract::State};

use crate::{AppState, auth::AdminUser, error::AppResult, models::DashboardStats};

/// get_dashboard_stats
///
/// [Admin Route] Headline counters for the back office landing page.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = []))
)]
pub async fn get_dashboard_stats(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.repo.get_stats().await?))
}
