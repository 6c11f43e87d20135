use axum::extract::State;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState,
    auth::AdminUser,
    error::{AppError, AppResult, ensure_valid},
    extract::{Json, Path, Query},
    models::{
        ActiveFilter, CreateSubscriptionPlan, MessageResponse, SubscriptionPlan,
        UpdateSubscriptionPlan,
    },
};

const RESOURCE: &str = "Subscription plan";

/// list_subscription_plans
///
/// [Public Route] Lists pricing plans, cheapest first.
#[utoipa::path(
    get,
    path = "/api/subscriptions",
    tag = "subscriptions",
    params(ActiveFilter),
    responses((status = 200, description = "Subscription plans", body = [SubscriptionPlan]))
)]
pub async fn list_subscription_plans(
    State(state): State<AppState>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<Json<Vec<SubscriptionPlan>>> {
    Ok(Json(state.repo.list_subscription_plans(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = Uuid, Path, description = "Subscription plan ID")),
    responses(
        (status = 200, description = "Found", body = SubscriptionPlan),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_subscription_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubscriptionPlan>> {
    state
        .repo
        .get_subscription_plan(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

/// create_subscription_plan
///
/// [Admin Route] Plan names are unique; a duplicate is rejected with 400.
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    tag = "subscriptions",
    request_body = CreateSubscriptionPlan,
    responses(
        (status = 200, description = "Created", body = SubscriptionPlan),
        (status = 400, description = "Validation failed or duplicate name", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_subscription_plan(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateSubscriptionPlan>,
) -> AppResult<Json<SubscriptionPlan>> {
    ensure_valid(&payload)?;
    let plan = state
        .repo
        .insert_subscription_plan(payload.into_plan(Utc::now()))
        .await?;
    Ok(Json(plan))
}

#[utoipa::path(
    put,
    path = "/api/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = Uuid, Path, description = "Subscription plan ID")),
    request_body = UpdateSubscriptionPlan,
    responses(
        (status = 200, description = "Updated", body = SubscriptionPlan),
        (status = 400, description = "Validation failed or duplicate name", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_subscription_plan(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubscriptionPlan>,
) -> AppResult<Json<SubscriptionPlan>> {
    ensure_valid(&payload)?;
    let mut plan = state
        .repo
        .get_subscription_plan(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;
    payload.apply(&mut plan);
    plan.updated_at = Utc::now();

    state
        .repo
        .save_subscription_plan(plan)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    delete,
    path = "/api/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = Uuid, Path, description = "Subscription plan ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_subscription_plan(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repo.delete_subscription_plan(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}
