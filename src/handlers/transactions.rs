use axum::extract::State;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState,
    auth::AdminUser,
    error::{AppError, AppResult, ensure_valid},
    extract::{Json, Path, Query},
    models::{
        CreateTransaction, MessageResponse, Transaction, TransactionFilter, TransactionSummary,
        UpdateTransaction,
    },
    reporting,
};

const RESOURCE: &str = "Transaction";

fn check_range(filter: &TransactionFilter) -> AppResult<()> {
    match (filter.from, filter.to) {
        (Some(from), Some(to)) if from > to => Err(AppError::BadRequest(
            "from must not be later than to".to_string(),
        )),
        _ => Ok(()),
    }
}

/// list_transactions
///
/// [Admin Route] Lists bookkeeping entries, most recent date first.
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "transactions",
    params(TransactionFilter),
    responses(
        (status = 200, description = "Transactions", body = [Transaction]),
        (status = 400, description = "Inverted date range", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_transactions(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> AppResult<Json<Vec<Transaction>>> {
    check_range(&filter)?;
    Ok(Json(state.repo.list_transactions(&filter).await?))
}

/// transaction_summary
///
/// [Admin Route] Totals plus the per-category and per-month series that feed the
/// dashboard charts. Accepts the same filters as the listing.
#[utoipa::path(
    get,
    path = "/api/transactions/summary",
    tag = "transactions",
    params(TransactionFilter),
    responses(
        (status = 200, description = "Summary", body = TransactionSummary),
        (status = 400, description = "Inverted date range", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn transaction_summary(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> AppResult<Json<TransactionSummary>> {
    check_range(&filter)?;
    let transactions = state.repo.list_transactions(&filter).await?;
    Ok(Json(reporting::summarize(&transactions)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "transactions",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Found", body = Transaction),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_transaction(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Transaction>> {
    state
        .repo
        .get_transaction(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

/// create_transaction
///
/// [Admin Route] Records an entry attributed to the calling admin.
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "transactions",
    request_body = CreateTransaction,
    responses(
        (status = 200, description = "Recorded", body = Transaction),
        (status = 400, description = "Validation failed", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_transaction(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateTransaction>,
) -> AppResult<Json<Transaction>> {
    ensure_valid(&payload)?;
    let transaction = state
        .repo
        .insert_transaction(payload.into_transaction(admin.id, Utc::now()))
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "transactions",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    request_body = UpdateTransaction,
    responses(
        (status = 200, description = "Updated", body = Transaction),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_transaction(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransaction>,
) -> AppResult<Json<Transaction>> {
    ensure_valid(&payload)?;
    let mut transaction = state
        .repo
        .get_transaction(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;
    payload.apply(&mut transaction);
    transaction.updated_at = Utc::now();

    state
        .repo
        .save_transaction(transaction)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "transactions",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_transaction(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repo.delete_transaction(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}
