use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod reporting;
pub mod repository;
pub mod seed;
pub mod storage;

// Access tiers: public, authenticated, admin.
pub mod routes;
use auth::AuthUser;
use handlers::{
    consultations, contacts, dashboard, portfolio, subscriptions, team, testimonials,
    transactions, users,
};
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};
pub use storage::{MockStorageService, S3StorageClient, StorageState};

/// ApiDoc
///
/// The OpenAPI document served at `/api-docs/openapi.json` and rendered by Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        portfolio::list_portfolio_items, portfolio::get_portfolio_item,
        portfolio::create_portfolio_item, portfolio::update_portfolio_item,
        portfolio::delete_portfolio_item, portfolio::upload_portfolio_image,
        team::list_team_members, team::get_team_member, team::create_team_member,
        team::update_team_member, team::delete_team_member, team::upload_team_image,
        subscriptions::list_subscription_plans, subscriptions::get_subscription_plan,
        subscriptions::create_subscription_plan, subscriptions::update_subscription_plan,
        subscriptions::delete_subscription_plan,
        testimonials::list_testimonials, testimonials::get_testimonial,
        testimonials::create_testimonial, testimonials::update_testimonial,
        testimonials::delete_testimonial, testimonials::upload_testimonial_image,
        consultations::create_consultation, consultations::list_consultations,
        consultations::get_consultation, consultations::update_consultation,
        consultations::update_consultation_status, consultations::add_consultation_note,
        consultations::delete_consultation,
        contacts::create_contact_message, contacts::list_contact_messages,
        contacts::get_contact_message, contacts::mark_contact_message_read,
        contacts::delete_contact_message,
        transactions::list_transactions, transactions::transaction_summary,
        transactions::get_transaction, transactions::create_transaction,
        transactions::update_transaction, transactions::delete_transaction,
        users::register_user, users::login_user, users::get_me, users::list_users,
        users::update_user, users::delete_user,
        dashboard::get_dashboard_stats,
    ),
    components(
        schemas(
            models::MessageResponse, handlers::HealthResponse, handlers::ImageUploadForm,
            models::PortfolioItem, models::CreatePortfolioItem, models::UpdatePortfolioItem,
            models::TeamMember, models::SocialLinks, models::CreateTeamMember,
            models::UpdateTeamMember,
            models::SubscriptionPlan, models::CreateSubscriptionPlan,
            models::UpdateSubscriptionPlan,
            models::Testimonial, models::CreateTestimonial, models::UpdateTestimonial,
            models::Consultation, models::ConsultationNote, models::ConsultationStatus,
            models::CreateConsultation, models::UpdateConsultation,
            models::UpdateStatusRequest, models::CreateNoteRequest,
            models::ContactMessage, models::CreateContactMessage,
            models::Transaction, models::TransactionKind, models::CreateTransaction,
            models::UpdateTransaction, models::TransactionSummary, models::CategoryTotal,
            models::MonthlyTotal,
            models::UserProfile, models::Role, models::RegisterRequest, models::LoginRequest,
            models::AuthResponse, models::UpdateUserRequest,
            models::DashboardStats, models::StatusCount,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "agency-site", description = "Agency website content and back office API")
    )
)]
struct ApiDoc;

/// Registers the `bearer` scheme referenced by the admin endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// AppState
///
/// The single, immutable container of shared services handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Persistence: Postgres in production, in-memory in tests.
    pub repo: RepositoryState,
    /// Media host for uploaded images.
    pub storage: StorageState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Route layer for `authenticated_routes`: runs the `AuthUser` extractor and lets the
/// request through only if it succeeds. The extractor's rejection is the response.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles every route under `/api`, the docs and the health probe, then applies
/// the body limit, request-id, tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");
    let max_upload_bytes = state.config.max_upload_bytes;

    let api = Router::new()
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .merge(admin::admin_routes());

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: method, URI and the request id set by
/// `SetRequestIdLayer`, so every log line of a request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
