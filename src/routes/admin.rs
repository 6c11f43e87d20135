use crate::{
    AppState,
    handlers::{
        consultations, contacts, dashboard, portfolio, subscriptions, team, testimonials,
        transactions, users,
    },
};
use axum::{
    Router,
    routing::{get, patch, post, put},
};

/// Admin Router Module
///
/// The back office API. Role enforcement lives in the `AdminUser` extractor taken by
/// each handler, so a route added here without it would be open: keep them paired.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // --- Content resources ---
        .route("/portfolio", post(portfolio::create_portfolio_item))
        .route(
            "/portfolio/{id}",
            put(portfolio::update_portfolio_item).delete(portfolio::delete_portfolio_item),
        )
        .route("/portfolio/{id}/image", post(portfolio::upload_portfolio_image))
        .route("/team", post(team::create_team_member))
        .route(
            "/team/{id}",
            put(team::update_team_member).delete(team::delete_team_member),
        )
        .route("/team/{id}/image", post(team::upload_team_image))
        .route("/subscriptions", post(subscriptions::create_subscription_plan))
        .route(
            "/subscriptions/{id}",
            put(subscriptions::update_subscription_plan)
                .delete(subscriptions::delete_subscription_plan),
        )
        .route("/testimonials", post(testimonials::create_testimonial))
        .route(
            "/testimonials/{id}",
            put(testimonials::update_testimonial).delete(testimonials::delete_testimonial),
        )
        .route(
            "/testimonials/{id}/image",
            post(testimonials::upload_testimonial_image),
        )
        // --- Consultation workflow ---
        .route("/consultations", get(consultations::list_consultations))
        .route(
            "/consultations/{id}",
            get(consultations::get_consultation)
                .put(consultations::update_consultation)
                .delete(consultations::delete_consultation),
        )
        .route(
            "/consultations/{id}/status",
            patch(consultations::update_consultation_status),
        )
        .route(
            "/consultations/{id}/notes",
            post(consultations::add_consultation_note),
        )
        // --- Contact inbox ---
        .route("/contact", get(contacts::list_contact_messages))
        .route(
            "/contact/{id}",
            get(contacts::get_contact_message).delete(contacts::delete_contact_message),
        )
        .route("/contact/{id}/read", patch(contacts::mark_contact_message_read))
        // --- Bookkeeping ---
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route("/transactions/summary", get(transactions::transaction_summary))
        .route(
            "/transactions/{id}",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
        // --- Accounts & dashboard ---
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/dashboard/stats", get(dashboard::get_dashboard_stats))
}
