use crate::{
    AppState,
    handlers::{consultations, contacts, portfolio, subscriptions, team, testimonials, users},
};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Everything the marketing site needs without a session: read access to published
/// content, the consultation and contact forms, and the account entry points.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // --- Site content (read-only) ---
        .route("/portfolio", get(portfolio::list_portfolio_items))
        .route("/portfolio/{id}", get(portfolio::get_portfolio_item))
        .route("/team", get(team::list_team_members))
        .route("/team/{id}", get(team::get_team_member))
        .route("/subscriptions", get(subscriptions::list_subscription_plans))
        .route("/subscriptions/{id}", get(subscriptions::get_subscription_plan))
        .route("/testimonials", get(testimonials::list_testimonials))
        .route("/testimonials/{id}", get(testimonials::get_testimonial))
        // --- Forms ---
        .route("/consultations", post(consultations::create_consultation))
        .route("/contact", post(contacts::create_contact_message))
        // --- Accounts ---
        .route("/users/register", post(users::register_user))
        .route("/users/login", post(users::login_user))
}
