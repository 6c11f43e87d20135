use crate::{AppState, handlers::users};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes open to any signed-in account, admin or not. The caller wraps this router in
/// the `auth_middleware` route layer.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /users/me
        // The caller's own profile, resolved from the bearer token.
        .route("/users/me", get(users::get_me))
}
