//! Router Module Index
//!
//! Routes are split by access tier. All three are merged and nested under `/api`;
//! where tiers share a path (e.g. `GET /portfolio` public, `POST /portfolio` admin)
//! axum merges the method routers.

/// Anonymous access: site content reads, public forms, register and login.
pub mod public;

/// Routes behind the `auth_middleware` route layer. Any signed-in user.
pub mod authenticated;

/// Content management. Every handler takes an `AdminUser`, which rejects with
/// 401/403 before the request body is read.
pub mod admin;
