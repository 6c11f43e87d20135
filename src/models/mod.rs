use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Resource Schemas ---
//
// One module per managed resource. Each module holds the stored record (mapped to its
// Postgres table through `FromRow`), the create/update payloads and the list filter.

pub mod consultation;
pub mod contact;
pub mod dashboard;
pub mod portfolio;
pub mod subscription;
pub mod team;
pub mod testimonial;
pub mod transaction;
pub mod user;

pub use consultation::{
    Consultation, ConsultationFilter, ConsultationNote, ConsultationStatus, CreateConsultation,
    CreateNoteRequest, UpdateConsultation, UpdateStatusRequest,
};
pub use contact::{ContactFilter, ContactMessage, CreateContactMessage};
pub use dashboard::{DashboardStats, StatusCount};
pub use portfolio::{CreatePortfolioItem, PortfolioFilter, PortfolioItem, UpdatePortfolioItem};
pub use subscription::{
    ActiveFilter, CreateSubscriptionPlan, SubscriptionPlan, UpdateSubscriptionPlan,
};
pub use team::{CreateTeamMember, SocialLinks, TeamMember, UpdateTeamMember};
pub use testimonial::{CreateTestimonial, Testimonial, TestimonialFilter, UpdateTestimonial};
pub use transaction::{
    CategoryTotal, CreateTransaction, MonthlyTotal, Transaction, TransactionFilter,
    TransactionKind, TransactionSummary, UpdateTransaction,
};
pub use user::{
    AuthResponse, LoginRequest, RegisterRequest, Role, UpdateUserRequest, User, UserProfile,
};

/// MessageResponse
///
/// The `{ "msg": "..." }` body returned by delete endpoints and by every error response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Validate
///
/// Implemented by every inbound payload. Returns an empty list when the payload is
/// acceptable, otherwise one human-readable message per problem.
pub trait Validate {
    fn validate(&self) -> Vec<String>;
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn require(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    }
}

/// A deliberately loose address check: something before and after a single '@', and a dot
/// in the domain part.
pub(crate) fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

pub(crate) fn require_email(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    } else if !is_plausible_email(value) {
        errors.push(format!("{field} must be a valid email address"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check_accepts_common_addresses() {
        assert!(is_plausible_email("hello@studio.io"));
        assert!(is_plausible_email("first.last+tag@mail.example.com"));
    }

    #[test]
    fn email_check_rejects_malformed_addresses() {
        assert!(!is_plausible_email("no-at-sign.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("user@localhost"));
        assert!(!is_plausible_email("a@b@c.com"));
        assert!(!is_plausible_email("user@.com"));
    }

    #[test]
    fn require_flags_blank_values() {
        let mut errors = Vec::new();
        require(&mut errors, "title", "   ");
        require(&mut errors, "category", "web");
        assert_eq!(errors, vec!["title is required".to_string()]);
    }
}
