use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use super::ConsultationStatus;

/// StatusCount
///
/// Number of consultations currently in one workflow status.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct StatusCount {
    pub status: ConsultationStatus,
    pub count: i64,
}

/// DashboardStats
///
/// Output schema for the admin dashboard (GET /api/dashboard/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct DashboardStats {
    pub portfolio_items: i64,
    pub team_members: i64,
    pub subscription_plans: i64,
    pub testimonials: i64,
    pub consultations: i64,
    /// Consultations still in the `pending` status.
    pub pending_consultations: i64,
    /// One entry per status, in workflow order, including zero counts.
    pub consultations_by_status: Vec<StatusCount>,
    pub contact_messages: i64,
    pub unread_messages: i64,
    pub users: i64,
    pub total_income: f64,
    pub total_expense: f64,
}
