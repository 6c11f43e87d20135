use crate::models::{
    ActiveFilter, Consultation, ConsultationFilter, ContactFilter, ContactMessage,
    DashboardStats, PortfolioFilter, PortfolioItem, SubscriptionPlan, TeamMember, Testimonial,
    TestimonialFilter, Transaction, TransactionFilter, User,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

/// RepoError
///
/// Failures surfaced by the persistence layer. A missing row is not an error: lookups
/// return `Ok(None)` and deletes return `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A unique constraint rejected the write. Carries a client-facing message.
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository Trait
///
/// The persistence contract shared by the Postgres store and the in-memory store.
/// Every resource follows the same shape:
///
/// - `list_*` applies the resource filter and the resource's display ordering.
/// - `get_*` loads by id.
/// - `insert_*` persists a fully built record and returns it as stored.
/// - `save_*` overwrites every column of an existing record; `Ok(None)` if the row
///   disappeared since it was loaded.
/// - `delete_*` returns whether a row was removed.
///
/// Partial updates are load-apply-save in the handlers, so concurrent writers to the
/// same record are last-writer-wins.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Portfolio (newest first) ---
    async fn list_portfolio_items(&self, filter: &PortfolioFilter) -> RepoResult<Vec<PortfolioItem>>;
    async fn get_portfolio_item(&self, id: Uuid) -> RepoResult<Option<PortfolioItem>>;
    async fn insert_portfolio_item(&self, item: PortfolioItem) -> RepoResult<PortfolioItem>;
    async fn save_portfolio_item(&self, item: PortfolioItem) -> RepoResult<Option<PortfolioItem>>;
    async fn delete_portfolio_item(&self, id: Uuid) -> RepoResult<bool>;

    // --- Team (display order, then oldest first) ---
    async fn list_team_members(&self, filter: &ActiveFilter) -> RepoResult<Vec<TeamMember>>;
    async fn get_team_member(&self, id: Uuid) -> RepoResult<Option<TeamMember>>;
    async fn insert_team_member(&self, member: TeamMember) -> RepoResult<TeamMember>;
    async fn save_team_member(&self, member: TeamMember) -> RepoResult<Option<TeamMember>>;
    async fn delete_team_member(&self, id: Uuid) -> RepoResult<bool>;

    // --- Subscription plans (cheapest first). Names are unique. ---
    async fn list_subscription_plans(&self, filter: &ActiveFilter) -> RepoResult<Vec<SubscriptionPlan>>;
    async fn get_subscription_plan(&self, id: Uuid) -> RepoResult<Option<SubscriptionPlan>>;
    async fn insert_subscription_plan(&self, plan: SubscriptionPlan) -> RepoResult<SubscriptionPlan>;
    async fn save_subscription_plan(&self, plan: SubscriptionPlan) -> RepoResult<Option<SubscriptionPlan>>;
    async fn delete_subscription_plan(&self, id: Uuid) -> RepoResult<bool>;

    // --- Testimonials (display order, then oldest first) ---
    async fn list_testimonials(&self, filter: &TestimonialFilter) -> RepoResult<Vec<Testimonial>>;
    async fn get_testimonial(&self, id: Uuid) -> RepoResult<Option<Testimonial>>;
    async fn insert_testimonial(&self, testimonial: Testimonial) -> RepoResult<Testimonial>;
    async fn save_testimonial(&self, testimonial: Testimonial) -> RepoResult<Option<Testimonial>>;
    async fn delete_testimonial(&self, id: Uuid) -> RepoResult<bool>;

    // --- Consultations (newest first) ---
    async fn list_consultations(&self, filter: &ConsultationFilter) -> RepoResult<Vec<Consultation>>;
    async fn get_consultation(&self, id: Uuid) -> RepoResult<Option<Consultation>>;
    async fn insert_consultation(&self, consultation: Consultation) -> RepoResult<Consultation>;
    async fn save_consultation(&self, consultation: Consultation) -> RepoResult<Option<Consultation>>;
    async fn delete_consultation(&self, id: Uuid) -> RepoResult<bool>;

    // --- Contact messages (newest first) ---
    async fn list_contact_messages(&self, filter: &ContactFilter) -> RepoResult<Vec<ContactMessage>>;
    async fn get_contact_message(&self, id: Uuid) -> RepoResult<Option<ContactMessage>>;
    async fn insert_contact_message(&self, message: ContactMessage) -> RepoResult<ContactMessage>;
    async fn save_contact_message(&self, message: ContactMessage) -> RepoResult<Option<ContactMessage>>;
    async fn delete_contact_message(&self, id: Uuid) -> RepoResult<bool>;

    // --- Transactions (most recent date first) ---
    async fn list_transactions(&self, filter: &TransactionFilter) -> RepoResult<Vec<Transaction>>;
    async fn get_transaction(&self, id: Uuid) -> RepoResult<Option<Transaction>>;
    async fn insert_transaction(&self, transaction: Transaction) -> RepoResult<Transaction>;
    async fn save_transaction(&self, transaction: Transaction) -> RepoResult<Option<Transaction>>;
    async fn delete_transaction(&self, id: Uuid) -> RepoResult<bool>;

    // --- Users (oldest first). Emails are unique and stored lowercased. ---
    async fn list_users(&self) -> RepoResult<Vec<User>>;
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn insert_user(&self, user: User) -> RepoResult<User>;
    async fn save_user(&self, user: User) -> RepoResult<Option<User>>;
    async fn delete_user(&self, id: Uuid) -> RepoResult<bool>;

    // --- Dashboard ---
    async fn get_stats(&self) -> RepoResult<DashboardStats>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

pub(crate) const DUPLICATE_PLAN: &str = "Subscription plan with this name already exists";
pub(crate) const DUPLICATE_EMAIL: &str = "User already exists";
