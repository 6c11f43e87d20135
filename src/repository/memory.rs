use super::{DUPLICATE_EMAIL, DUPLICATE_PLAN, RepoError, RepoResult, Repository};
use crate::models::{
    ActiveFilter, Consultation, ConsultationFilter, ConsultationStatus, ContactFilter,
    ContactMessage, DashboardStats, PortfolioFilter, PortfolioItem, SubscriptionPlan, TeamMember,
    Testimonial, TestimonialFilter, Transaction, TransactionFilter, TransactionKind, User,
    user::normalize_email,
};
use crate::reporting;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Store {
    portfolio: HashMap<Uuid, PortfolioItem>,
    team: HashMap<Uuid, TeamMember>,
    plans: HashMap<Uuid, SubscriptionPlan>,
    testimonials: HashMap<Uuid, Testimonial>,
    consultations: HashMap<Uuid, Consultation>,
    contacts: HashMap<Uuid, ContactMessage>,
    transactions: HashMap<Uuid, Transaction>,
    users: HashMap<Uuid, User>,
}

/// InMemoryRepository
///
/// A process-local `Repository` backing the test suite. Honors the same filters,
/// orderings and uniqueness rules as the Postgres store.
#[derive(Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Replaces an existing entry, returning the stored copy, or `None` if the id is unknown.
fn replace<T: Clone>(map: &mut HashMap<Uuid, T>, id: Uuid, value: T) -> Option<T> {
    let slot = map.get_mut(&id)?;
    *slot = value;
    Some(slot.clone())
}

#[async_trait]
impl Repository for InMemoryRepository {
    // --- PORTFOLIO ---

    async fn list_portfolio_items(&self, filter: &PortfolioFilter) -> RepoResult<Vec<PortfolioItem>> {
        let store = self.store.read().await;
        let mut items: Vec<PortfolioItem> = store
            .portfolio
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get_portfolio_item(&self, id: Uuid) -> RepoResult<Option<PortfolioItem>> {
        Ok(self.store.read().await.portfolio.get(&id).cloned())
    }

    async fn insert_portfolio_item(&self, item: PortfolioItem) -> RepoResult<PortfolioItem> {
        self.store.write().await.portfolio.insert(item.id, item.clone());
        Ok(item)
    }

    async fn save_portfolio_item(&self, item: PortfolioItem) -> RepoResult<Option<PortfolioItem>> {
        let mut store = self.store.write().await;
        Ok(replace(&mut store.portfolio, item.id, item))
    }

    async fn delete_portfolio_item(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.portfolio.remove(&id).is_some())
    }

    // --- TEAM ---

    async fn list_team_members(&self, filter: &ActiveFilter) -> RepoResult<Vec<TeamMember>> {
        let store = self.store.read().await;
        let mut members: Vec<TeamMember> = store
            .team
            .values()
            .filter(|m| filter.active.is_none_or(|a| m.active == a))
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(members)
    }

    async fn get_team_member(&self, id: Uuid) -> RepoResult<Option<TeamMember>> {
        Ok(self.store.read().await.team.get(&id).cloned())
    }

    async fn insert_team_member(&self, member: TeamMember) -> RepoResult<TeamMember> {
        self.store.write().await.team.insert(member.id, member.clone());
        Ok(member)
    }

    async fn save_team_member(&self, member: TeamMember) -> RepoResult<Option<TeamMember>> {
        let mut store = self.store.write().await;
        Ok(replace(&mut store.team, member.id, member))
    }

    async fn delete_team_member(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.team.remove(&id).is_some())
    }

    // --- SUBSCRIPTION PLANS ---

    async fn list_subscription_plans(&self, filter: &ActiveFilter) -> RepoResult<Vec<SubscriptionPlan>> {
        let store = self.store.read().await;
        let mut plans: Vec<SubscriptionPlan> = store
            .plans
            .values()
            .filter(|p| filter.active.is_none_or(|a| p.active == a))
            .cloned()
            .collect();
        plans.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
        Ok(plans)
    }

    async fn get_subscription_plan(&self, id: Uuid) -> RepoResult<Option<SubscriptionPlan>> {
        Ok(self.store.read().await.plans.get(&id).cloned())
    }

    async fn insert_subscription_plan(&self, plan: SubscriptionPlan) -> RepoResult<SubscriptionPlan> {
        let mut store = self.store.write().await;
        if store.plans.values().any(|p| p.name == plan.name) {
            return Err(RepoError::Conflict(DUPLICATE_PLAN.to_string()));
        }
        store.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn save_subscription_plan(&self, plan: SubscriptionPlan) -> RepoResult<Option<SubscriptionPlan>> {
        let mut store = self.store.write().await;
        if store
            .plans
            .values()
            .any(|p| p.id != plan.id && p.name == plan.name)
        {
            return Err(RepoError::Conflict(DUPLICATE_PLAN.to_string()));
        }
        Ok(replace(&mut store.plans, plan.id, plan))
    }

    async fn delete_subscription_plan(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.plans.remove(&id).is_some())
    }

    // --- TESTIMONIALS ---

    async fn list_testimonials(&self, filter: &TestimonialFilter) -> RepoResult<Vec<Testimonial>> {
        let store = self.store.read().await;
        let mut testimonials: Vec<Testimonial> = store
            .testimonials
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        testimonials.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(testimonials)
    }

    async fn get_testimonial(&self, id: Uuid) -> RepoResult<Option<Testimonial>> {
        Ok(self.store.read().await.testimonials.get(&id).cloned())
    }

    async fn insert_testimonial(&self, testimonial: Testimonial) -> RepoResult<Testimonial> {
        self.store
            .write()
            .await
            .testimonials
            .insert(testimonial.id, testimonial.clone());
        Ok(testimonial)
    }

    async fn save_testimonial(&self, testimonial: Testimonial) -> RepoResult<Option<Testimonial>> {
        let mut store = self.store.write().await;
        Ok(replace(&mut store.testimonials, testimonial.id, testimonial))
    }

    async fn delete_testimonial(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.testimonials.remove(&id).is_some())
    }

    // --- CONSULTATIONS ---

    async fn list_consultations(&self, filter: &ConsultationFilter) -> RepoResult<Vec<Consultation>> {
        let store = self.store.read().await;
        let mut consultations: Vec<Consultation> = store
            .consultations
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        consultations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(consultations)
    }

    async fn get_consultation(&self, id: Uuid) -> RepoResult<Option<Consultation>> {
        Ok(self.store.read().await.consultations.get(&id).cloned())
    }

    async fn insert_consultation(&self, consultation: Consultation) -> RepoResult<Consultation> {
        self.store
            .write()
            .await
            .consultations
            .insert(consultation.id, consultation.clone());
        Ok(consultation)
    }

    async fn save_consultation(&self, consultation: Consultation) -> RepoResult<Option<Consultation>> {
        let mut store = self.store.write().await;
        Ok(replace(&mut store.consultations, consultation.id, consultation))
    }

    async fn delete_consultation(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.consultations.remove(&id).is_some())
    }

    // --- CONTACT MESSAGES ---

    async fn list_contact_messages(&self, filter: &ContactFilter) -> RepoResult<Vec<ContactMessage>> {
        let store = self.store.read().await;
        let mut messages: Vec<ContactMessage> = store
            .contacts
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn get_contact_message(&self, id: Uuid) -> RepoResult<Option<ContactMessage>> {
        Ok(self.store.read().await.contacts.get(&id).cloned())
    }

    async fn insert_contact_message(&self, message: ContactMessage) -> RepoResult<ContactMessage> {
        self.store
            .write()
            .await
            .contacts
            .insert(message.id, message.clone());
        Ok(message)
    }

    async fn save_contact_message(&self, message: ContactMessage) -> RepoResult<Option<ContactMessage>> {
        let mut store = self.store.write().await;
        Ok(replace(&mut store.contacts, message.id, message))
    }

    async fn delete_contact_message(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.contacts.remove(&id).is_some())
    }

    // --- TRANSACTIONS ---

    async fn list_transactions(&self, filter: &TransactionFilter) -> RepoResult<Vec<Transaction>> {
        let store = self.store.read().await;
        let mut transactions: Vec<Transaction> = store
            .transactions
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(transactions)
    }

    async fn get_transaction(&self, id: Uuid) -> RepoResult<Option<Transaction>> {
        Ok(self.store.read().await.transactions.get(&id).cloned())
    }

    async fn insert_transaction(&self, transaction: Transaction) -> RepoResult<Transaction> {
        self.store
            .write()
            .await
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn save_transaction(&self, transaction: Transaction) -> RepoResult<Option<Transaction>> {
        let mut store = self.store.write().await;
        Ok(replace(&mut store.transactions, transaction.id, transaction))
    }

    async fn delete_transaction(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.transactions.remove(&id).is_some())
    }

    // --- USERS ---

    async fn list_users(&self) -> RepoResult<Vec<User>> {
        let store = self.store.read().await;
        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = normalize_email(email);
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: User) -> RepoResult<User> {
        let mut store = self.store.write().await;
        if store.users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict(DUPLICATE_EMAIL.to_string()));
        }
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save_user(&self, user: User) -> RepoResult<Option<User>> {
        let mut store = self.store.write().await;
        if store
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepoError::Conflict(DUPLICATE_EMAIL.to_string()));
        }
        Ok(replace(&mut store.users, user.id, user))
    }

    async fn delete_user(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.store.write().await.users.remove(&id).is_some())
    }

    // --- DASHBOARD ---

    async fn get_stats(&self) -> RepoResult<DashboardStats> {
        let store = self.store.read().await;

        let mut counts: HashMap<ConsultationStatus, i64> = HashMap::new();
        for c in store.consultations.values() {
            *counts.entry(c.status).or_default() += 1;
        }
        let counts: Vec<(ConsultationStatus, i64)> = counts.into_iter().collect();
        let consultations_by_status = reporting::status_breakdown(&counts);

        let sum_of = |kind: TransactionKind| -> f64 {
            store
                .transactions
                .values()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount)
                .sum()
        };

        Ok(DashboardStats {
            portfolio_items: store.portfolio.len() as i64,
            team_members: store.team.len() as i64,
            subscription_plans: store.plans.len() as i64,
            testimonials: store.testimonials.len() as i64,
            consultations: store.consultations.len() as i64,
            pending_consultations: store
                .consultations
                .values()
                .filter(|c| c.status == ConsultationStatus::Pending)
                .count() as i64,
            consultations_by_status,
            contact_messages: store.contacts.len() as i64,
            unread_messages: store.contacts.values().filter(|m| !m.read).count() as i64,
            users: store.users.len() as i64,
            total_income: sum_of(TransactionKind::Income),
            total_expense: sum_of(TransactionKind::Expense),
        })
    }
}
