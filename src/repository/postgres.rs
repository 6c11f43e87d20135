use super::{DUPLICATE_EMAIL, DUPLICATE_PLAN, RepoError, RepoResult, Repository};
use crate::models::{
    ActiveFilter, Consultation, ConsultationFilter, ConsultationStatus, ContactFilter,
    ContactMessage, DashboardStats, PortfolioFilter, PortfolioItem, SubscriptionPlan, TeamMember,
    Testimonial, TestimonialFilter, Transaction, TransactionFilter, User,
};
use crate::reporting;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, query_builder::QueryBuilder, types::Json};
use uuid::Uuid;

const PORTFOLIO_COLUMNS: &str = "id, title, description, image, category, technologies, tags, \
     year, link, featured, active, created_at, updated_at";
const TEAM_COLUMNS: &str = "id, name, role, bio, image, social_links, active, display_order, \
     created_at, updated_at";
const PLAN_COLUMNS: &str =
    "id, name, price, features, duration, active, popular, created_at, updated_at";
const TESTIMONIAL_COLUMNS: &str = "id, client_name, client_position, client_company, content, \
     rating, image, active, featured, display_order, created_at, updated_at";
const CONSULTATION_COLUMNS: &str = "id, name, email, phone, company, service, budget, timeline, \
     message, status, notes, created_at, updated_at";
const CONTACT_COLUMNS: &str = "id, name, email, subject, message, read, created_at, updated_at";
const TRANSACTION_COLUMNS: &str =
    "id, kind, amount, category, description, date, created_by, created_at, updated_at";
const USER_COLUMNS: &str = "id, name, email, password_hash, role, active, created_at, updated_at";

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
/// Schema lives in `migrations/`.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_by_id(&self, table: &str, id: Uuid) -> RepoResult<bool> {
        let res = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

/// Maps a unique-constraint violation (SQLSTATE 23505) to a client-facing conflict.
fn conflict_or_db(err: sqlx::Error, message: &str) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return RepoError::Conflict(message.to_string());
        }
    }
    RepoError::Database(err)
}

/// Scalar counters for the dashboard, read in a single round trip.
#[derive(FromRow)]
struct StatsRow {
    portfolio_items: i64,
    team_members: i64,
    subscription_plans: i64,
    testimonials: i64,
    consultations: i64,
    contact_messages: i64,
    unread_messages: i64,
    users: i64,
    total_income: f64,
    total_expense: f64,
}

#[async_trait]
impl Repository for PostgresRepository {
    // --- PORTFOLIO ---

    async fn list_portfolio_items(&self, filter: &PortfolioFilter) -> RepoResult<Vec<PortfolioItem>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolio_items WHERE TRUE"
        ));
        if let Some(category) = &filter.category {
            builder.push(" AND LOWER(category) = LOWER(");
            builder.push_bind(category.clone());
            builder.push(")");
        }
        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ");
            builder.push_bind(featured);
        }
        if let Some(active) = filter.active {
            builder.push(" AND active = ");
            builder.push_bind(active);
        }
        builder.push(" ORDER BY created_at DESC");

        Ok(builder
            .build_query_as::<PortfolioItem>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_portfolio_item(&self, id: Uuid) -> RepoResult<Option<PortfolioItem>> {
        let sql = format!("SELECT {PORTFOLIO_COLUMNS} FROM portfolio_items WHERE id = $1");
        Ok(sqlx::query_as::<_, PortfolioItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_portfolio_item(&self, item: PortfolioItem) -> RepoResult<PortfolioItem> {
        let sql = format!(
            "INSERT INTO portfolio_items ({PORTFOLIO_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {PORTFOLIO_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, PortfolioItem>(&sql)
            .bind(item.id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.image)
            .bind(&item.category)
            .bind(&item.technologies)
            .bind(&item.tags)
            .bind(item.year)
            .bind(&item.link)
            .bind(item.featured)
            .bind(item.active)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save_portfolio_item(&self, item: PortfolioItem) -> RepoResult<Option<PortfolioItem>> {
        let sql = format!(
            "UPDATE portfolio_items SET title = $2, description = $3, image = $4, category = $5, \
             technologies = $6, tags = $7, year = $8, link = $9, featured = $10, active = $11, \
             updated_at = $12 WHERE id = $1 RETURNING {PORTFOLIO_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, PortfolioItem>(&sql)
            .bind(item.id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.image)
            .bind(&item.category)
            .bind(&item.technologies)
            .bind(&item.tags)
            .bind(item.year)
            .bind(&item.link)
            .bind(item.featured)
            .bind(item.active)
            .bind(item.updated_at)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_portfolio_item(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("portfolio_items", id).await
    }

    // --- TEAM ---

    async fn list_team_members(&self, filter: &ActiveFilter) -> RepoResult<Vec<TeamMember>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {TEAM_COLUMNS} FROM team_members WHERE TRUE"));
        if let Some(active) = filter.active {
            builder.push(" AND active = ");
            builder.push_bind(active);
        }
        builder.push(" ORDER BY display_order ASC, created_at ASC");

        Ok(builder
            .build_query_as::<TeamMember>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_team_member(&self, id: Uuid) -> RepoResult<Option<TeamMember>> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM team_members WHERE id = $1");
        Ok(sqlx::query_as::<_, TeamMember>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_team_member(&self, member: TeamMember) -> RepoResult<TeamMember> {
        let sql = format!(
            "INSERT INTO team_members ({TEAM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {TEAM_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, TeamMember>(&sql)
            .bind(member.id)
            .bind(&member.name)
            .bind(&member.role)
            .bind(&member.bio)
            .bind(&member.image)
            .bind(Json(&member.social_links))
            .bind(member.active)
            .bind(member.display_order)
            .bind(member.created_at)
            .bind(member.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save_team_member(&self, member: TeamMember) -> RepoResult<Option<TeamMember>> {
        let sql = format!(
            "UPDATE team_members SET name = $2, role = $3, bio = $4, image = $5, \
             social_links = $6, active = $7, display_order = $8, updated_at = $9 \
             WHERE id = $1 RETURNING {TEAM_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, TeamMember>(&sql)
            .bind(member.id)
            .bind(&member.name)
            .bind(&member.role)
            .bind(&member.bio)
            .bind(&member.image)
            .bind(Json(&member.social_links))
            .bind(member.active)
            .bind(member.display_order)
            .bind(member.updated_at)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_team_member(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("team_members", id).await
    }

    // --- SUBSCRIPTION PLANS ---

    async fn list_subscription_plans(&self, filter: &ActiveFilter) -> RepoResult<Vec<SubscriptionPlan>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {PLAN_COLUMNS} FROM subscription_plans WHERE TRUE"
        ));
        if let Some(active) = filter.active {
            builder.push(" AND active = ");
            builder.push_bind(active);
        }
        builder.push(" ORDER BY price ASC, name ASC");

        Ok(builder
            .build_query_as::<SubscriptionPlan>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_subscription_plan(&self, id: Uuid) -> RepoResult<Option<SubscriptionPlan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM subscription_plans WHERE id = $1");
        Ok(sqlx::query_as::<_, SubscriptionPlan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_subscription_plan(&self, plan: SubscriptionPlan) -> RepoResult<SubscriptionPlan> {
        let sql = format!(
            "INSERT INTO subscription_plans ({PLAN_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, SubscriptionPlan>(&sql)
            .bind(plan.id)
            .bind(&plan.name)
            .bind(plan.price)
            .bind(&plan.features)
            .bind(&plan.duration)
            .bind(plan.active)
            .bind(plan.popular)
            .bind(plan.created_at)
            .bind(plan.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_or_db(e, DUPLICATE_PLAN))
    }

    async fn save_subscription_plan(&self, plan: SubscriptionPlan) -> RepoResult<Option<SubscriptionPlan>> {
        let sql = format!(
            "UPDATE subscription_plans SET name = $2, price = $3, features = $4, duration = $5, \
             active = $6, popular = $7, updated_at = $8 WHERE id = $1 RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, SubscriptionPlan>(&sql)
            .bind(plan.id)
            .bind(&plan.name)
            .bind(plan.price)
            .bind(&plan.features)
            .bind(&plan.duration)
            .bind(plan.active)
            .bind(plan.popular)
            .bind(plan.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_or_db(e, DUPLICATE_PLAN))
    }

    async fn delete_subscription_plan(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("subscription_plans", id).await
    }

    // --- TESTIMONIALS ---

    async fn list_testimonials(&self, filter: &TestimonialFilter) -> RepoResult<Vec<Testimonial>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE TRUE"
        ));
        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ");
            builder.push_bind(featured);
        }
        if let Some(active) = filter.active {
            builder.push(" AND active = ");
            builder.push_bind(active);
        }
        builder.push(" ORDER BY display_order ASC, created_at ASC");

        Ok(builder
            .build_query_as::<Testimonial>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_testimonial(&self, id: Uuid) -> RepoResult<Option<Testimonial>> {
        let sql = format!("SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = $1");
        Ok(sqlx::query_as::<_, Testimonial>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_testimonial(&self, t: Testimonial) -> RepoResult<Testimonial> {
        let sql = format!(
            "INSERT INTO testimonials ({TESTIMONIAL_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {TESTIMONIAL_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Testimonial>(&sql)
            .bind(t.id)
            .bind(&t.client_name)
            .bind(&t.client_position)
            .bind(&t.client_company)
            .bind(&t.content)
            .bind(t.rating)
            .bind(&t.image)
            .bind(t.active)
            .bind(t.featured)
            .bind(t.display_order)
            .bind(t.created_at)
            .bind(t.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save_testimonial(&self, t: Testimonial) -> RepoResult<Option<Testimonial>> {
        let sql = format!(
            "UPDATE testimonials SET client_name = $2, client_position = $3, client_company = $4, \
             content = $5, rating = $6, image = $7, active = $8, featured = $9, \
             display_order = $10, updated_at = $11 WHERE id = $1 RETURNING {TESTIMONIAL_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Testimonial>(&sql)
            .bind(t.id)
            .bind(&t.client_name)
            .bind(&t.client_position)
            .bind(&t.client_company)
            .bind(&t.content)
            .bind(t.rating)
            .bind(&t.image)
            .bind(t.active)
            .bind(t.featured)
            .bind(t.display_order)
            .bind(t.updated_at)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_testimonial(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("testimonials", id).await
    }

    // --- CONSULTATIONS ---

    async fn list_consultations(&self, filter: &ConsultationFilter) -> RepoResult<Vec<Consultation>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {CONSULTATION_COLUMNS} FROM consultations WHERE TRUE"
        ));
        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        builder.push(" ORDER BY created_at DESC");

        Ok(builder
            .build_query_as::<Consultation>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_consultation(&self, id: Uuid) -> RepoResult<Option<Consultation>> {
        let sql = format!("SELECT {CONSULTATION_COLUMNS} FROM consultations WHERE id = $1");
        Ok(sqlx::query_as::<_, Consultation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_consultation(&self, c: Consultation) -> RepoResult<Consultation> {
        let sql = format!(
            "INSERT INTO consultations ({CONSULTATION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {CONSULTATION_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Consultation>(&sql)
            .bind(c.id)
            .bind(&c.name)
            .bind(&c.email)
            .bind(&c.phone)
            .bind(&c.company)
            .bind(&c.service)
            .bind(&c.budget)
            .bind(&c.timeline)
            .bind(&c.message)
            .bind(c.status.as_str())
            .bind(Json(&c.notes))
            .bind(c.created_at)
            .bind(c.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save_consultation(&self, c: Consultation) -> RepoResult<Option<Consultation>> {
        let sql = format!(
            "UPDATE consultations SET name = $2, email = $3, phone = $4, company = $5, \
             service = $6, budget = $7, timeline = $8, message = $9, status = $10, notes = $11, \
             updated_at = $12 WHERE id = $1 RETURNING {CONSULTATION_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Consultation>(&sql)
            .bind(c.id)
            .bind(&c.name)
            .bind(&c.email)
            .bind(&c.phone)
            .bind(&c.company)
            .bind(&c.service)
            .bind(&c.budget)
            .bind(&c.timeline)
            .bind(&c.message)
            .bind(c.status.as_str())
            .bind(Json(&c.notes))
            .bind(c.updated_at)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_consultation(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("consultations", id).await
    }

    // --- CONTACT MESSAGES ---

    async fn list_contact_messages(&self, filter: &ContactFilter) -> RepoResult<Vec<ContactMessage>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages WHERE TRUE"
        ));
        if let Some(read) = filter.read {
            builder.push(" AND read = ");
            builder.push_bind(read);
        }
        builder.push(" ORDER BY created_at DESC");

        Ok(builder
            .build_query_as::<ContactMessage>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_contact_message(&self, id: Uuid) -> RepoResult<Option<ContactMessage>> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contact_messages WHERE id = $1");
        Ok(sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_contact_message(&self, m: ContactMessage) -> RepoResult<ContactMessage> {
        let sql = format!(
            "INSERT INTO contact_messages ({CONTACT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {CONTACT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(m.id)
            .bind(&m.name)
            .bind(&m.email)
            .bind(&m.subject)
            .bind(&m.message)
            .bind(m.read)
            .bind(m.created_at)
            .bind(m.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save_contact_message(&self, m: ContactMessage) -> RepoResult<Option<ContactMessage>> {
        let sql = format!(
            "UPDATE contact_messages SET name = $2, email = $3, subject = $4, message = $5, \
             read = $6, updated_at = $7 WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(m.id)
            .bind(&m.name)
            .bind(&m.email)
            .bind(&m.subject)
            .bind(&m.message)
            .bind(m.read)
            .bind(m.updated_at)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_contact_message(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("contact_messages", id).await
    }

    // --- TRANSACTIONS ---

    async fn list_transactions(&self, filter: &TransactionFilter) -> RepoResult<Vec<Transaction>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE TRUE"
        ));
        if let Some(kind) = filter.kind {
            builder.push(" AND kind = ");
            builder.push_bind(kind.as_str());
        }
        if let Some(category) = &filter.category {
            builder.push(" AND LOWER(category) = LOWER(");
            builder.push_bind(category.clone());
            builder.push(")");
        }
        if let Some(from) = filter.from {
            builder.push(" AND date >= ");
            builder.push_bind(from);
        }
        if let Some(to) = filter.to {
            builder.push(" AND date <= ");
            builder.push_bind(to);
        }
        builder.push(" ORDER BY date DESC, created_at DESC");

        Ok(builder
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_transaction(&self, id: Uuid) -> RepoResult<Option<Transaction>> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1");
        Ok(sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_transaction(&self, t: Transaction) -> RepoResult<Transaction> {
        let sql = format!(
            "INSERT INTO transactions ({TRANSACTION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {TRANSACTION_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Transaction>(&sql)
            .bind(t.id)
            .bind(t.kind.as_str())
            .bind(t.amount)
            .bind(&t.category)
            .bind(&t.description)
            .bind(t.date)
            .bind(t.created_by)
            .bind(t.created_at)
            .bind(t.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save_transaction(&self, t: Transaction) -> RepoResult<Option<Transaction>> {
        let sql = format!(
            "UPDATE transactions SET kind = $2, amount = $3, category = $4, description = $5, \
             date = $6, updated_at = $7 WHERE id = $1 RETURNING {TRANSACTION_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Transaction>(&sql)
            .bind(t.id)
            .bind(t.kind.as_str())
            .bind(t.amount)
            .bind(&t.category)
            .bind(&t.description)
            .bind(t.date)
            .bind(t.updated_at)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_transaction(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("transactions", id).await
    }

    // --- USERS ---

    async fn list_users(&self) -> RepoResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = LOWER($1)");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_user(&self, u: User) -> RepoResult<User> {
        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(u.id)
            .bind(&u.name)
            .bind(&u.email)
            .bind(&u.password_hash)
            .bind(u.role.as_str())
            .bind(u.active)
            .bind(u.created_at)
            .bind(u.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_or_db(e, DUPLICATE_EMAIL))
    }

    async fn save_user(&self, u: User) -> RepoResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, password_hash = $4, role = $5, active = $6, \
             updated_at = $7 WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(u.id)
            .bind(&u.name)
            .bind(&u.email)
            .bind(&u.password_hash)
            .bind(u.role.as_str())
            .bind(u.active)
            .bind(u.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_or_db(e, DUPLICATE_EMAIL))
    }

    async fn delete_user(&self, id: Uuid) -> RepoResult<bool> {
        self.delete_by_id("users", id).await
    }

    // --- DASHBOARD ---

    /// get_stats
    ///
    /// Compiles every dashboard counter in two queries: one row of scalar sub-selects and
    /// one grouped count over consultation statuses.
    async fn get_stats(&self) -> RepoResult<DashboardStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM portfolio_items)                   AS portfolio_items,
                (SELECT COUNT(*) FROM team_members)                      AS team_members,
                (SELECT COUNT(*) FROM subscription_plans)                AS subscription_plans,
                (SELECT COUNT(*) FROM testimonials)                      AS testimonials,
                (SELECT COUNT(*) FROM consultations)                     AS consultations,
                (SELECT COUNT(*) FROM contact_messages)                  AS contact_messages,
                (SELECT COUNT(*) FROM contact_messages WHERE NOT read)   AS unread_messages,
                (SELECT COUNT(*) FROM users)                             AS users,
                (SELECT COALESCE(SUM(amount), 0)::float8 FROM transactions WHERE kind = 'income')
                                                                         AS total_income,
                (SELECT COALESCE(SUM(amount), 0)::float8 FROM transactions WHERE kind = 'expense')
                                                                         AS total_expense
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let counts = sqlx::query_as::<_, (ConsultationStatus, i64)>(
            "SELECT status, COUNT(*) FROM consultations GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        let consultations_by_status = reporting::status_breakdown(&counts);
        let pending_consultations = consultations_by_status
            .iter()
            .find(|s| s.status == ConsultationStatus::Pending)
            .map_or(0, |s| s.count);

        Ok(DashboardStats {
            portfolio_items: row.portfolio_items,
            team_members: row.team_members,
            subscription_plans: row.subscription_plans,
            testimonials: row.testimonials,
            consultations: row.consultations,
            pending_consultations,
            consultations_by_status,
            contact_messages: row.contact_messages,
            unread_messages: row.unread_messages,
            users: row.users,
            total_income: row.total_income,
            total_expense: row.total_expense,
        })
    }
}
