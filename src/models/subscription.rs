use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Validate, default_true, require};

/// SubscriptionPlan
///
/// A pricing tier shown on the services page, stored in `subscription_plans`.
/// `name` is unique across plans.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct SubscriptionPlan {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub features: Vec<String>,
    /// Billing cycle label, e.g. "monthly" or "yearly".
    pub duration: String,
    pub active: bool,
    pub popular: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

fn default_duration() -> String {
    "monthly".to_string()
}

/// CreateSubscriptionPlan
///
/// Input payload for `POST /api/subscriptions`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateSubscriptionPlan {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub popular: bool,
}

fn check_price(errors: &mut Vec<String>, price: f64) {
    if !price.is_finite() || price < 0.0 {
        errors.push("price must be a non-negative number".to_string());
    }
}

impl Validate for CreateSubscriptionPlan {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "duration", &self.duration);
        check_price(&mut errors, self.price);
        errors
    }
}

impl CreateSubscriptionPlan {
    pub fn into_plan(self, now: DateTime<Utc>) -> SubscriptionPlan {
        SubscriptionPlan {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            price: self.price,
            features: self.features,
            duration: self.duration,
            active: self.active,
            popular: self.popular,
            created_at: now,
            updated_at: now,
        }
    }
}

/// UpdateSubscriptionPlan
///
/// Partial update payload for `PUT /api/subscriptions/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateSubscriptionPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
}

impl Validate for UpdateSubscriptionPlan {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require(&mut errors, "name", name);
        }
        if let Some(price) = self.price {
            check_price(&mut errors, price);
        }
        errors
    }
}

impl UpdateSubscriptionPlan {
    pub fn apply(self, plan: &mut SubscriptionPlan) {
        if let Some(v) = self.name {
            plan.name = v.trim().to_string();
        }
        if let Some(v) = self.price {
            plan.price = v;
        }
        if let Some(v) = self.features {
            plan.features = v;
        }
        if let Some(v) = self.duration {
            plan.duration = v;
        }
        if let Some(v) = self.active {
            plan.active = v;
        }
        if let Some(v) = self.popular {
            plan.popular = v;
        }
    }
}

/// ActiveFilter
///
/// Query parameters for resources that only filter on visibility (`team`, `subscriptions`).
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ActiveFilter {
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let plan = CreateSubscriptionPlan {
            name: "Starter".into(),
            price: -10.0,
            duration: "monthly".into(),
            ..Default::default()
        };
        assert_eq!(
            plan.validate(),
            vec!["price must be a non-negative number".to_string()]
        );
    }

    #[test]
    fn duration_defaults_to_monthly() {
        let plan: CreateSubscriptionPlan =
            serde_json::from_str(r#"{"name":"Growth","price":499}"#).unwrap();
        assert_eq!(plan.duration, "monthly");
        assert!(plan.active);
        assert!(!plan.popular);
    }
}
