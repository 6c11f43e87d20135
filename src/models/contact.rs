use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Validate, require, require_email};

/// ContactMessage
///
/// A message sent through the public contact form, stored in `contact_messages`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateContactMessage
///
/// Public form payload for `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl Validate for CreateContactMessage {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "message", &self.message);
        errors
    }
}

impl CreateContactMessage {
    pub fn into_message(self, now: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email.trim().to_lowercase(),
            subject: self.subject,
            message: self.message,
            read: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// ContactFilter
///
/// Query parameters accepted by `GET /api/contact`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ContactFilter {
    pub read: Option<bool>,
}

impl ContactFilter {
    pub fn matches(&self, message: &ContactMessage) -> bool {
        self.read.is_none_or(|r| message.read == r)
    }
}
