use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Validate, require, require_email};

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Role
///
/// The RBAC field. Content-management endpoints require `admin`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, sqlx::Type, Default, PartialEq, Eq,
)]
#[ts(export)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// User
///
/// The account record stored in the `users` table. Never serialised directly: the
/// password hash stays on the server, clients receive a [`UserProfile`].
#[derive(Debug, Clone, FromRow, Default, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercased; unique.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: &str, password_hash: String, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            role,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// UserProfile
///
/// Output schema for a user (GET /api/users/me, admin user listing, auth responses).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

/// RegisterRequest
///
/// Input payload for `POST /api/users/register`. Self-registered accounts always get the
/// `user` role; promotion to admin happens through the admin user endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require_email(&mut errors, "email", &self.email);
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters long"
            ));
        }
        errors
    }
}

/// LoginRequest
///
/// Input payload for `POST /api/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// AuthResponse
///
/// Returned by register and login: a signed bearer token plus the resolved profile.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// UpdateUserRequest
///
/// Admin payload for `PUT /api/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require(&mut errors, "name", name);
        }
        errors
    }
}

impl UpdateUserRequest {
    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.name {
            user.name = v.trim().to_string();
        }
        if let Some(v) = self.role {
            user.role = v;
        }
        if let Some(v) = self.active {
            user.active = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_never_carries_the_password_hash() {
        let user = User::new(
            "Ada".into(),
            "  Ada@Studio.IO ",
            "$argon2id$v=19$secret".into(),
            Role::Admin,
            Utc::now(),
        );
        let json = serde_json::to_string(&UserProfile::from(&user)).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains(r#""email":"ada@studio.io""#));
        assert!(json.contains(r#""role":"admin""#));
    }

    #[test]
    fn short_password_is_rejected() {
        let req = RegisterRequest {
            name: "Ada".into(),
            email: "ada@studio.io".into(),
            password: "abc".into(),
        };
        assert_eq!(
            req.validate(),
            vec!["password must be at least 6 characters long".to_string()]
        );
    }
}
