use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Validate, default_true, require};

/// SocialLinks
///
/// Optional profile links shown on a team member's card. Stored as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// TeamMember
///
/// A person shown on the public team page, stored in the `team_members` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    /// Job title displayed under the name (not an access role).
    pub role: String,
    pub bio: String,
    pub image: String,
    #[sqlx(json)]
    pub social_links: SocialLinks,
    pub active: bool,
    /// Position on the team page, ascending. `order` is reserved in SQL.
    #[serde(rename = "order")]
    pub display_order: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateTeamMember
///
/// Input payload for `POST /api/team`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, rename = "order")]
    pub display_order: i32,
}

impl Validate for CreateTeamMember {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "role", &self.role);
        errors
    }
}

impl CreateTeamMember {
    pub fn into_member(self, now: DateTime<Utc>) -> TeamMember {
        TeamMember {
            id: Uuid::new_v4(),
            name: self.name,
            role: self.role,
            bio: self.bio,
            image: self.image,
            social_links: self.social_links,
            active: self.active,
            display_order: self.display_order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// UpdateTeamMember
///
/// Partial update payload for `PUT /api/team/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTeamMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

impl Validate for UpdateTeamMember {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require(&mut errors, "name", name);
        }
        if let Some(role) = &self.role {
            require(&mut errors, "role", role);
        }
        errors
    }
}

impl UpdateTeamMember {
    pub fn apply(self, member: &mut TeamMember) {
        if let Some(v) = self.name {
            member.name = v;
        }
        if let Some(v) = self.role {
            member.role = v;
        }
        if let Some(v) = self.bio {
            member.bio = v;
        }
        if let Some(v) = self.image {
            member.image = v;
        }
        if let Some(v) = self.social_links {
            member.social_links = v;
        }
        if let Some(v) = self.active {
            member.active = v;
        }
        if let Some(v) = self.display_order {
            member.display_order = v;
        }
    }
}
