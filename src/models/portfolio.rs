use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Validate, default_true, require};

/// PortfolioItem
///
/// A showcased piece of client work, stored in the `portfolio_items` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Public URL returned by the media host. Empty until an image is attached.
    pub image: String,
    pub category: String,
    pub technologies: Vec<String>,
    pub tags: Vec<String>,
    pub year: Option<i32>,
    /// External link to the live project or case study.
    pub link: Option<String>,
    pub featured: bool,
    pub active: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreatePortfolioItem
///
/// Input payload for `POST /api/portfolio`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreatePortfolioItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Validate for CreatePortfolioItem {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "description", &self.description);
        require(&mut errors, "category", &self.category);
        if let Some(year) = self.year {
            if !(1900..=2200).contains(&year) {
                errors.push("year is out of range".to_string());
            }
        }
        errors
    }
}

impl CreatePortfolioItem {
    pub fn into_item(self, now: DateTime<Utc>) -> PortfolioItem {
        PortfolioItem {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            image: self.image,
            category: self.category,
            technologies: self.technologies,
            tags: self.tags,
            year: self.year,
            link: self.link,
            featured: self.featured,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// UpdatePortfolioItem
///
/// Partial update payload for `PUT /api/portfolio/{id}`. Absent fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdatePortfolioItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Validate for UpdatePortfolioItem {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require(&mut errors, "title", title);
        }
        if let Some(category) = &self.category {
            require(&mut errors, "category", category);
        }
        errors
    }
}

impl UpdatePortfolioItem {
    pub fn apply(self, item: &mut PortfolioItem) {
        if let Some(v) = self.title {
            item.title = v;
        }
        if let Some(v) = self.description {
            item.description = v;
        }
        if let Some(v) = self.image {
            item.image = v;
        }
        if let Some(v) = self.category {
            item.category = v;
        }
        if let Some(v) = self.technologies {
            item.technologies = v;
        }
        if let Some(v) = self.tags {
            item.tags = v;
        }
        if let Some(v) = self.year {
            item.year = Some(v);
        }
        if let Some(v) = self.link {
            item.link = Some(v);
        }
        if let Some(v) = self.featured {
            item.featured = v;
        }
        if let Some(v) = self.active {
            item.active = v;
        }
    }
}

/// PortfolioFilter
///
/// Query parameters accepted by `GET /api/portfolio`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PortfolioFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

impl PortfolioFilter {
    pub fn matches(&self, item: &PortfolioItem) -> bool {
        self.category
            .as_ref()
            .is_none_or(|c| item.category.eq_ignore_ascii_case(c))
            && self.featured.is_none_or(|f| item.featured == f)
            && self.active.is_none_or(|a| item.active == a)
    }
}
