use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Validate, default_true, require};

/// Testimonial
///
/// A client quote with a star rating, stored in the `testimonials` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct Testimonial {
    pub id: Uuid,
    pub client_name: String,
    pub client_position: String,
    pub client_company: String,
    pub content: String,
    /// 1 to 5 inclusive.
    pub rating: i32,
    pub image: String,
    pub active: bool,
    pub featured: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

fn default_rating() -> i32 {
    5
}

fn check_rating(errors: &mut Vec<String>, rating: i32) {
    if !(1..=5).contains(&rating) {
        errors.push("rating must be between 1 and 5".to_string());
    }
}

/// CreateTestimonial
///
/// Input payload for `POST /api/testimonials`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTestimonial {
    pub client_name: String,
    #[serde(default)]
    pub client_position: String,
    #[serde(default)]
    pub client_company: String,
    pub content: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, rename = "order")]
    pub display_order: i32,
}

impl Validate for CreateTestimonial {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "client_name", &self.client_name);
        require(&mut errors, "content", &self.content);
        check_rating(&mut errors, self.rating);
        errors
    }
}

impl CreateTestimonial {
    pub fn into_testimonial(self, now: DateTime<Utc>) -> Testimonial {
        Testimonial {
            id: Uuid::new_v4(),
            client_name: self.client_name,
            client_position: self.client_position,
            client_company: self.client_company,
            content: self.content,
            rating: self.rating,
            image: self.image,
            active: self.active,
            featured: self.featured,
            display_order: self.display_order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// UpdateTestimonial
///
/// Partial update payload for `PUT /api/testimonials/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTestimonial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

impl Validate for UpdateTestimonial {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(name) = &self.client_name {
            require(&mut errors, "client_name", name);
        }
        if let Some(content) = &self.content {
            require(&mut errors, "content", content);
        }
        if let Some(rating) = self.rating {
            check_rating(&mut errors, rating);
        }
        errors
    }
}

impl UpdateTestimonial {
    pub fn apply(self, testimonial: &mut Testimonial) {
        if let Some(v) = self.client_name {
            testimonial.client_name = v;
        }
        if let Some(v) = self.client_position {
            testimonial.client_position = v;
        }
        if let Some(v) = self.client_company {
            testimonial.client_company = v;
        }
        if let Some(v) = self.content {
            testimonial.content = v;
        }
        if let Some(v) = self.rating {
            testimonial.rating = v;
        }
        if let Some(v) = self.image {
            testimonial.image = v;
        }
        if let Some(v) = self.active {
            testimonial.active = v;
        }
        if let Some(v) = self.featured {
            testimonial.featured = v;
        }
        if let Some(v) = self.display_order {
            testimonial.display_order = v;
        }
    }
}

/// TestimonialFilter
///
/// Query parameters accepted by `GET /api/testimonials`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TestimonialFilter {
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

impl TestimonialFilter {
    pub fn matches(&self, testimonial: &Testimonial) -> bool {
        self.featured.is_none_or(|f| testimonial.featured == f)
            && self.active.is_none_or(|a| testimonial.active == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_range_is_rejected() {
        let mut payload = CreateTestimonial {
            client_name: "Maya".into(),
            content: "Great partners".into(),
            rating: 6,
            ..Default::default()
        };
        assert_eq!(
            payload.validate(),
            vec!["rating must be between 1 and 5".to_string()]
        );

        payload.rating = 0;
        assert_eq!(payload.validate().len(), 1);

        payload.rating = 4;
        assert!(payload.validate().is_empty());
    }

    #[test]
    fn update_rating_is_range_checked() {
        let update = UpdateTestimonial {
            rating: Some(9),
            ..Default::default()
        };
        assert!(!update.validate().is_empty());
    }
}
