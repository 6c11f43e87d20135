use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Validate, require, require_email};

/// ConsultationStatus
///
/// Workflow position of a consultation request. Any status may be set from any other;
/// the back office moves requests freely between columns.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, sqlx::Type, Default, PartialEq, Eq,
    Hash, PartialOrd, Ord,
)]
#[ts(export)]
#[sqlx(type_name = "text", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationStatus {
    #[default]
    Pending,
    Contacted,
    InProgress,
    Completed,
    Cancelled,
}

impl ConsultationStatus {
    pub const ALL: [ConsultationStatus; 5] = [
        ConsultationStatus::Pending,
        ConsultationStatus::Contacted,
        ConsultationStatus::InProgress,
        ConsultationStatus::Completed,
        ConsultationStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Contacted => "contacted",
            ConsultationStatus::InProgress => "in-progress",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Cancelled => "cancelled",
        }
    }
}

/// ConsultationNote
///
/// A timestamped remark left by an admin while working a consultation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct ConsultationNote {
    pub id: Uuid,
    pub content: String,
    /// Display name of the admin who wrote the note.
    pub author: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Consultation
///
/// A consultation request submitted from the public site, stored in `consultations`.
/// Notes are kept inline as a JSONB array, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct Consultation {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// The service the visitor is interested in.
    pub service: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub message: String,
    pub status: ConsultationStatus,
    #[sqlx(json)]
    pub notes: Vec<ConsultationNote>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateConsultation
///
/// Public form payload for `POST /api/consultations`. New requests always start `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateConsultation {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub service: String,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    pub message: String,
}

impl Validate for CreateConsultation {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "service", &self.service);
        require(&mut errors, "message", &self.message);
        errors
    }
}

impl CreateConsultation {
    pub fn into_consultation(self, now: DateTime<Utc>) -> Consultation {
        Consultation {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email.trim().to_lowercase(),
            phone: self.phone,
            company: self.company,
            service: self.service,
            budget: self.budget,
            timeline: self.timeline,
            message: self.message,
            status: ConsultationStatus::Pending,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// UpdateConsultation
///
/// Admin edit payload for `PUT /api/consultations/{id}`. May also carry a status change.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateConsultation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConsultationStatus>,
}

impl Validate for UpdateConsultation {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require(&mut errors, "name", name);
        }
        if let Some(email) = &self.email {
            require_email(&mut errors, "email", email);
        }
        errors
    }
}

impl UpdateConsultation {
    pub fn apply(self, consultation: &mut Consultation) {
        if let Some(v) = self.name {
            consultation.name = v;
        }
        if let Some(v) = self.email {
            consultation.email = v.trim().to_lowercase();
        }
        if let Some(v) = self.phone {
            consultation.phone = Some(v);
        }
        if let Some(v) = self.company {
            consultation.company = Some(v);
        }
        if let Some(v) = self.service {
            consultation.service = v;
        }
        if let Some(v) = self.budget {
            consultation.budget = Some(v);
        }
        if let Some(v) = self.timeline {
            consultation.timeline = Some(v);
        }
        if let Some(v) = self.message {
            consultation.message = v;
        }
        if let Some(v) = self.status {
            consultation.status = v;
        }
    }
}

/// UpdateStatusRequest
///
/// Body of `PATCH /api/consultations/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateStatusRequest {
    pub status: ConsultationStatus,
}

/// CreateNoteRequest
///
/// Body of `POST /api/consultations/{id}/notes`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateNoteRequest {
    pub content: String,
}

impl Validate for CreateNoteRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, "content", &self.content);
        errors
    }
}

impl Consultation {
    /// Appends a note and bumps `updated_at`. Returns the note that was added.
    pub fn add_note(&mut self, content: String, author: String, now: DateTime<Utc>) -> &ConsultationNote {
        self.notes.push(ConsultationNote {
            id: Uuid::new_v4(),
            content,
            author,
            created_at: now,
        });
        self.updated_at = now;
        &self.notes[self.notes.len() - 1]
    }
}

/// ConsultationFilter
///
/// Query parameters accepted by `GET /api/consultations`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ConsultationFilter {
    #[param(inline)]
    pub status: Option<ConsultationStatus>,
}

impl ConsultationFilter {
    pub fn matches(&self, consultation: &Consultation) -> bool {
        self.status.is_none_or(|s| consultation.status == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted() -> Consultation {
        CreateConsultation {
            name: "Rosa".into(),
            email: " Rosa@Example.com ".into(),
            service: "Branding".into(),
            message: "We need a new identity".into(),
            ..Default::default()
        }
        .into_consultation(Utc::now())
    }

    #[test]
    fn new_consultations_start_pending_with_normalised_email() {
        let consultation = submitted();
        assert_eq!(consultation.status, ConsultationStatus::Pending);
        assert_eq!(consultation.email, "rosa@example.com");
        assert!(consultation.notes.is_empty());
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let mut consultation = submitted();
        for from in ConsultationStatus::ALL {
            for to in ConsultationStatus::ALL {
                consultation.status = from;
                UpdateConsultation {
                    status: Some(to),
                    ..Default::default()
                }
                .apply(&mut consultation);
                assert_eq!(consultation.status, to);
            }
        }
    }

    #[test]
    fn notes_are_appended_in_order() {
        let mut consultation = submitted();
        let first = Utc::now();
        consultation.add_note("Called, left voicemail".into(), "Admin".into(), first);
        let second = first + chrono::Duration::minutes(5);
        let note = consultation
            .add_note("Booked discovery call".into(), "Admin".into(), second)
            .clone();

        assert_eq!(consultation.notes.len(), 2);
        assert_eq!(consultation.notes[0].content, "Called, left voicemail");
        assert_eq!(note.content, "Booked discovery call");
        assert_eq!(consultation.updated_at, second);
    }

    #[test]
    fn status_serialises_in_kebab_case() {
        let json = serde_json::to_string(&ConsultationStatus::InProgress).unwrap();
        assert_eq!(json, r#""in-progress""#);
        assert_eq!(ConsultationStatus::InProgress.as_str(), "in-progress");
    }

    #[test]
    fn submission_requires_valid_email() {
        let payload = CreateConsultation {
            name: "Rosa".into(),
            email: "not-an-email".into(),
            service: "Web".into(),
            message: "Hi".into(),
            ..Default::default()
        };
        assert_eq!(
            payload.validate(),
            vec!["email must be a valid email address".to_string()]
        );
    }
}
