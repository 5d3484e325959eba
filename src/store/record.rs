//! Page record types
//!
//! A page is the one record type the data-access layer manages: a
//! slug-addressable entity owned by a user, with a closed status enumeration
//! and an optional set of display fields. Optional fields are modeled as
//! presence or absence and are omitted from payloads when unset, so the
//! remote store applies its own column defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// A page as stored remotely. The id and creation timestamp are generated
/// by the store, never by this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub owner_id: String,
    pub slug: String,
    pub status: PageStatus,
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

/// Insert payload for a new page
#[derive(Debug, Clone, Serialize)]
pub struct NewPage {
    pub owner_id: String,
    pub slug: String,
    pub status: PageStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

impl NewPage {
    /// New draft page with no display fields set
    pub fn new(owner_id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            slug: slug.into(),
            status: PageStatus::Draft,
            title: None,
            description: None,
            theme: None,
            accent_color: None,
        }
    }

    pub fn with_status(mut self, status: PageStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_accent_color(mut self, accent_color: impl Into<String>) -> Self {
        self.accent_color = Some(accent_color.into());
        self
    }
}
