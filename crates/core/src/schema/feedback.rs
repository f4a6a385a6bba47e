use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::id::RecordId;
use crate::record::validate::{require, within, ValidationError};
use crate::resource::{Draft, Resource};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Client feedback on a completed booking, with the staff replies it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: RecordId,
    pub client_id: String,
    pub booking_id: String,
    pub message: String,
    pub rating: u8,
    pub category: String,
    /// Oldest first, as returned by the backend.
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub staff_id: String,
    pub message: String,
    /// Set by the backend; absent on outgoing replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Reply {
    pub fn new(staff_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            message: message.into(),
            timestamp: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("staffId", self.staff_id.as_str())?;
        require("message", self.message.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Draft for FeedbackDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("clientId", &self.client_id)?;
        require("bookingId", &self.booking_id)?;
        require("message", &self.message)?;
        require("rating", &self.rating)?;
        within("rating", self.rating, MIN_RATING, MAX_RATING)?;
        require("category", &self.category)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Resource for Feedback {
    const COLLECTION: &'static str = "feedback";
    type Draft = FeedbackDraft;
    type Filter = FeedbackFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn to_draft(&self) -> FeedbackDraft {
        FeedbackDraft {
            client_id: Some(self.client_id.clone()),
            booking_id: Some(self.booking_id.clone()),
            message: Some(self.message.clone()),
            rating: Some(self.rating),
            category: Some(self.category.clone()),
        }
    }
}
