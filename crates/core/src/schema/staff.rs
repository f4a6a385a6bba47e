use serde::{Deserialize, Serialize};

use crate::record::id::RecordId;
use crate::record::validate::{email, non_negative, require, ValidationError};
use crate::resource::{Draft, Resource};

/// A photographer, assistant or editor on the studio roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default)]
    pub availability: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

impl Draft for StaffDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        email("email", self.email.as_deref())?;
        non_negative("hourlyRate", self.hourly_rate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// Body of `PUT /api/staff/availability/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    pub availability: bool,
}

impl Resource for Staff {
    const COLLECTION: &'static str = "staff";
    type Draft = StaffDraft;
    type Filter = StaffFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn to_draft(&self) -> StaffDraft {
        StaffDraft {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: self.phone.clone(),
            experience: Some(self.experience),
            hourly_rate: Some(self.hourly_rate),
            specialization: self.specialization.clone(),
            availability: Some(self.availability),
        }
    }
}
