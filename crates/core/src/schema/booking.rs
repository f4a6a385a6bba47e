use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::record::id::RecordId;
use crate::record::validate::{require, ValidationError};
use crate::resource::{Draft, Resource};
use crate::schema::datetime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
    Refunded,
}

/// A studio session booked by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(with = "datetime")]
    pub date_time: NaiveDateTime,
    #[serde(default)]
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(
        default,
        with = "datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Draft for BookingDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("dateTime", &self.date_time)?;
        require("location", &self.location)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Resource for Booking {
    const COLLECTION: &'static str = "bookings";
    type Draft = BookingDraft;
    type Filter = BookingFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn to_draft(&self) -> BookingDraft {
        BookingDraft {
            client_id: self.client_id.clone(),
            package_id: self.package_id.clone(),
            date_time: Some(self.date_time),
            booking_status: Some(self.booking_status),
            payment_status: Some(self.payment_status),
            location: Some(self.location.clone()),
            notes: self.notes.clone(),
        }
    }
}

/// Studio-wide booking rules, read and written through `/api/bookings/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfig {
    /// `HH:MM`, local time.
    pub opening_time: String,
    pub closing_time: String,
    pub slot_minutes: u32,
    pub max_daily_bookings: u32,
    #[serde(default)]
    pub blackout_dates: Vec<chrono::NaiveDate>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            opening_time: "09:00".to_string(),
            closing_time: "18:00".to_string(),
            slot_minutes: 60,
            max_daily_bookings: 8,
            blackout_dates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_date_time_and_location() {
        let mut draft = BookingDraft::default();
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("dateTime"))
        );

        draft.date_time = datetime::parse("2025-01-01T10:00");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("location"))
        );

        draft.location = Some("Studio A".to_string());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_serializes_only_set_fields() {
        let draft = BookingDraft {
            date_time: datetime::parse("2025-01-01T10:00"),
            location: Some("Studio A".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "dateTime": "2025-01-01T10:00", "location": "Studio A" })
        );
    }

    #[test]
    fn booking_decodes_backend_shape() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": "b1",
            "dateTime": "2025-01-01T10:00:00",
            "bookingStatus": "confirmed",
            "paymentStatus": "paid",
            "location": "Studio A"
        }))
        .unwrap();
        assert_eq!(booking.id, "b1");
        assert_eq!(booking.booking_status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
        assert_eq!(booking.to_draft().location.as_deref(), Some("Studio A"));
    }
}
