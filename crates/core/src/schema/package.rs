use serde::{Deserialize, Serialize};

use crate::record::id::RecordId;
use crate::record::validate::{non_negative, require, ValidationError};
use crate::resource::{Draft, NoFilter, Resource};

/// A priced bundle of services offered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// `Some(vec![])` clears the list; `None` leaves it untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
}

impl Draft for PackageDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("price", &self.price)?;
        non_negative("price", self.price)
    }
}

impl Resource for Package {
    const COLLECTION: &'static str = "packages";
    type Draft = PackageDraft;
    type Filter = NoFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn to_draft(&self) -> PackageDraft {
        PackageDraft {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            price: Some(self.price),
            duration_minutes: self.duration_minutes,
            services: Some(self.services.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_keep_backend_order() {
        let package: Package = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Portrait",
            "price": 120.0,
            "services": ["retouch", "prints", "album"]
        }))
        .unwrap();
        assert_eq!(package.services, ["retouch", "prints", "album"]);
        assert_eq!(package.to_draft().services.as_ref(), Some(&package.services));
    }

    #[test]
    fn cleared_services_are_still_sent() {
        let mut draft = PackageDraft {
            name: Some("Portrait".into()),
            price: Some(120.0),
            services: Some(vec!["retouch".into()]),
            ..Default::default()
        };
        draft.services = Some(Vec::new());
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["services"], serde_json::json!([]));

        draft.services = None;
        let body = serde_json::to_value(&draft).unwrap();
        assert!(body.get("services").is_none());
    }

    #[test]
    fn price_is_required_and_non_negative() {
        let mut draft = PackageDraft {
            name: Some("Portrait".into()),
            ..Default::default()
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingField("price")));
        draft.price = Some(-5.0);
        assert!(draft.validate().is_err());
        draft.price = Some(0.0);
        assert!(draft.validate().is_ok());
    }
}
