use serde::{Deserialize, Serialize};

use crate::record::id::RecordId;
use crate::record::validate::{require, ValidationError};
use crate::resource::{Draft, Resource};

/// Public showcase of the studio's work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// `Some(vec![])` clears the list; `None` leaves it untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Draft for PortfolioDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("category", &self.category)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Resource for Portfolio {
    const COLLECTION: &'static str = "portfolios";
    type Draft = PortfolioDraft;
    type Filter = PortfolioFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn to_draft(&self) -> PortfolioDraft {
        PortfolioDraft {
            title: Some(self.title.clone()),
            description: self.description.clone(),
            category: Some(self.category.clone()),
            images: Some(self.images.clone()),
            featured: Some(self.featured),
        }
    }
}
