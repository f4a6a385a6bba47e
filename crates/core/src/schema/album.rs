use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::id::RecordId;
use crate::record::validate::{require, ValidationError};
use crate::resource::{CreateBody, Draft, FormPart, Resource, Upload};

/// Multipart part name carrying each uploaded image.
pub const IMAGE_PART: &str = "images";

/// Photos delivered to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Image URLs in upload order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Files picked in the form. Only sent on create.
    #[serde(skip)]
    pub uploads: Vec<Upload>,
}

impl Draft for AlbumDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }

    fn create_body(&self) -> Result<CreateBody, serde_json::Error> {
        let text = [
            ("title", &self.title),
            ("description", &self.description),
            ("clientId", &self.client_id),
        ];
        let mut parts: Vec<FormPart> = text
            .into_iter()
            .filter_map(|(name, value)| {
                value.as_ref().map(|value| FormPart::Text {
                    name: name.to_string(),
                    value: value.clone(),
                })
            })
            .collect();
        parts.extend(self.uploads.iter().map(|file| FormPart::File {
            name: IMAGE_PART.to_string(),
            file: file.clone(),
        }));
        Ok(CreateBody::Multipart(parts))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Resource for Album {
    const COLLECTION: &'static str = "albums";
    type Draft = AlbumDraft;
    type Filter = AlbumFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn to_draft(&self) -> AlbumDraft {
        AlbumDraft {
            title: Some(self.title.clone()),
            description: self.description.clone(),
            client_id: self.client_id.clone(),
            uploads: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_is_multipart_with_one_part_per_image() {
        let draft = AlbumDraft {
            title: Some("Wedding".into()),
            client_id: Some("c1".into()),
            uploads: vec![
                Upload::new("a.jpg", "image/jpeg", vec![1, 2]),
                Upload::new("b.jpg", "image/jpeg", vec![3]),
            ],
            ..Default::default()
        };

        let CreateBody::Multipart(parts) = draft.create_body().unwrap() else {
            panic!("album create must be multipart");
        };
        assert_eq!(parts.len(), 4);
        assert_eq!(
            parts[0],
            FormPart::Text {
                name: "title".into(),
                value: "Wedding".into()
            }
        );
        let files: Vec<_> = parts
            .iter()
            .filter_map(|p| match p {
                FormPart::File { file, .. } => Some(file.file_name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(files, ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn uploads_never_reach_json() {
        let draft = AlbumDraft {
            title: Some("Wedding".into()),
            uploads: vec![Upload::new("a.jpg", "image/jpeg", vec![1])],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({ "title": "Wedding" })
        );
    }
}
