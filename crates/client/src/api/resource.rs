use async_trait::async_trait;
use lightbox_core::{CreateBody, Draft, FormPart, RecordId, Resource};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::ResourceApi;
use crate::error::ClientResult;
use crate::http::StudioClient;

#[async_trait]
impl<R: Resource> ResourceApi<R> for StudioClient {
    async fn list(&self, filter: &R::Filter) -> ClientResult<Vec<R>> {
        let path = R::collection_path();
        let request = self.request(Method::GET, &path).query(filter);
        self.send_json(request, &path).await
    }

    async fn get_by_id(&self, id: &RecordId) -> ClientResult<R> {
        let path = R::record_path(id);
        self.send_json(self.request(Method::GET, &path), &path).await
    }

    async fn create(&self, draft: &R::Draft) -> ClientResult<R> {
        draft.validate()?;
        let path = R::collection_path();
        let request = self.request(Method::POST, &path);
        let request = match draft.create_body()? {
            CreateBody::Json(body) => request.json(&body),
            CreateBody::Multipart(parts) => request.multipart(multipart_form(parts)?),
        };
        self.send_json(request, &path).await
    }

    async fn update(&self, id: &RecordId, patch: &R::Draft) -> ClientResult<R> {
        patch.validate()?;
        let path = R::record_path(id);
        let request = self.request(Method::PUT, &path).json(patch);
        self.send_json(request, &path).await
    }

    async fn remove(&self, id: &RecordId) -> ClientResult<()> {
        let path = R::record_path(id);
        self.send_empty(self.request(Method::DELETE, &path), &path)
            .await
    }
}

fn multipart_form(parts: Vec<FormPart>) -> ClientResult<Form> {
    parts.into_iter().try_fold(Form::new(), |form, part| {
        Ok(match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, file } => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)?;
                form.part(name, part)
            }
        })
    })
}
