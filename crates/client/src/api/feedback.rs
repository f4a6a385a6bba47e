use async_trait::async_trait;
use lightbox_core::schema::{Feedback, Reply};
use lightbox_core::{RecordId, Resource};
use reqwest::Method;

use super::FeedbackApi;
use crate::error::ClientResult;
use crate::http::StudioClient;

#[async_trait]
impl FeedbackApi for StudioClient {
    async fn add_reply(&self, feedback_id: &RecordId, reply: &Reply) -> ClientResult<Feedback> {
        reply.validate()?;
        let path = format!("{}/reply", Feedback::record_path(feedback_id));
        let request = self.request(Method::POST, &path).json(reply);
        self.send_json(request, &path).await
    }
}
