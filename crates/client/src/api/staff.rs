use async_trait::async_trait;
use lightbox_core::schema::{AvailabilityUpdate, Staff};
use lightbox_core::{RecordId, Resource};
use reqwest::Method;

use super::StaffApi;
use crate::error::ClientResult;
use crate::http::StudioClient;

#[async_trait]
impl StaffApi for StudioClient {
    async fn set_availability(&self, staff_id: &RecordId, availability: bool) -> ClientResult<Staff> {
        let path = format!("{}/availability/{staff_id}", Staff::collection_path());
        let request = self
            .request(Method::PUT, &path)
            .json(&AvailabilityUpdate { availability });
        self.send_json(request, &path).await
    }
}
