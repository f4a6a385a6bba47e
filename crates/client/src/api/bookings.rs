use async_trait::async_trait;
use lightbox_core::schema::{Booking, BookingConfig};
use lightbox_core::Resource;
use reqwest::Method;

use super::BookingApi;
use crate::error::ClientResult;
use crate::http::StudioClient;

fn config_path() -> String {
    format!("{}/config", Booking::collection_path())
}

#[async_trait]
impl BookingApi for StudioClient {
    async fn booking_config(&self) -> ClientResult<BookingConfig> {
        let path = config_path();
        self.send_json(self.request(Method::GET, &path), &path).await
    }

    async fn update_booking_config(&self, config: &BookingConfig) -> ClientResult<BookingConfig> {
        let path = config_path();
        let request = self.request(Method::PUT, &path).json(config);
        self.send_json(request, &path).await
    }
}
