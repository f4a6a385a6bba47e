//! One function per backend operation.
//!
//! [`ResourceApi`] is the CRUD contract every collection shares; the
//! resource-specific traits add the extra actions a few collections expose.
//! [`StudioClient`](crate::StudioClient) implements all of them over HTTP.

mod auth;
mod bookings;
mod feedback;
mod resource;
mod staff;

use async_trait::async_trait;
use lightbox_core::schema::{Booking, BookingConfig, Feedback, Reply, Staff};
use lightbox_core::{RecordId, Resource};

use crate::error::ClientResult;

#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync + 'static {
    /// `GET /api/<r>` with `filter` as query parameters.
    async fn list(&self, filter: &R::Filter) -> ClientResult<Vec<R>>;

    /// `GET /api/<r>/{id}`.
    async fn get_by_id(&self, id: &RecordId) -> ClientResult<R>;

    /// `POST /api/<r>`. The backend assigns the identifier.
    async fn create(&self, draft: &R::Draft) -> ClientResult<R>;

    /// `PUT /api/<r>/{id}` with the fields set on `patch`. `patch` is a whole
    /// draft (see [`Resource::to_draft`]) and is checked like a create.
    async fn update(&self, id: &RecordId, patch: &R::Draft) -> ClientResult<R>;

    /// `DELETE /api/<r>/{id}`. Deleting twice reports `NotFound`.
    async fn remove(&self, id: &RecordId) -> ClientResult<()>;
}

#[async_trait]
pub trait FeedbackApi: ResourceApi<Feedback> {
    /// `POST /api/feedback/{id}/reply`; answers with the whole feedback record.
    async fn add_reply(&self, feedback_id: &RecordId, reply: &Reply) -> ClientResult<Feedback>;
}

#[async_trait]
pub trait StaffApi: ResourceApi<Staff> {
    /// `PUT /api/staff/availability/{id}`.
    async fn set_availability(&self, staff_id: &RecordId, availability: bool) -> ClientResult<Staff>;
}

#[async_trait]
pub trait BookingApi: ResourceApi<Booking> {
    /// `GET /api/bookings/config`.
    async fn booking_config(&self) -> ClientResult<BookingConfig>;

    /// `PUT /api/bookings/config`.
    async fn update_booking_config(&self, config: &BookingConfig) -> ClientResult<BookingConfig>;
}
