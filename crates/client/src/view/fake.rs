//! In-memory stand-in for the backend, used by the view tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use lightbox_core::schema::{Feedback, Reply, Staff};
use lightbox_core::{RecordId, Resource};

use crate::api::{FeedbackApi, ResourceApi, StaffApi};
use crate::error::{ClientError, ClientResult};

type Materialize<R> = fn(RecordId, &<R as Resource>::Draft) -> R;

pub(crate) struct FakeApi<R: Resource> {
    records: Mutex<Vec<R>>,
    fail_next: Mutex<Option<ClientError>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
    /// Held by a test to keep calls in flight.
    pub gate: tokio::sync::Mutex<()>,
    materialize: Materialize<R>,
}

impl<R: Resource> FakeApi<R> {
    pub fn new(records: Vec<R>, materialize: Materialize<R>) -> Self {
        Self {
            records: Mutex::new(records),
            fail_next: Mutex::new(None),
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            gate: tokio::sync::Mutex::new(()),
            materialize,
        }
    }

    pub fn fail_next(&self, err: ClientError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<R> {
        self.records.lock().unwrap().clone()
    }

    pub fn set_records(&self, records: Vec<R>) {
        *self.records.lock().unwrap() = records;
    }

    async fn enter(&self) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _gate = self.gate.lock().await;
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: &RecordId) -> ClientError {
        ClientError::NotFound {
            path: R::record_path(id),
        }
    }

    fn modify(&self, id: &RecordId, f: impl FnOnce(&mut R)) -> ClientResult<R> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        f(record);
        Ok(record.clone())
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for FakeApi<R> {
    async fn list(&self, _filter: &R::Filter) -> ClientResult<Vec<R>> {
        self.enter().await?;
        Ok(self.records())
    }

    async fn get_by_id(&self, id: &RecordId) -> ClientResult<R> {
        self.enter().await?;
        self.records()
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: &R::Draft) -> ClientResult<R> {
        self.enter().await?;
        let id = RecordId::new(format!("gen{}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        let record = (self.materialize)(id, draft);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &RecordId, patch: &R::Draft) -> ClientResult<R> {
        self.enter().await?;
        let materialize = self.materialize;
        self.modify(id, |record| *record = materialize(id.clone(), patch))
    }

    async fn remove(&self, id: &RecordId) -> ClientResult<()> {
        self.enter().await?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedbackApi for FakeApi<Feedback> {
    async fn add_reply(&self, feedback_id: &RecordId, reply: &Reply) -> ClientResult<Feedback> {
        self.enter().await?;
        self.modify(feedback_id, |feedback| feedback.replies.push(reply.clone()))
    }
}

#[async_trait]
impl StaffApi for FakeApi<Staff> {
    async fn set_availability(&self, staff_id: &RecordId, availability: bool) -> ClientResult<Staff> {
        self.enter().await?;
        self.modify(staff_id, |staff| staff.availability = availability)
    }
}

pub(crate) fn feedback(id: &str) -> Feedback {
    Feedback {
        id: id.into(),
        client_id: "c1".into(),
        booking_id: "b1".into(),
        message: format!("feedback {id}"),
        rating: 4,
        category: "service".into(),
        replies: Vec::new(),
        created_at: None,
    }
}

pub(crate) fn feedback_from_draft(id: RecordId, draft: &lightbox_core::schema::FeedbackDraft) -> Feedback {
    Feedback {
        id,
        client_id: draft.client_id.clone().unwrap_or_default(),
        booking_id: draft.booking_id.clone().unwrap_or_default(),
        message: draft.message.clone().unwrap_or_default(),
        rating: draft.rating.unwrap_or_default(),
        category: draft.category.clone().unwrap_or_default(),
        replies: Vec::new(),
        created_at: None,
    }
}

pub(crate) fn staff(id: &str, availability: bool) -> Staff {
    Staff {
        id: id.into(),
        name: format!("staff {id}"),
        email: format!("{id}@studio.io"),
        phone: None,
        experience: 3,
        hourly_rate: 40.0,
        specialization: None,
        availability,
    }
}

pub(crate) fn staff_from_draft(id: RecordId, draft: &lightbox_core::schema::StaffDraft) -> Staff {
    Staff {
        id,
        name: draft.name.clone().unwrap_or_default(),
        email: draft.email.clone().unwrap_or_default(),
        phone: draft.phone.clone(),
        experience: draft.experience.unwrap_or_default(),
        hourly_rate: draft.hourly_rate.unwrap_or_default(),
        specialization: draft.specialization.clone(),
        availability: draft.availability.unwrap_or_default(),
    }
}
