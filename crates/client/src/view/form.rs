//! Form view model: a local draft that becomes a create or update call.

use std::future::Future;
use std::sync::{Arc, Mutex};

use lightbox_core::events::{ChangeKind, EventBus, StudioEvent};
use lightbox_core::{Draft, RecordId, Resource};

use super::lock;
use crate::api::ResourceApi;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// Outcome of [`FormView::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted<R> {
    Saved(R),
    /// Another submission was still running; nothing was sent.
    AlreadySubmitting,
}

#[derive(Debug)]
struct FormState<D> {
    draft: D,
    submitting: bool,
    closed: bool,
    last_error: Option<ClientError>,
}

pub struct FormView<R: Resource, A> {
    api: Arc<A>,
    mode: FormMode,
    bus: Option<EventBus>,
    state: Arc<Mutex<FormState<R::Draft>>>,
}

impl<R: Resource, A: ResourceApi<R>> FormView<R, A> {
    /// Empty form for a new record.
    pub fn create(api: Arc<A>) -> Self {
        Self::with_draft(api, FormMode::Create, R::Draft::default())
    }

    /// Form seeded from an existing record.
    pub fn edit(api: Arc<A>, record: &R) -> Self {
        Self::with_draft(api, FormMode::Edit(record.id().clone()), record.to_draft())
    }

    fn with_draft(api: Arc<A>, mode: FormMode, draft: R::Draft) -> Self {
        Self {
            api,
            mode,
            bus: None,
            state: Arc::new(Mutex::new(FormState {
                draft,
                submitting: false,
                closed: false,
                last_error: None,
            })),
        }
    }

    /// Publish a change event on `bus` after each successful submit.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> R::Draft {
        lock(&self.state).draft.clone()
    }

    /// Apply a field edit. Nothing is sent until [`submit`](Self::submit).
    pub fn edit_draft(&self, edit: impl FnOnce(&mut R::Draft)) {
        edit(&mut lock(&self.state).draft);
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.state).submitting
    }

    /// An edit form closes after its update succeeds.
    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    pub fn last_error(&self) -> Option<ClientError> {
        lock(&self.state).last_error.clone()
    }

    /// Validate the draft and, if it passes, send it.
    ///
    /// Validation runs now, against the draft as it is at the call. A failed
    /// check resolves to `ClientError::Validation` without any request. On a
    /// failed request the draft is left exactly as the user typed it.
    pub fn submit(&self) -> impl Future<Output = ClientResult<Submitted<R>>> + Send + 'static {
        let prepared = self.prepare();
        let api = Arc::clone(&self.api);
        let state = Arc::downgrade(&self.state);
        let mode = self.mode.clone();
        let bus = self.bus.clone();

        async move {
            let draft = match prepared {
                Prepared::Send(draft) => draft,
                Prepared::Skip => return Ok(Submitted::AlreadySubmitting),
                Prepared::Invalid(err) => return Err(err),
            };

            let (result, kind) = match &mode {
                FormMode::Create => (api.create(&draft).await, ChangeKind::Created),
                FormMode::Edit(id) => (api.update(id, &draft).await, ChangeKind::Updated),
            };

            let state = state.upgrade();
            match result {
                Ok(record) => {
                    if let Some(state) = &state {
                        let mut s = lock(state);
                        s.submitting = false;
                        s.last_error = None;
                        match kind {
                            ChangeKind::Created => s.draft = R::Draft::default(),
                            ChangeKind::Updated => s.closed = true,
                        }
                    }
                    if let Some(bus) = &bus {
                        match StudioEvent::changed(kind, &record) {
                            Ok(event) => {
                                bus.publish(event);
                            }
                            Err(err) => {
                                tracing::warn!(collection = R::COLLECTION, error = %err, "could not encode change event")
                            }
                        }
                    }
                    Ok(Submitted::Saved(record))
                }
                Err(err) => {
                    tracing::warn!(collection = R::COLLECTION, ?kind, error = %err, "form submit failed");
                    if let Some(state) = &state {
                        let mut s = lock(state);
                        s.submitting = false;
                        s.last_error = Some(err.clone());
                    }
                    Err(err)
                }
            }
        }
    }

    fn prepare(&self) -> Prepared<R::Draft> {
        let mut state = lock(&self.state);
        if state.submitting {
            return Prepared::Skip;
        }
        if let Err(err) = state.draft.validate() {
            let err = ClientError::from(err);
            state.last_error = Some(err.clone());
            return Prepared::Invalid(err);
        }
        state.submitting = true;
        state.last_error = None;
        Prepared::Send(state.draft.clone())
    }
}

enum Prepared<D> {
    Send(D),
    Skip,
    Invalid(ClientError),
}
