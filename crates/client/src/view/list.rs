//! List view model: an ordered local snapshot of one collection.

use std::future::Future;
use std::sync::{Arc, Mutex, Weak};

use lightbox_core::events::{ChangeKind, EventBus, StudioEvent};
use lightbox_core::schema::{Feedback, Reply, Staff};
use lightbox_core::{RecordId, Resource};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

use super::{lock, Completion};
use crate::api::{FeedbackApi, ResourceApi, StaffApi};
use crate::error::{ClientError, ClientResult};

/// How a list catches up after a change notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reconcile {
    /// Request the whole collection again.
    #[default]
    Refetch,
    /// Fold the changed record into the local snapshot by identifier.
    Merge,
}

#[derive(Debug)]
struct ListState<R> {
    items: Vec<R>,
    loaded: bool,
    load_error: Option<ClientError>,
    action_error: Option<ClientError>,
}

impl<R: Resource> ListState<R> {
    /// Replace every entry carrying `record`'s id, or append it.
    fn merge(&mut self, record: R) {
        let mut found = false;
        for item in self.items.iter_mut().filter(|i| i.id() == record.id()) {
            *item = record.clone();
            found = true;
        }
        if !found {
            self.items.push(record);
        }
    }

    fn remove(&mut self, id: &RecordId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        before - self.items.len()
    }
}

/// Owns the displayed items for one collection and the actions on them.
///
/// Operations return owned futures so a caller can keep several in flight.
/// Each applies its result to whatever the state is when it completes; once
/// the view is dropped, completions resolve to [`Completion::Detached`].
pub struct ListView<R: Resource, A> {
    api: Arc<A>,
    filter: R::Filter,
    reconcile: Reconcile,
    bus: Option<EventBus>,
    state: Arc<Mutex<ListState<R>>>,
    /// Dropped with the view; watchers hold the receiving side.
    alive: watch::Sender<()>,
}

/// What an in-flight operation keeps: never a strong reference to the state.
struct Handle<R: Resource, A> {
    api: Arc<A>,
    filter: R::Filter,
    bus: Option<EventBus>,
    state: Weak<Mutex<ListState<R>>>,
}

impl<R: Resource, A> Handle<R, A> {
    /// Tell other views about a successful mutation.
    fn announce(&self, event: impl FnOnce() -> Result<StudioEvent, serde_json::Error>) {
        let Some(bus) = &self.bus else {
            return;
        };
        match event() {
            Ok(event) => {
                bus.publish(event);
            }
            Err(err) => {
                tracing::warn!(collection = R::COLLECTION, error = %err, "could not encode change event")
            }
        }
    }

    fn apply(&self, f: impl FnOnce(&mut ListState<R>)) -> Completion {
        match self.state.upgrade() {
            Some(state) => {
                f(&mut lock(&state));
                Completion::Applied
            }
            None => Completion::Detached,
        }
    }

    /// Record a failed action, then hand the error back.
    fn action_failed(&self, action: &'static str, err: ClientError) -> ClientError {
        tracing::warn!(collection = R::COLLECTION, action, error = %err, "list action failed");
        self.apply(|s| s.action_error = Some(err.clone()));
        err
    }
}

impl<R: Resource, A: ResourceApi<R>> Handle<R, A> {
    async fn load(self) -> ClientResult<Completion> {
        match self.api.list(&self.filter).await {
            Ok(items) => Ok(self.apply(|s| {
                s.items = items;
                s.loaded = true;
                s.load_error = None;
            })),
            Err(err) => {
                tracing::warn!(collection = R::COLLECTION, error = %err, "list load failed");
                self.apply(|s| s.load_error = Some(err.clone()));
                Err(err)
            }
        }
    }

    async fn delete(self, id: RecordId) -> ClientResult<Completion> {
        match self.api.remove(&id).await {
            Ok(()) => {
                self.announce(|| Ok(StudioEvent::deleted::<R>(&id)));
                Ok(self.apply(|s| {
                    s.remove(&id);
                    s.action_error = None;
                }))
            }
            Err(err) => Err(self.action_failed("delete", err)),
        }
    }

    async fn on_event(self, event: StudioEvent, reconcile: Reconcile) -> ClientResult<Completion> {
        if !event.concerns::<R>() {
            return Ok(Completion::Applied);
        }
        match (event, reconcile) {
            (StudioEvent::Deleted(deleted), _) => Ok(self.apply(|s| {
                s.remove(&deleted.id);
            })),
            (StudioEvent::Changed(change), Reconcile::Merge) => {
                match serde_json::from_value::<R>(change.record) {
                    Ok(record) => Ok(self.apply(|s| s.merge(record))),
                    Err(err) => {
                        tracing::debug!(collection = R::COLLECTION, error = %err, "undecodable change, refetching");
                        self.load().await
                    }
                }
            }
            (StudioEvent::Changed(_), Reconcile::Refetch) => self.load().await,
        }
    }
}

impl<R: Resource, A: ResourceApi<R>> ListView<R, A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            filter: R::Filter::default(),
            reconcile: Reconcile::default(),
            bus: None,
            state: Arc::new(Mutex::new(ListState {
                items: Vec::new(),
                loaded: false,
                load_error: None,
                action_error: None,
            })),
            alive: watch::channel(()).0,
        }
    }

    pub fn with_filter(mut self, filter: R::Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_reconcile(mut self, reconcile: Reconcile) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Publish on `bus` after each successful delete or resource action.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    fn handle(&self) -> Handle<R, A> {
        Handle {
            api: Arc::clone(&self.api),
            filter: self.filter.clone(),
            bus: self.bus.clone(),
            state: Arc::downgrade(&self.state),
        }
    }

    /// Snapshot of the items in backend order.
    pub fn items(&self) -> Vec<R> {
        lock(&self.state).items.clone()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        lock(&self.state)
            .items
            .iter()
            .map(|item| item.id().clone())
            .collect()
    }

    pub fn find(&self, id: &RecordId) -> Option<R> {
        lock(&self.state)
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once any load has succeeded.
    pub fn is_loaded(&self) -> bool {
        lock(&self.state).loaded
    }

    pub fn load_error(&self) -> Option<ClientError> {
        lock(&self.state).load_error.clone()
    }

    pub fn action_error(&self) -> Option<ClientError> {
        lock(&self.state).action_error.clone()
    }

    pub fn clear_action_error(&self) {
        lock(&self.state).action_error = None;
    }

    /// Fetch the collection. Success replaces the items; failure sets
    /// `load_error` and keeps whatever was shown before.
    pub fn load(&self) -> impl Future<Output = ClientResult<Completion>> + Send + 'static {
        self.handle().load()
    }

    /// Delete on the backend, then drop every local entry with that id.
    pub fn delete(&self, id: RecordId) -> impl Future<Output = ClientResult<Completion>> + Send + 'static {
        self.handle().delete(id)
    }

    /// Fold a record returned by some other call into the snapshot.
    pub fn merge(&self, record: R) {
        lock(&self.state).merge(record);
    }

    /// Reconcile with a change notification according to the list's strategy.
    pub fn on_event(&self, event: StudioEvent) -> impl Future<Output = ClientResult<Completion>> + Send + 'static {
        self.handle().on_event(event, self.reconcile)
    }

    /// Follow `bus` until the view is dropped or the bus goes away.
    ///
    /// Meant to be spawned next to the view. A lagged receiver triggers a
    /// full refetch since notifications were lost.
    pub fn watch(&self, bus: &EventBus) -> impl Future<Output = ()> + Send + 'static {
        let mut events = bus.subscribe();
        let mut alive = self.alive.subscribe();
        let api = Arc::clone(&self.api);
        let filter = self.filter.clone();
        let state = Arc::downgrade(&self.state);
        let reconcile = self.reconcile;
        async move {
            loop {
                let received = tokio::select! {
                    received = events.recv() => received,
                    // Only resolves once the view, and with it the sender, is gone.
                    _ = alive.changed() => break,
                };
                let handle = Handle {
                    api: Arc::clone(&api),
                    filter: filter.clone(),
                    bus: None,
                    state: state.clone(),
                };
                let result = match received {
                    Ok(event) => handle.on_event(event, reconcile).await,
                    Err(RecvError::Lagged(missed)) => {
                        tracing::debug!(collection = R::COLLECTION, missed, "event bus lagged, refetching");
                        handle.load().await
                    }
                    Err(RecvError::Closed) => break,
                };
                // Failures were already recorded on the view state.
                if let Ok(Completion::Detached) = result {
                    break;
                }
                if state.strong_count() == 0 {
                    break;
                }
            }
        }
    }
}

impl<A: FeedbackApi> ListView<Feedback, A> {
    /// Post a reply and merge the updated feedback into the list.
    pub fn reply(
        &self,
        feedback_id: RecordId,
        reply: Reply,
    ) -> impl Future<Output = ClientResult<Completion>> + Send + 'static {
        let handle = self.handle();
        async move {
            match handle.api.add_reply(&feedback_id, &reply).await {
                Ok(feedback) => {
                    handle.announce(|| StudioEvent::changed(ChangeKind::Updated, &feedback));
                    Ok(handle.apply(|s| {
                        s.merge(feedback);
                        s.action_error = None;
                    }))
                }
                Err(err) => Err(handle.action_failed("reply", err)),
            }
        }
    }
}

impl<A: StaffApi> ListView<Staff, A> {
    pub fn set_availability(
        &self,
        staff_id: RecordId,
        availability: bool,
    ) -> impl Future<Output = ClientResult<Completion>> + Send + 'static {
        let handle = self.handle();
        async move {
            match handle.api.set_availability(&staff_id, availability).await {
                Ok(staff) => {
                    handle.announce(|| StudioEvent::changed(ChangeKind::Updated, &staff));
                    Ok(handle.apply(|s| {
                        s.merge(staff);
                        s.action_error = None;
                    }))
                }
                Err(err) => Err(handle.action_failed("set_availability", err)),
            }
        }
    }

    /// Flip the availability currently shown for `staff_id`.
    /// `None` when the id is not in the list.
    pub fn toggle_availability(
        &self,
        staff_id: RecordId,
    ) -> Option<impl Future<Output = ClientResult<Completion>> + Send + 'static> {
        let current = self.find(&staff_id)?.availability;
        Some(self.set_availability(staff_id, !current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fake::{feedback, feedback_from_draft, staff, staff_from_draft, FakeApi};

    fn feedback_api(ids: &[&str]) -> Arc<FakeApi<Feedback>> {
        Arc::new(FakeApi::new(
            ids.iter().map(|id| feedback(id)).collect(),
            feedback_from_draft,
        ))
    }

    fn network_down() -> ClientError {
        ClientError::Network("connection refused".into())
    }

    #[tokio::test]
    async fn load_keeps_backend_order() {
        let api = feedback_api(&["f3", "f1", "f2"]);
        let view = ListView::<Feedback, _>::new(api);

        assert_eq!(view.load().await.unwrap(), Completion::Applied);
        assert_eq!(view.ids(), ["f3", "f1", "f2"].map(RecordId::from));
        assert!(view.is_loaded());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_items() {
        let api = feedback_api(&["f1", "f2"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));
        view.load().await.unwrap();

        api.fail_next(network_down());
        let err = view.load().await.unwrap_err();

        assert_eq!(err, network_down());
        assert_eq!(view.load_error(), Some(network_down()));
        assert_eq!(view.len(), 2);

        view.load().await.unwrap();
        assert_eq!(view.load_error(), None);
    }

    #[tokio::test]
    async fn failed_first_load_leaves_list_empty() {
        let api = feedback_api(&["f1"]);
        api.fail_next(ClientError::Response {
            status: 503,
            message: None,
        });
        let view = ListView::<Feedback, _>::new(api);

        assert!(view.load().await.is_err());
        assert!(view.is_empty());
        assert!(!view.is_loaded());
        assert_eq!(view.load_error().and_then(|e| e.status()), Some(503));
    }

    #[tokio::test]
    async fn delete_removes_by_id_whatever_the_position() {
        let api = feedback_api(&["f1", "f2", "f3"]);
        let view = ListView::<Feedback, _>::new(api);
        view.load().await.unwrap();

        view.delete("f2".into()).await.unwrap();
        assert_eq!(view.ids(), ["f1", "f3"].map(RecordId::from));

        view.delete("f1".into()).await.unwrap();
        assert_eq!(view.ids(), [RecordId::from("f3")]);
    }

    #[tokio::test]
    async fn delete_drops_duplicate_entries_too() {
        let api = feedback_api(&["f1", "f2", "f1"]);
        let view = ListView::<Feedback, _>::new(api);
        view.load().await.unwrap();
        assert_eq!(view.len(), 3);

        view.delete("f1".into()).await.unwrap();
        assert_eq!(view.ids(), [RecordId::from("f2")]);
    }

    #[tokio::test]
    async fn failed_delete_leaves_items_and_reports() {
        let api = feedback_api(&["f1", "f2"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));
        view.load().await.unwrap();

        api.fail_next(network_down());
        assert!(view.delete("f1".into()).await.is_err());
        assert_eq!(view.len(), 2);
        assert_eq!(view.action_error(), Some(network_down()));

        // The record is already gone on the backend: second delete is NotFound.
        view.delete("f1".into()).await.unwrap();
        let err = view.delete("f1".into()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(view.ids(), [RecordId::from("f2")]);
    }

    #[tokio::test]
    async fn completion_after_drop_is_a_no_op() {
        let api = feedback_api(&["f1"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));

        let gate = api.gate.lock().await;
        let pending = tokio::spawn(view.load());
        drop(view);
        drop(gate);

        assert_eq!(pending.await.unwrap().unwrap(), Completion::Detached);
    }

    #[tokio::test]
    async fn load_completion_replaces_local_merges() {
        let api = feedback_api(&["f1", "f2"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));
        view.load().await.unwrap();

        let gate = api.gate.lock().await;
        let stale = tokio::spawn(view.load());
        tokio::task::yield_now().await;
        view.merge(feedback("f9"));
        drop(gate);

        stale.await.unwrap().unwrap();
        assert_eq!(view.ids(), ["f1", "f2"].map(RecordId::from));
    }

    #[tokio::test]
    async fn reply_appends_to_the_end() {
        let api = feedback_api(&["f1", "f2"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));
        view.load().await.unwrap();

        view.reply("f2".into(), Reply::new("s0", "First")).await.unwrap();
        view.reply("f2".into(), Reply::new("s1", "Thanks")).await.unwrap();

        let replies = view.find(&"f2".into()).unwrap().replies;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies.last().unwrap().message, "Thanks");
        assert!(view.find(&"f1".into()).unwrap().replies.is_empty());
    }

    #[tokio::test]
    async fn availability_toggle_reflects_backend() {
        let api = Arc::new(FakeApi::new(
            vec![staff("st1", true), staff("st2", true)],
            staff_from_draft,
        ));
        let view = ListView::<Staff, _>::new(Arc::clone(&api));
        view.load().await.unwrap();

        view.toggle_availability("st1".into()).unwrap().await.unwrap();

        assert!(!view.find(&"st1".into()).unwrap().availability);
        assert!(view.find(&"st2".into()).unwrap().availability);
        let stored = api.get_by_id(&"st1".into()).await.unwrap();
        assert!(!stored.availability);
        assert!(view.toggle_availability("missing".into()).is_none());
    }

    #[tokio::test]
    async fn failed_availability_keeps_previous_value() {
        let api = Arc::new(FakeApi::new(vec![staff("st1", true)], staff_from_draft));
        let view = ListView::<Staff, _>::new(Arc::clone(&api));
        view.load().await.unwrap();

        api.fail_next(network_down());
        assert!(view.set_availability("st1".into(), false).await.is_err());
        assert!(view.find(&"st1".into()).unwrap().availability);
    }

    #[tokio::test]
    async fn merge_strategy_folds_changes_without_a_request() {
        let api = feedback_api(&["f1"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api)).with_reconcile(Reconcile::Merge);
        view.load().await.unwrap();
        let calls = api.calls();

        let event = StudioEvent::changed(ChangeKind::Created, &feedback("f2")).unwrap();
        view.on_event(event).await.unwrap();

        assert_eq!(api.calls(), calls);
        assert_eq!(view.ids(), ["f1", "f2"].map(RecordId::from));
    }

    #[tokio::test]
    async fn refetch_strategy_requests_the_collection() {
        let api = feedback_api(&["f1"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));
        view.load().await.unwrap();

        api.set_records(vec![feedback("f1"), feedback("f5")]);
        let event = StudioEvent::changed(ChangeKind::Created, &feedback("f5")).unwrap();
        view.on_event(event).await.unwrap();

        assert_eq!(view.ids(), ["f1", "f5"].map(RecordId::from));
    }

    #[tokio::test]
    async fn events_for_other_collections_are_ignored() {
        let api = feedback_api(&["f1"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));
        view.load().await.unwrap();
        let calls = api.calls();

        view.on_event(StudioEvent::deleted::<Staff>(&"f1".into()))
            .await
            .unwrap();

        assert_eq!(api.calls(), calls);
        assert_eq!(view.len(), 1);
    }

    #[tokio::test]
    async fn watch_stops_once_the_view_is_dropped() {
        let bus = EventBus::new(8);
        let api = feedback_api(&["f1"]);
        let view = ListView::<Feedback, _>::new(Arc::clone(&api));
        let watcher = tokio::spawn(view.watch(&bus));
        tokio::task::yield_now().await;

        drop(view);

        // Nothing is ever published; the watcher must still finish.
        tokio::time::timeout(std::time::Duration::from_secs(1), watcher)
            .await
            .expect("watcher kept running after the view was dropped")
            .unwrap();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn delete_reaches_other_lists_on_the_bus() {
        let bus = EventBus::new(8);
        let api = feedback_api(&["f1", "f2"]);
        let editor = ListView::<Feedback, _>::new(Arc::clone(&api)).with_bus(bus.clone());
        let mirror = ListView::<Feedback, _>::new(Arc::clone(&api)).with_reconcile(Reconcile::Merge);
        editor.load().await.unwrap();
        mirror.load().await.unwrap();
        let mut events = bus.subscribe();

        editor.delete("f1".into()).await.unwrap();

        let event = events.recv().await.unwrap();
        assert!(matches!(event, StudioEvent::Deleted(ref d) if d.id == "f1"));
        let calls = api.calls();
        mirror.on_event(event).await.unwrap();
        assert_eq!(mirror.ids(), [RecordId::from("f2")]);
        assert_eq!(api.calls(), calls);
    }

    #[tokio::test]
    async fn watching_list_drops_a_row_deleted_elsewhere() {
        let bus = EventBus::new(8);
        let api = feedback_api(&["f1", "f2"]);
        let editor = ListView::<Feedback, _>::new(Arc::clone(&api)).with_bus(bus.clone());
        let mirror = ListView::<Feedback, _>::new(Arc::clone(&api)).with_reconcile(Reconcile::Merge);
        editor.load().await.unwrap();
        mirror.load().await.unwrap();
        let watcher = tokio::spawn(mirror.watch(&bus));
        tokio::task::yield_now().await;

        editor.delete("f1".into()).await.unwrap();
        for _ in 0..10 {
            if mirror.len() == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(mirror.ids(), [RecordId::from("f2")]);
        drop(mirror);
        watcher.await.unwrap();
    }

    #[tokio::test]
    async fn failed_delete_publishes_nothing() {
        let bus = EventBus::new(8);
        let api = feedback_api(&["f1"]);
        let editor = ListView::<Feedback, _>::new(Arc::clone(&api)).with_bus(bus.clone());
        let mut events = bus.subscribe();

        api.fail_next(network_down());
        assert!(editor.delete("f1".into()).await.is_err());

        assert!(events.try_recv().is_err());
    }
}
