use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use lightbox_core::session::Session;

/// The signed-in user, shared by every clone of a client.
///
/// Expired sessions are dropped the first time they are read.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, session: Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Remove the session, returning it if one was active.
    pub fn clear(&self) -> Option<Session> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn current(&self) -> Option<Session> {
        let session = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        if session.is_expired_at(Utc::now()) {
            tracing::info!(user_id = %session.user_id, "session expired");
            self.clear();
            return None;
        }
        Some(session)
    }

    pub fn is_active(&self) -> bool {
        self.current().is_some()
    }

    pub(crate) fn bearer_token(&self) -> Option<String> {
        self.current().and_then(|s| s.token().map(str::to_string))
    }
}
