//! View models for resource pages.
//!
//! Every resource page is a [`ListView`] plus a [`FormView`] over the same
//! [`Resource`](lightbox_core::Resource), so they all load, mutate and fail
//! the same way.

pub mod form;
pub mod list;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use form::{FormMode, FormView, Submitted};
pub use list::{ListView, Reconcile};

/// Whether an operation's result reached its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The view was dropped while the call was in flight; nothing was applied.
    Detached,
}

pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
