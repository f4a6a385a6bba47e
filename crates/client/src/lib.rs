//! HTTP client and view models for the Lightbox studio backend.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use lightbox_client::{ClientConfig, ListView, StudioClient};
//! use lightbox_core::schema::Booking;
//!
//! let client = Arc::new(StudioClient::new(&ClientConfig::from_env()?)?);
//! let bookings = ListView::<Booking, _>::new(client);
//! bookings.load().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod view;

pub use api::{BookingApi, FeedbackApi, ResourceApi, StaffApi};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::StudioClient;
pub use session::SessionHandle;
pub use view::{Completion, FormMode, FormView, ListView, Reconcile, Submitted};
