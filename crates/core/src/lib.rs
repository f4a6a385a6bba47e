//! Shared types for the Lightbox studio client: resource schemas, drafts,
//! validation, sessions and change events.

pub mod events;
pub mod record;
pub mod resource;
pub mod schema;
pub mod session;

pub use record::{RecordId, ValidationError};
pub use resource::{CreateBody, Draft, FormPart, NoFilter, Resource, Upload};
