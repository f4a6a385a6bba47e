pub mod id;
pub mod validate;

pub use id::RecordId;
pub use validate::ValidationError;
