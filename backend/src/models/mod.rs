//! Domain models for the disk scheduler simulator

pub mod event;
pub mod request;

// Re-exports
pub use event::{Event, EventLog};
pub use request::{Request, RequestError, RequestStatus};
