//! Core types: attendees, ticket ids, identifier coercion, record storage

pub mod attendee;
pub mod id;
pub mod storage;
pub mod tracing;

pub use attendee::{OrderAttendee, TicketId, UNIQUE_TICKET_META_KEY};
pub use id::coerce_id;
pub use storage::{MemoryStore, RecordStore};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
