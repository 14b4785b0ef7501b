//! TicketProvider trait and the order resolver.
//!
//! This crate provides the abstraction layer for ticket-selling backends:
//!
//! - [`TicketProvider`] - The core trait that all ticket backends implement
//! - [`ProviderRegistry`] - Ordered registration, which is also detection order
//! - [`RawAttendee`] - Provider-agnostic raw attendee data
//! - [`normalize_attendee`] - Pipeline to convert raw attendees to normalized form
//! - [`OrderResolver`] - Per-identifier detection and the order queries
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │  RSVP backend   │    │  Woo backend    │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          │    TicketProvider    │
//!          └──────────┬───────────┘
//!                     │ registration order
//!                     ▼
//!              ┌───────────────┐     kind_of / meta /
//!              │ OrderResolver │──▶  find_by_meta on the
//!              └───────┬───────┘     host's RecordStore
//!                      │
//!                      ▼
//!               ┌─────────────┐
//!               │ RawAttendee │
//!               └──────┬──────┘
//!                      │
//!                      ▼ normalize_attendee()
//!               ┌───────────────┐
//!               │ OrderAttendee │
//!               └───────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ticketscope_core::MemoryStore;
//! use ticketscope_providers::{OrderResolver, ProviderKind, ProviderRegistry, StaticProvider};
//!
//! let store = Arc::new(MemoryStore::new().with_record(77, "tribe_rsvp_attendees"));
//! let registry = ProviderRegistry::new().with_provider(Arc::new(StaticProvider::new(
//!     ProviderKind::Rsvp,
//!     "tribe_rsvp_attendees",
//! )));
//!
//! let resolver = OrderResolver::new(store, &registry, 77);
//! assert!(resolver.is_attendee());
//! assert_eq!(resolver.provider_kind(), Some(ProviderKind::Rsvp));
//! ```

pub mod normalize;
pub mod provider;
pub mod raw;
pub mod registry;
pub mod resolver;

// Re-export main types at crate root
pub use normalize::normalize_attendee;
pub use provider::{ProviderKind, StaticProvider, TicketProvider};
pub use raw::RawAttendee;
pub use registry::ProviderRegistry;
pub use resolver::{EventKeyProbe, OrderResolver, ResolverOptions};
