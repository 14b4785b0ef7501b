//! TicketProvider trait definition.
//!
//! This module defines the [`TicketProvider`] trait, which is the core
//! abstraction for ticket-selling backends (RSVP, WooCommerce, etc.).
//!
//! Providers are responsible for:
//! - Publishing the storage constants the resolver probes (attendee kind,
//!   order and event metadata keys)
//! - Answering order-to-event and attendee-to-event lookups
//! - Listing the raw attendees of an event

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::raw::RawAttendee;

/// The registered ticket-provider variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Free RSVP tickets.
    Rsvp,
    /// The built-in commerce provider.
    Commerce,
    /// WooCommerce-backed tickets.
    #[serde(rename = "woocommerce")]
    WooCommerce,
    /// Easy Digital Downloads-backed tickets.
    Edd,
    /// A host-registered provider outside the canonical set.
    Other,
}

impl ProviderKind {
    /// Returns the stable identifier for this provider kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsvp => "rsvp",
            Self::Commerce => "commerce",
            Self::WooCommerce => "woocommerce",
            Self::Edd => "edd",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The core abstraction for ticket providers.
///
/// This trait defines the interface that all ticket backends must implement.
/// Providers publish the storage constants the resolver needs to recognize
/// and scan their records, and answer the lookups resolution is built from.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; one registry is typically shared
///   across request handlers
/// - All lookups are fail-soft: an unknown id yields `None` or an empty list,
///   never an error
/// - The metadata-key accessors return `None` when the provider does not
///   publish that key; the resolver also treats an empty string as missing
///
/// # Example Implementation
///
/// ```ignore
/// struct WooProvider {
///     store: Arc<dyn RecordStore>,
/// }
///
/// impl TicketProvider for WooProvider {
///     fn kind(&self) -> ProviderKind { ProviderKind::WooCommerce }
///
///     fn attendee_kind(&self) -> &str { "tribe_wooticket" }
///
///     fn attendee_order_key(&self) -> Option<&str> { Some("_tribe_wooticket_order") }
///
///     fn attendee_event_key(&self) -> Option<&str> { Some("_tribe_wooticket_event") }
///
///     fn event_for_order(&self, order_id: i64) -> Option<i64> {
///         // Look through the order's line items for a ticketed event
///     }
///     // ... other methods
/// }
/// ```
pub trait TicketProvider: Send + Sync {
    /// Returns which registered variant this provider is.
    fn kind(&self) -> ProviderKind;

    /// The storage kind marking a record as this provider's attendee.
    ///
    /// Detection compares this constant against the storage kind of the
    /// identifier under resolution.
    fn attendee_kind(&self) -> &str;

    /// The metadata key linking an attendee record to its parent order, or
    /// `None` when the provider does not publish one.
    fn attendee_order_key(&self) -> Option<&str>;

    /// The metadata key linking an attendee record to its event, or `None`
    /// when the provider does not publish one.
    fn attendee_event_key(&self) -> Option<&str>;

    /// The storage kind queried when scanning attendee records by order.
    ///
    /// Defaults to [`TicketProvider::attendee_kind`]. Providers that do not
    /// support order scans return `None`.
    fn attendee_object(&self) -> Option<&str> {
        Some(self.attendee_kind())
    }

    /// Returns the event a given order belongs to, or `None` when this
    /// provider does not recognize the order.
    fn event_for_order(&self, order_id: i64) -> Option<i64>;

    /// Returns the event a given attendee record belongs to, or `None` when
    /// this provider does not recognize the record.
    fn event_for_attendee(&self, attendee_id: i64) -> Option<i64>;

    /// Returns the raw attendee records of an event, in provider order.
    fn attendees_for_event(&self, event_id: i64) -> Vec<RawAttendee>;
}

/// A provider that answers from fixed tables.
///
/// This is useful for testing or as a placeholder while wiring up a host:
/// configure the storage constants and lookup tables up front and the
/// provider answers every resolver query from them. An instance with no
/// table entries recognizes nothing.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    kind: ProviderKind,
    attendee_kind: String,
    attendee_order_key: Option<String>,
    attendee_event_key: Option<String>,
    attendee_object: Option<String>,
    orders: HashMap<i64, i64>,
    attendee_events: HashMap<i64, i64>,
    attendees: HashMap<i64, Vec<RawAttendee>>,
}

impl StaticProvider {
    /// Creates a new static provider with the given kind and attendee
    /// storage kind.
    pub fn new(kind: ProviderKind, attendee_kind: impl Into<String>) -> Self {
        let attendee_kind = attendee_kind.into();
        Self {
            kind,
            attendee_object: Some(attendee_kind.clone()),
            attendee_kind,
            attendee_order_key: None,
            attendee_event_key: None,
            orders: HashMap::new(),
            attendee_events: HashMap::new(),
            attendees: HashMap::new(),
        }
    }

    /// Builder method to set the order metadata key.
    pub fn with_order_key(mut self, key: impl Into<String>) -> Self {
        self.attendee_order_key = Some(key.into());
        self
    }

    /// Builder method to set the event metadata key.
    pub fn with_event_key(mut self, key: impl Into<String>) -> Self {
        self.attendee_event_key = Some(key.into());
        self
    }

    /// Builder method to override the storage kind used for order scans.
    pub fn with_attendee_object(mut self, object: impl Into<String>) -> Self {
        self.attendee_object = Some(object.into());
        self
    }

    /// Builder method to drop the order-scan storage kind entirely.
    pub fn without_attendee_object(mut self) -> Self {
        self.attendee_object = None;
        self
    }

    /// Builder method to map an order to its event.
    pub fn with_order(mut self, order_id: i64, event_id: i64) -> Self {
        self.orders.insert(order_id, event_id);
        self
    }

    /// Builder method to map an attendee record to its event.
    pub fn with_attendee_event(mut self, attendee_id: i64, event_id: i64) -> Self {
        self.attendee_events.insert(attendee_id, event_id);
        self
    }

    /// Builder method to add a raw attendee under an event.
    pub fn with_attendee(mut self, event_id: i64, attendee: RawAttendee) -> Self {
        self.attendees.entry(event_id).or_default().push(attendee);
        self
    }
}

impl TicketProvider for StaticProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn attendee_kind(&self) -> &str {
        &self.attendee_kind
    }

    fn attendee_order_key(&self) -> Option<&str> {
        self.attendee_order_key.as_deref()
    }

    fn attendee_event_key(&self) -> Option<&str> {
        self.attendee_event_key.as_deref()
    }

    fn attendee_object(&self) -> Option<&str> {
        self.attendee_object.as_deref()
    }

    fn event_for_order(&self, order_id: i64) -> Option<i64> {
        self.orders.get(&order_id).copied()
    }

    fn event_for_attendee(&self, attendee_id: i64) -> Option<i64> {
        self.attendee_events.get(&attendee_id).copied()
    }

    fn attendees_for_event(&self, event_id: i64) -> Vec<RawAttendee> {
        self.attendees.get(&event_id).cloned().unwrap_or_default()
    }
}
