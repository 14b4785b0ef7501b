//! Attendee types for resolved ticket orders.
//!
//! This module provides the canonical attendee representation:
//! - [`OrderAttendee`]: A provider-agnostic attendee record
//! - [`TicketId`]: The printable ticket identifier with its order-id fallback
//! - [`UNIQUE_TICKET_META_KEY`]: The metadata key holding stored unique ids

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The metadata key under which a ticket's provider-independent unique id is
/// stored on the attendee record.
pub const UNIQUE_TICKET_META_KEY: &str = "_unique_id";

/// The identifier printed on a ticket.
///
/// Providers store a dedicated unique id on some attendee records but not on
/// others. When the stored id is absent the order id stands in, so consumers
/// always have something printable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketId {
    /// The stored unique ticket id.
    Unique(String),
    /// The order-id fallback for records without a stored unique id.
    Order(i64),
}

impl TicketId {
    /// Builds a ticket id from optional stored metadata.
    ///
    /// An absent or empty stored value falls back to the order id.
    pub fn from_meta(unique_id: Option<String>, order_id: i64) -> Self {
        match unique_id {
            Some(id) if !id.is_empty() => Self::Unique(id),
            _ => Self::Order(order_id),
        }
    }

    /// Returns the stored unique id, if this is not the order-id fallback.
    pub fn as_unique(&self) -> Option<&str> {
        match self {
            Self::Unique(id) => Some(id),
            Self::Order(_) => None,
        }
    }

    /// Returns true if this is a stored unique id rather than the fallback.
    pub fn is_unique(&self) -> bool {
        matches!(self, Self::Unique(_))
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique(id) => write!(f, "{}", id),
            Self::Order(id) => write!(f, "{}", id),
        }
    }
}

/// A normalized attendee record for one ticket in a resolved order.
///
/// This is the canonical representation of an attendee after resolution:
/// the provider's raw fields mapped onto one shape, plus the fields the
/// resolver fills in itself (event id, ticket id, the owning order).
/// Hosts feed these records to ticket displays, emails and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAttendee {
    /// The attendee record's storage identifier.
    pub attendee_id: i64,
    /// The event this ticket belongs to, when the provider knows it.
    pub event_id: Option<i64>,
    /// The ticket (product) name.
    pub ticket_name: String,
    /// The ticket holder's name.
    pub holder_name: String,
    /// The order this record was resolved for.
    pub order_id: i64,
    /// The printable ticket identifier.
    pub ticket_id: TicketId,
    /// The identifier encoded in the ticket's QR code.
    pub qr_ticket_id: i64,
    /// The ticket's security code.
    pub security_code: String,
    /// The purchaser's email address, when the provider supplies one.
    pub purchaser_email: Option<String>,
    /// The ticket product id, when the provider supplies one.
    pub product_id: Option<i64>,
    /// When the ticket was purchased, when the provider supplies it.
    pub purchase_time: Option<DateTime<Utc>>,
    /// Whether the attendee opted out of public listings.
    pub opted_out: Option<bool>,
    /// Whether the attendee has been checked in.
    pub checked_in: Option<bool>,
    /// Provider fields with no normalized counterpart.
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl OrderAttendee {
    /// Creates a new OrderAttendee with required fields.
    ///
    /// The QR ticket id starts out as the attendee id, which is what every
    /// known provider encodes.
    pub fn new(
        attendee_id: i64,
        order_id: i64,
        ticket_id: TicketId,
        ticket_name: impl Into<String>,
        holder_name: impl Into<String>,
        security_code: impl Into<String>,
    ) -> Self {
        Self {
            attendee_id,
            event_id: None,
            ticket_name: ticket_name.into(),
            holder_name: holder_name.into(),
            order_id,
            ticket_id,
            qr_ticket_id: attendee_id,
            security_code: security_code.into(),
            purchaser_email: None,
            product_id: None,
            purchase_time: None,
            opted_out: None,
            checked_in: None,
            extra: HashMap::new(),
        }
    }

    /// Builder method to set the event id.
    pub fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Builder method to set the purchaser email.
    pub fn with_purchaser_email(mut self, email: impl Into<String>) -> Self {
        self.purchaser_email = Some(email.into());
        self
    }

    /// Builder method to set the product id.
    pub fn with_product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Builder method to set the purchase time.
    pub fn with_purchase_time(mut self, time: DateTime<Utc>) -> Self {
        self.purchase_time = Some(time);
        self
    }

    /// Builder method to set the opt-out flag.
    pub fn with_opted_out(mut self, opted_out: bool) -> Self {
        self.opted_out = Some(opted_out);
        self
    }

    /// Builder method to set the check-in flag.
    pub fn with_checked_in(mut self, checked_in: bool) -> Self {
        self.checked_in = Some(checked_in);
        self
    }

    /// Builder method to add a provider-specific field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns true if the ticket id is a stored unique id rather than the
    /// order-id fallback.
    pub fn has_unique_ticket_id(&self) -> bool {
        self.ticket_id.is_unique()
    }
}
