//! Raw attendee type from ticket providers.
//!
//! This module defines [`RawAttendee`], a provider-agnostic representation of
//! attendee data as it comes from a provider (RSVP, WooCommerce, etc.) before
//! normalization.
//!
//! The raw attendee preserves the fields providers actually report and is
//! then converted to an [`OrderAttendee`] for use in the rest of the system.
//!
//! [`OrderAttendee`]: ticketscope_core::OrderAttendee

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw attendee record from a ticket provider.
///
/// This struct contains the fields that might be available from ticket
/// providers. Not all fields will be populated by all providers; only the
/// record id, ticket name, purchaser name and security code are universal.
///
/// # Provider-specific notes
///
/// - **RSVP**: tickets are free and have no true parent order; `order_id`
///   is usually absent or carries the attendee's own id.
/// - **Commerce providers**: `order_id` carries the parent order id as the
///   provider stores it, which may be text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttendee {
    // === Required fields ===
    /// The attendee record's storage identifier.
    pub attendee_id: i64,

    /// The ticket (product) name.
    pub ticket: String,

    /// The purchaser's name.
    pub purchaser_name: String,

    /// The ticket security code.
    pub security: String,

    // === Common fields ===
    /// The parent order reference, verbatim from the provider.
    pub order_id: Option<String>,

    /// The purchaser's email address.
    pub purchaser_email: Option<String>,

    /// The ticket product id.
    pub product_id: Option<i64>,

    /// When the ticket was purchased.
    pub purchase_time: Option<DateTime<Utc>>,

    /// Whether the attendee opted out of public attendee listings.
    pub optout: Option<bool>,

    /// Whether the attendee has been checked in.
    pub check_in: Option<bool>,

    // === Provider-specific ===
    /// Additional provider-specific data stored as key-value pairs.
    /// This allows preserving data that doesn't map to standard fields.
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl RawAttendee {
    /// Creates a new raw attendee with the minimum required fields.
    pub fn new(
        attendee_id: i64,
        ticket: impl Into<String>,
        purchaser_name: impl Into<String>,
        security: impl Into<String>,
    ) -> Self {
        Self {
            attendee_id,
            ticket: ticket.into(),
            purchaser_name: purchaser_name.into(),
            security: security.into(),
            order_id: None,
            purchaser_email: None,
            product_id: None,
            purchase_time: None,
            optout: None,
            check_in: None,
            extra: HashMap::new(),
        }
    }

    /// Builder method to set the parent order reference.
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
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
    pub fn with_optout(mut self, optout: bool) -> Self {
        self.optout = Some(optout);
        self
    }

    /// Builder method to set the check-in flag.
    pub fn with_check_in(mut self, check_in: bool) -> Self {
        self.check_in = Some(check_in);
        self
    }

    /// Builder method to add a provider-specific field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
