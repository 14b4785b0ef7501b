//! RawAttendee to OrderAttendee conversion.
//!
//! This module handles the transformation from provider-specific
//! [`RawAttendee`] data to the canonical [`OrderAttendee`] representation
//! the resolver hands back to hosts.
//!
//! The normalization process:
//! 1. Maps the provider's field names onto the normalized ones
//! 2. Picks the ticket id from the stored unique id with the order-id fallback
//! 3. Attaches the fields the resolver looked up itself (event id, order id)

use ticketscope_core::{OrderAttendee, TicketId};

use crate::raw::RawAttendee;

/// Converts a [`RawAttendee`] to an [`OrderAttendee`].
///
/// This is the single point where provider field conventions meet the
/// normalized record shape. It handles:
/// - Field mapping (`ticket` to `ticket_name`, `security` to `security_code`)
/// - Ticket-id selection from the stored unique id
/// - Attaching the resolver's own context
///
/// # Arguments
///
/// * `raw` - The raw attendee from a ticket provider
/// * `event_id` - The event the record belongs to, when known
/// * `unique_ticket_id` - The record's stored unique-id metadata, when present
/// * `order_id` - The order the resolution ran for
///
/// # Returns
///
/// A normalized attendee record. The raw `order_id` field does not survive:
/// the resolver's order id is authoritative on the normalized record, and an
/// absent or empty `unique_ticket_id` falls back to it for the ticket id.
pub fn normalize_attendee(
    raw: RawAttendee,
    event_id: Option<i64>,
    unique_ticket_id: Option<String>,
    order_id: i64,
) -> OrderAttendee {
    let ticket_id = TicketId::from_meta(unique_ticket_id, order_id);

    OrderAttendee {
        attendee_id: raw.attendee_id,
        event_id,
        ticket_name: raw.ticket,
        holder_name: raw.purchaser_name,
        order_id,
        ticket_id,
        qr_ticket_id: raw.attendee_id,
        security_code: raw.security,
        purchaser_email: raw.purchaser_email,
        product_id: raw.product_id,
        purchase_time: raw.purchase_time,
        opted_out: raw.optout,
        checked_in: raw.check_in,
        extra: raw.extra,
    }
}
