//! Order resolution across ticket providers.
//!
//! This module defines [`OrderResolver`], the per-request facade that answers
//! three questions about one order or attendee identifier: which registered
//! provider created it, which events its tickets belong to, and what its
//! attendees look like in the normalized record shape.
//!
//! A resolver is constructed per identifier. Provider detection runs during
//! construction; the query methods only read the detected state, so they can
//! be called in any order and any number of times. Every failure path is
//! soft: queries yield empty results, never errors.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ticketscope_core::{OrderAttendee, RecordStore, UNIQUE_TICKET_META_KEY, coerce_id};

use crate::normalize::normalize_attendee;
use crate::provider::{ProviderKind, TicketProvider};
use crate::raw::RawAttendee;
use crate::registry::ProviderRegistry;

/// Which provider key gates the order-mode event scan.
///
/// Before querying anything, the scan checks three provider constants: the
/// order key, an event key and the attendee storage kind. Only availability
/// is checked. The key's value is never read, because the scan gets its
/// event ids from per-record lookups, so the probe decides whether the scan
/// runs, not what it finds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKeyProbe {
    /// Check the order key a second time. This is the default and preserves
    /// the scan behavior existing ticket hosts rely on.
    #[default]
    OrderKey,
    /// Check the event key itself.
    EventKey,
}

/// Options controlling resolution behavior.
///
/// Options do not influence provider detection, so they can be attached
/// after construction without changing already-detected state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Which provider key gates the order-mode event scan.
    pub event_key_probe: EventKeyProbe,
    /// Keep only the first occurrence of each attendee record across events.
    ///
    /// Off by default: a record legitimately listed under several of the
    /// order's events appears once per event.
    pub dedupe_attendees: bool,
}

impl ResolverOptions {
    /// Creates options with the default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the event-key probe.
    pub fn with_event_key_probe(mut self, probe: EventKeyProbe) -> Self {
        self.event_key_probe = probe;
        self
    }

    /// Builder method to enable attendee de-duplication.
    pub fn with_dedupe_attendees(mut self, dedupe: bool) -> Self {
        self.dedupe_attendees = dedupe;
        self
    }
}

/// Resolves one order or attendee identifier against the registered
/// ticket providers.
///
/// The identifier is called the order id throughout, even when detection
/// finds it names an attendee record: callers pass in whatever id they have,
/// and [`OrderResolver::is_attendee`] reports what it turned out to be.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use ticketscope_core::MemoryStore;
/// use ticketscope_providers::{
///     OrderResolver, ProviderKind, ProviderRegistry, StaticProvider,
/// };
///
/// let store = Arc::new(
///     MemoryStore::new()
///         .with_record(500, "shop_order")
///         .with_record(900, "tribe_attendee")
///         .with_meta(900, "_tribe_order_id", "500"),
/// );
/// let registry = ProviderRegistry::new().with_provider(Arc::new(
///     StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
///         .with_order_key("_tribe_order_id")
///         .with_event_key("_tribe_event_id")
///         .with_order(500, 42)
///         .with_attendee_event(900, 42),
/// ));
///
/// let resolver = OrderResolver::new(store, &registry, 500);
/// assert!(!resolver.is_attendee());
/// assert_eq!(resolver.provider_kind(), Some(ProviderKind::Commerce));
/// assert_eq!(resolver.event_ids().into_iter().collect::<Vec<_>>(), vec![42]);
/// ```
pub struct OrderResolver {
    order_id: i64,
    is_attendee: bool,
    store: Arc<dyn RecordStore>,
    provider: Option<Arc<dyn TicketProvider>>,
    options: ResolverOptions,
}

impl OrderResolver {
    /// Creates a resolver for `order_id` and runs provider detection.
    ///
    /// Detection scans the registry in registration order. A provider whose
    /// attendee storage kind equals the record's kind claims the identifier
    /// as an attendee record; otherwise a provider whose order-to-event
    /// lookup answers, or whose storage kind matched, claims it as an order.
    /// The first match wins. No provider matching is not an error: the
    /// resolver then answers every query with empty results.
    pub fn new(store: Arc<dyn RecordStore>, registry: &ProviderRegistry, order_id: i64) -> Self {
        let record_kind = store.kind_of(order_id);
        let mut provider = None;
        let mut is_attendee = false;

        for candidate in registry.iter() {
            let kind_matches = record_kind.as_deref() == Some(candidate.attendee_kind());

            if kind_matches {
                debug!(
                    id = order_id,
                    provider = %candidate.kind(),
                    "Identifier detected as attendee record"
                );
                provider = Some(candidate.clone());
                is_attendee = true;
                break;
            }

            if candidate.event_for_order(order_id).is_some() || kind_matches {
                debug!(
                    id = order_id,
                    provider = %candidate.kind(),
                    "Identifier detected as order"
                );
                provider = Some(candidate.clone());
                break;
            }
        }

        if provider.is_none() {
            debug!(id = order_id, "No provider claimed identifier");
        }

        Self {
            order_id,
            is_attendee,
            store,
            provider,
            options: ResolverOptions::default(),
        }
    }

    /// Creates a resolver from a textual identifier.
    ///
    /// The text is coerced with [`coerce_id`], so malformed input resolves
    /// as identifier 0 rather than failing.
    pub fn from_text(store: Arc<dyn RecordStore>, registry: &ProviderRegistry, text: &str) -> Self {
        Self::new(store, registry, coerce_id(text))
    }

    /// Builder method to replace the resolution options.
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// The identifier this resolver was constructed with.
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    /// Returns true when the identifier named an attendee record rather
    /// than an order.
    pub fn is_attendee(&self) -> bool {
        self.is_attendee
    }

    /// The kind of the provider that claimed the identifier.
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        self.provider.as_ref().map(|provider| provider.kind())
    }

    /// A handle to the provider that claimed the identifier, for
    /// provider-specific follow-up queries.
    pub fn provider(&self) -> Option<&Arc<dyn TicketProvider>> {
        self.provider.as_ref()
    }

    /// The events this order's tickets belong to, ascending and without
    /// duplicates.
    ///
    /// In attendee mode the events come straight off the record's event
    /// metadata. In order mode the provider's attendee records are scanned
    /// by order and each one's event is looked up. Either way, missing
    /// provider configuration yields the empty set.
    pub fn event_ids(&self) -> BTreeSet<i64> {
        let Some(provider) = self.provider.as_ref() else {
            return BTreeSet::new();
        };

        if self.is_attendee {
            self.attendee_event_ids(provider.as_ref())
        } else {
            self.order_event_ids(provider.as_ref())
        }
    }

    /// The normalized attendees of this order, grouped by ascending event.
    ///
    /// In order mode this keeps the records whose provider-supplied order
    /// reference coerces to this order id; in attendee mode only the record
    /// itself survives. Each kept record gets its stored unique ticket id
    /// (with the order-id fallback) and its own event lookup. A record
    /// listed under several events is kept once per event unless
    /// [`ResolverOptions::dedupe_attendees`] is set.
    pub fn attendees(&self) -> Vec<OrderAttendee> {
        let Some(provider) = self.provider.as_ref() else {
            return Vec::new();
        };

        let mut raw_records = Vec::new();
        for event_id in self.event_ids() {
            raw_records.extend(provider.attendees_for_event(event_id));
        }

        let mut seen = HashSet::new();
        let mut attendees = Vec::new();
        for raw in raw_records {
            if !self.record_matches(&raw) {
                continue;
            }
            if self.options.dedupe_attendees && !seen.insert(raw.attendee_id) {
                continue;
            }

            let unique_id = self.store.meta(raw.attendee_id, UNIQUE_TICKET_META_KEY);
            let event_id = provider.event_for_attendee(raw.attendee_id);
            attendees.push(normalize_attendee(raw, event_id, unique_id, self.order_id));
        }

        debug!(
            order_id = self.order_id,
            count = attendees.len(),
            "Normalized attendees for order"
        );

        attendees
    }

    /// Attendee mode: the record's own event metadata, coerced and deduped.
    fn attendee_event_ids(&self, provider: &dyn TicketProvider) -> BTreeSet<i64> {
        let Some(event_key) = require_key(provider.attendee_event_key()) else {
            warn!(
                id = self.order_id,
                provider = %provider.kind(),
                "Attendee event key not published"
            );
            return BTreeSet::new();
        };

        self.store
            .meta_all(self.order_id, event_key)
            .iter()
            .map(|value| coerce_id(value))
            .collect()
    }

    /// Order mode: scan the provider's attendee records by order and look up
    /// each record's event.
    fn order_event_ids(&self, provider: &dyn TicketProvider) -> BTreeSet<i64> {
        let Some(order_key) = require_key(provider.attendee_order_key()) else {
            debug!(
                id = self.order_id,
                provider = %provider.kind(),
                "Order scan skipped, order key not published"
            );
            return BTreeSet::new();
        };

        let probed = match self.options.event_key_probe {
            EventKeyProbe::OrderKey => provider.attendee_order_key(),
            EventKeyProbe::EventKey => provider.attendee_event_key(),
        };
        if require_key(probed).is_none() {
            debug!(
                id = self.order_id,
                provider = %provider.kind(),
                probe = ?self.options.event_key_probe,
                "Order scan skipped, event key probe failed"
            );
            return BTreeSet::new();
        }

        let Some(object) = require_key(provider.attendee_object()) else {
            debug!(
                id = self.order_id,
                provider = %provider.kind(),
                "Order scan skipped, attendee object not published"
            );
            return BTreeSet::new();
        };

        let records = self
            .store
            .find_by_meta(object, order_key, &self.order_id.to_string());
        debug!(
            order_id = self.order_id,
            records = records.len(),
            "Scanned attendee records for order"
        );

        records
            .into_iter()
            .filter_map(|attendee_id| provider.event_for_attendee(attendee_id))
            .collect()
    }

    /// Applies the mode filter to one raw record.
    fn record_matches(&self, raw: &RawAttendee) -> bool {
        if self.is_attendee {
            raw.attendee_id == self.order_id
        } else {
            raw.order_id
                .as_deref()
                .is_some_and(|order| coerce_id(order) == self.order_id)
        }
    }
}

impl fmt::Debug for OrderResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderResolver")
            .field("order_id", &self.order_id)
            .field("is_attendee", &self.is_attendee)
            .field("provider", &self.provider_kind())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Treats empty-string provider configuration as missing.
fn require_key(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;
    use ticketscope_core::{MemoryStore, TicketId};

    fn rsvp_provider() -> StaticProvider {
        StaticProvider::new(ProviderKind::Rsvp, "tribe_rsvp_attendees")
            .with_event_key("_tribe_rsvp_event")
            .with_attendee_event(77, 42)
            .with_attendee(42, RawAttendee::new(77, "Free Entry", "Sam Lee", "xyz789"))
            .with_attendee(42, RawAttendee::new(78, "Free Entry", "Kim Park", "uvw456"))
    }

    fn commerce_provider() -> StaticProvider {
        StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
            .with_order_key("_tribe_order_id")
            .with_event_key("_tribe_event_id")
            .with_order(500, 42)
            .with_attendee_event(900, 42)
            .with_attendee_event(901, 42)
            .with_attendee(
                42,
                RawAttendee::new(900, "General Admission", "Jane Doe", "abc123")
                    .with_order_id("500")
                    .with_purchaser_email("jane@example.com"),
            )
            .with_attendee(
                42,
                RawAttendee::new(901, "VIP", "John Roe", "def456").with_order_id("500"),
            )
            .with_attendee(
                42,
                RawAttendee::new(950, "General Admission", "Ann Smith", "ghi789")
                    .with_order_id("777"),
            )
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_record(500, "shop_order")
            .with_record(900, "tribe_attendee")
            .with_meta(900, "_tribe_order_id", "500")
            .with_meta(900, UNIQUE_TICKET_META_KEY, "TKT-59f3a8")
            .with_record(901, "tribe_attendee")
            .with_meta(901, "_tribe_order_id", "500")
            .with_record(77, "tribe_rsvp_attendees")
            .with_meta(77, "_tribe_rsvp_event", "42")
    }

    fn sample_registry() -> ProviderRegistry {
        ProviderRegistry::new()
            .with_provider(Arc::new(rsvp_provider()))
            .with_provider(Arc::new(commerce_provider()))
    }

    fn resolve(order_id: i64) -> OrderResolver {
        OrderResolver::new(Arc::new(sample_store()), &sample_registry(), order_id)
    }

    fn event_vec(resolver: &OrderResolver) -> Vec<i64> {
        resolver.event_ids().into_iter().collect()
    }

    mod detection {
        use super::*;

        #[test]
        fn commerce_order_detected() {
            let resolver = resolve(500);

            assert_eq!(resolver.order_id(), 500);
            assert!(!resolver.is_attendee());
            assert_eq!(resolver.provider_kind(), Some(ProviderKind::Commerce));
        }

        #[test]
        fn rsvp_attendee_detected() {
            let resolver = resolve(77);

            assert!(resolver.is_attendee());
            assert_eq!(resolver.provider_kind(), Some(ProviderKind::Rsvp));
        }

        #[test]
        fn unknown_identifier_matches_nothing() {
            let resolver = resolve(12345);

            assert_eq!(resolver.provider_kind(), None);
            assert!(!resolver.is_attendee());
            assert!(resolver.provider().is_none());
            assert!(resolver.event_ids().is_empty());
            assert!(resolver.attendees().is_empty());
        }

        #[test]
        fn first_registered_provider_wins() {
            let registry = ProviderRegistry::new()
                .with_provider(Arc::new(
                    StaticProvider::new(ProviderKind::Rsvp, "a_attendee").with_order(600, 10),
                ))
                .with_provider(Arc::new(
                    StaticProvider::new(ProviderKind::Commerce, "b_attendee").with_order(600, 20),
                ));

            let resolver = OrderResolver::new(Arc::new(MemoryStore::new()), &registry, 600);
            assert_eq!(resolver.provider_kind(), Some(ProviderKind::Rsvp));
            assert!(!resolver.is_attendee());
        }

        #[test]
        fn earlier_order_match_beats_later_attendee_match() {
            // Provider a claims 910 as an order before provider b ever gets
            // to compare storage kinds.
            let store = MemoryStore::new().with_record(910, "b_attendee");
            let registry = ProviderRegistry::new()
                .with_provider(Arc::new(
                    StaticProvider::new(ProviderKind::Commerce, "a_attendee").with_order(910, 10),
                ))
                .with_provider(Arc::new(StaticProvider::new(
                    ProviderKind::Rsvp,
                    "b_attendee",
                )));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 910);
            assert_eq!(resolver.provider_kind(), Some(ProviderKind::Commerce));
            assert!(!resolver.is_attendee());
        }

        #[test]
        fn kind_match_takes_attendee_mode() {
            // Both detections would hit for this provider; the storage-kind
            // comparison runs first.
            let store = MemoryStore::new().with_record(920, "c_attendee");
            let registry = ProviderRegistry::new().with_provider(Arc::new(
                StaticProvider::new(ProviderKind::Other, "c_attendee").with_order(920, 5),
            ));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 920);
            assert!(resolver.is_attendee());
        }

        #[test]
        fn provider_handle_is_exposed() {
            let resolver = resolve(500);
            let provider = resolver.provider().unwrap();
            assert_eq!(provider.attendee_kind(), "tribe_attendee");
        }

        #[test]
        fn empty_registry_matches_nothing() {
            let resolver =
                OrderResolver::new(Arc::new(sample_store()), &ProviderRegistry::new(), 500);
            assert_eq!(resolver.provider_kind(), None);
        }
    }

    mod event_ids {
        use super::*;

        #[test]
        fn order_mode_collects_events_of_matching_records() {
            let resolver = resolve(500);
            assert_eq!(event_vec(&resolver), vec![42]);
        }

        #[test]
        fn order_mode_sorts_and_dedupes_events() {
            let provider = StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                .with_order_key("_tribe_order_id")
                .with_event_key("_tribe_event_id")
                .with_order(600, 11)
                .with_attendee_event(910, 11)
                .with_attendee_event(911, 10)
                .with_attendee_event(913, 11);
            let store = MemoryStore::new()
                .with_record(910, "tribe_attendee")
                .with_meta(910, "_tribe_order_id", "600")
                .with_record(911, "tribe_attendee")
                .with_meta(911, "_tribe_order_id", "600")
                .with_record(912, "tribe_attendee")
                .with_meta(912, "_tribe_order_id", "600")
                .with_record(913, "tribe_attendee")
                .with_meta(913, "_tribe_order_id", "600");
            let registry = ProviderRegistry::new().with_provider(Arc::new(provider));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 600);

            // 912 has no event lookup and is skipped; 910 and 913 share one.
            assert_eq!(event_vec(&resolver), vec![10, 11]);
        }

        #[test]
        fn attendee_mode_reads_event_metadata() {
            let resolver = resolve(77);
            assert!(resolver.is_attendee());
            assert_eq!(event_vec(&resolver), vec![42]);
        }

        #[test]
        fn attendee_mode_coerces_and_dedupes_metadata() {
            let store = sample_store()
                .with_record(88, "tribe_rsvp_attendees")
                .with_meta(88, "_tribe_rsvp_event", "43")
                .with_meta(88, "_tribe_rsvp_event", "42")
                .with_meta(88, "_tribe_rsvp_event", "43")
                .with_meta(88, "_tribe_rsvp_event", "oops");

            let resolver = OrderResolver::new(Arc::new(store), &sample_registry(), 88);

            // Non-numeric metadata coerces to 0 and stays in the set.
            assert_eq!(event_vec(&resolver), vec![0, 42, 43]);
        }

        #[test]
        fn attendee_mode_without_event_key_is_empty() {
            let store = MemoryStore::new()
                .with_record(77, "tribe_rsvp_attendees")
                .with_meta(77, "_tribe_rsvp_event", "42");
            let registry = ProviderRegistry::new().with_provider(Arc::new(StaticProvider::new(
                ProviderKind::Rsvp,
                "tribe_rsvp_attendees",
            )));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 77);
            assert!(resolver.is_attendee());
            assert!(resolver.event_ids().is_empty());
        }

        #[test]
        fn attendee_mode_empty_event_key_is_missing() {
            let store = MemoryStore::new()
                .with_record(77, "tribe_rsvp_attendees")
                .with_meta(77, "_tribe_rsvp_event", "42");
            let registry = ProviderRegistry::new().with_provider(Arc::new(
                StaticProvider::new(ProviderKind::Rsvp, "tribe_rsvp_attendees")
                    .with_event_key(""),
            ));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 77);
            assert!(resolver.event_ids().is_empty());
        }

        #[test]
        fn order_mode_without_order_key_is_empty() {
            let registry = ProviderRegistry::new().with_provider(Arc::new(
                StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                    .with_event_key("_tribe_event_id")
                    .with_order(500, 42),
            ));

            let resolver = OrderResolver::new(Arc::new(sample_store()), &registry, 500);
            assert!(!resolver.is_attendee());
            assert!(resolver.event_ids().is_empty());
        }

        #[test]
        fn order_mode_empty_order_key_is_missing() {
            let registry = ProviderRegistry::new().with_provider(Arc::new(
                StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                    .with_order_key("")
                    .with_event_key("_tribe_event_id")
                    .with_order(500, 42),
            ));

            let resolver = OrderResolver::new(Arc::new(sample_store()), &registry, 500);
            assert!(resolver.event_ids().is_empty());
        }

        #[test]
        fn order_mode_without_attendee_object_is_empty() {
            let registry = ProviderRegistry::new().with_provider(Arc::new(
                StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                    .with_order_key("_tribe_order_id")
                    .with_event_key("_tribe_event_id")
                    .with_order(500, 42)
                    .without_attendee_object(),
            ));

            let resolver = OrderResolver::new(Arc::new(sample_store()), &registry, 500);
            assert!(resolver.event_ids().is_empty());
        }

        #[test]
        fn attendee_object_override_changes_the_scanned_kind() {
            let provider = StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                .with_order_key("_tribe_order_id")
                .with_event_key("_tribe_event_id")
                .with_order(500, 42)
                .with_attendee_event(930, 42)
                .with_attendee_object("legacy_attendee");
            let store = MemoryStore::new()
                .with_record(900, "tribe_attendee")
                .with_meta(900, "_tribe_order_id", "500")
                .with_record(930, "legacy_attendee")
                .with_meta(930, "_tribe_order_id", "500");
            let registry = ProviderRegistry::new().with_provider(Arc::new(provider));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 500);

            // Only the overridden kind is scanned, so 900 is invisible.
            assert_eq!(event_vec(&resolver), vec![42]);
        }
    }

    mod event_key_probe {
        use super::*;

        fn provider_without_event_key() -> StaticProvider {
            StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                .with_order_key("_tribe_order_id")
                .with_order(500, 42)
                .with_attendee_event(900, 42)
        }

        fn store_with_order_500() -> MemoryStore {
            MemoryStore::new()
                .with_record(500, "shop_order")
                .with_record(900, "tribe_attendee")
                .with_meta(900, "_tribe_order_id", "500")
        }

        #[test]
        fn default_probe_scans_without_an_event_key() {
            let registry =
                ProviderRegistry::new().with_provider(Arc::new(provider_without_event_key()));

            let resolver = OrderResolver::new(Arc::new(store_with_order_500()), &registry, 500);
            assert_eq!(event_vec(&resolver), vec![42]);
        }

        #[test]
        fn event_key_probe_blocks_scan_without_an_event_key() {
            let registry =
                ProviderRegistry::new().with_provider(Arc::new(provider_without_event_key()));

            let resolver = OrderResolver::new(Arc::new(store_with_order_500()), &registry, 500)
                .with_options(
                    ResolverOptions::new().with_event_key_probe(EventKeyProbe::EventKey),
                );
            assert!(resolver.event_ids().is_empty());
        }

        #[test]
        fn event_key_probe_passes_when_the_key_exists() {
            let resolver = resolve(500).with_options(
                ResolverOptions::new().with_event_key_probe(EventKeyProbe::EventKey),
            );
            assert_eq!(event_vec(&resolver), vec![42]);
        }

        #[test]
        fn missing_order_key_blocks_either_probe() {
            let provider = StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                .with_event_key("_tribe_event_id")
                .with_order(500, 42);
            let registry = ProviderRegistry::new().with_provider(Arc::new(provider));

            for probe in [EventKeyProbe::OrderKey, EventKeyProbe::EventKey] {
                let resolver =
                    OrderResolver::new(Arc::new(store_with_order_500()), &registry, 500)
                        .with_options(ResolverOptions::new().with_event_key_probe(probe));
                assert!(resolver.event_ids().is_empty());
            }
        }

        #[test]
        fn options_serde_defaults() {
            let options: ResolverOptions = serde_json::from_str("{}").unwrap();
            assert_eq!(options, ResolverOptions::default());

            let options: ResolverOptions =
                serde_json::from_str(r#"{"event_key_probe":"event_key","dedupe_attendees":true}"#)
                    .unwrap();
            assert_eq!(options.event_key_probe, EventKeyProbe::EventKey);
            assert!(options.dedupe_attendees);
        }
    }

    mod attendees {
        use super::*;

        #[test]
        fn order_mode_keeps_only_this_orders_records() {
            let resolver = resolve(500);
            let attendees = resolver.attendees();

            let ids: Vec<i64> = attendees.iter().map(|a| a.attendee_id).collect();
            assert_eq!(ids, vec![900, 901]);
            assert!(attendees.iter().all(|a| a.order_id == 500));
        }

        #[test]
        fn normalized_record_fields() {
            let resolver = resolve(500);
            let attendees = resolver.attendees();

            let jane = &attendees[0];
            assert_eq!(jane.attendee_id, 900);
            assert_eq!(jane.event_id, Some(42));
            assert_eq!(jane.ticket_name, "General Admission");
            assert_eq!(jane.holder_name, "Jane Doe");
            assert_eq!(jane.order_id, 500);
            assert_eq!(jane.ticket_id, TicketId::Unique("TKT-59f3a8".to_string()));
            assert_eq!(jane.qr_ticket_id, 900);
            assert_eq!(jane.security_code, "abc123");
            assert_eq!(jane.purchaser_email, Some("jane@example.com".to_string()));

            // 901 has no stored unique id, so the order id stands in.
            let john = &attendees[1];
            assert_eq!(john.ticket_id, TicketId::Order(500));
        }

        #[test]
        fn attendee_mode_keeps_only_the_record_itself() {
            let resolver = resolve(77);
            let attendees = resolver.attendees();

            assert_eq!(attendees.len(), 1);
            let attendee = &attendees[0];
            assert_eq!(attendee.attendee_id, 77);
            assert_eq!(attendee.event_id, Some(42));
            assert_eq!(attendee.holder_name, "Sam Lee");
            assert_eq!(attendee.ticket_id, TicketId::Order(77));
        }

        #[test]
        fn order_reference_is_coerced_before_comparison() {
            let provider = StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                .with_order_key("_tribe_order_id")
                .with_event_key("_tribe_event_id")
                .with_order(500, 42)
                .with_attendee_event(960, 42)
                .with_attendee(
                    42,
                    RawAttendee::new(960, "GA", "Pat Kim", "jkl012").with_order_id("00500"),
                );
            let store = MemoryStore::new()
                .with_record(960, "tribe_attendee")
                .with_meta(960, "_tribe_order_id", "500");
            let registry = ProviderRegistry::new().with_provider(Arc::new(provider));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 500);
            let attendees = resolver.attendees();
            assert_eq!(attendees.len(), 1);
            assert_eq!(attendees[0].attendee_id, 960);
        }

        #[test]
        fn missing_order_reference_drops_the_record() {
            let provider = StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                .with_order_key("_tribe_order_id")
                .with_event_key("_tribe_event_id")
                .with_order(500, 42)
                .with_attendee_event(960, 42)
                .with_attendee(
                    42,
                    RawAttendee::new(960, "GA", "Pat Kim", "jkl012").with_order_id("500"),
                )
                .with_attendee(42, RawAttendee::new(970, "GA", "No Order", "mno345"));
            let store = MemoryStore::new()
                .with_record(960, "tribe_attendee")
                .with_meta(960, "_tribe_order_id", "500");
            let registry = ProviderRegistry::new().with_provider(Arc::new(provider));

            let resolver = OrderResolver::new(Arc::new(store), &registry, 500);
            let ids: Vec<i64> = resolver.attendees().iter().map(|a| a.attendee_id).collect();
            assert_eq!(ids, vec![960]);
        }

        #[test]
        fn record_in_several_events_appears_once_per_event() {
            let (store, registry) = multi_event_fixture();

            let resolver = OrderResolver::new(Arc::new(store), &registry, 600);
            let ids: Vec<i64> = resolver.attendees().iter().map(|a| a.attendee_id).collect();
            assert_eq!(ids, vec![920, 920, 921]);
        }

        #[test]
        fn dedupe_option_keeps_first_occurrence() {
            let (store, registry) = multi_event_fixture();

            let resolver = OrderResolver::new(Arc::new(store), &registry, 600)
                .with_options(ResolverOptions::new().with_dedupe_attendees(true));
            let ids: Vec<i64> = resolver.attendees().iter().map(|a| a.attendee_id).collect();
            assert_eq!(ids, vec![920, 921]);
        }

        fn multi_event_fixture() -> (MemoryStore, ProviderRegistry) {
            let provider = StaticProvider::new(ProviderKind::Commerce, "tribe_attendee")
                .with_order_key("_tribe_order_id")
                .with_event_key("_tribe_event_id")
                .with_order(600, 10)
                .with_attendee_event(920, 10)
                .with_attendee_event(921, 11)
                .with_attendee(
                    10,
                    RawAttendee::new(920, "GA", "Lou Cole", "pqr678").with_order_id("600"),
                )
                .with_attendee(
                    11,
                    RawAttendee::new(920, "GA", "Lou Cole", "pqr678").with_order_id("600"),
                )
                .with_attendee(
                    11,
                    RawAttendee::new(921, "VIP", "Max Ray", "stu901").with_order_id("600"),
                );
            let store = MemoryStore::new()
                .with_record(920, "tribe_attendee")
                .with_meta(920, "_tribe_order_id", "600")
                .with_record(921, "tribe_attendee")
                .with_meta(921, "_tribe_order_id", "600");
            let registry = ProviderRegistry::new().with_provider(Arc::new(provider));
            (store, registry)
        }
    }

    mod from_text {
        use super::*;

        #[test]
        fn coerces_text_identifiers() {
            let resolver =
                OrderResolver::from_text(Arc::new(sample_store()), &sample_registry(), "500abc");

            assert_eq!(resolver.order_id(), 500);
            assert_eq!(resolver.provider_kind(), Some(ProviderKind::Commerce));
            assert_eq!(event_vec(&resolver), vec![42]);
        }

        #[test]
        fn garbage_text_resolves_as_zero() {
            let resolver =
                OrderResolver::from_text(Arc::new(sample_store()), &sample_registry(), "abc");

            assert_eq!(resolver.order_id(), 0);
            assert_eq!(resolver.provider_kind(), None);
        }
    }
}
