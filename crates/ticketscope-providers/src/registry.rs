//! Ordered provider registration.
//!
//! Hosts register their active ticket providers once, at startup, and hand
//! the registry to every resolver they construct. Registration order is
//! significant: provider detection scans in this order and the first
//! provider to claim an identifier wins.

use std::fmt;
use std::sync::Arc;

use crate::provider::{ProviderKind, TicketProvider};

/// The ordered collection of registered ticket providers.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn TicketProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider at the end of the scan order.
    pub fn register(&mut self, provider: Arc<dyn TicketProvider>) {
        self.providers.push(provider);
    }

    /// Builder method to register a provider.
    pub fn with_provider(mut self, provider: Arc<dyn TicketProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Iterates the providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TicketProvider>> {
        self.providers.iter()
    }

    /// Returns the first registered provider of the given kind.
    pub fn by_kind(&self, kind: ProviderKind) -> Option<&Arc<dyn TicketProvider>> {
        self.providers.iter().find(|provider| provider.kind() == kind)
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
