//! Request router — the write-once discriminant → handler registry.
//!
//! Registration happens during wiring, before the router is sealed.
//! Sealing makes the table immutable for the module's lifetime; after
//! that, `register` is a configuration fault, not a runtime fault.
//! Because the sealed table is read-only, abrupt termination of an
//! exchange can never corrupt it for the next instantiation.

use alloc::collections::BTreeMap;

use gateway_primitives::types::Discriminant;
use gateway_primitives::{MisuseFault, UnsupportedFault};

use crate::handler::Handler;

/// The handler registry.
///
/// Registering the reserved discriminant `0x00` is permitted but
/// unreachable: the codec rejects it before routing ever sees it.
#[derive(Debug, Clone, Default)]
pub struct Router {
    entries: BTreeMap<Discriminant, Handler>,
    sealed: bool,
}

impl Router {
    /// Create an empty, unsealed router.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            sealed: false,
        }
    }

    /// Register a handler for a discriminant.
    ///
    /// Configuration-time only. First registration wins:
    /// - after sealing → `MisuseFault::RegistrationAfterInit`
    /// - occupied discriminant → `MisuseFault::DuplicateRegistration`
    pub fn register(
        &mut self,
        discriminant: Discriminant,
        handler: Handler,
    ) -> Result<(), MisuseFault> {
        if self.sealed {
            return Err(MisuseFault::RegistrationAfterInit(discriminant));
        }
        if self.entries.contains_key(&discriminant) {
            return Err(MisuseFault::DuplicateRegistration(discriminant));
        }
        self.entries.insert(discriminant, handler);
        Ok(())
    }

    /// Seal the router. The table is read-only from here on.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the router has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Resolve a discriminant to its handler.
    ///
    /// Total: every discriminant maps to either a handler or an
    /// `UnsupportedFault` — there is no silent fallthrough.
    pub fn resolve(&self, discriminant: Discriminant) -> Result<Handler, UnsupportedFault> {
        self.entries
            .get(&discriminant)
            .copied()
            .ok_or(UnsupportedFault { discriminant })
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
