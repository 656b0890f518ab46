//! Process-wide adapter registry.
//!
//! Library code takes an [`AdapterRegistry`] by reference; only the outermost
//! composition point (the binaries) reaches for this singleton. The expected
//! pattern is write-once-then-read-many: call [`initialize_global`] during
//! startup, then resolve through [`global_registry`].

use crate::registry::AdapterRegistry;
use std::sync::{LazyLock, Once, RwLock, RwLockReadGuard, RwLockWriteGuard};

static GLOBAL: LazyLock<RwLock<AdapterRegistry>> =
    LazyLock::new(|| RwLock::new(AdapterRegistry::new()));
static INIT: Once = Once::new();

/// Shared read access to the global registry.
///
/// A panic while holding the write lock cannot leave a registration half
/// written, so poisoned locks are recovered rather than propagated.
pub fn global_registry() -> RwLockReadGuard<'static, AdapterRegistry> {
    GLOBAL.read().unwrap_or_else(|err| err.into_inner())
}

/// Exclusive access for registrations made outside [`initialize_global`].
pub fn global_registry_mut() -> RwLockWriteGuard<'static, AdapterRegistry> {
    GLOBAL.write().unwrap_or_else(|err| err.into_inner())
}

/// Run the startup registration routine against the global registry.
///
/// `install` runs at most once per process; later calls are no-ops. Returns
/// true for the call that performed the installation.
pub fn initialize_global(install: impl FnOnce(&mut AdapterRegistry)) -> bool {
    let mut ran = false;
    INIT.call_once(|| {
        let mut registry = global_registry_mut();
        install(&mut *registry);
        tracing::debug!(registrations = registry.len(), "initialized global adapter registry");
        ran = true;
    });
    ran
}
