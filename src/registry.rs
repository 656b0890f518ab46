//! Adapter registrations keyed by source, target and name.
//!
//! The registry stores one factory per `(source, target, name)` key. Lookups
//! are exact: there is no fallback along `extends` links and no wildcard name.
//! Registering over an existing key replaces the earlier factory.
//!
//! A registry is a plain value so tests can build fresh ones; the process-wide
//! instance lives in [`crate::global`].

use crate::capability::{Capability, CapabilityId, Component, Interface};
use serde::Serialize;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Builds the view for `I` around an object that provides the source capability.
///
/// Returning `None` declines the object; the resolver then treats the key as
/// if nothing were registered for it.
pub type AdapterFactory<I> =
    fn(&Arc<dyn Component>) -> Option<Arc<<I as Interface>::View>>;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdapterKey {
    pub source: Capability,
    pub target: Capability,
    pub name: String,
}

impl AdapterKey {
    pub fn new(source: Capability, target: Capability, name: &str) -> Self {
        Self {
            source,
            target,
            name: name.to_string(),
        }
    }

    pub fn info(&self) -> RegistrationInfo {
        RegistrationInfo {
            source: self.source.id().clone(),
            target: self.target.id().clone(),
            name: self.name.clone(),
        }
    }
}

/// Serializable description of one registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationInfo {
    pub source: CapabilityId,
    pub target: CapabilityId,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no adapter registered from {from} to {to} (name {name:?})")]
    NotFound {
        from: CapabilityId,
        to: CapabilityId,
        name: String,
    },
    #[error("adapter from {from} to {to} (name {name:?}) builds a different view type")]
    ViewMismatch {
        from: CapabilityId,
        to: CapabilityId,
        name: String,
    },
}

impl RegistryError {
    fn not_found(key: &AdapterKey) -> Self {
        let info = key.info();
        RegistryError::NotFound {
            from: info.source,
            to: info.target,
            name: info.name,
        }
    }

    fn view_mismatch(key: &AdapterKey) -> Self {
        let info = key.info();
        RegistryError::ViewMismatch {
            from: info.source,
            to: info.target,
            name: info.name,
        }
    }
}

/// In-memory table of adapter factories.
///
/// Not synchronized; share it behind a lock (see [`crate::global`]) or fill it
/// during single-threaded startup and only read it afterwards.
#[derive(Default)]
pub struct AdapterRegistry {
    // Values hold an `AdapterFactory<I>` for the interface the key targets.
    adapters: BTreeMap<AdapterKey, Box<dyn Any + Send + Sync>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` as the adapter from `source` to `I`.
    ///
    /// Returns true when an earlier factory for the same key was replaced.
    pub fn register<I: Interface>(
        &mut self,
        source: Capability,
        name: &str,
        factory: AdapterFactory<I>,
    ) -> bool {
        let key = AdapterKey::new(source, I::capability(), name);
        let replaced = self.adapters.insert(key, Box::new(factory)).is_some();
        tracing::debug!(
            from = source.name(),
            to = I::capability().name(),
            discriminator = name,
            replaced,
            "registered adapter"
        );
        replaced
    }

    /// Exact-key lookup of the factory adapting `source` to `I`.
    pub fn lookup<I: Interface>(
        &self,
        source: Capability,
        name: &str,
    ) -> Result<AdapterFactory<I>, RegistryError> {
        let key = AdapterKey::new(source, I::capability(), name);
        let Some(stored) = self.adapters.get(&key) else {
            return Err(RegistryError::not_found(&key));
        };
        stored
            .downcast_ref::<AdapterFactory<I>>()
            .copied()
            .ok_or_else(|| RegistryError::view_mismatch(&key))
    }

    /// Remove a registration. Returns false when nothing was registered.
    pub fn unregister(&mut self, source: Capability, target: Capability, name: &str) -> bool {
        let removed = self
            .adapters
            .remove(&AdapterKey::new(source, target, name))
            .is_some();
        if removed {
            tracing::debug!(
                from = source.name(),
                to = target.name(),
                discriminator = name,
                "unregistered adapter"
            );
        }
        removed
    }

    pub fn contains(&self, source: Capability, target: Capability, name: &str) -> bool {
        self.adapters
            .contains_key(&AdapterKey::new(source, target, name))
    }

    /// Keys in stable order: source, then target (declaration order), then name.
    pub fn keys(&self) -> impl Iterator<Item = &AdapterKey> {
        self.adapters.keys()
    }

    pub fn registrations(&self) -> Vec<RegistrationInfo> {
        self.keys().map(AdapterKey::info).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
