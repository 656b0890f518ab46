//! Capability resolution: direct provision first, registered adapter second.
//!
//! Resolution is single-hop. An object that provides the target capability is
//! returned as-is; otherwise each capability the object provides is tried as
//! an adapter source, in declaration order, and the first factory that accepts
//! the object wins. Adapters are built fresh on every call and never cached.

use crate::capability::{CapabilityId, Component, Interface, direct_view};
use crate::registry::{AdapterRegistry, RegistryError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(
        "no adapter to {target} (name {name:?}) for an object providing [{}]",
        join_ids(.sources)
    )]
    AdapterNotFound {
        sources: Vec<CapabilityId>,
        target: CapabilityId,
        name: String,
    },
    #[error("object declares {capability} but does not hand out a view for it")]
    ViewMismatch { capability: CapabilityId },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn join_ids(ids: &[CapabilityId]) -> String {
    ids.iter()
        .map(|id| id.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves objects against one registry.
#[derive(Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r AdapterRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r AdapterRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r AdapterRegistry {
        self.registry
    }

    /// Resolve `object` to `I` using the unnamed adapter.
    pub fn resolve<I: Interface>(
        &self,
        object: &Arc<dyn Component>,
    ) -> Result<Arc<I::View>, ResolveError> {
        self.resolve_named::<I>(object, "")
    }

    /// Resolve `object` to `I`, selecting adapters registered under `name`.
    pub fn resolve_named<I: Interface>(
        &self,
        object: &Arc<dyn Component>,
        name: &str,
    ) -> Result<Arc<I::View>, ResolveError> {
        match self.query::<I>(object, name)? {
            Some(view) => Ok(view),
            None => {
                let error = ResolveError::AdapterNotFound {
                    sources: object.provided().ids(),
                    target: I::capability().id().clone(),
                    name: name.to_string(),
                };
                tracing::debug!(%error, "resolution failed");
                Err(error)
            }
        }
    }

    /// Like [`Resolver::resolve_named`], but a missing adapter is `Ok(None)`.
    pub fn query<I: Interface>(
        &self,
        object: &Arc<dyn Component>,
        name: &str,
    ) -> Result<Option<Arc<I::View>>, ResolveError> {
        let target = I::capability();
        let provided = object.provided();

        if provided.contains(target) {
            tracing::trace!(to = target.name(), "object provides capability directly");
            return direct_view::<I>(object).map(Some).ok_or_else(|| {
                ResolveError::ViewMismatch {
                    capability: target.id().clone(),
                }
            });
        }

        for source in provided.iter() {
            let factory = match self.registry.lookup::<I>(source, name) {
                Ok(factory) => factory,
                Err(RegistryError::NotFound { .. }) => continue,
                Err(err) => return Err(err.into()),
            };
            match factory(object) {
                Some(view) => {
                    tracing::trace!(
                        from = source.name(),
                        to = target.name(),
                        discriminator = name,
                        "built adapter"
                    );
                    return Ok(Some(view));
                }
                None => {
                    tracing::trace!(
                        from = source.name(),
                        to = target.name(),
                        discriminator = name,
                        "adapter factory declined object"
                    );
                }
            }
        }

        Ok(None)
    }
}
