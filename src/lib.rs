//! Capability declarations, an adapter registry and a resolver built on them.
//!
//! Objects declare the capabilities they provide ([`Component`]); the
//! [`AdapterRegistry`] maps `(source, target, name)` to a factory that builds
//! a view of an object under a capability it lacks; the [`Resolver`] returns
//! the object itself when it already provides the requested capability and
//! otherwise the first registered adapter that accepts it. A set-backed
//! [`Catalog`] and a [`TextCatalogView`] reporter exercise the core.
//!
//! Resolution is single-hop and exact: `extends` links between capabilities
//! are informational and never used as a lookup fallback.

pub mod capability;
pub mod catalog;
pub mod documents;
pub mod global;
pub mod interfaces;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod settings;

pub use capability::{
    Capability, CapabilityId, CapabilitySet, CapabilitySnapshot, Component, ErasedView, Interface,
    component, direct_view,
};
pub use catalog::{Catalog, CatalogError, DocumentKey};
pub use documents::{DocumentObject, FileObject, ImageObject, install_builtin_adapters};
pub use global::{global_registry, global_registry_mut, initialize_global};
pub use registry::{AdapterFactory, AdapterKey, AdapterRegistry, RegistrationInfo, RegistryError};
pub use report::{SizeEntry, SizeReport, TextCatalogView};
pub use resolver::{ResolveError, Resolver};
pub use settings::ReportFormat;
