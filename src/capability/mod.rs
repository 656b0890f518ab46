//! Capability declarations and the component contract.
//!
//! A [`Capability`] is an opaque, process-lifetime handle used as a lookup
//! key. Types take part in resolution by implementing [`Component`] (usually
//! through [`implements!`](crate::implements)), which records the capabilities
//! they provide and how to view them as each capability's trait object.

pub mod component;
pub mod identity;
pub mod set;

pub use component::{Component, ErasedView, Interface, component, direct_view};
pub use identity::{Capability, CapabilityId, CapabilitySnapshot};
pub use set::CapabilitySet;
