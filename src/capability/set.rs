use crate::capability::identity::{Capability, CapabilityId};
use std::collections::BTreeSet;

/// Capabilities declared by one component type.
///
/// Iteration follows declaration order, which is also the order the resolver
/// tries source capabilities in when looking for an adapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    members: BTreeSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `capability` was already present.
    pub fn insert(&mut self, capability: Capability) -> bool {
        self.members.insert(capability)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.members.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.members.iter().copied()
    }

    pub fn ids(&self) -> Vec<CapabilityId> {
        self.iter().map(|cap| cap.id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[Capability; N]> for CapabilitySet {
    fn from(capabilities: [Capability; N]) -> Self {
        capabilities.into_iter().collect()
    }
}
