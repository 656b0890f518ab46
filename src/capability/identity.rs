use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Display name of a capability (e.g. `File`, `Size`).
///
/// Names are labels for humans and JSON output. They are not identities: two
/// capabilities declared under the same name remain distinct handles.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(pub String);

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct Declaration {
    serial: u64,
    id: CapabilityId,
    operations: Vec<String>,
    extends: Option<Capability>,
}

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Opaque handle for a declared capability.
///
/// Equality, hashing and ordering use the serial assigned at declaration, so
/// handles order by declaration time and a re-declared name never aliases an
/// existing capability. Declarations are never freed.
#[derive(Clone, Copy)]
pub struct Capability(&'static Declaration);

impl Capability {
    /// Declare a new root capability.
    ///
    /// `operations` lists the attributes/operations a provider is expected to
    /// expose. They are recorded for introspection only and never enforced.
    pub fn declare(name: &str, operations: &[&str]) -> Self {
        Self::declare_with(name, operations, None)
    }

    /// Declare a capability that extends `base`.
    ///
    /// The link is informational. Lookups match exact capabilities and never
    /// fall back along `extends`.
    pub fn declare_extending(name: &str, operations: &[&str], base: Capability) -> Self {
        Self::declare_with(name, operations, Some(base))
    }

    fn declare_with(name: &str, operations: &[&str], extends: Option<Capability>) -> Self {
        let declaration = Declaration {
            serial: NEXT_SERIAL.fetch_add(1, AtomicOrdering::Relaxed),
            id: CapabilityId(name.to_string()),
            operations: operations.iter().map(|op| op.to_string()).collect(),
            extends,
        };
        tracing::trace!(
            capability = name,
            serial = declaration.serial,
            extends = ?extends,
            "declared capability"
        );
        Capability(Box::leak(Box::new(declaration)))
    }

    pub fn id(&self) -> &CapabilityId {
        &self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.id.0
    }

    pub fn operations(&self) -> &[String] {
        &self.0.operations
    }

    /// The capability this one was declared to extend, if any.
    pub fn extends(&self) -> Option<Capability> {
        self.0.extends
    }

    /// Walk the `extends` chain, nearest base first.
    pub fn ancestors(&self) -> impl Iterator<Item = Capability> + use<> {
        std::iter::successors(self.extends(), |cap| cap.extends())
    }

    /// True when `self` is `other` or lists it somewhere in its `extends` chain.
    pub fn is_or_extends(&self, other: Capability) -> bool {
        *self == other || self.ancestors().any(|base| base == other)
    }

    /// Serializable summary used by introspection output.
    pub fn snapshot(&self) -> CapabilitySnapshot {
        CapabilitySnapshot {
            id: self.id().clone(),
            operations: self.operations().to_vec(),
            extends: self.extends().map(|base| base.id().clone()),
        }
    }

    fn serial(&self) -> u64 {
        self.0.serial
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.serial() == other.serial()
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serial().hash(state);
    }
}

impl PartialOrd for Capability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Capability {
    fn cmp(&self, other: &Self) -> Ordering {
        self.serial().cmp(&other.serial())
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name(), self.serial())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compact, serializable description of a capability declaration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySnapshot {
    pub id: CapabilityId,
    #[serde(default)]
    pub operations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<CapabilityId>,
}
