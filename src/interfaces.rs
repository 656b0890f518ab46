//! Built-in capabilities and the view traits that represent them.
//!
//! Each capability is declared lazily, once per process, and exposed both as
//! a plain [`Capability`] accessor (for registry keys) and as an
//! [`Interface`] marker (for typed resolution).

use crate::capability::{Capability, Component, Interface};
use crate::resolver::{ResolveError, Resolver};
use std::sync::{Arc, LazyLock};

struct Builtins {
    file: Capability,
    image: Capability,
    document: Capability,
    size: Capability,
    byte_size: Capability,
    catalog: Capability,
    view: Capability,
    catalog_view: Capability,
}

// Declared together so their relative order (and so the resolver's source
// order) does not depend on which accessor runs first.
static BUILTINS: LazyLock<Builtins> = LazyLock::new(|| {
    let size = Capability::declare("Size", &["size"]);
    let view = Capability::declare("View", &[]);
    Builtins {
        file: Capability::declare("File", &["body"]),
        image: Capability::declare("Image", &["picture"]),
        document: Capability::declare("Document", &["content"]),
        size,
        byte_size: Capability::declare_extending("ByteSize", &[], size),
        catalog: Capability::declare("Catalog", &["documents", "add", "remove", "contains"]),
        view,
        catalog_view: Capability::declare_extending("CatalogView", &["list_sizes"], view),
    }
});

pub fn file() -> Capability {
    BUILTINS.file
}

pub fn image() -> Capability {
    BUILTINS.image
}

pub fn document() -> Capability {
    BUILTINS.document
}

pub fn size() -> Capability {
    BUILTINS.size
}

/// Extends [`size`]; the link is informational only.
pub fn byte_size() -> Capability {
    BUILTINS.byte_size
}

pub fn catalog() -> Capability {
    BUILTINS.catalog
}

/// Abstract base of presentation capabilities. Nothing provides it directly.
pub fn view() -> Capability {
    BUILTINS.view
}

pub fn catalog_view() -> Capability {
    BUILTINS.catalog_view
}

/// Every built-in capability.
pub fn builtin_capabilities() -> Vec<Capability> {
    vec![
        file(),
        image(),
        document(),
        size(),
        byte_size(),
        catalog(),
        view(),
        catalog_view(),
    ]
}

/// Something with a textual body.
pub trait File: Send + Sync {
    fn body(&self) -> &str;
}

/// Something with raw picture bytes.
pub trait Image: Send + Sync {
    fn picture(&self) -> &[u8];
}

/// Something with logically structured content.
pub trait Document: Send + Sync {
    fn content(&self) -> &str;
}

pub trait Size: Send + Sync {
    fn size(&self) -> usize;
}

/// A [`Size`] measured in bytes.
pub trait ByteSize: Size {}

/// Read-only membership view of a document collection.
///
/// Mutation stays on the concrete collection type; a view can never add or
/// remove members.
pub trait DocumentSet: Send + Sync {
    fn contains(&self, document: &Arc<dyn Component>) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Current members, in no particular order.
    fn members(&self) -> Vec<Arc<dyn Component>>;
}

/// Presents the sizes of a catalog's documents.
pub trait CatalogView: Send + Sync {
    fn list_sizes(&self, resolver: &Resolver<'_>) -> Result<Vec<usize>, ResolveError>;
}

pub struct FileCapability;
impl Interface for FileCapability {
    type View = dyn File;
    fn capability() -> Capability {
        file()
    }
}

pub struct ImageCapability;
impl Interface for ImageCapability {
    type View = dyn Image;
    fn capability() -> Capability {
        image()
    }
}

pub struct DocumentCapability;
impl Interface for DocumentCapability {
    type View = dyn Document;
    fn capability() -> Capability {
        document()
    }
}

pub struct SizeCapability;
impl Interface for SizeCapability {
    type View = dyn Size;
    fn capability() -> Capability {
        size()
    }
}

pub struct ByteSizeCapability;
impl Interface for ByteSizeCapability {
    type View = dyn ByteSize;
    fn capability() -> Capability {
        byte_size()
    }
}

pub struct CatalogCapability;
impl Interface for CatalogCapability {
    type View = dyn DocumentSet;
    fn capability() -> Capability {
        catalog()
    }
}

pub struct CatalogViewCapability;
impl Interface for CatalogViewCapability {
    type View = dyn CatalogView;
    fn capability() -> Capability {
        catalog_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_stable_handles() {
        assert_eq!(file(), file());
        assert_eq!(FileCapability::capability(), file());
        assert_ne!(file(), image());
    }

    #[test]
    fn hierarchy_links_are_declared() {
        assert_eq!(byte_size().extends(), Some(size()));
        assert_eq!(catalog_view().extends(), Some(view()));
        assert!(size().extends().is_none());
    }

    #[test]
    fn document_kinds_are_declared_in_order() {
        assert!(file() < image());
        assert!(image() < document());
    }

    #[test]
    fn builtin_names_are_unique() {
        let mut names: Vec<String> = builtin_capabilities()
            .iter()
            .map(|cap| cap.name().to_string())
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
