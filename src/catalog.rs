//! Set-backed collection of arbitrary documents.
//!
//! Membership is by identity: a document is the shared allocation behind its
//! `Arc`, so two equal-looking documents are still distinct members. The
//! catalog keeps a handle to each member but never inspects it.

use crate::capability::Component;
use crate::implements;
use crate::interfaces::{CatalogCapability, DocumentSet};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Identity of a catalog member: the address of its shared allocation.
///
/// Stable while any handle to the document is alive, which the catalog
/// guarantees for its own members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentKey(usize);

impl DocumentKey {
    pub fn of(document: &Arc<dyn Component>) -> Self {
        DocumentKey(Arc::as_ptr(document) as *const () as usize)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("document {0} is not in the catalog")]
    NotInCatalog(DocumentKey),
}

#[derive(Default)]
pub struct Catalog {
    documents: HashMap<DocumentKey, Arc<dyn Component>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return its key. Adding a member again is a no-op.
    pub fn add(&mut self, document: Arc<dyn Component>) -> DocumentKey {
        let key = DocumentKey::of(&document);
        let inserted = self.documents.insert(key, document).is_none();
        tracing::trace!(%key, inserted, "catalog add");
        key
    }

    /// Remove a member, handing back the catalog's handle to it.
    pub fn remove(
        &mut self,
        document: &Arc<dyn Component>,
    ) -> Result<Arc<dyn Component>, CatalogError> {
        let key = DocumentKey::of(document);
        let removed = self
            .documents
            .remove(&key)
            .ok_or(CatalogError::NotInCatalog(key))?;
        tracing::trace!(%key, "catalog remove");
        Ok(removed)
    }

    pub fn contains(&self, document: &Arc<dyn Component>) -> bool {
        self.documents.contains_key(&DocumentKey::of(document))
    }

    pub fn get(&self, key: DocumentKey) -> Option<&Arc<dyn Component>> {
        self.documents.get(&key)
    }

    /// Current members, in no particular order.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<dyn Component>> {
        self.documents.values()
    }

    /// Members paired with their keys, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (DocumentKey, &Arc<dyn Component>)> {
        self.documents.iter().map(|(key, document)| (*key, document))
    }

    /// Owned copy of the current members.
    pub fn snapshot(&self) -> Vec<Arc<dyn Component>> {
        self.documents().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.documents.keys()).finish()
    }
}

impl DocumentSet for Catalog {
    fn contains(&self, document: &Arc<dyn Component>) -> bool {
        Catalog::contains(self, document)
    }

    fn len(&self) -> usize {
        Catalog::len(self)
    }

    fn members(&self) -> Vec<Arc<dyn Component>> {
        self.snapshot()
    }
}

implements!(Catalog => CatalogCapability);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{component, direct_view};
    use crate::documents::FileObject;
    use crate::interfaces::catalog;

    #[test]
    fn catalog_provides_catalog_capability() {
        let shared = component(Catalog::new());
        assert!(shared.provides(catalog()));
        let view = direct_view::<CatalogCapability>(&shared).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn document_lifespan_inside_catalog() {
        let mut cat = Catalog::new();
        let file = component(FileObject::new("test"));

        assert_eq!(cat.documents().count(), 0);
        assert!(!cat.contains(&file));
        cat.add(Arc::clone(&file));
        assert_eq!(cat.documents().count(), 1);
        assert!(cat.contains(&file));

        let removed = cat.remove(&file).unwrap();
        assert!(Arc::ptr_eq(&removed, &file));
        assert_eq!(cat.documents().count(), 0);
        assert!(!cat.contains(&file));
    }

    #[test]
    fn add_is_idempotent() {
        let mut cat = Catalog::new();
        let file = component(FileObject::new("x"));
        let first = cat.add(Arc::clone(&file));
        let second = cat.add(Arc::clone(&file));
        assert_eq!(first, second);
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.get(first).map(DocumentKey::of), Some(first));
    }

    #[test]
    fn membership_is_by_identity_not_value() {
        let mut cat = Catalog::new();
        let original = component(FileObject::new("same"));
        let lookalike = component(FileObject::new("same"));
        cat.add(Arc::clone(&original));

        assert!(!cat.contains(&lookalike));
        cat.add(lookalike);
        assert_eq!(cat.len(), 2);
    }

    #[test]
    fn removing_absent_document_fails_and_leaves_catalog_unchanged() {
        let mut cat = Catalog::new();
        let member = component(FileObject::new("member"));
        let stranger = component(FileObject::new("stranger"));
        cat.add(Arc::clone(&member));

        let err = cat
            .remove(&stranger)
            .err()
            .expect("stranger was never added");
        assert!(matches!(err, CatalogError::NotInCatalog(key) if key == DocumentKey::of(&stranger)));
        assert_eq!(cat.len(), 1);
        assert!(cat.contains(&member));
    }
}
