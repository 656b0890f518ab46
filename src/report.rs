//! Size reporting over a catalog.
//!
//! The reporter only consumes the core: it walks the catalog, asks the
//! resolver for each document's `Size` view and formats the result.

use crate::catalog::Catalog;
use crate::implements;
use crate::interfaces::{CatalogView, CatalogViewCapability, SizeCapability};
use crate::resolver::{ResolveError, Resolver};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

/// Size of one catalog member.
#[derive(Debug, Clone, Serialize)]
pub struct SizeEntry {
    pub key: String,
    pub provides: Vec<String>,
    pub size: usize,
}

/// Sizes of every catalog member, sorted by size for stable output.
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub name: String,
    pub documents: Vec<SizeEntry>,
    pub total: usize,
}

/// Presents a shared catalog through the `CatalogView` capability.
pub struct TextCatalogView {
    catalog: Arc<Catalog>,
}

impl TextCatalogView {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Resolve every member to `Size` with adapters registered under `name`.
    pub fn report(
        &self,
        resolver: &Resolver<'_>,
        name: &str,
    ) -> Result<SizeReport, ResolveError> {
        let mut documents = Vec::with_capacity(self.catalog.len());
        for (key, document) in self.catalog.entries() {
            let size = resolver.resolve_named::<SizeCapability>(document, name)?;
            documents.push(SizeEntry {
                key: key.to_string(),
                provides: document
                    .provided()
                    .iter()
                    .map(|cap| cap.name().to_string())
                    .collect(),
                size: size.size(),
            });
        }
        documents.sort_by(|a, b| a.size.cmp(&b.size).then_with(|| a.key.cmp(&b.key)));
        let total = documents.iter().map(|entry| entry.size).sum();
        Ok(SizeReport {
            name: name.to_string(),
            documents,
            total,
        })
    }

    /// Print the header line followed by one size per line.
    pub fn write_text(
        &self,
        resolver: &Resolver<'_>,
        name: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        let report = self
            .report(resolver, name)
            .context("resolving document sizes")?;
        writeln!(out, "Sizes of the documents:")?;
        for entry in &report.documents {
            writeln!(out, "{}", entry.size)?;
        }
        Ok(())
    }

    pub fn write_json(
        &self,
        resolver: &Resolver<'_>,
        name: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        let report = self
            .report(resolver, name)
            .context("resolving document sizes")?;
        serde_json::to_writer_pretty(&mut *out, &report).context("serializing size report")?;
        writeln!(out)?;
        Ok(())
    }
}

impl CatalogView for TextCatalogView {
    fn list_sizes(&self, resolver: &Resolver<'_>) -> Result<Vec<usize>, ResolveError> {
        self.catalog
            .documents()
            .map(|document| {
                resolver
                    .resolve::<SizeCapability>(document)
                    .map(|size| size.size())
            })
            .collect()
    }
}

implements!(TextCatalogView => CatalogViewCapability);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{component, direct_view};
    use crate::documents::{DocumentObject, FileObject, ImageObject, install_builtin_adapters};
    use crate::interfaces::catalog_view;
    use crate::registry::AdapterRegistry;
    use std::collections::BTreeSet;

    fn registry() -> AdapterRegistry {
        let mut registry = AdapterRegistry::new();
        install_builtin_adapters(&mut registry);
        registry
    }

    fn sample_catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::new();
        catalog.add(component(FileObject::new("1")));
        catalog.add(component(FileObject::new("22")));
        Arc::new(catalog)
    }

    #[test]
    fn list_sizes_covers_every_document() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        let view = TextCatalogView::new(sample_catalog());

        let sizes: BTreeSet<usize> = view.list_sizes(&resolver).unwrap().into_iter().collect();
        assert_eq!(sizes, BTreeSet::from([1, 2]));
    }

    #[test]
    fn view_provides_catalog_view_capability() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        let shared = component(TextCatalogView::new(sample_catalog()));
        assert!(shared.provides(catalog_view()));

        let view = direct_view::<CatalogViewCapability>(&shared).unwrap();
        assert_eq!(view.list_sizes(&resolver).unwrap().len(), 2);
    }

    #[test]
    fn text_output_lists_sorted_sizes() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        let view = TextCatalogView::new(sample_catalog());

        let mut out = Vec::new();
        view.write_text(&resolver, "", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Sizes of the documents:\n1\n2\n");
    }

    #[test]
    fn report_mixes_documents_kinds_and_totals() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        let mut catalog = Catalog::new();
        catalog.add(component(FileObject::new("abc")));
        catalog.add(component(ImageObject::new(vec![0; 10])));
        let view = TextCatalogView::new(Arc::new(catalog));

        let report = view.report(&resolver, "").unwrap();
        assert_eq!(report.total, 13);
        assert_eq!(report.documents[0].provides, vec!["File".to_string()]);
        assert_eq!(report.documents[1].provides, vec!["Image".to_string()]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["documents"][1]["size"], 10);
    }

    #[test]
    fn unadaptable_document_fails_the_report() {
        let registry = registry();
        let resolver = Resolver::new(&registry);
        let mut catalog = Catalog::new();
        catalog.add(component(DocumentObject::new("prose")));
        let view = TextCatalogView::new(Arc::new(catalog));

        assert!(matches!(
            view.list_sizes(&resolver),
            Err(ResolveError::AdapterNotFound { .. })
        ));
        let mut out = Vec::new();
        let err = view.write_text(&resolver, "", &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("Document"));
    }
}
