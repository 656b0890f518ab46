//! Built-in document types and their size adapters.
//!
//! [`install_builtin_adapters`] is the startup registration routine for these
//! types. It registers, in order:
//!
//! | source   | target | name      | size reported            |
//! |----------|--------|-----------|--------------------------|
//! | File     | Size   | `""`      | characters in the body   |
//! | File     | Size   | `"lines"` | lines in the body        |
//! | Image    | Size   | `""`      | bytes in the picture     |
//!
//! Documents have no size adapter.

use crate::capability::{Component, direct_view};
use crate::implements;
use crate::interfaces::{
    Document, DocumentCapability, File, FileCapability, Image, ImageCapability, Size,
    SizeCapability,
};
use crate::registry::AdapterRegistry;
use std::sync::Arc;

/// Discriminator selecting the line-count adapter for files.
pub const LINES: &str = "lines";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileObject {
    body: String,
}

impl FileObject {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl File for FileObject {
    fn body(&self) -> &str {
        &self.body
    }
}

implements!(FileObject => FileCapability);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageObject {
    picture: Vec<u8>,
}

impl ImageObject {
    pub fn new(picture: impl Into<Vec<u8>>) -> Self {
        Self {
            picture: picture.into(),
        }
    }
}

impl Image for ImageObject {
    fn picture(&self) -> &[u8] {
        &self.picture
    }
}

implements!(ImageObject => ImageCapability);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentObject {
    content: String,
}

impl DocumentObject {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Document for DocumentObject {
    fn content(&self) -> &str {
        &self.content
    }
}

implements!(DocumentObject => DocumentCapability);

// Adapters keep the typed view of their context, which shares the context's
// allocation.

struct FileCharCount {
    context: Arc<dyn File>,
}

impl Size for FileCharCount {
    fn size(&self) -> usize {
        self.context.body().chars().count()
    }
}

struct FileLineCount {
    context: Arc<dyn File>,
}

impl Size for FileLineCount {
    fn size(&self) -> usize {
        self.context.body().lines().count()
    }
}

struct ImageByteCount {
    context: Arc<dyn Image>,
}

impl Size for ImageByteCount {
    fn size(&self) -> usize {
        self.context.picture().len()
    }
}

pub fn file_char_count(context: &Arc<dyn Component>) -> Option<Arc<dyn Size>> {
    let context = direct_view::<FileCapability>(context)?;
    Some(Arc::new(FileCharCount { context }))
}

pub fn file_line_count(context: &Arc<dyn Component>) -> Option<Arc<dyn Size>> {
    let context = direct_view::<FileCapability>(context)?;
    Some(Arc::new(FileLineCount { context }))
}

pub fn image_byte_count(context: &Arc<dyn Component>) -> Option<Arc<dyn Size>> {
    let context = direct_view::<ImageCapability>(context)?;
    Some(Arc::new(ImageByteCount { context }))
}

/// Register the built-in adapters. Call once during startup.
pub fn install_builtin_adapters(registry: &mut AdapterRegistry) {
    registry.register::<SizeCapability>(crate::interfaces::file(), "", file_char_count);
    registry.register::<SizeCapability>(crate::interfaces::file(), LINES, file_line_count);
    registry.register::<SizeCapability>(crate::interfaces::image(), "", image_byte_count);
}
