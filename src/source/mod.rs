//! Document sources.
//!
//! A [`DocumentSource`] turns the bytes of one file format into styled pages.
//! A [`DocumentResolver`] maps the document identifiers of a request to pages,
//! either from disk ([`DirectorySource`]) or from memory ([`MemorySource`]).
//!
//! # Example
//!
//! ```no_run
//! use docrank::source::{DirectorySource, DocumentResolver};
//!
//! fn main() -> docrank::Result<()> {
//!     let source = DirectorySource::new("input");
//!     let pages = source.resolve("guide.pdf")?;
//!     println!("{} pages", pages.len());
//!     Ok(())
//! }
//! ```

mod json;
mod pdf;

pub use json::JsonSource;
pub use pdf::{is_pdf_bytes, PdfSource};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::SourcePage;

/// Trait for readers of one document format.
///
/// Implement this trait to add support for a new format.
pub trait DocumentSource: Send + Sync {
    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Get the supported file extensions for this source.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Read a file at the given path.
    fn load(&self, path: &Path) -> Result<Vec<SourcePage>>;

    /// Read from bytes.
    fn load_bytes(&self, data: &[u8]) -> Result<Vec<SourcePage>>;

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Resolves request document identifiers to pages.
pub trait DocumentResolver: Send + Sync {
    /// Load the pages of the identified document.
    fn resolve(&self, id: &str) -> Result<Vec<SourcePage>>;
}

/// Registry mapping file extensions to sources.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn DocumentSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Create a registry with the built-in sources (PDF and JSON span dumps).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfSource::new()));
        registry.register(Arc::new(JsonSource::new()));
        registry
    }

    /// Register a source for all its supported extensions.
    pub fn register(&mut self, source: Arc<dyn DocumentSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.sources.keys().map(|s| s.as_str()).collect()
    }

    /// Load a file using the source registered for its extension.
    pub fn load(&self, path: &Path) -> Result<Vec<SourcePage>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedSource(path.display().to_string()))?;

        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedSource(path.display().to_string()))?;

        log::debug!("Loading {} with {} source", path.display(), source.name());
        source.load(path)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Resolves identifiers as file names relative to a base directory.
pub struct DirectorySource {
    base_dir: PathBuf,
    registry: SourceRegistry,
}

impl DirectorySource {
    /// Create a resolver over `base_dir` with the default sources.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            registry: SourceRegistry::with_defaults(),
        }
    }

    /// Replace the source registry.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The directory identifiers are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full path for a document identifier.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.base_dir.join(id)
    }
}

impl DocumentResolver for DirectorySource {
    fn resolve(&self, id: &str) -> Result<Vec<SourcePage>> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(Error::DocumentNotFound(id.to_string()));
        }
        self.registry.load(&path)
    }
}

/// In-memory documents keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<SourcePage>>,
}

impl MemorySource {
    /// Create an empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any previous one with the same identifier.
    pub fn insert(&mut self, id: impl Into<String>, pages: Vec<SourcePage>) {
        self.documents.insert(id.into(), pages);
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with_document(mut self, id: impl Into<String>, pages: Vec<SourcePage>) -> Self {
        self.insert(id, pages);
        self
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentResolver for MemorySource {
    fn resolve(&self, id: &str) -> Result<Vec<SourcePage>> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SourceBlock, SourceLine, SourceSpan};

    #[test]
    fn test_registry_with_defaults() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.supports("pdf"));
        assert!(registry.supports("PDF"));
        assert!(registry.supports("json"));
        assert!(!registry.supports("docx"));
        assert_eq!(registry.get_by_extension("pdf").unwrap().name(), "pdf");
    }

    #[test]
    fn test_registry_rejects_unknown_extension() {
        let registry = SourceRegistry::with_defaults();
        let result = registry.load(Path::new("notes.docx"));
        assert!(matches!(result, Err(Error::UnsupportedSource(_))));

        let result = registry.load(Path::new("README"));
        assert!(matches!(result, Err(Error::UnsupportedSource(_))));
    }

    #[test]
    fn test_directory_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert_eq!(source.base_dir(), dir.path());
        assert!(matches!(
            source.resolve("missing.pdf"),
            Err(Error::DocumentNotFound(id)) if id == "missing.pdf"
        ));
    }

    #[test]
    fn test_directory_source_reads_json_dump() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("guide.json"),
            r#"{"pages":[{"blocks":[{"lines":[{"spans":[{"text":"Hello","size":12}]}]}]}]}"#,
        )
        .unwrap();

        let pages = DirectorySource::new(dir.path()).resolve("guide.json").unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].span_count(), 1);
    }

    #[test]
    fn test_memory_source() {
        let page = {
            let mut page = SourcePage::new(1);
            page.add_block(SourceBlock::new(vec![SourceLine::new(vec![
                SourceSpan::new("Text", 11.0, "Helvetica"),
            ])]));
            page
        };
        let source = MemorySource::new().with_document("a.pdf", vec![page]);
        assert_eq!(source.len(), 1);
        assert_eq!(source.resolve("a.pdf").unwrap().len(), 1);
        assert!(matches!(
            source.resolve("b.pdf"),
            Err(Error::DocumentNotFound(_))
        ));
    }
}
