//! # docrank
//!
//! Heading outline extraction and persona-driven section ranking for
//! document collections.
//!
//! Headings are found from typography alone: font size tiers, bold fonts and
//! all-caps text. Sections from every document are then scored against a
//! persona and task with sentence embeddings and the most relevant ones are
//! returned with short page excerpts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docrank::extract_outline_file;
//!
//! fn main() -> docrank::Result<()> {
//!     let bundle = extract_outline_file("document.pdf")?;
//!     for entry in &bundle.outline {
//!         println!("{} {} (p. {})", entry.level, entry.text, entry.page);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline extraction**: up to three heading levels from font size rank
//! - **Section ranking**: one batched embedding call per request
//! - **Pluggable inputs**: PDF via lopdf, JSON span dumps, in-memory pages
//! - **Pluggable embedders**: built-in feature hashing, Ollama (`ollama` feature)
//! - **Parallel processing**: Uses Rayon to extract documents concurrently

pub mod analyze;
pub mod clock;
pub mod embed;
pub mod error;
pub mod extract;
pub mod model;
pub mod rank;
pub mod render;
pub mod source;
pub mod text;

// Re-export commonly used types
pub use analyze::{AnalyzeOptions, Analyzer};
pub use embed::{cosine_similarity, l2_normalize, Embedder, HashingEmbedder};
#[cfg(feature = "ollama")]
pub use embed::OllamaEmbedder;
pub use error::{Error, Result};
pub use extract::{extract_outline, OutlineExtractor, OutlineOptions};
pub use model::{
    CandidateSection, DocumentBundle, ExtractedSection, HeadingLevel, OutlineEntry,
    RankingMetadata, RankingResult, Request, SourceBlock, SourceLine, SourcePage, SourceSpan,
    SubsectionAnalysis,
};
pub use rank::{RankOptions, SectionRanker};
pub use render::{to_json, write_json, JsonFormat};
pub use source::{
    DirectorySource, DocumentResolver, DocumentSource, JsonSource, MemorySource, PdfSource,
    SourceRegistry,
};

use std::path::Path;

/// Extract the outline of a single file with default options.
///
/// The file's extension selects the source (`.pdf` or `.json`).
///
/// # Example
///
/// ```no_run
/// use docrank::extract_outline_file;
///
/// let bundle = extract_outline_file("document.pdf").unwrap();
/// println!("Headings: {}", bundle.heading_count());
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentBundle> {
    extract_outline_file_with_options(path, &OutlineOptions::default())
}

/// Extract the outline of a single file with custom options.
pub fn extract_outline_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
) -> Result<DocumentBundle> {
    let pages = SourceRegistry::with_defaults().load(path.as_ref())?;
    Ok(extract_outline(&pages, options))
}
