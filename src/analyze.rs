//! Request orchestration: resolve documents, extract outlines, rank sections.

use std::sync::Arc;

use rayon::prelude::*;

use crate::embed::Embedder;
use crate::error::{Error, Result};
use crate::extract::{OutlineExtractor, OutlineOptions};
use crate::model::{DocumentBundle, RankingResult, Request};
use crate::rank::{RankOptions, SectionRanker};
use crate::source::DocumentResolver;

/// Callback invoked once per document after extraction, with the document
/// identifier and whether it succeeded.
pub type ProgressFn = dyn Fn(&str, bool) + Send + Sync;

/// Options for a full analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Extract documents in parallel
    pub parallel: bool,

    /// Heading thresholds
    pub outline: OutlineOptions,

    /// Ranking thresholds
    pub rank: RankOptions,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set outline options.
    pub fn with_outline(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }

    /// Set rank options.
    pub fn with_rank(mut self, options: RankOptions) -> Self {
        self.rank = options;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            outline: OutlineOptions::default(),
            rank: RankOptions::default(),
        }
    }
}

/// Runs persona/task requests against a set of documents.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use docrank::{Analyzer, DirectorySource, HashingEmbedder, Request};
///
/// let analyzer = Analyzer::new(
///     Arc::new(DirectorySource::new("input")),
///     Arc::new(HashingEmbedder::new()),
/// );
/// let request = Request::new("Travel Planner", "Plan a 4-day trip", ["nice.pdf"]);
/// let result = analyzer.analyze(&request)?;
/// println!("{} sections", result.len());
/// # Ok::<(), docrank::Error>(())
/// ```
pub struct Analyzer {
    resolver: Arc<dyn DocumentResolver>,
    embedder: Arc<dyn Embedder>,
    options: AnalyzeOptions,
    progress: Option<Arc<ProgressFn>>,
}

impl Analyzer {
    /// Create an analyzer with default options.
    pub fn new(resolver: Arc<dyn DocumentResolver>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            resolver,
            embedder,
            options: AnalyzeOptions::default(),
            progress: None,
        }
    }

    /// Replace all options.
    pub fn with_options(mut self, options: AnalyzeOptions) -> Self {
        self.options = options;
        self
    }

    /// Set outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.options.outline = options;
        self
    }

    /// Set rank options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.options.rank = options;
        self
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.options.parallel = false;
        self
    }

    /// Report per-document extraction progress.
    pub fn with_progress(mut self, progress: impl Fn(&str, bool) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    /// Current options.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Extract a bundle for every requested document.
    ///
    /// Documents that cannot be resolved or read are skipped with a warning.
    /// Results keep request order. Fails with [`Error::NoDocuments`] when no
    /// document succeeds.
    pub fn extract(&self, request: &Request) -> Result<Vec<(String, DocumentBundle)>> {
        request.validate()?;

        let extractor = OutlineExtractor::new(self.options.outline.clone());
        let process = |id: &String| {
            let result = self
                .resolver
                .resolve(id)
                .map(|pages| extractor.extract(&pages));
            if let Some(progress) = &self.progress {
                progress(id, result.is_ok());
            }
            (id.clone(), result)
        };

        let results: Vec<(String, Result<DocumentBundle>)> = if self.options.parallel {
            request.documents.par_iter().map(process).collect()
        } else {
            request.documents.iter().map(process).collect()
        };

        let bundles: Vec<(String, DocumentBundle)> = results
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(bundle) => {
                    log::debug!("{}: {} headings", id, bundle.heading_count());
                    Some((id, bundle))
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", id, e);
                    None
                }
            })
            .collect();

        if bundles.is_empty() {
            return Err(Error::NoDocuments);
        }

        log::info!(
            "Processed {} of {} documents",
            bundles.len(),
            request.documents.len()
        );
        Ok(bundles)
    }

    /// Extract all documents and rank their sections against the request.
    pub fn analyze(&self, request: &Request) -> Result<RankingResult> {
        let bundles = self.extract(request)?;
        let ranker = SectionRanker::new(self.embedder.clone(), self.options.rank.clone());
        ranker.rank(&request.persona, &request.task, &bundles)
    }
}
