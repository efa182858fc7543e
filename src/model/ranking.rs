//! Ranking candidates and the ranked response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An outline entry paired with a page excerpt, awaiting or holding a score.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSection {
    /// Source document identifier
    pub document: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Heading text
    pub section_title: String,
    /// Trimmed page text
    pub refined_text: String,
    /// Cosine similarity to the query
    pub score: f32,
    /// 1-based rank, 0 until ranked
    pub rank: u32,
}

impl CandidateSection {
    /// Create an unscored candidate.
    pub fn new(
        document: impl Into<String>,
        page: u32,
        section_title: impl Into<String>,
        refined_text: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            page,
            section_title: section_title.into(),
            refined_text: refined_text.into(),
            score: 0.0,
            rank: 0,
        }
    }

    /// Text submitted to the embedder for this candidate.
    pub fn comparison_text(&self) -> String {
        format!("{}. {}", self.section_title, self.refined_text)
    }
}

/// Request metadata echoed in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingMetadata {
    /// Identifiers of the processed documents, in request order
    pub documents: Vec<String>,
    /// Persona description
    pub persona: String,
    /// Task to accomplish
    pub task: String,
    /// Generation time (UTC)
    pub timestamp: DateTime<Utc>,
}

/// A ranked section heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    pub importance_rank: u32,
}

/// The excerpt belonging to the ranked section at the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page: u32,
    pub refined_text: String,
}

/// Final response of a ranking request.
///
/// `extracted_sections` and `subsection_analysis` are index aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub metadata: RankingMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl RankingResult {
    /// Create a result with no sections.
    pub fn empty(metadata: RankingMetadata) -> Self {
        Self {
            metadata,
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }

    /// Build a result from candidates that already carry their final rank.
    pub fn from_ranked(metadata: RankingMetadata, ranked: Vec<CandidateSection>) -> Self {
        let mut result = Self::empty(metadata);
        for candidate in ranked {
            result.extracted_sections.push(ExtractedSection {
                document: candidate.document.clone(),
                page: candidate.page,
                section_title: candidate.section_title,
                importance_rank: candidate.rank,
            });
            result.subsection_analysis.push(SubsectionAnalysis {
                document: candidate.document,
                page: candidate.page,
                refined_text: candidate.refined_text,
            });
        }
        result
    }

    /// Number of ranked sections.
    pub fn len(&self) -> usize {
        self.extracted_sections.len()
    }

    /// Check if no section was ranked.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}
