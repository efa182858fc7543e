//! Data model for outline extraction and section ranking.
//!
//! Source types describe what a document source hands over (pages of
//! blocks of lines of styled spans). Line and outline types are produced by
//! extraction; ranking types make up the response of a request.

mod line;
mod outline;
mod ranking;
mod request;
mod source;

pub use line::{round_size, size_key, Line, Span};
pub use outline::{DocumentBundle, HeadingLevel, OutlineEntry};
pub use ranking::{
    CandidateSection, ExtractedSection, RankingMetadata, RankingResult, SubsectionAnalysis,
};
pub use request::{ranking_query, Request};
pub use source::{SourceBlock, SourceLine, SourcePage, SourceSpan};
