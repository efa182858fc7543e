//! Section relevance ranking.
//!
//! Candidates from every document are pooled, embedded together with the
//! persona/task query in one batch, scored by cosine similarity,
//! deduplicated by normalized title, and cut to the top K.

mod excerpt;
mod options;

pub use excerpt::refine_excerpt;
pub use options::RankOptions;

use std::collections::HashSet;
use std::sync::Arc;

use crate::clock::monotonic_now;
use crate::embed::{check_batch, cosine_similarity, Embedder};
use crate::error::Result;
use crate::model::{
    ranking_query, CandidateSection, DocumentBundle, RankingMetadata, RankingResult,
};
use crate::text::{is_generic_heading, normalize_title};

/// Ranks outline sections against a persona and task.
pub struct SectionRanker {
    embedder: Arc<dyn Embedder>,
    options: RankOptions,
}

impl SectionRanker {
    /// Create a ranker using the given embedder.
    pub fn new(embedder: Arc<dyn Embedder>, options: RankOptions) -> Self {
        Self { embedder, options }
    }

    /// Ranking options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Rank the sections of the given documents.
    ///
    /// `documents` pairs each document identifier with its bundle; its order
    /// breaks score ties.
    pub fn rank(
        &self,
        persona: &str,
        task: &str,
        documents: &[(String, DocumentBundle)],
    ) -> Result<RankingResult> {
        let candidates = self.candidates(documents);
        let query = ranking_query(persona, task);

        log::info!(
            "Ranking {} candidate sections from {} documents",
            candidates.len(),
            documents.len()
        );

        let ranked = if candidates.is_empty() {
            Vec::new()
        } else {
            let scored = self.score(&query, candidates)?;
            select_top(scored, self.options.top_k)
        };

        let metadata = RankingMetadata {
            documents: documents.iter().map(|(id, _)| id.clone()).collect(),
            persona: persona.to_string(),
            task: task.to_string(),
            timestamp: monotonic_now(),
        };

        Ok(RankingResult::from_ranked(metadata, ranked))
    }

    /// Build unscored candidates for every non-generic outline entry.
    pub fn candidates(&self, documents: &[(String, DocumentBundle)]) -> Vec<CandidateSection> {
        let mut candidates = Vec::new();
        for (document, bundle) in documents {
            for entry in &bundle.outline {
                if is_generic_heading(&entry.text) {
                    continue;
                }
                let excerpt = refine_excerpt(
                    bundle.page_text(entry.page),
                    self.options.excerpt_sentences,
                    self.options.excerpt_chars,
                );
                candidates.push(CandidateSection::new(
                    document.as_str(),
                    entry.page,
                    entry.text.as_str(),
                    excerpt,
                ));
            }
        }
        candidates
    }

    /// Embed the query and all candidates in one batch and attach scores.
    pub fn score(
        &self,
        query: &str,
        mut candidates: Vec<CandidateSection>,
    ) -> Result<Vec<CandidateSection>> {
        let mut texts = Vec::with_capacity(candidates.len() + 1);
        texts.push(query.to_string());
        texts.extend(candidates.iter().map(CandidateSection::comparison_text));

        log::debug!(
            "Embedding {} texts with {}",
            texts.len(),
            self.embedder.name()
        );
        let vectors = self.embedder.embed(&texts)?;
        check_batch(texts.len(), &vectors)?;

        let query_vector = &vectors[0];
        for (candidate, vector) in candidates.iter_mut().zip(&vectors[1..]) {
            candidate.score = cosine_similarity(query_vector, vector);
        }
        Ok(candidates)
    }
}

/// Sort by score (stable), keep the first occurrence of each normalized
/// title, cut to `top_k`, and assign 1-based ranks.
pub fn select_top(mut scored: Vec<CandidateSection>, top_k: usize) -> Vec<CandidateSection> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::new();
    let mut ranked = Vec::with_capacity(top_k.min(scored.len()));
    for mut candidate in scored {
        if ranked.len() == top_k {
            break;
        }
        if !seen.insert(normalize_title(&candidate.section_title)) {
            continue;
        }
        candidate.rank = ranked.len() as u32 + 1;
        ranked.push(candidate);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{HeadingLevel, OutlineEntry};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Scores a text by which keyword it contains; the query is always [1, 0].
    struct KeywordEmbedder {
        calls: AtomicUsize,
        keywords: Vec<(&'static str, f32)>,
    }

    impl KeywordEmbedder {
        fn new(keywords: Vec<(&'static str, f32)>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                keywords,
            }
        }
    }

    impl Embedder for KeywordEmbedder {
        fn name(&self) -> &str {
            "keyword"
        }

        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    if i == 0 {
                        return vec![1.0, 0.0];
                    }
                    let sim = self
                        .keywords
                        .iter()
                        .find(|(k, _)| text.contains(k))
                        .map(|(_, s)| *s)
                        .unwrap_or(0.0);
                    vec![sim, (1.0 - sim * sim).max(0.0).sqrt()]
                })
                .collect())
        }
    }

    /// Records every batch it receives.
    #[derive(Default)]
    struct RecordingEmbedder {
        batches: std::sync::Mutex<Vec<Vec<String>>>,
    }

    impl Embedder for RecordingEmbedder {
        fn name(&self) -> &str {
            "recording"
        }

        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.batches.lock().unwrap().push(texts.to_vec());
            Ok(vec![vec![1.0, 0.0]; texts.len()])
        }
    }

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn name(&self) -> &str {
            "failing"
        }

        fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(Error::Embedding("model unavailable".into()))
        }
    }

    fn bundle(headings: &[(&str, u32)], pages: &[(u32, &str)]) -> DocumentBundle {
        DocumentBundle {
            outline: headings
                .iter()
                .map(|(text, page)| OutlineEntry::new(HeadingLevel::H1, *text, *page))
                .collect(),
            text_by_page: pages.iter().map(|(p, t)| (*p, t.to_string())).collect(),
        }
    }

    fn candidate(title: &str, score: f32) -> CandidateSection {
        let mut c = CandidateSection::new("doc.pdf", 1, title, "");
        c.score = score;
        c
    }

    #[test]
    fn test_candidates_skip_generic_and_trim_excerpt() {
        let documents = vec![(
            "a.pdf".to_string(),
            bundle(
                &[("Beaches of the Coastal Region", 2), ("Overview", 1)],
                &[(2, "Sand everywhere. Water is warm. Bring sunscreen.")],
            ),
        )];
        let ranker = SectionRanker::new(
            Arc::new(KeywordEmbedder::new(vec![])),
            RankOptions::default(),
        );
        let candidates = ranker.candidates(&documents);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].refined_text, "Sand everywhere.  Water is warm");
        assert_eq!(
            candidates[0].comparison_text(),
            "Beaches of the Coastal Region. Sand everywhere.  Water is warm"
        );
    }

    #[test]
    fn test_select_top_dedups_sorts_and_caps() {
        let scored = vec![
            candidate("Getting Started Guide", 0.4),
            candidate("Mountain Hiking Trails", 0.9),
            candidate("  getting started GUIDE ", 0.7),
            candidate("Local Cuisine Highlights", 0.7),
        ];
        let ranked = select_top(scored, 10);
        let titles: Vec<_> = ranked.iter().map(|c| c.section_title.trim()).collect();

        assert_eq!(
            titles,
            vec![
                "Mountain Hiking Trails",
                "getting started GUIDE",
                "Local Cuisine Highlights"
            ]
        );
        assert_eq!(
            ranked.iter().map(|c| c.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let capped = select_top(ranked, 2);
        assert_eq!(capped.len(), 2);
    }

    #[test]
    fn test_rank_single_batch_call() {
        let embedder = Arc::new(KeywordEmbedder::new(vec![
            ("Mountain", 0.9),
            ("Beaches", 0.5),
            ("Cuisine", 0.3),
        ]));
        let ranker = SectionRanker::new(embedder.clone(), RankOptions::default());
        let documents = vec![
            (
                "a.pdf".to_string(),
                bundle(
                    &[
                        ("Beaches of the Coastal Region", 1),
                        ("Local Cuisine Highlights", 2),
                    ],
                    &[(1, "Sun."), (2, "Food.")],
                ),
            ),
            (
                "b.pdf".to_string(),
                bundle(&[("Mountain Hiking Trails", 1)], &[(1, "Hike.")]),
            ),
        ];

        let result = ranker
            .rank("Travel Planner", "Plan a 4-day trip", &documents)
            .unwrap();

        assert_eq!(embedder.calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(result.len(), 3);
        assert_eq!(result.extracted_sections[0].document, "b.pdf");
        assert_eq!(result.extracted_sections[0].importance_rank, 1);
        assert_eq!(result.subsection_analysis[0].refined_text, "Hike. ");
        assert_eq!(result.metadata.documents, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_rank_without_candidates_skips_embedder() {
        let embedder = Arc::new(KeywordEmbedder::new(vec![]));
        let ranker = SectionRanker::new(embedder.clone(), RankOptions::default());
        let documents = vec![("a.pdf".to_string(), bundle(&[("Summary", 1)], &[]))];

        let result = ranker.rank("Analyst", "Review", &documents).unwrap();
        assert!(result.is_empty());
        assert!(result.subsection_analysis.is_empty());
        assert_eq!(result.metadata.persona, "Analyst");
        assert_eq!(embedder.calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[test]
    fn test_embedding_failure_is_fatal() {
        let ranker = SectionRanker::new(Arc::new(FailingEmbedder), RankOptions::default());
        let documents = vec![(
            "a.pdf".to_string(),
            bundle(&[("Mountain Hiking Trails", 1)], &[]),
        )];
        assert!(matches!(
            ranker.rank("p", "t", &documents),
            Err(Error::Embedding(_))
        ));
    }

    #[test]
    fn test_query_leads_the_batch() {
        let embedder = Arc::new(RecordingEmbedder::default());
        let ranker = SectionRanker::new(embedder.clone(), RankOptions::default());
        let documents = vec![(
            "a.pdf".to_string(),
            bundle(&[("Mountain Hiking Trails", 1)], &[(1, "Hike.")]),
        )];

        ranker
            .rank("Travel Planner", "Plan a 4-day trip", &documents)
            .unwrap();

        let batches = embedder.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0][0], "Travel Planner. Plan a 4-day trip");
        assert_eq!(batches[0][1], "Mountain Hiking Trails. Hike. ");
    }
}
