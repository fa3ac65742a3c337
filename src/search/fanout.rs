//! Per-candidate display text resolution
//!
//! Every completed search fans out one independent `question_text` lookup per
//! candidate. Lookups are not ordered, not coalesced and never cancelled. A
//! failed lookup leaves its row showing only the score.
//!
//! Rows belong to a generation (the sequence number of the search that
//! produced them). When a newer search replaces the rows, lookups from the
//! older fan-out still run to completion, but their results no longer have a
//! row to land on and are dropped.

use crate::service::{Candidate, QuestionService};
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

/// A candidate plus its display text, once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCandidate {
    pub candidate: Candidate,
    pub text: Option<String>,
}

impl ResolvedCandidate {
    pub fn display_score(&self) -> String {
        format!("{:.2}", self.candidate.score)
    }
}

/// Display text for one row of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub generation: u64,
    pub row: usize,
    pub text: String,
}

/// Rows of the most recently completed search.
#[derive(Debug, Clone, Default)]
pub struct SimilarResults {
    generation: u64,
    rows: Vec<ResolvedCandidate>,
}

impl SimilarResults {
    pub fn new(generation: u64, candidates: Vec<Candidate>) -> Self {
        let rows = candidates
            .into_iter()
            .map(|candidate| ResolvedCandidate {
                candidate,
                text: None,
            })
            .collect();
        Self { generation, rows }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rows(&self) -> &[ResolvedCandidate] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.rows.iter().filter(|r| r.text.is_some()).count()
    }

    /// Attach resolved text to its row. Returns false for results of a
    /// superseded generation or an unknown row.
    pub fn apply_resolution(&mut self, resolution: Resolution) -> bool {
        if resolution.generation != self.generation {
            tracing::trace!(
                stale = resolution.generation,
                current = self.generation,
                "dropping resolution for replaced results"
            );
            return false;
        }
        match self.rows.get_mut(resolution.row) {
            Some(row) => {
                row.text = Some(resolution.text);
                true
            }
            None => false,
        }
    }
}

/// Build one lookup per candidate.
///
/// Each future resolves to `Some` only when the service returned text; errors
/// are logged and swallowed.
pub fn lookups(
    service: &dyn QuestionService,
    generation: u64,
    candidates: &[Candidate],
) -> Vec<BoxFuture<'static, Option<Resolution>>> {
    candidates
        .iter()
        .enumerate()
        .map(|(row, candidate)| {
            let id = candidate.id.clone();
            let lookup = service.question_text(&id);
            async move {
                match lookup.await {
                    Ok(Some(text)) => Some(Resolution {
                        generation,
                        row,
                        text,
                    }),
                    Ok(None) => None,
                    Err(e) => {
                        tracing::debug!(%id, error = %e, "question lookup failed");
                        None
                    }
                }
            }
            .boxed()
        })
        .collect()
}

/// Wait for every lookup of `candidates` and return the rows with whatever
/// text resolved. Used outside the TUI, where nothing replaces the rows.
pub async fn resolve_all(service: &dyn QuestionService, candidates: Vec<Candidate>) -> SimilarResults {
    let pending = lookups(service, 0, &candidates);
    let mut results = SimilarResults::new(0, candidates);
    for resolution in join_all(pending).await.into_iter().flatten() {
        results.apply_resolution(resolution);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{QuestionId, ServiceError, ServiceResult, SubmitReceipt};
    use futures::future;
    use std::collections::HashMap;

    struct Lookup(HashMap<u64, ServiceResult<Option<String>>>);

    impl QuestionService for Lookup {
        fn all_questions(&self) -> BoxFuture<'static, ServiceResult<Vec<String>>> {
            future::ready(Ok(Vec::new())).boxed()
        }

        fn similar(&self, _question: &str) -> BoxFuture<'static, ServiceResult<Vec<Candidate>>> {
            future::ready(Ok(Vec::new())).boxed()
        }

        fn question_text(&self, id: &QuestionId) -> BoxFuture<'static, ServiceResult<Option<String>>> {
            let result = match id {
                QuestionId::Number(n) => match self.0.get(n) {
                    Some(Ok(text)) => Ok(text.clone()),
                    Some(Err(e)) => Err(ServiceError::Rejected(e.to_string())),
                    None => Ok(None),
                },
                QuestionId::Text(_) => Ok(None),
            };
            future::ready(result).boxed()
        }

        fn submit(&self, _question: &str) -> BoxFuture<'static, ServiceResult<SubmitReceipt>> {
            future::ready(Ok(SubmitReceipt(serde_json::Value::Null))).boxed()
        }
    }

    fn candidate(id: u64, score: f64) -> Candidate {
        Candidate {
            id: QuestionId::from(id),
            score,
        }
    }

    #[test]
    fn test_failed_lookup_leaves_other_rows_resolved() {
        let service = Lookup(HashMap::from([
            (1, Ok(Some("first".to_string()))),
            (2, Err(ServiceError::Rejected("gone".into()))),
            (3, Ok(Some("third".to_string()))),
        ]));
        let candidates = vec![candidate(1, 3.0), candidate(2, 2.0), candidate(3, 1.0)];
        let mut results = SimilarResults::new(4, candidates.clone());

        let resolved = futures::executor::block_on(join_all(lookups(&service, 4, &candidates)));
        for r in resolved.into_iter().flatten() {
            assert!(results.apply_resolution(r));
        }

        let texts: Vec<Option<&str>> = results.rows().iter().map(|r| r.text.as_deref()).collect();
        assert_eq!(texts, vec![Some("first"), None, Some("third")]);
        assert_eq!(results.resolved_count(), 2);
    }

    #[test]
    fn test_missing_text_is_not_a_resolution() {
        let service = Lookup(HashMap::from([(9, Ok(None))]));
        let resolved =
            futures::executor::block_on(join_all(lookups(&service, 1, &[candidate(9, 1.0)])));
        assert_eq!(resolved, vec![None]);
    }

    #[test]
    fn test_resolve_all_keeps_candidate_order() {
        let service = Lookup(HashMap::from([
            (5, Ok(Some("five".to_string()))),
            (6, Err(ServiceError::Rejected("gone".into()))),
        ]));
        let results = futures::executor::block_on(resolve_all(
            &service,
            vec![candidate(6, 0.9), candidate(5, 0.4)],
        ));
        assert_eq!(results.len(), 2);
        assert_eq!(results.rows()[0].candidate.id, QuestionId::from(6));
        assert!(results.rows()[0].text.is_none());
        assert_eq!(results.rows()[1].text.as_deref(), Some("five"));
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut results = SimilarResults::new(2, vec![candidate(1, 1.0)]);
        let applied = results.apply_resolution(Resolution {
            generation: 1,
            row: 0,
            text: "old".into(),
        });
        assert!(!applied);
        assert!(results.rows()[0].text.is_none());
    }

    #[test]
    fn test_unknown_row_is_dropped() {
        let mut results = SimilarResults::new(1, vec![candidate(1, 1.0)]);
        assert!(!results.apply_resolution(Resolution {
            generation: 1,
            row: 5,
            text: "x".into(),
        }));
    }

    #[test]
    fn test_display_score_two_decimals() {
        let results = SimilarResults::new(1, vec![candidate(7, 0.5), candidate(8, 12.0)]);
        assert_eq!(results.rows()[0].display_score(), "0.50");
        assert_eq!(results.rows()[1].display_score(), "12.00");
    }

    #[test]
    fn test_empty_results() {
        let results = SimilarResults::default();
        assert!(results.is_empty());
        assert_eq!(results.generation(), 0);
        assert_eq!(results.len(), 0);
    }
}
