//! Result merging and pagination.
//!
//! Candidates from every kind are concatenated, ordered by descending score
//! with ascending entity id as the only tie-break, then windowed by
//! offset/limit. For a fixed candidate set and page, repeated merges return
//! identical order.

use std::cmp::Ordering;

use crate::candidate::Candidate;

/// Sort, then window. Returns the page plus `(total_count, has_more)`.
pub(crate) fn merge_candidates(
    mut candidates: Vec<Candidate>,
    limit: usize,
    offset: usize,
) -> (Vec<Candidate>, usize, bool) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let total_count = candidates.len();
    let page: Vec<Candidate> = candidates.into_iter().skip(offset).take(limit).collect();
    let has_more = offset + limit < total_count;
    (page, total_count, has_more)
}
