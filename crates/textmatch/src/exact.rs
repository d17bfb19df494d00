//! Exact-match scoring over a weighted corpus.
//!
//! Each corpus field is treated as a whitespace token set. A field's rank is
//! the fraction of query tokens it contains, scaled by the field's weight
//! relative to the heaviest field in the corpus, which keeps ranks inside
//! [0, 1]. The best field wins. O(tokens) per entity.

use catalog::CorpusField;
use fxhash::FxHashSet;

/// Best exact match of a query against one entity's corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactMatch {
    /// Label of the winning corpus field.
    pub field: &'static str,
    /// Rank in [0, 1]: token coverage scaled by relative field weight.
    pub rank: f32,
}

/// Token-set containment against every corpus field.
///
/// `query` and the corpus texts must be normalized with the same
/// [`Normalizer`](crate::Normalizer). Returns `None` when no query token
/// appears in any field.
pub fn exact_match(query: &str, corpus: &[CorpusField]) -> Option<ExactMatch> {
    let query_tokens: Vec<&str> = query.split_whitespace().collect();
    if query_tokens.is_empty() {
        return None;
    }

    let max_weight = corpus.iter().map(|f| f.weight).fold(0.0_f32, f32::max);
    if max_weight <= 0.0 {
        return None;
    }

    let mut best: Option<ExactMatch> = None;
    for field in corpus {
        let field_tokens: FxHashSet<&str> = field.text.split_whitespace().collect();
        if field_tokens.is_empty() {
            continue;
        }

        let matched = query_tokens
            .iter()
            .filter(|token| field_tokens.contains(**token))
            .count();
        if matched == 0 {
            continue;
        }

        let coverage = matched as f32 / query_tokens.len() as f32;
        let rank = coverage * (field.weight / max_weight);
        if best.map_or(true, |b| rank > b.rank) {
            best = Some(ExactMatch {
                field: field.field,
                rank,
            });
        }
    }

    best
}
