//! Scored candidates and their raw match signals.

use catalog::{EntityId, EntityKind};

/// Raw signals gathered by a retriever for one entity.
///
/// Absent signals contribute zero to the relevance score. `distance_km` is
/// always the rounded great-circle distance, regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchSignals {
    pub exact_rank: Option<f32>,
    pub fuzzy_similarity: Option<f32>,
    pub matched_field: Option<&'static str>,
    pub distance_km: Option<f64>,
    pub rating: f32,
}

/// One filtered, scored entity produced by a retriever for one query.
///
/// Immutable once produced: the merger reorders and truncates candidate
/// lists but never rewrites signals or scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub signals: MatchSignals,
    pub score: f32,
}
