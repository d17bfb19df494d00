//! Outbound result views.

use catalog::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::query::SearchQuery;

/// One entry of a result page: the serializable view of a [`Candidate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub kind: EntityKind,
    pub id: EntityId,
    pub name: String,
    pub score: f32,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_field: Option<String>,
}

impl From<&Candidate> for SearchResult {
    fn from(candidate: &Candidate) -> Self {
        Self {
            kind: candidate.kind,
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            score: candidate.score,
            rating: candidate.signals.rating,
            distance_km: candidate.signals.distance_km,
            matched_field: candidate.signals.matched_field.map(str::to_string),
        }
    }
}

/// One page of merged, ordered results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultPage {
    pub results: Vec<SearchResult>,
    /// Size of the full merged result set, before pagination.
    pub total_count: usize,
    pub has_more: bool,
    /// True when at least one requested kind did not complete (provider
    /// failure or deadline) and contributed zero candidates.
    pub partial: bool,
    pub execution_time_ms: u64,
    /// The query as executed, normalized text included.
    pub query: SearchQuery,
}
