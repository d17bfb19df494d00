//! # Souk search engine
//!
//! Unified search-and-ranking over a multi-entity marketplace: vendors,
//! items, and taxonomic categories, merged into one relevance-ordered list
//! that tolerates typos and folds in geographic proximity and live
//! availability.
//!
//! ## Shape of a search
//!
//! 1. The query text is normalized exactly like every corpus field, then
//!    validated (text or origin required, radius within bounds).
//! 2. One retriever task per requested kind runs concurrently; each applies
//!    textual candidacy (exact OR fuzzy), its kind's hard filters (open
//!    hours, dietary flag, price ceiling, radius), and geo distance where
//!    the kind carries a coordinate.
//! 3. A per-kind weight table turns raw signals into one comparable score
//!    per candidate.
//! 4. The merger concatenates all kinds, sorts by score (entity id breaks
//!    ties), and paginates.
//! 5. A [`SearchEvent`] goes to the analytics collaborator fire-and-forget.
//!
//! A kind whose provider fails or misses the overall deadline contributes
//! zero candidates and marks the page `partial`; a degraded response is
//! never silently presented as complete.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use catalog::{EntityKind, GeoPoint, InMemoryCatalog};
//! use search::{SearchEngine, SearchQuery};
//!
//! # async fn run() -> Result<(), search::SearchError> {
//! let catalog = Arc::new(InMemoryCatalog::new());
//! let engine = SearchEngine::new(catalog);
//!
//! let page = engine
//!     .search(
//!         SearchQuery::new("biryani")
//!             .with_origin(GeoPoint::new(12.9716, 77.5946))
//!             .with_radius_km(5.0)
//!             .with_kinds([EntityKind::Vendor, EntityKind::Item]),
//!     )
//!     .await?;
//!
//! for result in &page.results {
//!     println!("{} {} score={:.2}", result.kind, result.id, result.score);
//! }
//! # Ok(())
//! # }
//! ```

mod analytics;
mod candidate;
mod config;
mod engine;
mod error;
mod merge;
mod query;
mod result;
mod retrieve;
pub mod scorer;

pub use crate::analytics::{AnalyticsError, AnalyticsSink, SearchEvent};
pub use crate::candidate::{Candidate, MatchSignals};
pub use crate::config::{
    EngineConfig, KindWeights, RelevanceWeights, RADIUS_MAX_KM, RADIUS_MIN_KM,
};
pub use crate::engine::SearchEngine;
pub use crate::error::SearchError;
pub use crate::query::SearchQuery;
pub use crate::result::{SearchResult, SearchResultPage};
