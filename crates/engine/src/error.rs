use catalog::{CatalogError, EntityKind};
use textmatch::TextMatchConfigError;
use thiserror::Error;

/// Errors surfaced by the search engine.
///
/// Only query/config rejection and total failure reach the caller; a single
/// kind's catalog failure degrades the response to `partial` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// The query was rejected before any retrieval ran.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The engine configuration cannot be used for matching.
    #[error("invalid engine config: {0}")]
    InvalidConfig(#[from] TextMatchConfigError),

    /// A kind's retriever could not reach its snapshot provider.
    #[error("catalog unavailable for kind {kind}: {source}")]
    CatalogUnavailable {
        kind: EntityKind,
        #[source]
        source: CatalogError,
    },
}

impl SearchError {
    pub fn invalid_query<S: Into<String>>(reason: S) -> Self {
        Self::InvalidQuery(reason.into())
    }
}
