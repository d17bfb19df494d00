use thiserror::Error;

/// Errors produced by catalog snapshot providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The provider could not serve a snapshot for the requested kind.
    ///
    /// The engine treats this as a degraded (partial) response for that
    /// kind; retries, if any, belong to the provider itself.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    pub fn unavailable<E: std::fmt::Display>(err: E) -> Self {
        Self::Unavailable(err.to_string())
    }
}
