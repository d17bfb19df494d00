//! Search event emission.
//!
//! The engine emits one structured event per search to an external analytics
//! collaborator. Emission is strictly fire-and-forget: a slow or failing
//! sink can never delay or fail the response, and any queueing/backpressure
//! policy belongs to the collaborator, not the engine. The event schema is
//! append-only.

use async_trait::async_trait;
use catalog::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One search, as reported to analytics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchEvent {
    #[serde(default)]
    pub user_id: Option<String>,
    /// The raw query text as the user typed it.
    pub query: String,
    /// Comma-joined requested kinds, e.g. `"vendor,item"`.
    pub kind: String,
    /// Total merged result count, before pagination.
    pub result_count: usize,
    /// Applied filters as a JSON object.
    pub filters: serde_json::Value,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub occurred_at: DateTime<Utc>,
}

/// Failure to hand an event to the collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("analytics emit failed: {0}")]
pub struct AnalyticsError(pub String);

/// Destination for search events.
///
/// Implementations own their delivery guarantees; the engine logs and drops
/// any error they return.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, event: SearchEvent) -> Result<(), AnalyticsError>;
}
