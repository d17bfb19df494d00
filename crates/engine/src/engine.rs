//! Search orchestration.
//!
//! [`SearchEngine`] validates the query, fans out to one retriever task per
//! requested kind, joins them under a single overall deadline, merges and
//! paginates the candidates, and emits a search event on a best-effort
//! basis. Kinds that fail or miss the deadline contribute zero candidates
//! and mark the response partial instead of failing the whole search.

use std::sync::Arc;
use std::time::Instant;

use catalog::{CatalogProvider, Clock, EntityKind, SystemClock};
use serde_json::json;
use textmatch::Normalizer;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::analytics::{AnalyticsSink, SearchEvent};
use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::merge::merge_candidates;
use crate::query::SearchQuery;
use crate::result::{SearchResult, SearchResultPage};
use crate::retrieve::{retrieve_kind, RetrieverContext};


/// The unified search engine.
///
/// Stateless between requests: everything a search touches is either the
/// request itself or an injected read-only collaborator. Cloning is cheap
/// (all collaborators sit behind `Arc`).
#[derive(Clone)]
pub struct SearchEngine {
    catalog: Arc<dyn CatalogProvider>,
    clock: Arc<dyn Clock>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    cfg: EngineConfig,
}

impl SearchEngine {
    /// Build an engine with the default configuration and system clock.
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: Arc<dyn CatalogProvider>, cfg: EngineConfig) -> Self {
        Self {
            catalog,
            clock: Arc::new(SystemClock),
            analytics: None,
            cfg,
        }
    }

    /// Replace the availability clock (tests pin a `FixedClock`).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Install the analytics collaborator. Without one, no events are
    /// emitted.
    pub fn with_analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(sink);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Run one search request end to end.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchResultPage, SearchError> {
        let started = Instant::now();
        self.cfg.thresholds.validate()?;

        let normalizer = Normalizer::new(self.cfg.normalizer.clone());
        let mut query = query;
        query.normalized_text = normalizer.normalize(&query.raw_text);
        query.validate()?;

        let kinds = query.requested_kinds();
        let ctx = Arc::new(RetrieverContext {
            catalog: Arc::clone(&self.catalog),
            clock: Arc::clone(&self.clock),
            normalizer,
            thresholds: self.cfg.thresholds,
            weights: self.cfg.weights,
        });
        let query = Arc::new(query);

        // One task per kind; each writes into its own candidate list, so
        // there is no ordering dependency between kinds.
        let mut tasks = JoinSet::new();
        for kind in kinds.iter().copied() {
            let ctx = Arc::clone(&ctx);
            let query = Arc::clone(&query);
            tasks.spawn(async move { (kind, retrieve_kind(ctx, query, kind).await) });
        }

        let deadline = tokio::time::Instant::now() + self.cfg.timeout();
        let mut candidates = Vec::new();
        let mut partial = false;
        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Ok(None) => break,
                Ok(Some(Ok((kind, Ok(found))))) => {
                    debug!(kind = %kind, count = found.len(), "kind retrieval complete");
                    candidates.extend(found);
                }
                Ok(Some(Ok((kind, Err(err))))) => {
                    warn!(kind = %kind, error = %err, "kind degraded, contributing zero candidates");
                    partial = true;
                }
                Ok(Some(Err(join_err))) => {
                    warn!(error = %join_err, "retriever task failed to join");
                    partial = true;
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.cfg.timeout_ms,
                        "search deadline elapsed, returning completed kinds only"
                    );
                    partial = true;
                    tasks.abort_all();
                    break;
                }
            }
        }

        let (page_candidates, total_count, has_more) =
            merge_candidates(candidates, query.limit, query.offset);
        let results: Vec<SearchResult> = page_candidates.iter().map(SearchResult::from).collect();
        let execution_time_ms = started.elapsed().as_millis() as u64;

        let page = SearchResultPage {
            results,
            total_count,
            has_more,
            partial,
            execution_time_ms,
            query: (*query).clone(),
        };

        self.emit_event(&page, &kinds);
        Ok(page)
    }

    /// Fire-and-forget event emission; never holds the response path open.
    fn emit_event(&self, page: &SearchResultPage, kinds: &[EntityKind]) {
        let Some(sink) = &self.analytics else {
            return;
        };

        let kind = kinds
            .iter()
            .map(EntityKind::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let query = &page.query;
        let event = SearchEvent {
            user_id: query.user_id.clone(),
            query: query.raw_text.clone(),
            kind,
            result_count: page.total_count,
            filters: json!({
                "veg_only": query.veg_only,
                "max_price": query.max_price,
                "radius_km": query.radius_km,
                "fuzzy_enabled": query.fuzzy_enabled,
            }),
            location: query.origin,
            occurred_at: self.clock.now(),
        };

        let sink = Arc::clone(sink);
        tokio::spawn(async move {
            if let Err(err) = sink.record(event).await {
                warn!(error = %err, "analytics emit failed, dropping event");
            }
        });
    }
}
