//! Per-kind retrieval.
//!
//! Each retriever takes the query plus one kind's entity snapshots and emits
//! zero or one [`Candidate`] per entity: textual candidacy (exact OR fuzzy),
//! hard filters, and (for geo-bound kinds) distance via the geo utility.
//! Retrievers share no mutable state, so the orchestrator may run them
//! sequentially or in parallel without coordination.
//!
//! Item retrieval is two-phase: vendors inside the radius are resolved first
//! (through the same geo rule the vendor retriever uses, so the radius rule
//! is defined exactly once), then item matching is restricted to that vendor
//! subset. This bounds fuzzy-similarity cost to items of nearby vendors
//! instead of the whole catalog.

use std::collections::HashMap;
use std::sync::Arc;

use catalog::{
    distance_km, CatalogProvider, Clock, EntityId, EntityKind, FetchHints, GeoPoint,
    SearchableEntity, Vendor,
};
use textmatch::{exact_match, fuzzy_match, FuzzyThresholds, Normalizer};
use tracing::debug;

use crate::candidate::{Candidate, MatchSignals};
use crate::config::RelevanceWeights;
use crate::error::SearchError;
use crate::query::SearchQuery;
use crate::scorer;

/// Everything a retriever needs, shared across the per-kind tasks.
pub(crate) struct RetrieverContext {
    pub catalog: Arc<dyn CatalogProvider>,
    pub clock: Arc<dyn Clock>,
    pub normalizer: Normalizer,
    pub thresholds: FuzzyThresholds,
    pub weights: RelevanceWeights,
}

/// Run the retriever for one kind.
pub(crate) async fn retrieve_kind(
    ctx: Arc<RetrieverContext>,
    query: Arc<SearchQuery>,
    kind: EntityKind,
) -> Result<Vec<Candidate>, SearchError> {
    match kind {
        EntityKind::Vendor => retrieve_vendors(&ctx, &query).await,
        EntityKind::Item => retrieve_items(&ctx, &query).await,
        EntityKind::Category => retrieve_categories(&ctx, &query).await,
    }
}

/// Text signals for one entity, or `None` when the entity is not a textual
/// candidate.
#[derive(Debug, Clone, Copy, Default)]
struct TextSignals {
    exact_rank: Option<f32>,
    fuzzy_similarity: Option<f32>,
    matched_field: Option<&'static str>,
}

/// Textual candidacy: exact OR fuzzy (when enabled). An empty normalized
/// query grants candidacy with no text signals to geo-bound kinds searched
/// with an origin (browse mode); everything else needs a real match.
fn match_text(
    ctx: &RetrieverContext,
    query: &SearchQuery,
    entity: &SearchableEntity,
) -> Option<TextSignals> {
    if query.normalized_text.is_empty() {
        if entity.kind().is_geo_bound() && query.origin.is_some() {
            return Some(TextSignals::default());
        }
        return None;
    }

    let corpus = ctx.normalizer.normalize_corpus(entity.corpus());
    let exact = exact_match(&query.normalized_text, &corpus);
    let fuzzy = if query.fuzzy_enabled {
        fuzzy_match(
            &query.normalized_text,
            &corpus,
            &ctx.thresholds,
            exact.map(|e| e.field),
        )
    } else {
        None
    };

    if exact.is_none() && fuzzy.is_none() {
        return None;
    }
    Some(TextSignals {
        exact_rank: exact.map(|e| e.rank),
        fuzzy_similarity: fuzzy.map(|f| f.similarity),
        matched_field: exact.map(|e| e.field).or(fuzzy.map(|f| f.field)),
    })
}

/// The vendor radius rule, defined exactly once.
///
/// `None` means the vendor falls outside the requested radius. Otherwise the
/// inner value is the rounded distance from the origin, when one was given.
pub(crate) fn vendor_geo_pass(
    vendor: &Vendor,
    origin: Option<GeoPoint>,
    radius_km: Option<f64>,
) -> Option<Option<f64>> {
    let Some(origin) = origin else {
        return Some(None);
    };
    let distance = distance_km(origin, vendor.location);
    match radius_km {
        Some(radius) if distance > radius => None,
        _ => Some(Some(distance)),
    }
}

async fn retrieve_vendors(
    ctx: &RetrieverContext,
    query: &SearchQuery,
) -> Result<Vec<Candidate>, SearchError> {
    let hints = FetchHints {
        origin: query.origin,
        radius_km: query.radius_km,
        vendor_ids: None,
    };
    let entities = ctx
        .catalog
        .fetch_candidates(EntityKind::Vendor, &hints)
        .await
        .map_err(|source| SearchError::CatalogUnavailable {
            kind: EntityKind::Vendor,
            source,
        })?;

    let mut candidates = Vec::new();
    for entity in &entities {
        let Some(vendor) = entity.as_vendor() else {
            continue;
        };
        if !vendor.is_open(ctx.clock.as_ref()) {
            continue;
        }
        let Some(distance) = vendor_geo_pass(vendor, query.origin, query.radius_km) else {
            continue;
        };
        let Some(text) = match_text(ctx, query, entity) else {
            continue;
        };

        let signals = MatchSignals {
            exact_rank: text.exact_rank,
            fuzzy_similarity: text.fuzzy_similarity,
            matched_field: text.matched_field,
            distance_km: distance,
            rating: vendor.rating,
        };
        let score = scorer::score(EntityKind::Vendor, &signals, &ctx.weights);
        candidates.push(Candidate {
            id: vendor.id.clone(),
            kind: EntityKind::Vendor,
            name: vendor.name.clone(),
            signals,
            score,
        });
    }

    debug!(count = candidates.len(), "vendor retrieval complete");
    Ok(candidates)
}

async fn retrieve_items(
    ctx: &RetrieverContext,
    query: &SearchQuery,
) -> Result<Vec<Candidate>, SearchError> {
    // Phase 1: resolve the vendor subset inside the radius, with distances.
    let vendor_distances: Option<HashMap<EntityId, f64>> = if query.origin.is_some() {
        let hints = FetchHints {
            origin: query.origin,
            radius_km: query.radius_km,
            vendor_ids: None,
        };
        let vendors = ctx
            .catalog
            .fetch_candidates(EntityKind::Vendor, &hints)
            .await
            .map_err(|source| SearchError::CatalogUnavailable {
                kind: EntityKind::Item,
                source,
            })?;

        let mut distances = HashMap::new();
        for entity in &vendors {
            if let Some(vendor) = entity.as_vendor() {
                if let Some(Some(distance)) =
                    vendor_geo_pass(vendor, query.origin, query.radius_km)
                {
                    distances.insert(vendor.id.clone(), distance);
                }
            }
        }
        Some(distances)
    } else {
        None
    };

    // Phase 2: match items, restricted to the resolved vendors.
    let hints = FetchHints {
        origin: query.origin,
        radius_km: query.radius_km,
        vendor_ids: vendor_distances
            .as_ref()
            .map(|distances| distances.keys().cloned().collect()),
    };
    let entities = ctx
        .catalog
        .fetch_candidates(EntityKind::Item, &hints)
        .await
        .map_err(|source| SearchError::CatalogUnavailable {
            kind: EntityKind::Item,
            source,
        })?;

    let mut candidates = Vec::new();
    for entity in &entities {
        let Some(item) = entity.as_item() else {
            continue;
        };
        if !item.is_available {
            continue;
        }
        if query.veg_only && !item.is_veg {
            continue;
        }
        if let Some(ceiling) = query.max_price {
            if item.price > ceiling {
                continue;
            }
        }
        // Items inherit their vendor's distance; a vendor absent from the
        // phase-1 map is outside the radius, so its items never surface.
        let distance = match &vendor_distances {
            Some(distances) => match distances.get(&item.vendor_id) {
                Some(d) => Some(*d),
                None => continue,
            },
            None => None,
        };
        let Some(text) = match_text(ctx, query, entity) else {
            continue;
        };

        let signals = MatchSignals {
            exact_rank: text.exact_rank,
            fuzzy_similarity: text.fuzzy_similarity,
            matched_field: text.matched_field,
            distance_km: distance,
            rating: item.rating,
        };
        let score = scorer::score(EntityKind::Item, &signals, &ctx.weights);
        candidates.push(Candidate {
            id: item.id.clone(),
            kind: EntityKind::Item,
            name: item.name.clone(),
            signals,
            score,
        });
    }

    debug!(count = candidates.len(), "item retrieval complete");
    Ok(candidates)
}

async fn retrieve_categories(
    ctx: &RetrieverContext,
    query: &SearchQuery,
) -> Result<Vec<Candidate>, SearchError> {
    let entities = ctx
        .catalog
        .fetch_candidates(EntityKind::Category, &FetchHints::none())
        .await
        .map_err(|source| SearchError::CatalogUnavailable {
            kind: EntityKind::Category,
            source,
        })?;

    let mut candidates = Vec::new();
    for entity in &entities {
        let Some(category) = entity.as_category() else {
            continue;
        };
        let Some(text) = match_text(ctx, query, entity) else {
            continue;
        };

        let signals = MatchSignals {
            exact_rank: text.exact_rank,
            fuzzy_similarity: text.fuzzy_similarity,
            matched_field: text.matched_field,
            distance_km: None,
            rating: 0.0,
        };
        let score = scorer::score(EntityKind::Category, &signals, &ctx.weights);
        candidates.push(Candidate {
            id: category.id.clone(),
            kind: EntityKind::Category,
            name: category.name.clone(),
            signals,
            score,
        });
    }

    debug!(count = candidates.len(), "category retrieval complete");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Category, FixedClock, InMemoryCatalog, Item, OpeningHours};
    use chrono::{TimeZone, Utc};

    fn noon_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
        ))
    }

    fn test_ctx(catalog: Arc<InMemoryCatalog>) -> Arc<RetrieverContext> {
        Arc::new(RetrieverContext {
            catalog,
            clock: noon_clock(),
            normalizer: Normalizer::default(),
            thresholds: FuzzyThresholds::default(),
            weights: RelevanceWeights::default(),
        })
    }

    fn vendor(id: &str, name: &str, lat: f64, lon: f64) -> Vendor {
        Vendor {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cuisines: Vec::new(),
            rating: 4.0,
            is_active: true,
            hours: Some(OpeningHours::new(9 * 60, 22 * 60)),
            location: GeoPoint::new(lat, lon),
        }
    }

    fn item(id: &str, vendor_id: &str, name: &str) -> Item {
        Item {
            id: id.into(),
            vendor_id: vendor_id.into(),
            name: name.into(),
            description: String::new(),
            ingredients: Vec::new(),
            rating: 4.2,
            is_available: true,
            is_veg: true,
            price: 200.0,
        }
    }

    fn query(text: &str) -> SearchQuery {
        let normalizer = Normalizer::default();
        let mut q = SearchQuery::new(text);
        q.normalized_text = normalizer.normalize(text);
        q
    }

    #[test]
    fn geo_pass_without_origin_passes_with_no_distance() {
        let v = vendor("v-1", "Biryani House", 12.9, 77.6);
        assert_eq!(vendor_geo_pass(&v, None, None), Some(None));
        // A radius without an origin is rejected at validation; the geo
        // rule itself just ignores it.
        assert_eq!(vendor_geo_pass(&v, None, Some(5.0)), Some(None));
    }

    #[test]
    fn geo_pass_enforces_radius() {
        let v = vendor("v-1", "Biryani House", 12.9, 77.6);
        let near_origin = GeoPoint::new(12.91, 77.6);
        let far_origin = GeoPoint::new(13.5, 77.6);

        let passed = vendor_geo_pass(&v, Some(near_origin), Some(5.0));
        assert!(matches!(passed, Some(Some(d)) if d > 0.0 && d <= 5.0));
        assert_eq!(vendor_geo_pass(&v, Some(far_origin), Some(5.0)), None);
        // No radius: distance still computed for scoring.
        assert!(matches!(
            vendor_geo_pass(&v, Some(far_origin), None),
            Some(Some(_))
        ));
    }

    #[tokio::test]
    async fn closed_vendor_never_becomes_a_candidate() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.add_vendor(Vendor {
            hours: Some(OpeningHours::new(18 * 60, 23 * 60)),
            ..vendor("v-closed", "Biryani House", 12.9, 77.6)
        });
        catalog.add_vendor(vendor("v-open", "Biryani Palace", 12.9, 77.6));

        let ctx = test_ctx(catalog);
        let got = retrieve_vendors(&ctx, &query("biryani")).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "v-open");
    }

    #[tokio::test]
    async fn fuzzy_disabled_narrows_to_exact_matches() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.add_vendor(vendor("v-1", "Biryani House", 12.9, 77.6));

        let ctx = test_ctx(catalog);
        let fuzzy_hits = retrieve_vendors(&ctx, &query("biryni")).await.unwrap();
        assert_eq!(fuzzy_hits.len(), 1);

        let exact_only = retrieve_vendors(&ctx, &query("biryni").without_fuzzy())
            .await
            .unwrap();
        assert!(exact_only.is_empty());
    }

    #[tokio::test]
    async fn items_of_out_of_radius_vendors_are_dropped() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.add_vendor(vendor("v-near", "Near Kitchen", 12.90, 77.60));
        catalog.add_vendor(vendor("v-far", "Far Kitchen", 13.90, 77.60));
        catalog.add_item(item("i-near", "v-near", "Paneer Biryani"));
        catalog.add_item(item("i-far", "v-far", "Paneer Biryani Special"));

        let ctx = test_ctx(catalog);
        let q = query("biryani")
            .with_origin(GeoPoint::new(12.9, 77.6))
            .with_radius_km(5.0);
        let got = retrieve_items(&ctx, &q).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "i-near");
        assert!(got[0].signals.distance_km.is_some());
    }

    #[tokio::test]
    async fn item_hard_filters_apply_before_scoring() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.add_vendor(vendor("v-1", "Kitchen", 12.9, 77.6));
        catalog.add_item(Item {
            is_veg: false,
            ..item("i-nonveg", "v-1", "Chicken Biryani")
        });
        catalog.add_item(Item {
            price: 900.0,
            ..item("i-pricey", "v-1", "Gold Leaf Biryani")
        });
        catalog.add_item(Item {
            is_available: false,
            ..item("i-out", "v-1", "Seasonal Biryani")
        });
        catalog.add_item(item("i-ok", "v-1", "Veg Biryani"));

        let ctx = test_ctx(catalog);
        let q = query("biryani").with_veg_only(true).with_max_price(500.0);
        let got = retrieve_items(&ctx, &q).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "i-ok");
    }

    #[tokio::test]
    async fn browse_mode_returns_geo_bound_kinds_without_text() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.add_vendor(vendor("v-1", "Biryani House", 12.9, 77.6));
        catalog.add_item(item("i-1", "v-1", "Veg Biryani"));
        catalog.add_category(Category {
            id: "c-1".into(),
            name: "Biryani".into(),
            description: String::new(),
        });

        let ctx = test_ctx(catalog);
        let q = query("").with_origin(GeoPoint::new(12.9, 77.6));

        let vendors = retrieve_vendors(&ctx, &q).await.unwrap();
        assert_eq!(vendors.len(), 1);
        assert!(vendors[0].signals.exact_rank.is_none());
        assert!(vendors[0].signals.fuzzy_similarity.is_none());

        let items = retrieve_items(&ctx, &q).await.unwrap();
        assert_eq!(items.len(), 1);

        // Categories are not geo-bound; an empty query matches none.
        let categories = retrieve_categories(&ctx, &q).await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn category_retrieval_has_no_geo_step() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.add_category(Category {
            id: "c-1".into(),
            name: "Biryani".into(),
            description: "rice dishes".into(),
        });

        let ctx = test_ctx(catalog);
        let got = retrieve_categories(&ctx, &query("biryani")).await.unwrap();
        assert_eq!(got.len(), 1);
        assert!(got[0].signals.distance_km.is_none());
        assert_eq!(got[0].signals.rating, 0.0);
    }
}
