//! Catalog snapshot provider seam.
//!
//! The engine never owns entity records; it asks a [`CatalogProvider`] for a
//! read-only snapshot per request. Providers may use [`FetchHints`] to
//! pre-narrow what they return, but the engine always re-applies its hard
//! filters; hints are an optimization, never a contract.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::entity::{Category, EntityId, EntityKind, Item, SearchableEntity, Vendor};
use crate::error::CatalogError;
use crate::geo::GeoPoint;

/// Advisory pre-filters passed to a provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchHints {
    pub origin: Option<GeoPoint>,
    pub radius_km: Option<f64>,
    /// Restrict item fetches to these vendors, when known.
    pub vendor_ids: Option<Vec<EntityId>>,
}

impl FetchHints {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_vendor_ids(mut self, vendor_ids: Vec<EntityId>) -> Self {
        self.vendor_ids = Some(vendor_ids);
        self
    }
}

/// Read-only source of entity snapshots.
///
/// Implementations are free to back this with anything (a service client, a
/// cache, a database) as long as a call returns a consistent snapshot for
/// one request. The engine imposes no pagination contract and performs no
/// query optimization of its own.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_candidates(
        &self,
        kind: EntityKind,
        hints: &FetchHints,
    ) -> Result<Vec<SearchableEntity>, CatalogError>;
}

/// An in-memory provider over `RwLock`-guarded vectors.
///
/// Useful for tests and embedded deployments. Honors the `vendor_ids` hint
/// on item fetches; other hints are ignored (the engine re-checks anyway).
#[derive(Default)]
pub struct InMemoryCatalog {
    vendors: RwLock<Vec<Vendor>>,
    items: RwLock<Vec<Item>>,
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vendor(&self, vendor: Vendor) {
        if let Ok(mut vendors) = self.vendors.write() {
            vendors.push(vendor);
        }
    }

    pub fn add_item(&self, item: Item) {
        if let Ok(mut items) = self.items.write() {
            items.push(item);
        }
    }

    pub fn add_category(&self, category: Category) {
        if let Ok(mut categories) = self.categories.write() {
            categories.push(category);
        }
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn fetch_candidates(
        &self,
        kind: EntityKind,
        hints: &FetchHints,
    ) -> Result<Vec<SearchableEntity>, CatalogError> {
        match kind {
            EntityKind::Vendor => {
                let vendors = self
                    .vendors
                    .read()
                    .map_err(|_| CatalogError::unavailable("vendor store poisoned"))?;
                Ok(vendors
                    .iter()
                    .cloned()
                    .map(SearchableEntity::Vendor)
                    .collect())
            }
            EntityKind::Item => {
                let items = self
                    .items
                    .read()
                    .map_err(|_| CatalogError::unavailable("item store poisoned"))?;
                let restrict: Option<HashSet<&str>> = hints
                    .vendor_ids
                    .as_ref()
                    .map(|ids| ids.iter().map(String::as_str).collect());
                Ok(items
                    .iter()
                    .filter(|item| {
                        restrict
                            .as_ref()
                            .map_or(true, |ids| ids.contains(item.vendor_id.as_str()))
                    })
                    .cloned()
                    .map(SearchableEntity::Item)
                    .collect())
            }
            EntityKind::Category => {
                let categories = self
                    .categories
                    .read()
                    .map_err(|_| CatalogError::unavailable("category store poisoned"))?;
                Ok(categories
                    .iter()
                    .cloned()
                    .map(SearchableEntity::Category)
                    .collect())
            }
        }
    }
}
