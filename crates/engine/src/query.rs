//! Search query model and validation.

use catalog::{EntityKind, GeoPoint};
use serde::{Deserialize, Serialize};

use crate::config::{RADIUS_MAX_KM, RADIUS_MIN_KM};
use crate::error::SearchError;

/// One search request.
///
/// `normalized_text` is filled in by the engine before validation so that
/// the echoed query on the result page shows exactly what was matched
/// against. Everything else is caller-supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    pub raw_text: String,
    /// Engine-normalized form of `raw_text`; ignored on input.
    #[serde(default)]
    pub normalized_text: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub origin: Option<GeoPoint>,
    #[serde(default)]
    pub radius_km: Option<f64>,
    /// Requested kinds; empty means all kinds.
    #[serde(default)]
    pub kinds: Vec<EntityKind>,
    /// Item filter: only vegetarian items.
    #[serde(default)]
    pub veg_only: bool,
    /// Item filter: price ceiling.
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default = "SearchQuery::default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    /// Whether the fuzzy path may widen candidacy beyond exact matches.
    #[serde(default = "SearchQuery::default_fuzzy_enabled")]
    pub fuzzy_enabled: bool,
}

impl SearchQuery {
    pub(crate) fn default_limit() -> usize {
        20
    }

    pub(crate) fn default_fuzzy_enabled() -> bool {
        true
    }

    pub fn new<S: Into<String>>(raw_text: S) -> Self {
        Self {
            raw_text: raw_text.into(),
            normalized_text: String::new(),
            user_id: None,
            origin: None,
            radius_km: None,
            kinds: Vec::new(),
            veg_only: false,
            max_price: None,
            limit: Self::default_limit(),
            offset: 0,
            fuzzy_enabled: Self::default_fuzzy_enabled(),
        }
    }

    pub fn with_user<S: Into<String>>(mut self, user_id: S) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_origin(mut self, origin: GeoPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    pub fn with_kinds<I: IntoIterator<Item = EntityKind>>(mut self, kinds: I) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    pub fn with_veg_only(mut self, veg_only: bool) -> Self {
        self.veg_only = veg_only;
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn without_fuzzy(mut self) -> Self {
        self.fuzzy_enabled = false;
        self
    }

    /// The kinds to fan out to, deduplicated in request order; an empty
    /// request means every kind.
    pub fn requested_kinds(&self) -> Vec<EntityKind> {
        if self.kinds.is_empty() {
            return EntityKind::ALL.to_vec();
        }
        let mut seen = Vec::with_capacity(self.kinds.len());
        for kind in &self.kinds {
            if !seen.contains(kind) {
                seen.push(*kind);
            }
        }
        seen
    }

    /// Reject queries the engine cannot answer. Runs after normalization and
    /// before any retrieval.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.normalized_text.is_empty() && self.origin.is_none() {
            return Err(SearchError::invalid_query(
                "query text or an origin location is required",
            ));
        }
        if let Some(origin) = self.origin {
            if !origin.is_valid() {
                return Err(SearchError::invalid_query(format!(
                    "origin ({}, {}) is out of range",
                    origin.lat, origin.lon
                )));
            }
        }
        if let Some(radius) = self.radius_km {
            if self.origin.is_none() {
                return Err(SearchError::invalid_query(
                    "radius_km requires an origin location",
                ));
            }
            if !(RADIUS_MIN_KM..=RADIUS_MAX_KM).contains(&radius) {
                return Err(SearchError::invalid_query(format!(
                    "radius_km must be within [{RADIUS_MIN_KM}, {RADIUS_MAX_KM}], got {radius}"
                )));
            }
        }
        Ok(())
    }
}
