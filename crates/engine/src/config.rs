//! Engine configuration: normalization policy, fuzzy thresholds, the
//! per-kind relevance weight table, and the overall retrieval deadline.

use std::time::Duration;

use catalog::EntityKind;
use serde::{Deserialize, Serialize};
use textmatch::{FuzzyThresholds, NormalizerConfig};

/// Smallest radius a query may ask for, in kilometers.
pub const RADIUS_MIN_KM: f64 = 0.1;
/// Largest radius a query may ask for, in kilometers.
pub const RADIUS_MAX_KM: f64 = 50.0;

/// Linear weights applied to one kind's match signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct KindWeights {
    pub exact: f32,
    pub fuzzy: f32,
    pub rating: f32,
    /// Weight on `1 / (distance_km + 1)`.
    pub proximity: f32,
}

impl KindWeights {
    /// Weights for a kind scored on text signals alone.
    pub const fn text_only(exact: f32, fuzzy: f32) -> Self {
        Self {
            exact,
            fuzzy,
            rating: 0.0,
            proximity: 0.0,
        }
    }
}

/// Per-kind relevance weight table.
///
/// Scores are deliberately not normalized across kinds; the defaults are the
/// table the product ranking was tuned against. Deployments wanting strict
/// cross-kind comparability should rescale per kind before merging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RelevanceWeights {
    pub vendor: KindWeights,
    pub item: KindWeights,
    pub category: KindWeights,
}

impl RelevanceWeights {
    pub fn for_kind(&self, kind: EntityKind) -> &KindWeights {
        match kind {
            EntityKind::Vendor => &self.vendor,
            EntityKind::Item => &self.item,
            EntityKind::Category => &self.category,
        }
    }
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            vendor: KindWeights {
                exact: 3.0,
                fuzzy: 2.0,
                rating: 0.5,
                proximity: 0.3,
            },
            // Item and category ranking leans on name similarity; distance
            // is already a hard filter upstream for items, so no proximity
            // term.
            item: KindWeights::text_only(2.0, 3.0),
            category: KindWeights::text_only(2.0, 3.0),
        }
    }
}

/// Engine-wide configuration, cheap to clone and serde-friendly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub thresholds: FuzzyThresholds,
    #[serde(default)]
    pub weights: RelevanceWeights,
    /// Overall retrieval deadline. Kinds that miss it contribute zero
    /// candidates and the response is marked partial.
    #[serde(default = "EngineConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl EngineConfig {
    pub(crate) fn default_timeout_ms() -> u64 {
        2_000
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_thresholds(mut self, thresholds: FuzzyThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_weights(mut self, weights: RelevanceWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            thresholds: FuzzyThresholds::default(),
            weights: RelevanceWeights::default(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}
