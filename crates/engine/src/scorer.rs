//! Relevance scoring.
//!
//! One comparable float per candidate, computed as a linear combination of
//! the kind's weight row over the raw signals. Deterministic for a given
//! (signals, weight table) pair; the scorer only ever sees candidates that
//! already passed their kind's hard filters.

use catalog::EntityKind;

use crate::candidate::MatchSignals;
use crate::config::RelevanceWeights;

/// Compute the relevance score for one candidate's signals.
///
/// Absent signals contribute 0. The proximity term is `w / (distance + 1)`,
/// so it decays smoothly instead of cliff-dropping at the radius edge (the
/// radius itself is a hard filter upstream).
pub fn score(kind: EntityKind, signals: &MatchSignals, weights: &RelevanceWeights) -> f32 {
    let w = weights.for_kind(kind);
    let exact = signals.exact_rank.unwrap_or(0.0);
    let fuzzy = signals.fuzzy_similarity.unwrap_or(0.0);
    let proximity = signals
        .distance_km
        .map_or(0.0, |d| (1.0 / (d + 1.0)) as f32);

    w.exact * exact + w.fuzzy * fuzzy + w.rating * signals.rating + w.proximity * proximity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals() -> MatchSignals {
        MatchSignals {
            exact_rank: Some(1.0),
            fuzzy_similarity: Some(0.5),
            matched_field: Some("name"),
            distance_km: Some(1.0),
            rating: 4.0,
        }
    }

    #[test]
    fn vendor_formula_combines_all_terms() {
        let weights = RelevanceWeights::default();
        let got = score(EntityKind::Vendor, &signals(), &weights);
        // 3.0*1.0 + 2.0*0.5 + 0.5*4.0 + 0.3*(1/2)
        assert!((got - 6.15).abs() < 1e-6, "got {got}");
    }

    #[test]
    fn item_formula_ignores_rating_and_distance() {
        let weights = RelevanceWeights::default();
        let got = score(EntityKind::Item, &signals(), &weights);
        // 2.0*1.0 + 3.0*0.5
        assert!((got - 3.5).abs() < 1e-6, "got {got}");
    }

    #[test]
    fn category_formula_matches_item_weights() {
        let weights = RelevanceWeights::default();
        let item = score(EntityKind::Item, &signals(), &weights);
        let category = score(EntityKind::Category, &signals(), &weights);
        assert_eq!(item, category);
    }

    #[test]
    fn missing_signals_contribute_zero() {
        let weights = RelevanceWeights::default();
        let empty = MatchSignals::default();
        assert_eq!(score(EntityKind::Vendor, &empty, &weights), 0.0);

        let browse = MatchSignals {
            rating: 4.0,
            distance_km: Some(1.0),
            ..Default::default()
        };
        let got = score(EntityKind::Vendor, &browse, &weights);
        assert!((got - (0.5 * 4.0 + 0.3 * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn zero_distance_maximizes_proximity_term() {
        let weights = RelevanceWeights::default();
        let near = MatchSignals {
            distance_km: Some(0.0),
            ..Default::default()
        };
        let far = MatchSignals {
            distance_km: Some(10.0),
            ..Default::default()
        };
        assert!(
            score(EntityKind::Vendor, &near, &weights) > score(EntityKind::Vendor, &far, &weights)
        );
    }

    #[test]
    fn scoring_is_deterministic() {
        let weights = RelevanceWeights::default();
        let s = signals();
        assert_eq!(
            score(EntityKind::Vendor, &s, &weights),
            score(EntityKind::Vendor, &s, &weights)
        );
    }
}
