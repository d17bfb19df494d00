//! Fuzzy matching over a weighted corpus.
//!
//! Runs the trigram scorer against each corpus field and keeps the single
//! best field that clears its role's threshold. A field's similarity is the
//! best of the whole field and each of its tokens, so a short query still
//! matches one word of a longer field ("bir" against "biryani house" scores
//! against "biryani"). Callers pass the field the exact matcher already
//! claimed so the fuzzy path only reports additional signal.

use catalog::CorpusField;

use crate::config::FuzzyThresholds;
use crate::trigram;

/// Best fuzzy match of a query against one entity's corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    /// Label of the winning corpus field.
    pub field: &'static str,
    /// Trigram similarity in [0, 1].
    pub similarity: f32,
}

/// Per-field trigram similarity against role-specific thresholds.
///
/// `query` and the corpus texts must be normalized with the same
/// [`Normalizer`](crate::Normalizer). `skip_field` names a field already
/// consumed by the exact path. Returns `None` when no remaining field
/// clears its threshold.
pub fn fuzzy_match(
    query: &str,
    corpus: &[CorpusField],
    thresholds: &FuzzyThresholds,
    skip_field: Option<&str>,
) -> Option<FuzzyMatch> {
    if query.is_empty() {
        return None;
    }

    let mut best: Option<FuzzyMatch> = None;
    for field in corpus {
        if skip_field == Some(field.field) {
            continue;
        }

        let similarity = field_similarity(query, &field.text);
        if similarity < thresholds.for_role(field.role) {
            continue;
        }
        if best.map_or(true, |b| similarity > b.similarity) {
            best = Some(FuzzyMatch {
                field: field.field,
                similarity,
            });
        }
    }

    best
}

/// Best trigram similarity of the query against the whole field text and
/// against each of its whitespace tokens.
fn field_similarity(query: &str, text: &str) -> f32 {
    let mut best = trigram::similarity(query, text);
    for token in text.split_whitespace() {
        let sim = trigram::similarity(query, token);
        if sim > best {
            best = sim;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::FieldRole;

    fn corpus() -> Vec<CorpusField> {
        vec![
            CorpusField {
                field: "name",
                role: FieldRole::Name,
                text: "biryani house".into(),
                weight: 3.0,
            },
            CorpusField {
                field: "ingredients",
                role: FieldRole::Secondary,
                text: "basmati rice saffron chicken".into(),
                weight: 1.5,
            },
        ]
    }

    #[test]
    fn typo_clears_name_threshold() {
        let m = fuzzy_match("birynai", &corpus(), &FuzzyThresholds::default(), None)
            .expect("fuzzy match");
        assert_eq!(m.field, "name");
        assert!(m.similarity >= 0.1);
    }

    #[test]
    fn below_threshold_returns_none() {
        assert!(fuzzy_match("xyzzy", &corpus(), &FuzzyThresholds::default(), None).is_none());
    }

    #[test]
    fn skip_field_excludes_exact_matched_field() {
        let thresholds = FuzzyThresholds::default();
        let with_name = fuzzy_match("biryani house", &corpus(), &thresholds, None).expect("match");
        assert_eq!(with_name.field, "name");

        let skipped = fuzzy_match("biryani house", &corpus(), &thresholds, Some("name"));
        // Only the ingredients field remains, and it is far from the query.
        assert!(skipped.is_none());
    }

    #[test]
    fn best_of_multiple_clearing_fields_wins() {
        let thresholds = FuzzyThresholds {
            name: 0.0,
            description: 0.0,
            secondary: 0.0,
        };
        let m = fuzzy_match("saffron rice", &corpus(), &thresholds, None).expect("match");
        assert_eq!(m.field, "ingredients");
    }

    #[test]
    fn empty_query_never_matches() {
        assert!(fuzzy_match("", &corpus(), &FuzzyThresholds::default(), None).is_none());
    }

    #[test]
    fn short_query_scores_against_best_token_of_field() {
        // Whole-field similarity of "bir" vs "biryani house" is below the
        // name threshold; the "biryani" token carries it over.
        let m = fuzzy_match("bir", &corpus(), &FuzzyThresholds::default(), None)
            .expect("fuzzy match");
        assert_eq!(m.field, "name");
        assert!((m.similarity - 0.2).abs() < 1e-6);
    }

    #[test]
    fn raised_threshold_suppresses_weak_matches() {
        let strict = FuzzyThresholds {
            name: 0.9,
            ..Default::default()
        };
        assert!(fuzzy_match("bir", &corpus(), &strict, None).is_none());
    }
}
