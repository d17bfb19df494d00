//! Trigram (3-character shingle) similarity.
//!
//! Similarity is the Jaccard ratio over the *multisets* of overlapping
//! 3-character shingles of both inputs. Multisets (rather than sets) keep
//! repeated substrings from inflating similarity between strings that share
//! one repeated fragment. Inputs shorter than three characters have a
//! degenerate shingle set, so they fall back to substring containment.
//!
//! Both inputs are expected to be normalized already; the function itself
//! never lowercases or trims.

use fxhash::FxHashMap;

/// Jaccard similarity of the trigram multisets of `a` and `b`, in [0, 1].
///
/// Symmetric, deterministic, and `similarity(a, a) == 1.0` for non-empty
/// `a`. An empty input always yields 0.0. When either input is shorter than
/// three characters, returns 1.0 iff the shorter string is a substring of
/// the longer, else 0.0.
pub fn similarity(a: &str, b: &str) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len() < 3 || b_chars.len() < 3 {
        let (short, long) = if a_chars.len() <= b_chars.len() {
            (a, b)
        } else {
            (b, a)
        };
        return if long.contains(short) { 1.0 } else { 0.0 };
    }

    let counts_a = shingle_counts(&a_chars);
    let counts_b = shingle_counts(&b_chars);
    let total_a = a_chars.len() - 2;
    let total_b = b_chars.len() - 2;

    let mut intersection = 0usize;
    for (shingle, count_a) in &counts_a {
        if let Some(count_b) = counts_b.get(shingle) {
            intersection += (*count_a).min(*count_b);
        }
    }

    // Multiset union size = |A| + |B| - |A ∩ B|.
    let union = total_a + total_b - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

/// Count occurrences of each overlapping 3-character window.
fn shingle_counts(chars: &[char]) -> FxHashMap<[char; 3], usize> {
    let mut counts = FxHashMap::default();
    for window in chars.windows(3) {
        *counts.entry([window[0], window[1], window[2]]).or_insert(0) += 1;
    }
    counts
}
