//! Souk text-matching layer.
//!
//! This crate turns query text and entity corpus fields into comparable,
//! typo-tolerant match signals. Everything here is a pure function of its
//! inputs: no I/O, no clock, no locale dependence.
//!
//! ## Pipeline
//!
//! - [`Normalizer`] — casefold, punctuation handling outside a configured
//!   keep-set, whitespace collapsing, NFKC. Applied identically to query
//!   text and every corpus field, so comparisons are always
//!   normalized-vs-normalized.
//! - [`trigram::similarity`] — multiset Jaccard over overlapping 3-character
//!   shingles, with a substring-containment fallback for short strings.
//! - [`exact_match`] — weighted token-set containment against a corpus;
//!   always evaluated before the fuzzy path.
//! - [`fuzzy_match`] — per-field trigram similarity against role-specific
//!   thresholds; OR-combined with exact matching by callers (it widens
//!   candidacy, never narrows it).
//!
//! Same input + same config = same signals, on any machine.

mod config;
mod exact;
mod fuzzy;
mod normalize;
pub mod trigram;

pub use crate::config::{FuzzyThresholds, NormalizerConfig, TextMatchConfigError};
pub use crate::exact::{exact_match, ExactMatch};
pub use crate::fuzzy::{fuzzy_match, FuzzyMatch};
pub use crate::normalize::Normalizer;
