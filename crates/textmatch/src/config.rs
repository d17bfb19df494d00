//! Configuration for normalization and fuzzy matching.
//!
//! Thresholds are deliberately low: the engine favors recall and typo
//! tolerance, and lets the relevance scorer sort out precision.

use catalog::FieldRole;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid normalization or matching configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TextMatchConfigError {
    #[error("threshold for {field} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f32 },
}

/// Controls how query and corpus text is normalized before comparison.
///
/// Cheap to clone and serde-friendly so it can live inside higher-level
/// engine configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizerConfig {
    /// Apply locale-free Unicode lowercasing.
    #[serde(default = "NormalizerConfig::default_lowercase")]
    pub lowercase: bool,
    /// Apply Unicode NFKC normalization before other transforms.
    #[serde(default = "NormalizerConfig::default_normalize_unicode")]
    pub normalize_unicode: bool,
    /// Punctuation characters preserved as-is instead of being treated as
    /// delimiters. The default keeps the characters that carry meaning in
    /// marketplace names ("Fish & Chips", "D'Costa", "Gluten-Free").
    #[serde(default = "NormalizerConfig::default_keep_chars")]
    pub keep_chars: Vec<char>,
}

impl NormalizerConfig {
    pub(crate) fn default_lowercase() -> bool {
        true
    }

    pub(crate) fn default_normalize_unicode() -> bool {
        true
    }

    pub(crate) fn default_keep_chars() -> Vec<char> {
        vec!['&', '\'', '-']
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            lowercase: Self::default_lowercase(),
            normalize_unicode: Self::default_normalize_unicode(),
            keep_chars: Self::default_keep_chars(),
        }
    }
}

/// Per-field-role similarity thresholds for the fuzzy matcher.
///
/// A field only produces a fuzzy match when its trigram similarity reaches
/// the threshold for its role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FuzzyThresholds {
    #[serde(default = "FuzzyThresholds::default_name")]
    pub name: f32,
    #[serde(default = "FuzzyThresholds::default_description")]
    pub description: f32,
    #[serde(default = "FuzzyThresholds::default_secondary")]
    pub secondary: f32,
}

impl FuzzyThresholds {
    pub(crate) fn default_name() -> f32 {
        0.1
    }

    pub(crate) fn default_description() -> f32 {
        0.15
    }

    pub(crate) fn default_secondary() -> f32 {
        0.15
    }

    /// Threshold applying to a corpus field of the given role.
    pub fn for_role(&self, role: FieldRole) -> f32 {
        match role {
            FieldRole::Name => self.name,
            FieldRole::Description => self.description,
            FieldRole::Secondary => self.secondary,
        }
    }

    /// Validate that every threshold is a sensible similarity bound.
    pub fn validate(&self) -> Result<(), TextMatchConfigError> {
        for (field, value) in [
            ("name", self.name),
            ("description", self.description),
            ("secondary", self.secondary),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TextMatchConfigError::ThresholdOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

impl Default for FuzzyThresholds {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            description: Self::default_description(),
            secondary: Self::default_secondary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_valid() {
        let thresholds = FuzzyThresholds::default();
        assert!(thresholds.validate().is_ok());
        assert_eq!(thresholds.for_role(FieldRole::Name), 0.1);
        assert_eq!(thresholds.for_role(FieldRole::Description), 0.15);
        assert_eq!(thresholds.for_role(FieldRole::Secondary), 0.15);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let thresholds = FuzzyThresholds {
            name: 1.5,
            ..Default::default()
        };
        let err = thresholds.validate().expect_err("threshold is invalid");
        assert!(matches!(
            err,
            TextMatchConfigError::ThresholdOutOfRange { field: "name", .. }
        ));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: NormalizerConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.lowercase);
        assert!(cfg.normalize_unicode);
        assert_eq!(cfg.keep_chars, vec!['&', '\'', '-']);

        let thresholds: FuzzyThresholds = serde_json::from_str("{\"name\": 0.3}").unwrap();
        assert_eq!(thresholds.name, 0.3);
        assert_eq!(thresholds.description, 0.15);
    }
}
