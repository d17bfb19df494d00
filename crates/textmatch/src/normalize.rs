//! Query and corpus text normalization.
//!
//! The normalizer is total and deterministic: any input (including empty)
//! produces a well-defined output, and `normalize` is idempotent. Unicode
//! normalization runs first since it can change character boundaries, then
//! lowercasing, then delimiter handling with whitespace collapse.

use std::borrow::Cow;

use catalog::CorpusField;
use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizerConfig;

/// Applies one normalization policy to queries and corpus fields alike.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    cfg: NormalizerConfig,
}

impl Normalizer {
    pub fn new(cfg: NormalizerConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.cfg
    }

    /// Normalize one string: NFKC (configurable), lowercase (configurable),
    /// punctuation outside the keep-set treated as a delimiter, consecutive
    /// delimiters collapsed to a single space, edges trimmed.
    pub fn normalize(&self, input: &str) -> String {
        let text: Cow<'_, str> = if self.cfg.normalize_unicode {
            Cow::Owned(input.nfkc().collect::<String>())
        } else {
            Cow::Borrowed(input)
        };

        let mut out = String::with_capacity(text.len());
        // Collapse runs of delimiters by deferring the separator until the
        // next kept character arrives.
        let mut pending_space = false;

        for ch in text.chars() {
            if self.cfg.lowercase {
                for lower in ch.to_lowercase() {
                    push_char(lower, &self.cfg, &mut out, &mut pending_space);
                }
            } else {
                push_char(ch, &self.cfg, &mut out, &mut pending_space);
            }
        }

        out
    }

    /// Normalize every field of a corpus, preserving roles and weights.
    pub fn normalize_corpus(&self, corpus: Vec<CorpusField>) -> Vec<CorpusField> {
        corpus
            .into_iter()
            .map(|field| CorpusField {
                text: self.normalize(&field.text),
                ..field
            })
            .collect()
    }
}

fn push_char(ch: char, cfg: &NormalizerConfig, out: &mut String, pending_space: &mut bool) {
    let is_delim =
        ch.is_whitespace() || (ch.is_punctuation() && !cfg.keep_chars.contains(&ch));
    if is_delim {
        if !out.is_empty() {
            *pending_space = true;
        }
        return;
    }
    if *pending_space {
        out.push(' ');
        *pending_space = false;
    }
    out.push(ch);
}
