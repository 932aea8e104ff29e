//! Unigram and bigram feature extraction.
//!
//! Text is run through an [`Analyzer`]; every surviving token becomes a
//! unigram feature and every pair of adjacent tokens becomes a bigram feature
//! `"first__second"`. The result is a deduplicated [`Document`].

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, build_analyzer};
use crate::analysis::token::Token;
use crate::analysis::tokenizer::TokenizerKind;
use crate::error::{PolarityError, Result};
use crate::ml::document::Document;

/// Joins the two words of a bigram feature.
pub const BIGRAM_SEPARATOR: &str = "__";

/// Configuration for feature extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Tokenizer used to split raw text.
    pub tokenizer: TokenizerKind,
    /// Fold tokens to lowercase.
    pub lowercase: bool,
    /// Emit single-token features.
    pub unigrams: bool,
    /// Emit adjacent-pair features.
    pub bigrams: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerKind::Regex,
            lowercase: true,
            unigrams: true,
            bigrams: true,
        }
    }
}

impl FeatureConfig {
    /// Reject configurations that can never produce a feature.
    pub fn validate(&self) -> Result<()> {
        if !self.unigrams && !self.bigrams {
            return Err(PolarityError::invalid_config(
                "at least one of unigrams or bigrams must be enabled",
            ));
        }
        Ok(())
    }
}

/// Join two tokens into a bigram feature name.
pub fn bigram(first: &str, second: &str) -> String {
    let mut feature = String::with_capacity(first.len() + BIGRAM_SEPARATOR.len() + second.len());
    feature.push_str(first);
    feature.push_str(BIGRAM_SEPARATOR);
    feature.push_str(second);
    feature
}

/// Turns raw text into feature-set documents.
pub struct FeatureExtractor {
    analyzer: Arc<dyn Analyzer>,
    unigrams: bool,
    bigrams: bool,
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("analyzer", &self.analyzer.name())
            .field("unigrams", &self.unigrams)
            .field("bigrams", &self.bigrams)
            .finish()
    }
}

impl FeatureExtractor {
    /// Build an extractor from configuration.
    pub fn new(config: &FeatureConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = build_analyzer(config.tokenizer, config.lowercase)?;
        Ok(Self::with_analyzer(analyzer, config.unigrams, config.bigrams))
    }

    /// Build an extractor around an existing analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>, unigrams: bool, bigrams: bool) -> Self {
        Self {
            analyzer,
            unigrams,
            bigrams,
        }
    }

    /// Extract the feature set of one text.
    pub fn extract(&self, text: &str) -> Result<Document> {
        let tokens: Vec<Token> = self.analyzer.analyze(text)?.collect();
        let mut features = Vec::with_capacity(tokens.len() * 2);

        if self.unigrams {
            features.extend(tokens.iter().map(|token| token.text.clone()));
        }

        if self.bigrams {
            features.extend(
                tokens
                    .windows(2)
                    .filter(|pair| pair[1].position == pair[0].position + 1)
                    .map(|pair| bigram(&pair[0].text, &pair[1].text)),
            );
        }

        Ok(features.into_iter().collect())
    }

    /// Extract many texts on the rayon pool, preserving order.
    pub fn extract_all<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<Document>> {
        texts
            .par_iter()
            .map(|text| self.extract(text.as_ref()))
            .collect()
    }
}
