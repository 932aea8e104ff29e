//! Bernoulli Naive Bayes sentiment classification.
//!
//! The pipeline runs strictly forward:
//!
//! ```text
//! documents → counter → estimator → model ← test documents → evaluator
//! ```
//!
//! - [`counter`]: per-class document-presence counts and class sizes
//! - [`estimator`]: counts to `P(feature = 1 | class)`, pluggable smoothing
//! - [`classifier`]: log-space scoring over the full vocabulary
//! - [`evaluator`]: accuracy over a labeled test collection
//! - [`trainer`] / [`model`]: the above wired together, plus persistence
//! - [`features`]: raw text to unigram/bigram feature sets

pub mod classifier;
pub mod counter;
pub mod document;
pub mod estimator;
pub mod evaluator;
pub mod features;
pub mod model;
pub mod naive_bayes;
pub mod trainer;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use classifier::{ClassScores, SentimentClassifier};
pub use counter::{ClassCounts, FeatureCounts, FeatureStats, PartialCounts};
pub use document::{Document, Label, LabeledDocument};
pub use estimator::{
    ConditionalProb, ConditionalProbs, LaplaceEstimator, ProbabilityEstimator, Smoothing,
    UnsmoothedEstimator,
};
pub use evaluator::{ConfusionMatrix, EvaluationSummary};
pub use features::{FeatureConfig, FeatureExtractor};
pub use model::NaiveBayesModel;
pub use trainer::{Trainer, TrainingConfig};

use crate::error::Result;

/// Top-level configuration, usually read from a JSON file.
///
/// ```
/// use polarity::ml::PolarityConfig;
///
/// let config: PolarityConfig =
///     serde_json::from_str(r#"{"training": {"parallel": true}}"#).unwrap();
/// assert!(config.training.parallel);
/// assert!(config.features.bigrams);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarityConfig {
    /// Feature extraction settings.
    pub features: FeatureConfig,
    /// Training settings.
    pub training: TrainingConfig,
}

impl PolarityConfig {
    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.training.validate()
    }
}
