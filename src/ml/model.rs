//! Trained Naive Bayes model and its JSON persistence.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::ml::classifier::{self, ClassScores, SentimentClassifier};
use crate::ml::counter::ClassCounts;
use crate::ml::document::{Document, Label};
use crate::ml::estimator::{ConditionalProb, ConditionalProbs};
use crate::ml::features::FeatureConfig;

/// Version written into saved models; loading any other version fails.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// A trained model: the probability table, the class totals behind the priors
/// and the feature configuration the vocabulary was extracted with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    version: u32,
    estimator: String,
    trained_at: DateTime<Utc>,
    #[serde(default)]
    features: FeatureConfig,
    class_counts: ClassCounts,
    probabilities: ConditionalProbs,
}

/// A feature with its log-odds `ln(P(f|pos) / P(f|neg))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedFeature {
    pub feature: String,
    pub log_odds: f64,
}

impl NaiveBayesModel {
    /// Assemble a model, checking every probability lies strictly in (0, 1).
    pub fn new(
        probabilities: ConditionalProbs,
        class_counts: ClassCounts,
        estimator: impl Into<String>,
    ) -> Result<Self> {
        let model = Self {
            version: MODEL_FORMAT_VERSION,
            estimator: estimator.into(),
            trained_at: Utc::now(),
            features: FeatureConfig::default(),
            class_counts,
            probabilities,
        };
        model.validate()?;
        Ok(model)
    }

    /// Record the feature configuration used to build the vocabulary.
    pub fn with_feature_config(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.version != MODEL_FORMAT_VERSION {
            return Err(PolarityError::model(format!(
                "unsupported model version {} (expected {MODEL_FORMAT_VERSION})",
                self.version
            )));
        }

        if let Some((feature, _)) = self
            .probabilities
            .iter()
            .find(|(_, probability)| !probability.is_open_unit())
        {
            return Err(PolarityError::model(format!(
                "probability for feature '{feature}' is outside (0, 1)"
            )));
        }

        Ok(())
    }

    /// Log-scores for both classes.
    pub fn scores(&self, document: &Document) -> ClassScores {
        classifier::score_document(document, &self.probabilities, &self.class_counts)
    }

    /// Log-priors of both classes.
    pub fn log_priors(&self) -> ClassScores {
        classifier::log_priors(&self.class_counts)
    }

    pub fn class_counts(&self) -> &ClassCounts {
        &self.class_counts
    }

    pub fn probabilities(&self) -> &ConditionalProbs {
        &self.probabilities
    }

    /// Conditional probabilities of one feature, if it is in the vocabulary.
    pub fn probability(&self, feature: &str) -> Option<&ConditionalProb> {
        self.probabilities.get(feature)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.probabilities.len()
    }

    pub fn feature_config(&self) -> &FeatureConfig {
        &self.features
    }

    pub fn estimator(&self) -> &str {
        &self.estimator
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// The `n` features most indicative of `label`, strongest first.
    pub fn top_features(&self, label: Label, n: usize) -> Vec<WeightedFeature> {
        let mut weighted: Vec<WeightedFeature> = self
            .probabilities
            .iter()
            .map(|(feature, probability)| WeightedFeature {
                feature: feature.clone(),
                log_odds: (probability.positive / probability.negative).ln(),
            })
            .collect();

        weighted.sort_by(|a, b| {
            let ordering = match label {
                Label::Positive => b.log_odds.total_cmp(&a.log_odds),
                Label::Negative => a.log_odds.total_cmp(&b.log_odds),
            };
            ordering.then_with(|| a.feature.cmp(&b.feature))
        });
        weighted.truncate(n);
        weighted
    }

    /// Write the model as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;

        info!(
            "Saved model with {} features to {}",
            self.vocabulary_size(),
            path.display()
        );
        Ok(())
    }

    /// Read and validate a model written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let model: Self = serde_json::from_reader(reader)?;
        model.validate()?;

        debug!(
            "Loaded {} model ({} features) from {}",
            model.estimator,
            model.vocabulary_size(),
            path.display()
        );
        Ok(model)
    }
}

impl SentimentClassifier for NaiveBayesModel {
    fn predict(&self, document: &Document) -> Label {
        self.scores(document).label()
    }

    fn name(&self) -> &str {
        "bernoulli_naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> NaiveBayesModel {
        let probabilities: ConditionalProbs = [
            ("good", 1.0 / 3.0, 2.0 / 3.0),
            ("great", 1.0 / 3.0, 2.0 / 3.0),
            ("bad", 2.0 / 3.0, 1.0 / 3.0),
        ]
        .into_iter()
        .map(|(feature, negative, positive)| {
            (feature.to_string(), ConditionalProb { negative, positive })
        })
        .collect();

        NaiveBayesModel::new(probabilities, ClassCounts::new(1, 1), "laplace").unwrap()
    }

    #[test]
    fn test_predict() {
        let model = sample_model();
        let good: Document = ["good", "great"].into_iter().collect();
        let bad: Document = ["bad"].into_iter().collect();

        assert_eq!(model.predict(&good), Label::Positive);
        assert_eq!(model.predict(&bad), Label::Negative);
        assert_eq!(model.name(), "bernoulli_naive_bayes");
    }

    #[test]
    fn test_rejects_degenerate_probabilities() {
        let mut probabilities = ConditionalProbs::new();
        probabilities.insert(
            "zero".to_string(),
            ConditionalProb {
                negative: 0.0,
                positive: 0.5,
            },
        );

        let result = NaiveBayesModel::new(probabilities, ClassCounts::new(1, 1), "custom");
        assert!(matches!(result, Err(PolarityError::Model(_))));
    }

    #[test]
    fn test_top_features() {
        let model = sample_model();

        let positive = model.top_features(Label::Positive, 2);
        assert_eq!(positive.len(), 2);
        assert_eq!(positive[0].feature, "good");
        assert_eq!(positive[1].feature, "great");
        assert!((positive[0].log_odds - 2.0f64.ln()).abs() < 1e-12);

        let negative = model.top_features(Label::Negative, 1);
        assert_eq!(negative[0].feature, "bad");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let model = sample_model();
        model.save(&path).unwrap();
        let loaded = NaiveBayesModel::load(&path).unwrap();

        assert_eq!(loaded.vocabulary_size(), 3);
        assert_eq!(loaded.class_counts(), model.class_counts());
        assert_eq!(loaded.estimator(), "laplace");
        assert_eq!(loaded.probabilities(), model.probabilities());
        assert_eq!(loaded.feature_config(), &FeatureConfig::default());
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let mut value = serde_json::to_value(sample_model()).unwrap();
        value["version"] = serde_json::json!(99);
        std::fs::write(&path, value.to_string()).unwrap();

        assert!(matches!(
            NaiveBayesModel::load(&path),
            Err(PolarityError::Model(_))
        ));
    }
}
