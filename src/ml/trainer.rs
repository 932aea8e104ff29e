//! Training pipeline: count, merge, estimate.

use std::sync::Arc;

use log::{debug, info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::ml::counter::{self, PartialCounts};
use crate::ml::document::{Document, Label};
use crate::ml::estimator::{self, Smoothing};
use crate::ml::model::NaiveBayesModel;

/// Configuration for training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Probability estimation policy.
    pub smoothing: Smoothing,
    /// Count documents on the rayon pool.
    pub parallel: bool,
    /// Size of the training thread pool. `None` uses one thread per CPU.
    pub num_threads: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::Laplace,
            parallel: false,
            num_threads: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == Some(0) {
            return Err(PolarityError::invalid_config("num_threads must be positive"));
        }
        Ok(())
    }
}

/// Trains [`NaiveBayesModel`]s from positive and negative documents.
#[derive(Debug)]
pub struct Trainer {
    config: TrainingConfig,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Trainer {
    /// Create a trainer. Parallel training gets its own thread pool.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = if config.parallel {
            let num_threads = config.num_threads.unwrap_or_else(num_cpus::get);
            debug!("Building training pool with {num_threads} threads");
            let pool = ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .thread_name(|i| format!("polarity-train-{i}"))
                .build()
                .map_err(|e| PolarityError::other(format!("Failed to create thread pool: {e}")))?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Self {
            config,
            thread_pool,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train a model.
    ///
    /// An empty class is not an error under Laplace smoothing: its
    /// probabilities collapse to 0.5 and its prior to zero, so a warning is
    /// logged instead.
    pub fn train(&self, positive: &[Document], negative: &[Document]) -> Result<NaiveBayesModel> {
        debug!(
            "Counting features over {} positive and {} negative documents (parallel: {})",
            positive.len(),
            negative.len(),
            self.config.parallel
        );

        let partials = [
            self.count(positive, Label::Positive),
            self.count(negative, Label::Negative),
        ];
        let (stats, class_counts) = counter::merge(partials);

        for label in class_counts.empty_classes() {
            warn!("No {label} training documents; the trained model will be uninformative");
        }

        let estimator = self.config.smoothing.estimator();
        let probabilities =
            estimator::estimate_probabilities(&stats, &class_counts, estimator.as_ref())?;

        info!(
            "Trained on {} documents ({} positive, {} negative), vocabulary of {} features",
            class_counts.total(),
            class_counts.positive,
            class_counts.negative,
            probabilities.len()
        );

        NaiveBayesModel::new(probabilities, class_counts, estimator.name())
    }

    fn count(&self, documents: &[Document], label: Label) -> PartialCounts {
        if !self.config.parallel {
            return counter::count_documents(documents, label);
        }

        match &self.thread_pool {
            Some(pool) => pool.install(|| counter::count_documents_parallel(documents, label)),
            None => counter::count_documents_parallel(documents, label),
        }
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self {
            config: TrainingConfig::default(),
            thread_pool: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::SentimentClassifier;

    fn doc(features: &[&str]) -> Document {
        features.iter().copied().collect()
    }

    #[test]
    fn test_train_laplace() {
        let model = Trainer::default()
            .train(&[doc(&["good", "great"])], &[doc(&["bad"])])
            .unwrap();

        assert_eq!(model.vocabulary_size(), 3);
        assert_eq!(model.estimator(), "laplace");
        let good = model.probability("good").unwrap();
        assert!((good.positive - 2.0 / 3.0).abs() < 1e-12);
        assert!((good.negative - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_train_parallel_with_dedicated_pool() {
        let positive: Vec<Document> = (0..50).map(|_| doc(&["good", "fun"])).collect();
        let negative: Vec<Document> = (0..50).map(|_| doc(&["bad", "fun"])).collect();

        let sequential = Trainer::default().train(&positive, &negative).unwrap();
        let parallel = Trainer::new(TrainingConfig {
            parallel: true,
            num_threads: Some(2),
            ..TrainingConfig::default()
        })
        .unwrap()
        .train(&positive, &negative)
        .unwrap();

        assert_eq!(sequential.probabilities(), parallel.probabilities());
        assert_eq!(sequential.class_counts(), parallel.class_counts());
    }

    #[test]
    fn test_train_with_empty_class() {
        let model = Trainer::default()
            .train(&[doc(&["good"]), doc(&["great"])], &[])
            .unwrap();

        assert_eq!(model.class_counts().negative, 0);
        assert_eq!(model.probability("good").unwrap().negative, 0.5);
        assert_eq!(model.predict(&doc(&["anything"])), Label::Positive);
    }

    #[test]
    fn test_train_with_nothing() {
        let model = Trainer::default().train(&[], &[]).unwrap();
        assert_eq!(model.vocabulary_size(), 0);
        assert_eq!(model.predict(&doc(&["good"])), Label::Negative);
    }

    #[test]
    fn test_train_unsmoothed_fails_on_unseen_feature() {
        let trainer = Trainer::new(TrainingConfig {
            smoothing: Smoothing::None,
            ..TrainingConfig::default()
        })
        .unwrap();

        let result = trainer.train(&[doc(&["good", "movie"])], &[doc(&["bad", "movie"])]);
        assert!(matches!(
            result,
            Err(PolarityError::DegenerateProbability { .. })
        ));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = Trainer::new(TrainingConfig {
            parallel: true,
            num_threads: Some(0),
            ..TrainingConfig::default()
        });
        assert!(result.is_err());
    }
}
