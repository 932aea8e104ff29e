//! Accuracy evaluation over a labeled test collection.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::ml::classifier::SentimentClassifier;
use crate::ml::document::{Label, LabeledDocument};

/// Prediction outcomes, positive class treated as the "relevant" one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    fn record(mut self, actual: Label, predicted: Label) -> Self {
        match (actual, predicted) {
            (Label::Positive, Label::Positive) => self.true_positives += 1,
            (Label::Negative, Label::Negative) => self.true_negatives += 1,
            (Label::Negative, Label::Positive) => self.false_positives += 1,
            (Label::Positive, Label::Negative) => self.false_negatives += 1,
        }
        self
    }

    fn combine(self, other: Self) -> Self {
        Self {
            true_positives: self.true_positives + other.true_positives,
            true_negatives: self.true_negatives + other.true_negatives,
            false_positives: self.false_positives + other.false_positives,
            false_negatives: self.false_negatives + other.false_negatives,
        }
    }

    pub fn total(&self) -> usize {
        self.correct() + self.false_positives + self.false_negatives
    }

    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }
}

/// Aggregate results of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub total: usize,
    pub correct: usize,
    /// `correct / total`, always defined since `total > 0`.
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
}

impl EvaluationSummary {
    fn from_confusion(confusion: ConfusionMatrix) -> Result<Self> {
        let total = confusion.total();
        if total == 0 {
            return Err(PolarityError::EmptyTestSet);
        }

        let correct = confusion.correct();
        Ok(Self {
            total,
            correct,
            accuracy: correct as f64 / total as f64,
            confusion,
        })
    }

    /// Precision for the positive class; `None` when nothing was predicted positive.
    pub fn precision(&self) -> Option<f64> {
        let predicted = self.confusion.true_positives + self.confusion.false_positives;
        (predicted > 0).then(|| self.confusion.true_positives as f64 / predicted as f64)
    }

    /// Recall for the positive class; `None` when the test set has no positives.
    pub fn recall(&self) -> Option<f64> {
        let actual = self.confusion.true_positives + self.confusion.false_negatives;
        (actual > 0).then(|| self.confusion.true_positives as f64 / actual as f64)
    }
}

/// Classify every test document and compare with its true label.
pub fn evaluate<C>(classifier: &C, test_set: &[LabeledDocument]) -> Result<EvaluationSummary>
where
    C: SentimentClassifier + ?Sized,
{
    let confusion = test_set
        .iter()
        .fold(ConfusionMatrix::default(), |confusion, example| {
            confusion.record(example.label, classifier.predict(&example.document))
        });

    let summary = EvaluationSummary::from_confusion(confusion)?;
    log_summary(classifier.name(), &summary);
    Ok(summary)
}

/// [`evaluate`] with the predictions spread over the rayon pool.
pub fn evaluate_parallel<C>(classifier: &C, test_set: &[LabeledDocument]) -> Result<EvaluationSummary>
where
    C: SentimentClassifier + ?Sized,
{
    let confusion = test_set
        .par_iter()
        .fold(ConfusionMatrix::default, |confusion, example| {
            confusion.record(example.label, classifier.predict(&example.document))
        })
        .reduce(ConfusionMatrix::default, ConfusionMatrix::combine);

    let summary = EvaluationSummary::from_confusion(confusion)?;
    log_summary(classifier.name(), &summary);
    Ok(summary)
}

fn log_summary(name: &str, summary: &EvaluationSummary) {
    info!(
        "{name}: {}/{} correct, accuracy {:.4}",
        summary.correct, summary.total, summary.accuracy
    );
}
