//! Log-space Bernoulli Naive Bayes scoring.
//!
//! Every feature of the trained vocabulary contributes evidence for both
//! classes: `ln p` when the document contains it, `ln(1 - p)` when it does not.
//! Features of the document that are absent from the vocabulary contribute
//! nothing in either direction.

use serde::{Deserialize, Serialize};

use crate::ml::counter::ClassCounts;
use crate::ml::document::{Document, Label};
use crate::ml::estimator::ConditionalProbs;

/// Interface shared by everything that can label a document.
pub trait SentimentClassifier: Send + Sync {
    /// Predict the label of a document.
    fn predict(&self, document: &Document) -> Label;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Accumulated log-scores for both classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub negative: f64,
    pub positive: f64,
}

impl ClassScores {
    /// The score for one class.
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Negative => self.negative,
            Label::Positive => self.positive,
        }
    }

    /// Positive only when its score is strictly greater; ties go negative.
    pub fn label(&self) -> Label {
        if self.positive > self.negative {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    /// `positive - negative`, the log-odds in favour of the positive class.
    pub fn margin(&self) -> f64 {
        self.positive - self.negative
    }
}

/// Log-priors from the normalized class frequencies.
///
/// Both classes use `ln(class_size / total)`. A class without documents gets
/// `-inf`; with no documents at all the priors are uniform.
pub fn log_priors(class_counts: &ClassCounts) -> ClassScores {
    let total = class_counts.total();
    if total == 0 {
        let uniform = 0.5f64.ln();
        return ClassScores {
            negative: uniform,
            positive: uniform,
        };
    }

    let total = total as f64;
    ClassScores {
        negative: (class_counts.negative as f64 / total).ln(),
        positive: (class_counts.positive as f64 / total).ln(),
    }
}

/// Score a document against both classes.
pub fn score_document(
    document: &Document,
    probabilities: &ConditionalProbs,
    class_counts: &ClassCounts,
) -> ClassScores {
    let mut scores = log_priors(class_counts);

    for (feature, probability) in probabilities {
        if document.contains(feature) {
            scores.negative += probability.negative.ln();
            scores.positive += probability.positive.ln();
        } else {
            scores.negative += (1.0 - probability.negative).ln();
            scores.positive += (1.0 - probability.positive).ln();
        }
    }

    scores
}

/// Predict the label of a document.
pub fn classify(
    document: &Document,
    probabilities: &ConditionalProbs,
    class_counts: &ClassCounts,
) -> Label {
    score_document(document, probabilities, class_counts).label()
}
