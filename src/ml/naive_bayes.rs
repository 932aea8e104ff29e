//! Function-level entry points over the raw probability table.
//!
//! These mirror the three operations of the classifier core without the
//! [`NaiveBayesModel`](crate::ml::model::NaiveBayesModel) wrapper:
//! train with Laplace smoothing, predict one document, and measure accuracy.

use crate::error::Result;
use crate::ml::classifier::{self, SentimentClassifier};
use crate::ml::counter::ClassCounts;
use crate::ml::document::{Document, Label, LabeledDocument};
use crate::ml::estimator::ConditionalProbs;
use crate::ml::evaluator;
use crate::ml::trainer::Trainer;

/// Count both collections and estimate Laplace-smoothed probabilities.
///
/// An empty class is logged as a warning, as [`Trainer::train`] does.
pub fn train(
    positive_docs: &[Document],
    negative_docs: &[Document],
) -> Result<(ConditionalProbs, ClassCounts)> {
    let model = Trainer::default().train(positive_docs, negative_docs)?;
    Ok((model.probabilities().clone(), *model.class_counts()))
}

/// Predict the label of `document`.
pub fn predict(
    document: &Document,
    probabilities: &ConditionalProbs,
    class_counts: &ClassCounts,
) -> Label {
    classifier::classify(document, probabilities, class_counts)
}

/// Fraction of `test_set` predicted correctly. Fails on an empty test set.
pub fn evaluate(
    test_set: &[LabeledDocument],
    probabilities: &ConditionalProbs,
    class_counts: &ClassCounts,
) -> Result<f64> {
    let table = TableClassifier {
        probabilities,
        class_counts,
    };
    Ok(evaluator::evaluate(&table, test_set)?.accuracy)
}

/// Borrows a probability table so it can be evaluated without building a model.
struct TableClassifier<'a> {
    probabilities: &'a ConditionalProbs,
    class_counts: &'a ClassCounts,
}

impl SentimentClassifier for TableClassifier<'_> {
    fn predict(&self, document: &Document) -> Label {
        classifier::classify(document, self.probabilities, self.class_counts)
    }

    fn name(&self) -> &str {
        "probability_table"
    }
}
