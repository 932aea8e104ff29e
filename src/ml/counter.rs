//! Per-class document-presence counting.
//!
//! Each counting call produces its own [`PartialCounts`]; [`merge`] folds any
//! number of them into the shared [`FeatureStats`] table and [`ClassCounts`].
//! Because partial counts combine associatively, the parallel counter shards
//! documents across rayon workers and reduces their maps without locking.

use std::collections::BTreeMap;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ml::document::{Document, Label};

/// Number of documents per class that contain a feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCounts {
    pub negative: usize,
    pub positive: usize,
}

impl FeatureCounts {
    /// The count for one class.
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Negative => self.negative,
            Label::Positive => self.positive,
        }
    }

    fn add(&mut self, label: Label, count: usize) {
        match label {
            Label::Negative => self.negative += count,
            Label::Positive => self.positive += count,
        }
    }
}

/// Feature -> per-class counts. Ordered so vocabulary walks are deterministic.
pub type FeatureStats = BTreeMap<String, FeatureCounts>;

/// Total training documents per class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub negative: usize,
    pub positive: usize,
}

impl ClassCounts {
    pub fn new(negative: usize, positive: usize) -> Self {
        Self { negative, positive }
    }

    /// The document total for one class.
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Negative => self.negative,
            Label::Positive => self.positive,
        }
    }

    /// Documents across both classes.
    pub fn total(&self) -> usize {
        self.negative + self.positive
    }

    /// Labels with no training documents.
    pub fn empty_classes(&self) -> Vec<Label> {
        Label::ALL
            .into_iter()
            .filter(|label| self.get(*label) == 0)
            .collect()
    }
}

/// Counts gathered from one collection of same-labeled documents.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialCounts {
    pub label: Label,
    pub documents: usize,
    pub features: AHashMap<String, usize>,
}

impl PartialCounts {
    /// An empty tally for `label`.
    pub fn empty(label: Label) -> Self {
        Self {
            label,
            documents: 0,
            features: AHashMap::new(),
        }
    }

    fn add_document(mut self, document: &Document) -> Self {
        self.documents += 1;
        for feature in document.iter() {
            *self.features.entry(feature.to_string()).or_insert(0) += 1;
        }
        self
    }

    /// Sum two tallies of the same label.
    pub fn combine(mut self, other: PartialCounts) -> Self {
        debug_assert_eq!(self.label, other.label);

        // Fold the smaller map into the larger one.
        let (mut base, extra) = if self.features.len() >= other.features.len() {
            (std::mem::take(&mut self.features), other.features)
        } else {
            (other.features, std::mem::take(&mut self.features))
        };
        for (feature, count) in extra {
            *base.entry(feature).or_insert(0) += count;
        }

        Self {
            label: self.label,
            documents: self.documents + other.documents,
            features: base,
        }
    }
}

/// Count documents and per-feature presence for one class.
pub fn count_documents(documents: &[Document], label: Label) -> PartialCounts {
    documents
        .iter()
        .fold(PartialCounts::empty(label), PartialCounts::add_document)
}

/// Parallel [`count_documents`]: per-worker partial maps, then a reduction.
pub fn count_documents_parallel(documents: &[Document], label: Label) -> PartialCounts {
    documents
        .par_iter()
        .fold(
            || PartialCounts::empty(label),
            |acc, document| acc.add_document(document),
        )
        .reduce(|| PartialCounts::empty(label), PartialCounts::combine)
}

/// Merge partial tallies into the feature table and class totals.
///
/// Every feature gets both class slots, initialised to zero, the first time
/// it is seen, whichever class introduces it.
pub fn merge<I>(partials: I) -> (FeatureStats, ClassCounts)
where
    I: IntoIterator<Item = PartialCounts>,
{
    let mut stats = FeatureStats::new();
    let mut class_counts = ClassCounts::default();

    for partial in partials {
        match partial.label {
            Label::Negative => class_counts.negative += partial.documents,
            Label::Positive => class_counts.positive += partial.documents,
        }
        for (feature, count) in partial.features {
            stats.entry(feature).or_default().add(partial.label, count);
        }
    }

    (stats, class_counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(features: &[&str]) -> Document {
        features.iter().copied().collect()
    }

    #[test]
    fn test_count_documents() {
        let docs = vec![doc(&["good", "great"]), doc(&["good", "fun"])];
        let partial = count_documents(&docs, Label::Positive);

        assert_eq!(partial.documents, 2);
        assert_eq!(partial.features["good"], 2);
        assert_eq!(partial.features["great"], 1);
        assert_eq!(partial.features["fun"], 1);
    }

    #[test]
    fn test_empty_collection() {
        let partial = count_documents(&[], Label::Negative);
        assert_eq!(partial.documents, 0);
        assert!(partial.features.is_empty());
    }

    #[test]
    fn test_merge_initialises_both_slots() {
        let positive = count_documents(&[doc(&["good", "great"])], Label::Positive);
        let negative = count_documents(&[doc(&["bad"])], Label::Negative);

        let (stats, class_counts) = merge([positive, negative]);

        assert_eq!(class_counts, ClassCounts::new(1, 1));
        assert_eq!(stats.len(), 3);
        assert_eq!(stats["good"], FeatureCounts { negative: 0, positive: 1 });
        assert_eq!(stats["bad"], FeatureCounts { negative: 1, positive: 0 });
    }

    #[test]
    fn test_merge_same_label_sums_totals() {
        let first = count_documents(&[doc(&["dull"])], Label::Negative);
        let second = count_documents(&[doc(&["dull", "slow"])], Label::Negative);

        let (stats, class_counts) = merge([first, second]);

        assert_eq!(class_counts.negative, 2);
        assert_eq!(class_counts.positive, 0);
        assert_eq!(stats["dull"].negative, 2);
        assert_eq!(stats["slow"].negative, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let docs: Vec<Document> = (0..200)
            .map(|i| {
                doc(&[
                    ["alpha", "beta", "gamma"][i % 3],
                    ["delta", "epsilon"][i % 2],
                    "common",
                ])
            })
            .collect();

        let sequential = count_documents(&docs, Label::Positive);
        let parallel = count_documents_parallel(&docs, Label::Positive);

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.features["common"], 200);
    }

    #[test]
    fn test_counts_bounded_by_class_size() {
        let docs = vec![doc(&["a", "b"]), doc(&["a"]), doc(&["c"])];
        let (stats, class_counts) = merge([count_documents(&docs, Label::Positive)]);

        for counts in stats.values() {
            assert!(counts.positive <= class_counts.positive);
            assert!(counts.negative <= class_counts.negative);
        }
        assert_eq!(class_counts.empty_classes(), vec![Label::Negative]);
    }
}
