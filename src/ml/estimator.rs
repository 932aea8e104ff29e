//! Conditional probability estimation.
//!
//! An estimator turns the per-class presence counts of a feature into
//! `P(feature = 1 | class)` for both classes. The estimation policy is
//! pluggable: [`LaplaceEstimator`] is the default, [`UnsmoothedEstimator`]
//! exists to demonstrate why smoothing is needed and refuses to produce
//! probabilities whose logarithms would be infinite.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::ml::counter::{ClassCounts, FeatureCounts, FeatureStats};
use crate::ml::document::Label;

/// Add-one pseudo count applied to every feature count.
pub const LAPLACE_PSEUDO_COUNT: f64 = 1.0;

/// Denominator inflation: a binary feature has two possible outcomes.
pub const BINARY_OUTCOMES: f64 = 2.0;

/// `P(feature = 1 | class)` for both classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionalProb {
    pub negative: f64,
    pub positive: f64,
}

impl ConditionalProb {
    /// The probability for one class.
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Negative => self.negative,
            Label::Positive => self.positive,
        }
    }

    /// Whether both probabilities lie strictly inside (0, 1).
    pub fn is_open_unit(&self) -> bool {
        Label::ALL.into_iter().all(|label| {
            let p = self.get(label);
            p > 0.0 && p < 1.0
        })
    }
}

/// Feature -> conditional probabilities. Read-only once built.
pub type ConditionalProbs = BTreeMap<String, ConditionalProb>;

/// A policy for turning counts into conditional probabilities.
pub trait ProbabilityEstimator: Send + Sync + fmt::Debug {
    /// Estimate both class-conditional probabilities of one feature.
    fn estimate(
        &self,
        feature: &str,
        counts: &FeatureCounts,
        class_counts: &ClassCounts,
    ) -> Result<ConditionalProb>;

    /// Name recorded in saved models.
    fn name(&self) -> &'static str;
}

/// Add-one (Laplace) smoothing.
///
/// `P(f | c) = (count + 1) / (class_size + 2)`, which is strictly inside
/// (0, 1) for every count in `0..=class_size`, empty classes included.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceEstimator;

impl LaplaceEstimator {
    pub fn new() -> Self {
        LaplaceEstimator
    }

    fn smooth(count: usize, class_size: usize) -> f64 {
        (count as f64 + LAPLACE_PSEUDO_COUNT) / (class_size as f64 + BINARY_OUTCOMES)
    }
}

impl ProbabilityEstimator for LaplaceEstimator {
    fn estimate(
        &self,
        _feature: &str,
        counts: &FeatureCounts,
        class_counts: &ClassCounts,
    ) -> Result<ConditionalProb> {
        Ok(ConditionalProb {
            negative: Self::smooth(counts.negative, class_counts.negative),
            positive: Self::smooth(counts.positive, class_counts.positive),
        })
    }

    fn name(&self) -> &'static str {
        "laplace"
    }
}

/// Raw relative frequencies, `count / class_size`.
///
/// Fails with [`PolarityError::EmptyClass`] when a class has no documents and
/// with [`PolarityError::DegenerateProbability`] when a feature appears in none
/// or all of a class's documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsmoothedEstimator;

impl UnsmoothedEstimator {
    pub fn new() -> Self {
        UnsmoothedEstimator
    }

    fn frequency(
        feature: &str,
        label: Label,
        counts: &FeatureCounts,
        class_counts: &ClassCounts,
    ) -> Result<f64> {
        let class_size = class_counts.get(label);
        if class_size == 0 {
            return Err(PolarityError::EmptyClass { label });
        }

        let probability = counts.get(label) as f64 / class_size as f64;
        if probability <= 0.0 || probability >= 1.0 {
            return Err(PolarityError::DegenerateProbability {
                feature: feature.to_string(),
                label,
                probability,
            });
        }

        Ok(probability)
    }
}

impl ProbabilityEstimator for UnsmoothedEstimator {
    fn estimate(
        &self,
        feature: &str,
        counts: &FeatureCounts,
        class_counts: &ClassCounts,
    ) -> Result<ConditionalProb> {
        Ok(ConditionalProb {
            negative: Self::frequency(feature, Label::Negative, counts, class_counts)?,
            positive: Self::frequency(feature, Label::Positive, counts, class_counts)?,
        })
    }

    fn name(&self) -> &'static str {
        "unsmoothed"
    }
}

/// Smoothing selection used by configuration files and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// [`LaplaceEstimator`].
    #[default]
    Laplace,
    /// [`UnsmoothedEstimator`].
    None,
}

impl Smoothing {
    /// Instantiate the selected estimator.
    pub fn estimator(self) -> Box<dyn ProbabilityEstimator> {
        match self {
            Smoothing::Laplace => Box::new(LaplaceEstimator::new()),
            Smoothing::None => Box::new(UnsmoothedEstimator::new()),
        }
    }
}

/// Estimate the probability table for every feature in `stats`.
pub fn estimate_probabilities(
    stats: &FeatureStats,
    class_counts: &ClassCounts,
    estimator: &dyn ProbabilityEstimator,
) -> Result<ConditionalProbs> {
    debug!(
        "Estimating {} features with the {} estimator",
        stats.len(),
        estimator.name()
    );

    stats
        .iter()
        .map(|(feature, counts)| {
            let probability = estimator.estimate(feature, counts, class_counts)?;
            Ok((feature.clone(), probability))
        })
        .collect()
}
