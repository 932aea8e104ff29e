//! # Polarity
//!
//! A small Bernoulli Naive Bayes sentiment classifier.
//!
//! ## Features
//!
//! - Document-presence feature counting, sequential or on a rayon pool
//! - Laplace smoothing behind a pluggable probability estimator
//! - Log-space scoring over the full vocabulary
//! - Accuracy, precision and recall over held-out data
//! - Unigram and bigram feature extraction
//! - JSON model persistence and a `polarity` CLI
//!
//! ## Example
//!
//! ```
//! use polarity::prelude::*;
//!
//! let positive: Vec<Document> = vec![["good", "great"].into_iter().collect()];
//! let negative: Vec<Document> = vec![["bad"].into_iter().collect()];
//!
//! let model = Trainer::default().train(&positive, &negative).unwrap();
//! let document: Document = ["great"].into_iter().collect();
//! assert_eq!(model.predict(&document), Label::Positive);
//! ```

pub mod analysis;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod ml;

pub mod prelude {
    pub use crate::corpus::{Corpus, load_corpus};
    pub use crate::error::{PolarityError, Result};
    pub use crate::ml::{
        ClassCounts, ConditionalProbs, Document, EvaluationSummary, FeatureConfig,
        FeatureExtractor, Label, LabeledDocument, NaiveBayesModel, PolarityConfig,
        SentimentClassifier, Smoothing, Trainer, TrainingConfig,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
