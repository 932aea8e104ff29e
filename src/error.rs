//! Error types for the Polarity library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`PolarityError`] enum.
//!
//! # Examples
//!
//! ```
//! use polarity::error::{PolarityError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PolarityError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::ml::Label;

/// The main error type for Polarity operations.
///
/// Uses `thiserror` for the `Error` implementation and provides constructor
/// helpers for the string-carrying variants.
#[derive(Error, Debug)]
pub enum PolarityError {
    /// I/O errors (corpus files, model files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Corpus loading errors.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Model loading / validation errors.
    #[error("Model error: {0}")]
    Model(String),

    /// Accuracy over an empty test collection is undefined.
    #[error("Cannot evaluate accuracy: the test set is empty")]
    EmptyTestSet,

    /// A class has no training documents and the estimator cannot cope with it.
    #[error("Class {label} has no training documents")]
    EmptyClass { label: Label },

    /// An estimate hit exactly 0 or 1, so its logarithm (or the logarithm of
    /// its complement) is not finite.
    #[error("Degenerate probability {probability} for feature '{feature}' in class {label}")]
    DegenerateProbability {
        feature: String,
        label: Label,
        probability: f64,
    },

    /// A class label outside {0, 1}.
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PolarityError.
pub type Result<T> = std::result::Result<T, PolarityError>;

impl PolarityError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PolarityError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        PolarityError::Corpus(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        PolarityError::Model(msg.into())
    }

    /// Create a new invalid label error.
    pub fn invalid_label<S: Into<String>>(msg: S) -> Self {
        PolarityError::InvalidLabel(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PolarityError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PolarityError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PolarityError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
