//! Labels and feature-set documents.

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};

/// Binary sentiment label.
///
/// Serialized as its integer value (`0` or `1`) so corpus files can use the
/// conventional numeric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Label {
    /// Negative sentiment (class 0).
    Negative = 0,
    /// Positive sentiment (class 1).
    Positive = 1,
}

impl Label {
    /// Both labels, negative first.
    pub const ALL: [Label; 2] = [Label::Negative, Label::Positive];

    /// The numeric class value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse a numeric class value.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(PolarityError::invalid_label(format!(
                "expected 0 or 1, got {other}"
            ))),
        }
    }
}

impl TryFrom<u8> for Label {
    type Error = PolarityError;

    fn try_from(value: u8) -> Result<Self> {
        Label::from_u8(value)
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Negative => write!(f, "negative"),
            Label::Positive => write!(f, "positive"),
        }
    }
}

/// An unordered set of features. Presence matters, multiplicity does not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    features: AHashSet<String>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the document contains the feature.
    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Number of distinct features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the document has no features at all.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over the distinct features in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Document {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A document paired with its true label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDocument {
    pub label: Label,
    pub document: Document,
}

impl LabeledDocument {
    pub fn new(label: Label, document: Document) -> Self {
        Self { label, document }
    }
}
