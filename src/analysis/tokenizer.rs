//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the analysis pipeline: they split raw text
//! into tokens carrying their stream position.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Extracts regex matches (the default, word-like runs)
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace; suits pre-tokenized input
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//!
//! # Examples
//!
//! ```
//! use polarity::analysis::tokenizer::Tokenizer;
//! use polarity::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("a great movie").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a single tokenizer can be shared by
/// parallel feature extraction.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Tokenizer selection used by configuration files and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// [`regex::RegexTokenizer`] with its default pattern.
    #[default]
    Regex,
    /// [`whitespace::WhitespaceTokenizer`].
    Whitespace,
    /// [`unicode_word::UnicodeWordTokenizer`].
    UnicodeWord,
}

pub mod regex;
pub mod unicode_word;
pub mod whitespace;
