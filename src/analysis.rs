//! Text analysis for Polarity.
//!
//! Raw review text flows through a tokenizer and a chain of token filters
//! before feature extraction turns the surviving tokens into unigram and
//! bigram features.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
