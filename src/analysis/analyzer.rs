//! Analyzers combine a tokenizer with token filters.
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! # Examples
//!
//! ```
//! use polarity::analysis::analyzer::build_analyzer;
//! use polarity::analysis::tokenizer::TokenizerKind;
//!
//! let analyzer = build_analyzer(TokenizerKind::Regex, true).unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Hello World").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::analysis::tokenizer::{Tokenizer, TokenizerKind};
use crate::error::Result;

pub mod pipeline;
pub mod standard;

use pipeline::PipelineAnalyzer;
use standard::StandardAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are shared across rayon workers during parallel feature
/// extraction, hence `Send + Sync`.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}

/// Build an analyzer from a tokenizer selection and a lowercase switch.
///
/// The default selection (regex, lowercased) is the [`StandardAnalyzer`].
pub fn build_analyzer(tokenizer: TokenizerKind, lowercase: bool) -> Result<Arc<dyn Analyzer>> {
    if tokenizer == TokenizerKind::Regex && lowercase {
        return Ok(Arc::new(StandardAnalyzer::new()?));
    }

    let tokenizer: Arc<dyn Tokenizer> = match tokenizer {
        TokenizerKind::Regex => Arc::new(RegexTokenizer::new()?),
        TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
        TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
    };

    let mut analyzer = PipelineAnalyzer::new(tokenizer);
    if lowercase {
        analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
    }

    Ok(Arc::new(analyzer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_analyzer_default_is_standard() {
        let analyzer = build_analyzer(TokenizerKind::default(), true).unwrap();
        let texts: Vec<String> = analyzer
            .analyze("I didn't LIKE it")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(texts, vec!["i", "didn't", "like", "it"]);
        assert_eq!(analyzer.name(), "standard");

        let analyzer = build_analyzer(TokenizerKind::Regex, false).unwrap();
        assert_eq!(analyzer.name(), "pipeline_regex");
    }

    #[test]
    fn test_build_analyzer_whitespace_without_lowercase() {
        let analyzer = build_analyzer(TokenizerKind::Whitespace, false).unwrap();
        let texts: Vec<String> = analyzer
            .analyze("Not__Bad GREAT")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(texts, vec!["Not__Bad", "GREAT"]);
        assert_eq!(analyzer.name(), "pipeline_whitespace");
    }

    #[test]
    fn test_build_analyzer_unicode_lowercase() {
        let analyzer = build_analyzer(TokenizerKind::UnicodeWord, true).unwrap();
        let texts: Vec<String> = analyzer
            .analyze("Truly GREAT, film.")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(texts, vec!["truly", "great", "film"]);
    }
}
