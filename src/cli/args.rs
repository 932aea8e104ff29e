//! Command line argument parsing for the Polarity CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;
use crate::ml::estimator::Smoothing;

/// Polarity - a Naive Bayes sentiment classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "polarity")]
#[command(about = "Train and evaluate a Naive Bayes sentiment classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Polarity Contributors")]
#[command(long_about = None)]
pub struct PolarityArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// JSON configuration file; command line flags take precedence
    #[arg(short, long, value_name = "CONFIG_FILE", env = "POLARITY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PolarityArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a labeled corpus
    Train(TrainArgs),

    /// Predict the sentiment of a text
    Predict(PredictArgs),

    /// Measure accuracy on a labeled corpus
    Evaluate(EvaluateArgs),

    /// Show model statistics and its most telling features
    Inspect(InspectArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Corpus directory (pos/ and neg/) or JSON Lines file
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Where to write the trained model
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: PathBuf,

    /// Probability estimation policy
    #[arg(short, long)]
    pub smoothing: Option<SmoothingArg>,

    /// Tokenizer for raw text
    #[arg(short, long)]
    pub tokenizer: Option<TokenizerArg>,

    /// Only use unigram features
    #[arg(long)]
    pub no_bigrams: bool,

    /// Count features in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads for parallel counting
    #[arg(long, requires = "parallel")]
    pub threads: Option<usize>,

    /// Overwrite an existing model file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Trained model file
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the text to classify from a file instead
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Trained model file
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Corpus directory (pos/ and neg/) or JSON Lines file
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Classify test documents in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for model inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Trained model file
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Number of features to list per class
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,
}

/// Smoothing choices on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingArg {
    /// Add-one smoothing
    Laplace,
    /// Raw frequencies; fails on zero counts
    None,
}

impl From<SmoothingArg> for Smoothing {
    fn from(arg: SmoothingArg) -> Self {
        match arg {
            SmoothingArg::Laplace => Smoothing::Laplace,
            SmoothingArg::None => Smoothing::None,
        }
    }
}

/// Tokenizer choices on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerArg {
    /// Word-like regex matches
    Regex,
    /// Split on whitespace (pre-tokenized input)
    Whitespace,
    /// Unicode word boundaries
    UnicodeWord,
}

impl From<TokenizerArg> for TokenizerKind {
    fn from(arg: TokenizerArg) -> Self {
        match arg {
            TokenizerArg::Regex => TokenizerKind::Regex,
            TokenizerArg::Whitespace => TokenizerKind::Whitespace,
            TokenizerArg::UnicodeWord => TokenizerKind::UnicodeWord,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train() {
        let args = PolarityArgs::parse_from([
            "polarity",
            "train",
            "data/train",
            "-o",
            "model.json",
            "--smoothing",
            "none",
            "--tokenizer",
            "unicode-word",
            "--parallel",
            "--threads",
            "4",
        ]);

        match args.command {
            Command::Train(train) => {
                assert_eq!(train.corpus, PathBuf::from("data/train"));
                assert_eq!(train.output, PathBuf::from("model.json"));
                assert_eq!(train.smoothing, Some(SmoothingArg::None));
                assert_eq!(train.tokenizer, Some(TokenizerArg::UnicodeWord));
                assert!(train.parallel);
                assert_eq!(train.threads, Some(4));
            }
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_verbosity() {
        let args = PolarityArgs::parse_from(["polarity", "inspect", "m.json"]);
        assert_eq!(args.verbosity(), 1);

        let args = PolarityArgs::parse_from(["polarity", "-vvv", "inspect", "m.json"]);
        assert_eq!(args.verbosity(), 3);

        let args = PolarityArgs::parse_from(["polarity", "-q", "-vv", "inspect", "m.json"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_predict_requires_text_or_file() {
        assert!(PolarityArgs::try_parse_from(["polarity", "predict", "m.json"]).is_err());
        assert!(
            PolarityArgs::try_parse_from(["polarity", "predict", "m.json", "great movie"]).is_ok()
        );
        assert!(
            PolarityArgs::try_parse_from(["polarity", "predict", "m.json", "--file", "r.txt"])
                .is_ok()
        );
    }

    #[test]
    fn test_format_flag() {
        let args =
            PolarityArgs::parse_from(["polarity", "--format", "json", "--pretty", "inspect", "m"]);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }
}
