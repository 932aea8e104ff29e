//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PolarityArgs};
use crate::error::Result;
use crate::ml::classifier::ClassScores;
use crate::ml::evaluator::ConfusionMatrix;
use crate::ml::model::WeightedFeature;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub estimator: String,
    pub positive_documents: usize,
    pub negative_documents: usize,
    pub vocabulary_size: usize,
    pub duration_ms: u64,
}

/// Result structure for a single prediction.
///
/// A class with no training documents has a log-prior of `-inf`. Its score is
/// reported as `None` (`null` in JSON, `n/a` in human output), and so is the
/// log-odds margin.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: u8,
    pub sentiment: String,
    pub positive_score: Option<f64>,
    pub negative_score: Option<f64>,
    /// `positive_score - negative_score`.
    pub log_odds: Option<f64>,
    /// Features of the text that are in the model vocabulary.
    pub known_features: usize,
    pub total_features: usize,
}

impl PredictionResult {
    pub fn new(scores: &ClassScores, known_features: usize, total_features: usize) -> Self {
        let label = scores.label();
        Self {
            label: label.as_u8(),
            sentiment: label.to_string(),
            positive_score: finite(scores.positive),
            negative_score: finite(scores.negative),
            log_odds: finite(scores.margin()),
            known_features,
            total_features,
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Result structure for evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub confusion: ConfusionMatrix,
    pub duration_ms: u64,
}

/// Result structure for model inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSummary {
    pub estimator: String,
    pub trained_at: String,
    pub positive_documents: usize,
    pub negative_documents: usize,
    pub vocabulary_size: usize,
    pub top_positive: Vec<WeightedFeature>,
    pub top_negative: Vec<WeightedFeature>,
}

/// Output a result in the format selected on the command line.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &PolarityArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &PolarityArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_generic_human(&value, 0);
    Ok(())
}

/// Print objects as indented `key: value` lines.
fn output_generic_human(value: &serde_json::Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(_) => {
                        println!("{indent}{key}:");
                        output_generic_human(val, depth + 1);
                    }
                    serde_json::Value::Array(items) if items.iter().all(|i| i.is_object()) => {
                        println!("{indent}{key}:");
                        for item in items {
                            println!("{indent}  - {}", format_row(item));
                        }
                    }
                    _ => println!("{indent}{key}: {}", format_value(val)),
                }
            }
        }
        _ => println!("{indent}{}", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PolarityArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format an object as a single `a=1, b=2` row.
fn format_row(value: &serde_json::Value) -> String {
    match value.as_object() {
        Some(obj) => obj
            .iter()
            .map(|(key, val)| format!("{key}={}", format_value(val)))
            .collect::<Vec<_>>()
            .join(", "),
        None => format_value(value),
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.4}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(0.123456)), "0.1235");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(null)), "n/a");
        assert_eq!(format_value(&json!(["a", 1])), "[a, 1]");
    }

    #[test]
    fn test_format_row() {
        let row = json!({"feature": "great", "log_odds": 1.5});
        assert_eq!(format_row(&row), "feature=great, log_odds=1.5000");
    }

    #[test]
    fn test_prediction_with_empty_class_has_no_scores() {
        let scores = ClassScores {
            negative: f64::NEG_INFINITY,
            positive: -1.5,
        };
        let result = PredictionResult::new(&scores, 1, 2);

        assert_eq!(result.label, 1);
        assert_eq!(result.sentiment, "positive");
        assert_eq!(result.positive_score, Some(-1.5));
        assert_eq!(result.negative_score, None);
        assert_eq!(result.log_odds, None);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["negative_score"], json!(null));
        assert_eq!(format_value(&value["negative_score"]), "n/a");
        assert_eq!(format_value(&value["positive_score"]), "-1.5000");
    }

    #[test]
    fn test_prediction_log_odds() {
        let scores = ClassScores {
            negative: -2.0,
            positive: -3.0,
        };
        let result = PredictionResult::new(&scores, 0, 0);

        assert_eq!(result.label, 0);
        assert_eq!(result.log_odds, Some(-1.0));
    }
}
