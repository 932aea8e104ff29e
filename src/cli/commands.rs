//! Command implementations for the Polarity CLI.

use std::fs;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus;
use crate::error::{PolarityError, Result};
use crate::ml::classifier::SentimentClassifier;
use crate::ml::document::Label;
use crate::ml::evaluator;
use crate::ml::features::FeatureExtractor;
use crate::ml::model::NaiveBayesModel;
use crate::ml::trainer::Trainer;
use crate::ml::PolarityConfig;

/// Execute a CLI command.
pub fn execute_command(args: PolarityArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args, &args),
        Command::Predict(predict_args) => predict_text(predict_args, &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args, &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args, &args),
    }
}

/// Load the configuration file, if any, and apply training flag overrides.
fn resolve_config(train_args: Option<&TrainArgs>, cli_args: &PolarityArgs) -> Result<PolarityConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            PolarityConfig::load(path)?
        }
        None => PolarityConfig::default(),
    };

    if let Some(train_args) = train_args {
        if let Some(smoothing) = train_args.smoothing {
            config.training.smoothing = smoothing.into();
        }
        if let Some(tokenizer) = train_args.tokenizer {
            config.features.tokenizer = tokenizer.into();
        }
        if train_args.no_bigrams {
            config.features.bigrams = false;
        }
        if train_args.parallel {
            config.training.parallel = true;
        }
        if train_args.threads.is_some() {
            config.training.num_threads = train_args.threads;
        }
        config.validate()?;
    }

    Ok(config)
}

/// Train a model and save it.
fn train_model(args: &TrainArgs, cli_args: &PolarityArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(PolarityError::InvalidOperation(format!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        )));
    }

    let config = resolve_config(Some(args), cli_args)?;
    let start_time = Instant::now();

    let extractor = FeatureExtractor::new(&config.features)?;
    let corpus = corpus::load_corpus(&args.corpus, &extractor)?;
    info!(
        "Training on {} documents from {}",
        corpus.len(),
        args.corpus.display()
    );

    let trainer = Trainer::new(config.training.clone())?;
    let model = trainer
        .train(&corpus.positive, &corpus.negative)?
        .with_feature_config(config.features.clone());

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    model.save(&args.output)?;

    output_result(
        "Model trained successfully",
        &TrainingResult {
            model_path: args.output.to_string_lossy().to_string(),
            estimator: model.estimator().to_string(),
            positive_documents: model.class_counts().positive,
            negative_documents: model.class_counts().negative,
            vocabulary_size: model.vocabulary_size(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Classify one text.
fn predict_text(args: &PredictArgs, cli_args: &PolarityArgs) -> Result<()> {
    let model = NaiveBayesModel::load(&args.model)?;
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(file)) => fs::read_to_string(file)?,
        (None, None) => return Err(PolarityError::invalid_argument("no text to classify")),
    };

    let extractor = FeatureExtractor::new(model.feature_config())?;
    let document = extractor.extract(&text)?;
    let scores = model.scores(&document);
    let known_features = document
        .iter()
        .filter(|feature| model.probability(feature).is_some())
        .count();

    output_result(
        "Prediction",
        &PredictionResult::new(&scores, known_features, document.len()),
        cli_args,
    )
}

/// Evaluate a model against a labeled corpus.
fn evaluate_model(args: &EvaluateArgs, cli_args: &PolarityArgs) -> Result<()> {
    let model = NaiveBayesModel::load(&args.model)?;
    let extractor = FeatureExtractor::new(model.feature_config())?;
    let test_set = corpus::load_corpus(&args.corpus, &extractor)?.into_labeled();

    let start_time = Instant::now();
    let summary = if args.parallel {
        evaluator::evaluate_parallel(&model, &test_set)?
    } else {
        evaluator::evaluate(&model, &test_set)?
    };

    output_result(
        &format!("Evaluation of {}", model.name()),
        &EvaluationResult {
            total: summary.total,
            correct: summary.correct,
            accuracy: summary.accuracy,
            precision: summary.precision(),
            recall: summary.recall(),
            confusion: summary.confusion,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Summarize a saved model.
fn inspect_model(args: &InspectArgs, cli_args: &PolarityArgs) -> Result<()> {
    let model = NaiveBayesModel::load(&args.model)?;

    output_result(
        "Model summary",
        &ModelSummary {
            estimator: model.estimator().to_string(),
            trained_at: model.trained_at().to_rfc3339(),
            positive_documents: model.class_counts().positive,
            negative_documents: model.class_counts().negative,
            vocabulary_size: model.vocabulary_size(),
            top_positive: model.top_features(Label::Positive, args.top),
            top_negative: model.top_features(Label::Negative, args.top),
        },
        cli_args,
    )
}
