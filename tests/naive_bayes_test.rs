use polarity::error::PolarityError;
use polarity::ml::counter::{self, ClassCounts};
use polarity::ml::naive_bayes;
use polarity::ml::{
    Document, Label, LabeledDocument, SentimentClassifier, Smoothing, Trainer, TrainingConfig,
};

fn doc(features: &[&str]) -> Document {
    features.iter().copied().collect()
}

fn balanced_corpus() -> (Vec<Document>, Vec<Document>) {
    let positive = vec![
        doc(&["great", "fun", "film"]),
        doc(&["loved", "great", "acting"]),
        doc(&["fun", "charming", "plot"]),
        doc(&["wonderful", "film", "loved"]),
    ];
    let negative = vec![
        doc(&["boring", "dull", "film"]),
        doc(&["hated", "boring", "acting"]),
        doc(&["dull", "tedious", "plot"]),
        doc(&["awful", "film", "hated"]),
    ];
    (positive, negative)
}

#[test]
fn test_laplace_probabilities_for_small_example() {
    let (probs, class_counts) =
        naive_bayes::train(&[doc(&["good", "great"])], &[doc(&["bad"])]).unwrap();

    assert_eq!(class_counts, ClassCounts::new(1, 1));
    let good = &probs["good"];
    assert!((good.positive - 2.0 / 3.0).abs() < 1e-12);
    assert!((good.negative - 1.0 / 3.0).abs() < 1e-12);
    let bad = &probs["bad"];
    assert!((bad.positive - 1.0 / 3.0).abs() < 1e-12);
    assert!((bad.negative - 2.0 / 3.0).abs() < 1e-12);

    for probability in probs.values() {
        assert!(probability.is_open_unit());
    }
}

#[test]
fn test_accuracy_on_balanced_informative_data() {
    let (positive, negative) = balanced_corpus();
    let (probs, class_counts) = naive_bayes::train(&positive, &negative).unwrap();

    let test_set = vec![
        LabeledDocument::new(Label::Positive, doc(&["great", "fun"])),
        LabeledDocument::new(Label::Positive, doc(&["loved", "wonderful"])),
        LabeledDocument::new(Label::Negative, doc(&["boring", "dull"])),
        LabeledDocument::new(Label::Negative, doc(&["hated", "awful"])),
    ];
    let accuracy = naive_bayes::evaluate(&test_set, &probs, &class_counts).unwrap();
    assert!(accuracy >= 0.5);
    assert_eq!(accuracy, 1.0);
}

#[test]
fn test_training_documents_keep_their_labels() {
    let (positive, negative) = balanced_corpus();
    let (probs, class_counts) = naive_bayes::train(&positive, &negative).unwrap();

    for document in &positive {
        assert_eq!(
            naive_bayes::predict(document, &probs, &class_counts),
            Label::Positive
        );
    }
    for document in &negative {
        assert_eq!(
            naive_bayes::predict(document, &probs, &class_counts),
            Label::Negative
        );
    }
}

#[test]
fn test_unknown_document_is_deterministic() {
    let (positive, negative) = balanced_corpus();
    let (probs, class_counts) = naive_bayes::train(&positive, &negative).unwrap();

    let unknown = doc(&["zebra", "quantum"]);
    let first = naive_bayes::predict(&unknown, &probs, &class_counts);
    for _ in 0..10 {
        assert_eq!(naive_bayes::predict(&unknown, &probs, &class_counts), first);
    }
    assert_eq!(
        naive_bayes::predict(&Document::new(), &probs, &class_counts),
        naive_bayes::predict(&unknown, &probs, &class_counts)
    );
}

#[test]
fn test_empty_test_set_is_an_error() {
    let (positive, negative) = balanced_corpus();
    let (probs, class_counts) = naive_bayes::train(&positive, &negative).unwrap();

    let result = naive_bayes::evaluate(&[], &probs, &class_counts);
    assert!(matches!(result, Err(PolarityError::EmptyTestSet)));
}

#[test]
fn test_unsmoothed_training_fails_on_zero_counts() {
    let (positive, negative) = balanced_corpus();
    let trainer = Trainer::new(TrainingConfig {
        smoothing: Smoothing::None,
        ..TrainingConfig::default()
    })
    .unwrap();

    assert!(matches!(
        trainer.train(&positive, &negative),
        Err(PolarityError::DegenerateProbability { .. })
    ));
    assert!(matches!(
        trainer.train(&positive, &[]),
        Err(PolarityError::EmptyClass {
            label: Label::Negative
        })
    ));
}

#[test]
fn test_parallel_counting_matches_sequential() {
    let (positive, negative) = balanced_corpus();
    let positive: Vec<Document> = positive.iter().cycle().take(400).cloned().collect();
    let negative: Vec<Document> = negative.iter().cycle().take(300).cloned().collect();

    let sequential = counter::merge([
        counter::count_documents(&positive, Label::Positive),
        counter::count_documents(&negative, Label::Negative),
    ]);
    let parallel = counter::merge([
        counter::count_documents_parallel(&positive, Label::Positive),
        counter::count_documents_parallel(&negative, Label::Negative),
    ]);
    assert_eq!(sequential, parallel);

    let model = Trainer::new(TrainingConfig {
        parallel: true,
        ..TrainingConfig::default()
    })
    .unwrap()
    .train(&positive, &negative)
    .unwrap();
    assert_eq!(model.class_counts(), &ClassCounts::new(300, 400));
    assert_eq!(model.predict(&doc(&["great"])), Label::Positive);
}
