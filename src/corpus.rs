//! Loading labeled review corpora from disk.
//!
//! Two layouts are understood:
//!
//! - a directory with `pos/` and `neg/` subdirectories holding one document
//!   per file;
//! - a JSON Lines file whose records look like `{"label": 1, "text": "..."}`.
//!
//! Text is turned into feature sets by a [`FeatureExtractor`].

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::ml::document::{Document, Label, LabeledDocument};
use crate::ml::features::FeatureExtractor;

/// Subdirectory holding positive documents.
pub const POSITIVE_DIR: &str = "pos";

/// Subdirectory holding negative documents.
pub const NEGATIVE_DIR: &str = "neg";

/// A raw labeled text, the record type of JSON Lines corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExample {
    pub label: Label,
    pub text: String,
}

/// Feature-set documents split by label.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub positive: Vec<Document>,
    pub negative: Vec<Document>,
}

impl Corpus {
    /// Total number of documents.
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into `(label, document)` pairs, positives first.
    pub fn into_labeled(self) -> Vec<LabeledDocument> {
        let positive = self
            .positive
            .into_iter()
            .map(|document| LabeledDocument::new(Label::Positive, document));
        let negative = self
            .negative
            .into_iter()
            .map(|document| LabeledDocument::new(Label::Negative, document));
        positive.chain(negative).collect()
    }
}

/// Load a corpus from a `pos/`+`neg/` directory or a JSON Lines file.
pub fn load_corpus<P: AsRef<Path>>(path: P, extractor: &FeatureExtractor) -> Result<Corpus> {
    let path = path.as_ref();
    let examples = if path.is_dir() {
        read_directory(path)?
    } else if path.is_file() {
        read_jsonl(path)?
    } else {
        return Err(PolarityError::corpus(format!(
            "{} is neither a directory nor a file",
            path.display()
        )));
    };

    let (positive, negative): (Vec<RawExample>, Vec<RawExample>) = examples
        .into_iter()
        .partition(|example| example.label == Label::Positive);

    let corpus = Corpus {
        positive: extract(&positive, extractor)?,
        negative: extract(&negative, extractor)?,
    };

    debug!(
        "Loaded {} positive and {} negative documents from {}",
        corpus.positive.len(),
        corpus.negative.len(),
        path.display()
    );
    if corpus.is_empty() {
        warn!("Corpus at {} contains no documents", path.display());
    }

    Ok(corpus)
}

fn extract(examples: &[RawExample], extractor: &FeatureExtractor) -> Result<Vec<Document>> {
    let texts: Vec<&str> = examples.iter().map(|example| example.text.as_str()).collect();
    extractor.extract_all(&texts)
}

/// Read every file under `pos/` and `neg/`, sorted by path.
pub fn read_directory(root: &Path) -> Result<Vec<RawExample>> {
    let mut examples = Vec::new();

    for (dir_name, label) in [(POSITIVE_DIR, Label::Positive), (NEGATIVE_DIR, Label::Negative)] {
        let dir = root.join(dir_name);
        if !dir.is_dir() {
            return Err(PolarityError::corpus(format!(
                "missing {dir_name}/ directory under {}",
                root.display()
            )));
        }

        for file in list_files(&dir)? {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            examples.push(RawExample { label, text });
        }
    }

    Ok(examples)
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read a JSON Lines corpus. Blank lines are skipped.
pub fn read_jsonl(path: &Path) -> Result<Vec<RawExample>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut examples = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let example: RawExample = serde_json::from_str(&line).map_err(|e| {
            PolarityError::corpus(format!(
                "{} line {}: {e}",
                path.display(),
                line_num + 1
            ))
        })?;
        examples.push(example);
    }

    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::features::FeatureConfig;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new(&FeatureConfig::default()).unwrap()
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("pos")).unwrap();
        fs::create_dir(dir.path().join("neg")).unwrap();
        fs::write(dir.path().join("pos/b.txt"), "A great film").unwrap();
        fs::write(dir.path().join("pos/a.txt"), "Loved it").unwrap();
        fs::write(dir.path().join("neg/a.txt"), "Awful, truly awful").unwrap();

        let corpus = load_corpus(dir.path(), &extractor()).unwrap();

        assert_eq!(corpus.len(), 3);
        assert!(corpus.positive[0].contains("loved__it"));
        assert!(corpus.positive[1].contains("great__film"));
        assert!(corpus.negative[0].contains("truly__awful"));
    }

    #[test]
    fn test_missing_label_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("pos")).unwrap();

        assert!(matches!(
            load_corpus(dir.path(), &extractor()),
            Err(PolarityError::Corpus(_))
        ));
    }

    #[test]
    fn test_load_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.jsonl");
        fs::write(
            &path,
            "{\"label\": 1, \"text\": \"great fun\"}\n\n{\"label\": 0, \"text\": \"dull\"}\n",
        )
        .unwrap();

        let corpus = load_corpus(&path, &extractor()).unwrap();
        assert_eq!(corpus.positive.len(), 1);
        assert_eq!(corpus.negative.len(), 1);

        let labeled = corpus.into_labeled();
        assert_eq!(labeled[0].label, Label::Positive);
        assert!(labeled[1].document.contains("dull"));
    }

    #[test]
    fn test_jsonl_bad_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.jsonl");
        fs::write(&path, "{\"label\": 7, \"text\": \"??\"}\n").unwrap();

        let error = read_jsonl(&path).unwrap_err();
        assert!(error.to_string().contains("line 1"));
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_corpus(dir.path().join("nope"), &extractor()).is_err());
    }
}
