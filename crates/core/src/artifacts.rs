use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ArtifactError;

/// Ordered token list fixed at training time. Position defines the feature
/// vector index for that token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    tokens: Vec<String>,
}

impl Vocabulary {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Bijection between intent tags and the classifier's class indices. The
/// class index is the position in the list, matching the trainer's encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    tags: Vec<String>,
}

impl LabelEncoder {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tag(&self, class_index: usize) -> Option<&str> {
        self.tags.get(class_index).map(String::as_str)
    }

    pub fn class_index(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|candidate| candidate == tag)
    }
}

/// Dense-layer weights of the frozen classifier: one row of `|vocabulary|`
/// coefficients per class, plus a per-class bias.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// The frozen triple the external training job produces. Immutable after
/// load; shared read-only across every turn of every conversation.
#[derive(Clone, Debug)]
pub struct ModelArtifacts {
    pub vocabulary: Vocabulary,
    pub labels: LabelEncoder,
    pub model: ModelWeights,
}

impl ModelArtifacts {
    /// Cross-checks the triple's dimensions. A mismatch means the artifact
    /// set is malformed and must be treated as unavailable.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.vocabulary.is_empty() {
            return Err(ArtifactError::EmptyVocabulary);
        }
        if self.labels.is_empty() {
            return Err(ArtifactError::EmptyLabels);
        }
        if self.model.weights.len() != self.labels.len() {
            return Err(ArtifactError::ClassDimensionMismatch {
                rows: self.model.weights.len(),
                classes: self.labels.len(),
            });
        }
        for (row, coefficients) in self.model.weights.iter().enumerate() {
            if coefficients.len() != self.vocabulary.len() {
                return Err(ArtifactError::InputDimensionMismatch {
                    row,
                    cols: coefficients.len(),
                    vocab: self.vocabulary.len(),
                });
            }
        }
        if self.model.bias.len() != self.labels.len() {
            return Err(ArtifactError::BiasDimensionMismatch {
                len: self.model.bias.len(),
                classes: self.labels.len(),
            });
        }
        Ok(())
    }
}

/// Loads the frozen triple from a model directory:
/// `vocabulary.json`, `labels.json`, `model.json`.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    model_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self { model_dir: model_dir.into() }
    }

    pub fn load(&self) -> Result<ModelArtifacts, ArtifactError> {
        let vocabulary: Vocabulary = self.read_json("vocabulary.json")?;
        let labels: LabelEncoder = self.read_json("labels.json")?;
        let model: ModelWeights = self.read_json("model.json")?;

        let artifacts = ModelArtifacts { vocabulary, labels, model };
        artifacts.validate()?;
        Ok(artifacts)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, file: &str) -> Result<T, ArtifactError> {
        let path = self.model_dir.join(file);
        let raw = fs::read_to_string(&path)
            .map_err(|source| ArtifactError::ReadFile { path: path.clone(), source })?;
        serde_json::from_str(&raw).map_err(|source| ArtifactError::ParseFile { path, source })
    }
}
