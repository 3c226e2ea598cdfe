use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the intent catalog. These are startup-fatal: a
/// conversation engine must never serve turns against a catalog it could not
/// validate.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read intent catalog `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse intent catalog `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("intent `{tag}` has no response templates")]
    EmptyResponses { tag: String },
    #[error("duplicate intent tag `{tag}`")]
    DuplicateTag { tag: String },
    #[error("intent catalog defines no intents")]
    Empty,
}

/// Failures while loading the frozen classifier artifacts. These are
/// degraded-continue: the caller treats a failed load as a permanently
/// unavailable classifier and keeps serving turns via delegation.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not read model artifact `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse model artifact `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("vocabulary is empty")]
    EmptyVocabulary,
    #[error("label encoder defines no classes")]
    EmptyLabels,
    #[error("weight matrix has {rows} rows but the label encoder defines {classes} classes")]
    ClassDimensionMismatch { rows: usize, classes: usize },
    #[error("weight row {row} has {cols} columns but the vocabulary has {vocab} tokens")]
    InputDimensionMismatch { row: usize, cols: usize, vocab: usize },
    #[error("bias vector has {len} entries but the label encoder defines {classes} classes")]
    BiasDimensionMismatch { len: usize, classes: usize },
}

#[cfg(test)]
mod tests {
    use super::{ArtifactError, CatalogError};

    #[test]
    fn catalog_errors_name_the_offending_tag() {
        let err = CatalogError::EmptyResponses { tag: "weather".to_string() };
        assert_eq!(err.to_string(), "intent `weather` has no response templates");
    }

    #[test]
    fn artifact_dimension_errors_carry_both_sides() {
        let err = ArtifactError::ClassDimensionMismatch { rows: 4, classes: 6 };
        assert!(err.to_string().contains("4 rows"));
        assert!(err.to_string().contains("6 classes"));
    }
}
