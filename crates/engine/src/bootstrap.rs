use banter_core::config::{AppConfig, ConfigError};
use banter_core::{ArtifactStore, CatalogError, IntentCatalog, ModelArtifacts};
use thiserror::Error;
use tracing::{info, warn};

use crate::search::{SearchClient, UnavailableSearchClient};
use crate::turn::ChatEngine;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("intent catalog failed to load: {0}")]
    Catalog(#[from] CatalogError),
}

/// Assemble a [`ChatEngine`] from configuration.
///
/// A malformed intent catalog aborts startup. A missing or malformed model
/// artifact set does not: the engine boots with the classifier permanently
/// unavailable, and every turn that survives the rule router delegates.
pub fn bootstrap(
    config: &AppConfig,
    search: Box<dyn SearchClient>,
) -> Result<ChatEngine, BootstrapError> {
    info!(
        catalog = %config.data.catalog_path.display(),
        model_dir = %config.data.model_dir.display(),
        "starting engine bootstrap"
    );

    let catalog = IntentCatalog::load(&config.data.catalog_path)?;
    info!(intents = catalog.len(), "intent catalog loaded");

    let artifacts = load_artifacts(config);
    Ok(ChatEngine::new(catalog, artifacts, search))
}

/// Bootstrap with no search collaborator wired in; delegated turns answer
/// with the degraded search reply.
pub fn bootstrap_offline(config: &AppConfig) -> Result<ChatEngine, BootstrapError> {
    bootstrap(config, Box::new(UnavailableSearchClient))
}

fn load_artifacts(config: &AppConfig) -> Option<ModelArtifacts> {
    match ArtifactStore::new(&config.data.model_dir).load() {
        Ok(artifacts) => {
            info!(
                vocabulary = artifacts.vocabulary.len(),
                classes = artifacts.labels.len(),
                "classifier artifacts loaded"
            );
            Some(artifacts)
        }
        Err(error) => {
            warn!(%error, "classifier artifacts unavailable, all unmatched turns will delegate");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use banter_core::config::{AppConfig, DataConfig, LogFormat, LoggingConfig};

    use super::{bootstrap_offline, BootstrapError};

    fn config(catalog_path: PathBuf, model_dir: PathBuf) -> AppConfig {
        AppConfig {
            data: DataConfig { catalog_path, model_dir },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }

    #[test]
    fn malformed_catalog_is_startup_fatal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog_path = dir.path().join("intents.json");
        fs::write(&catalog_path, "{not json").expect("write catalog");

        let result = bootstrap_offline(&config(catalog_path, dir.path().to_path_buf()));
        assert!(matches!(result, Err(BootstrapError::Catalog(_))));
    }

    #[test]
    fn missing_artifacts_degrade_instead_of_failing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog_path = dir.path().join("intents.json");
        fs::write(
            &catalog_path,
            r#"{"intents": [{"tag": "greeting", "patterns": [], "responses": ["Hello!"]}]}"#,
        )
        .expect("write catalog");

        let engine = bootstrap_offline(&config(catalog_path, dir.path().join("no-models")))
            .expect("engine should boot degraded");
        assert!(!engine.classifier_available());
    }

    #[test]
    fn full_artifact_directory_boots_an_available_classifier() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog_path = dir.path().join("intents.json");
        fs::write(
            &catalog_path,
            r#"{"intents": [{"tag": "weather", "patterns": [], "responses": ["Sunny."]}]}"#,
        )
        .expect("write catalog");

        let models = dir.path().join("models");
        fs::create_dir(&models).expect("models dir");
        fs::write(models.join("vocabulary.json"), r#"["weather"]"#).expect("vocab");
        fs::write(models.join("labels.json"), r#"["weather"]"#).expect("labels");
        fs::write(models.join("model.json"), r#"{"weights": [[3.0]], "bias": [0.0]}"#)
            .expect("model");

        let engine = bootstrap_offline(&config(catalog_path, models))
            .expect("engine should boot with artifacts");
        assert!(engine.classifier_available());
    }
}
