pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod context;
pub mod errors;

pub use artifacts::{ArtifactStore, LabelEncoder, ModelArtifacts, ModelWeights, Vocabulary};
pub use catalog::{Intent, IntentCatalog};
pub use config::{
    init_logging, AppConfig, ConfigError, ConfigOverrides, DataConfig, LoadOptions, LogFormat,
    LoggingConfig,
};
pub use context::{SessionContext, TranscriptEntry};
pub use errors::{ArtifactError, CatalogError};
