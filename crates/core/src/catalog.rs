use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// One intent definition from the catalog document. `patterns` belongs to the
/// external training job; the engine parses it so the trainer's document
/// loads unchanged, but only `responses` is consumed at serve time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    intents: Vec<Intent>,
}

/// The read-only mapping from intent tag to its canned response set.
///
/// Loaded once at startup and never mutated. Load-time invariant: every tag
/// is unique and carries at least one response template, so a renderer
/// holding a tag that exists here can always produce a reply.
#[derive(Clone, Debug)]
pub struct IntentCatalog {
    intents: HashMap<String, Intent>,
}

impl IntentCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let document: CatalogDocument = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;
        Self::from_intents(document.intents)
    }

    pub fn from_intents(intents: Vec<Intent>) -> Result<Self, CatalogError> {
        if intents.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_tag = HashMap::with_capacity(intents.len());
        for intent in intents {
            if intent.responses.is_empty() {
                return Err(CatalogError::EmptyResponses { tag: intent.tag });
            }
            let tag = intent.tag.clone();
            if by_tag.insert(tag.clone(), intent).is_some() {
                return Err(CatalogError::DuplicateTag { tag });
            }
        }

        Ok(Self { intents: by_tag })
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.intents.contains_key(tag)
    }

    /// Response templates for a tag, or `None` for an unmapped tag. Callers
    /// must treat `None` as "delegate", never as a fault.
    pub fn responses(&self, tag: &str) -> Option<&[String]> {
        self.intents.get(tag).map(|intent| intent.responses.as_slice())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.intents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
