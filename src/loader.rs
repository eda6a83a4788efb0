// SPDX-License-Identifier: MIT

//! Document loader - JSON and YAML file loading
//!
//! Rule, subject and context documents can be written in either format; the
//! file extension decides which decoder is used.

use crate::engine::Condition;
use crate::error::{Result, RuleError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Encoding of a document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(RuleError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads rule and data documents from disk
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a rule (condition tree)
    pub fn load_rule<P: AsRef<Path>>(&self, path: P) -> Result<Condition> {
        self.load(path)
    }

    /// Load a context; it must be a map
    pub fn load_context<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        let value: Value = self.load(path)?;
        if !value.is_object() {
            return Err(RuleError::invalid_document("context", "a map"));
        }
        Ok(value)
    }

    /// Load a sequence of subjects
    pub fn load_items<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Value>> {
        match self.load(path)? {
            Value::Array(items) => Ok(items),
            _ => Err(RuleError::invalid_document("items", "a sequence")),
        }
    }

    /// Load any deserializable document
    pub fn load<T: DeserializeOwned, P: AsRef<Path>>(&self, path: P) -> Result<T> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        log::info!("Loaded {:?} document from {}", format, path.display());
        Self::parse(&content, format)
    }

    /// Parse a document from a string
    pub fn parse<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
        let doc = match format {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(doc)
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}
