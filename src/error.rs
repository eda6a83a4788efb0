// SPDX-License-Identifier: MIT

//! Typed error handling for rule-engine-rs
//!
//! Evaluation itself never fails: malformed rules and mismatched operands
//! simply do not match. These errors cover everything around it, such as
//! loading rule documents and reading configuration.

use thiserror::Error;

/// Top-level error type for rule-engine-rs
#[derive(Debug, Error)]
pub enum RuleError {
    /// Configuration errors (invalid env values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document has an extension we cannot decode
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Document decoded but has the wrong shape for its role
    #[error("Invalid {role} document: expected {expected}")]
    InvalidDocument {
        role: &'static str,
        expected: &'static str,
    },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl RuleError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid document error
    pub fn invalid_document(role: &'static str, expected: &'static str) -> Self {
        Self::InvalidDocument { role, expected }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
