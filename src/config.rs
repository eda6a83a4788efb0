// SPDX-License-Identifier: MIT

//! Engine options and their environment overrides

use crate::error::{Result, RuleError};
use std::env;

/// Environment variable toggling short-circuit evaluation
pub const SHORT_CIRCUIT_ENV: &str = "RULES_SHORT_CIRCUIT";

/// Options controlling how a [`RuleEngine`](crate::engine::RuleEngine) evaluates rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Stop folding a group once its outcome is decided.
    ///
    /// Off by default: every child condition is evaluated.
    pub short_circuit: bool,
}

impl EngineOptions {
    /// Read options from the process environment
    pub fn from_env() -> Result<Self> {
        let short_circuit = match env::var(SHORT_CIRCUIT_ENV) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                RuleError::config(format!(
                    "{} must be a boolean, got '{}'",
                    SHORT_CIRCUIT_ENV, raw
                ))
            })?,
            Err(_) => false,
        };
        Ok(Self { short_circuit })
    }

    pub fn with_short_circuit(mut self, short_circuit: bool) -> Self {
        self.short_circuit = short_circuit;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
