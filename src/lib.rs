// SPDX-License-Identifier: MIT

//! Rule matching over JSON values: condition trees, operators and path lookup

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;

pub use config::EngineOptions;
pub use engine::{filter, trigger, Condition, Logic, OperatorRegistry, RuleEngine};
pub use error::RuleError;
