// SPDX-License-Identifier: MIT

//! Rule evaluation
//!
//! Rules are trees of [`Condition`] nodes, usually decoded from JSON or YAML:
//!
//! ```json
//! {"logic": "and", "conditions": [
//!     {"property": "age", "operator": ">=", "value": 18},
//!     {"property": "country", "operator": "in", "value": ["US", "CA"]}
//! ]}
//! ```
//!
//! [`trigger`] checks a single context against a rule, [`filter`] selects the
//! items of a sequence that satisfy it.

mod condition;
mod evaluator;
mod operators;
pub mod path;

pub use condition::{Condition, Logic};
pub use evaluator::Evaluator;
pub use operators::{Operator, OperatorRegistry};

use crate::config::EngineOptions;
use serde_json::Value;

/// Entry point pairing an operator registry with evaluation options
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'r> {
    registry: &'r OperatorRegistry,
    options: EngineOptions,
}

impl RuleEngine<'static> {
    /// Engine over the process-wide registry with default options
    pub fn global() -> Self {
        Self::new(OperatorRegistry::global())
    }
}

impl Default for RuleEngine<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'r> RuleEngine<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self {
            registry,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    fn evaluator(&self) -> Evaluator<'r> {
        Evaluator::new(self.registry).short_circuit(self.options.short_circuit)
    }

    /// Evaluate `rule` with `context` serving as both subject and variables
    pub fn trigger(&self, rule: &Condition, context: &Value) -> bool {
        self.evaluator().evaluate_rule(rule, context, Some(context))
    }

    /// Items satisfying `rule`, in their original order
    pub fn filter<'a>(
        &self,
        rule: &Condition,
        items: &'a [Value],
        context: Option<&Value>,
    ) -> Vec<&'a Value> {
        let evaluator = self.evaluator();
        let matched: Vec<&Value> = items
            .iter()
            .filter(|item| evaluator.evaluate_rule(rule, item, context))
            .collect();
        log::debug!("Filter matched {} of {} items", matched.len(), items.len());
        matched
    }
}

/// [`RuleEngine::trigger`] on the process-wide registry
pub fn trigger(rule: &Condition, context: &Value) -> bool {
    RuleEngine::global().trigger(rule, context)
}

/// [`RuleEngine::filter`] on the process-wide registry
pub fn filter<'a>(rule: &Condition, items: &'a [Value], context: Option<&Value>) -> Vec<&'a Value> {
    RuleEngine::global().filter(rule, items, context)
}
