// SPDX-License-Identifier: MIT

//! Condition tree evaluator

use super::condition::{Condition, Logic};
use super::operators::OperatorRegistry;
use super::path;
use serde_json::Value;

static ABSENT: Value = Value::Null;

/// Walks a condition tree against a subject.
///
/// Never fails: unknown operators, unknown logic, empty groups and
/// mismatched operands all evaluate to `false`.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r OperatorRegistry,
    short_circuit: bool,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self {
            registry,
            short_circuit: false,
        }
    }

    /// Stop folding a group once its outcome is decided
    pub fn short_circuit(mut self, enabled: bool) -> Self {
        self.short_circuit = enabled;
        self
    }

    /// Evaluate a root rule. The root is always read as a group, so a rule
    /// without `logic` and `conditions` does not match.
    pub fn evaluate_rule(
        &self,
        rule: &Condition,
        subject: &Value,
        context: Option<&Value>,
    ) -> bool {
        self.evaluate_group(rule, subject, context)
    }

    /// Evaluate `node` against `subject`, resolving variables from `context`
    pub fn evaluate(&self, node: &Condition, subject: &Value, context: Option<&Value>) -> bool {
        if node.is_composite() {
            self.evaluate_group(node, subject, context)
        } else {
            self.evaluate_leaf(node, subject, context)
        }
    }

    fn evaluate_group(&self, node: &Condition, subject: &Value, context: Option<&Value>) -> bool {
        let Some(logic) = Logic::parse(&node.logic) else {
            log::debug!("Unknown logic '{}', group does not match", node.logic);
            return false;
        };

        if node.conditions.is_empty() {
            log::debug!("Empty '{}' group does not match", logic);
            return false;
        }

        // Both connectives start from true, so a non-empty `or` always holds.
        let mut result = true;
        for child in &node.conditions {
            if self.short_circuit && logic.is_decided(result) {
                break;
            }
            let child_result = self.evaluate(child, subject, context);
            result = logic.combine(result, child_result);
        }
        result
    }

    fn evaluate_leaf(&self, node: &Condition, subject: &Value, context: Option<&Value>) -> bool {
        let op = self.registry.resolve(&node.operator);
        if op.is_not_found() {
            log::debug!("Unknown operator '{}', condition does not match", node.operator);
            return false;
        }

        let property = path::resolve(subject, &node.property).unwrap_or(&ABSENT);
        let value = match context {
            Some(ctx) if !node.variable.is_empty() => ctx.get(&node.variable).unwrap_or(&ABSENT),
            _ => &node.value,
        };

        let matched = op.matches(property, value);
        log::trace!("{} {} {} -> {}", node.property, op, value, matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn evaluator() -> Evaluator<'static> {
        Evaluator::new(OperatorRegistry::global())
    }

    fn always() -> Condition {
        Condition::leaf("", "=", json!({"flag": true}))
    }

    fn never() -> Condition {
        Condition::leaf("flag", "=", json!(false))
    }

    #[test]
    fn test_leaf_literal() {
        let subject = json!({"age": 20});
        assert!(evaluator().evaluate(&Condition::leaf("age", ">=", json!(18)), &subject, None));
        assert!(!evaluator().evaluate(&Condition::leaf("age", "<", json!(18)), &subject, None));
    }

    #[test]
    fn test_leaf_empty_path_compares_whole_subject() {
        let subject = json!({"flag": true});
        assert!(evaluator().evaluate(&always(), &subject, None));
        assert!(!evaluator().evaluate(&never(), &subject, None));
    }

    #[test]
    fn test_leaf_variable_from_context() {
        let subject = json!({"owner": "alice"});
        let context = json!({"user": "alice", "other": "bob"});

        let cond = Condition::variable("owner", "=", "user");
        assert!(evaluator().evaluate(&cond, &subject, Some(&context)));

        let cond = Condition::variable("owner", "=", "other");
        assert!(!evaluator().evaluate(&cond, &subject, Some(&context)));
    }

    #[test]
    fn test_missing_variable_is_null() {
        let subject = json!({"deleted_at": null});
        let context = json!({});
        let cond = Condition::variable("deleted_at", "=", "missing");
        assert!(evaluator().evaluate(&cond, &subject, Some(&context)));

        let cond = Condition::variable("deleted_at", ">", "missing");
        assert!(!evaluator().evaluate(&cond, &subject, Some(&context)));
    }

    #[test]
    fn test_variable_without_context_uses_literal() {
        let subject = json!({"owner": "alice"});
        let mut cond = Condition::variable("owner", "=", "user");
        cond.value = json!("alice");
        assert!(evaluator().evaluate(&cond, &subject, None));
    }

    #[test]
    fn test_absent_property() {
        let subject = json!({"a": 1});
        assert!(!evaluator().evaluate(&Condition::leaf("x", ">", json!(0)), &subject, None));
        assert!(!evaluator().evaluate(&Condition::leaf("x", "contains", json!("")), &subject, None));
        assert!(evaluator().evaluate(&Condition::leaf("x", "!=", json!(1)), &subject, None));
    }

    #[test]
    fn test_unknown_operator() {
        let subject = json!({"a": 1});
        assert!(!evaluator().evaluate(&Condition::leaf("a", "~=", json!(1)), &subject, None));
        assert!(!evaluator().evaluate(&Condition::leaf("a", "", json!(1)), &subject, None));
    }

    #[test]
    fn test_and_or() {
        let subject = json!({"flag": true});
        let and = Condition::all(vec![always(), never()]);
        let or = Condition::any(vec![always(), never()]);
        assert!(!evaluator().evaluate(&and, &subject, None));
        assert!(evaluator().evaluate(&or, &subject, None));
    }

    #[test]
    fn test_or_group_starts_true() {
        let subject = json!({"flag": true});
        let or = Condition::any(vec![never(), never()]);
        assert!(evaluator().evaluate(&or, &subject, None));
        assert!(evaluator().evaluate(&Condition::any(vec![never()]), &subject, None));
    }

    #[test]
    fn test_and_group_folds_every_child() {
        let subject = json!({"flag": true});
        assert!(evaluator().evaluate(&Condition::all(vec![always()]), &subject, None));
        let both = Condition::all(vec![always(), always()]);
        assert!(evaluator().evaluate(&both, &subject, None));
        let middle_fails = Condition::all(vec![always(), never(), always()]);
        assert!(!evaluator().evaluate(&middle_fails, &subject, None));
        assert!(!evaluator().evaluate(&Condition::all(vec![never()]), &subject, None));
    }

    #[test]
    fn test_root_leaf_does_not_match() {
        let subject = json!({"a": 1});
        let leaf = Condition::leaf("a", "=", json!(1));
        assert!(evaluator().evaluate(&leaf, &subject, None));
        assert!(!evaluator().evaluate_rule(&leaf, &subject, None));
        assert!(evaluator().evaluate_rule(&Condition::all(vec![leaf]), &subject, None));
        assert!(!evaluator().evaluate_rule(&Condition::default(), &subject, None));
    }

    #[test]
    fn test_empty_group_does_not_match() {
        let subject = json!({"flag": true});
        for logic in ["and", "or", "xor", ""] {
            let cond = Condition {
                logic: logic.to_string(),
                ..Default::default()
            };
            assert!(!evaluator().evaluate(&cond, &subject, None), "logic {:?}", logic);
        }
    }

    #[test]
    fn test_unknown_logic_does_not_match() {
        let subject = json!({"flag": true});
        let cond = Condition {
            logic: "xor".into(),
            conditions: vec![always(), always()],
            ..Default::default()
        };
        assert!(!evaluator().evaluate(&cond, &subject, None));

        let cond = Condition {
            logic: "AND".into(),
            conditions: vec![always()],
            ..Default::default()
        };
        assert!(!evaluator().evaluate(&cond, &subject, None));
    }

    #[test]
    fn test_nested_groups() {
        let subject = json!({"role": "editor", "owner": "alice", "locked": false});
        let context = json!({"user": "alice"});
        let cond = Condition::all(vec![
            Condition::leaf("role", "in", json!(["editor", "author"])),
            Condition::all(vec![
                Condition::variable("owner", "=", "user"),
                Condition::leaf("locked", "!=", json!(true)),
            ]),
        ]);
        assert!(evaluator().evaluate(&cond, &subject, Some(&context)));

        let context = json!({"user": "bob"});
        assert!(!evaluator().evaluate(&cond, &subject, Some(&context)));
    }

    #[test]
    fn test_malformed_child_fails_closed() {
        let subject = json!({"flag": true});
        let cond = Condition::all(vec![
            always(),
            Condition {
                logic: "nand".into(),
                conditions: vec![always()],
                ..Default::default()
            },
        ]);
        assert!(!evaluator().evaluate(&cond, &subject, None));
    }

    #[test]
    fn test_short_circuit_agrees_with_full_evaluation() {
        let subject = json!({"flag": true, "n": 3});
        let rules = vec![
            Condition::all(vec![never(), always(), always()]),
            Condition::all(vec![always(), always()]),
            Condition::any(vec![always(), never()]),
            Condition::any(vec![never(), never(), always()]),
            Condition::any(vec![
                Condition::all(vec![never(), always()]),
                Condition::leaf("n", "<=", json!(3)),
            ]),
        ];
        let full = evaluator();
        let short = evaluator().short_circuit(true);
        for rule in &rules {
            assert_eq!(
                full.evaluate(rule, &subject, None),
                short.evaluate(rule, &subject, None)
            );
        }
    }
}
