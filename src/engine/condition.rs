// SPDX-License-Identifier: MIT

//! Condition tree nodes as they appear in rule documents

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in a rule's boolean expression tree.
///
/// Leaf nodes populate `operator`, `property` and either `value` or
/// `variable`. Composite nodes populate `logic` and `conditions`. Every field
/// is optional in the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Condition {
    /// Operator slug, e.g. `>=` or `contains`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operator: String,
    /// Literal comparison value
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
    /// Context variable to compare against instead of `value`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variable: String,
    /// Dot-path into the subject
    #[serde(skip_serializing_if = "String::is_empty")]
    pub property: String,
    /// `and` / `or`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub logic: String,
    /// Child nodes, evaluated left to right
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// Logical connective of a composite node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    /// Parse a connective; anything but `and` / `or` is unrecognized
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "and" => Some(Logic::And),
            "or" => Some(Logic::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::And => "and",
            Logic::Or => "or",
        }
    }

    pub(crate) fn combine(self, acc: bool, next: bool) -> bool {
        match self {
            Logic::And => acc && next,
            Logic::Or => acc || next,
        }
    }

    /// Whether `acc` already decides the group regardless of later children
    pub(crate) fn is_decided(self, acc: bool) -> bool {
        match self {
            Logic::And => !acc,
            Logic::Or => acc,
        }
    }
}

impl std::fmt::Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Condition {
    /// Leaf comparing `property` against a literal
    pub fn leaf(property: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        Self {
            operator: operator.into(),
            property: property.into(),
            value,
            ..Default::default()
        }
    }

    /// Leaf comparing `property` against a context variable
    pub fn variable(
        property: impl Into<String>,
        operator: impl Into<String>,
        variable: impl Into<String>,
    ) -> Self {
        Self {
            operator: operator.into(),
            property: property.into(),
            variable: variable.into(),
            ..Default::default()
        }
    }

    /// Composite node with an explicit connective
    pub fn group(logic: Logic, conditions: Vec<Condition>) -> Self {
        Self {
            logic: logic.as_str().to_string(),
            conditions,
            ..Default::default()
        }
    }

    /// `and` group
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::group(Logic::And, conditions)
    }

    /// `or` group
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::group(Logic::Or, conditions)
    }

    /// A node is composite when it has both a connective and children
    pub fn is_composite(&self) -> bool {
        !self.conditions.is_empty() && !self.logic.is_empty()
    }
}
