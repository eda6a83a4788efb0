// SPDX-License-Identifier: MIT

//! Comparison operator catalog and slug registry
//!
//! Every operator is a plain predicate over two JSON values: the resolved
//! subject property on the left and the literal (or context variable) on the
//! right. Operand shapes an operator does not understand never raise, they
//! just fail to match.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Comparison function of an operator: `(property, value) -> matched`
type Predicate = fn(&Value, &Value) -> bool;

/// A canonical operator and the slugs that name it
pub struct Operator {
    name: &'static str,
    description: &'static str,
    slugs: &'static [&'static str],
    predicate: Predicate,
}

impl Operator {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn slugs(&self) -> &'static [&'static str] {
        self.slugs
    }

    /// Apply the operator to a resolved property and comparison value
    pub fn matches(&self, property: &Value, value: &Value) -> bool {
        (self.predicate)(property, value)
    }

    /// True for the sentinel returned for unknown slugs
    pub fn is_not_found(&self) -> bool {
        std::ptr::eq(self, &NOT_FOUND)
    }
}

impl std::fmt::Debug for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("slugs", &self.slugs)
            .finish()
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

static NOT_FOUND: Operator = Operator {
    name: "not_found",
    description: "Unknown operator, never matches",
    slugs: &[],
    predicate: never,
};

static CATALOG: &[Operator] = &[
    Operator {
        name: "equals",
        description: "Equals",
        slugs: &["=", "===", "equal_to", "equals", "is", "is_equal_to"],
        predicate: equals,
    },
    Operator {
        name: "not_equals",
        description: "Does not equal",
        slugs: &[
            "!=",
            "!==",
            "doesnt_equal",
            "doesnt_equal_to",
            "is_not",
            "is_not_equal_to",
            "not",
            "not_equal",
            "not_equal_to",
            "!equals",
        ],
        predicate: not_equals,
    },
    Operator {
        name: "contains",
        description: "Text contains the value",
        slugs: &["contains", "has", "includes"],
        predicate: contains,
    },
    Operator {
        name: "not_contains",
        description: "Text does not contain the value",
        slugs: &[
            "!contains",
            "!has",
            "!includes",
            "doesnt_contain",
            "doesnt_have",
            "not_contains",
        ],
        predicate: not_contains,
    },
    Operator {
        name: "greater_than",
        description: "Greater than",
        slugs: &["greater_than", ">"],
        predicate: greater_than,
    },
    Operator {
        name: "greater_than_or_equal_to",
        description: "Greater than or equal to",
        slugs: &["greater_than_or_equal_to", ">=", "gte"],
        predicate: greater_than_or_equal,
    },
    Operator {
        name: "less_than",
        description: "Less than",
        slugs: &["less_than", "<"],
        predicate: less_than,
    },
    Operator {
        name: "less_than_or_equal_to",
        description: "Less than or equal to",
        slugs: &["less_than_or_equal_to", "<=", "lte"],
        predicate: less_than_or_equal,
    },
    Operator {
        name: "matches_regex",
        description: "Text matches the regular expression",
        slugs: &["matches_regex", "regex"],
        predicate: matches_regex,
    },
    Operator {
        name: "any",
        description: "Text is one of the listed values, or part of the given text",
        slugs: &["any", "some", "in"],
        predicate: any_of,
    },
    Operator {
        name: "any_fuzzy",
        description: "Text is part of one of the listed values, or of the given text",
        slugs: &[
            "in_fuzzy",
            "any_fuzzy",
            "any_fuzzy_match",
            "any_loose_match",
            "some_fuzzy",
            "some_loose",
            "some_fuzzy_match",
            "some_loose_match",
        ],
        predicate: any_fuzzy,
    },
    Operator {
        name: "all",
        description: "Every listed value equals the property",
        slugs: &["all", "every"],
        predicate: all_of,
    },
];

static REGISTRY: Lazy<OperatorRegistry> = Lazy::new(OperatorRegistry::new);

/// Slug lookup over the fixed operator catalog
#[derive(Debug)]
pub struct OperatorRegistry {
    by_slug: HashMap<&'static str, &'static Operator>,
}

impl OperatorRegistry {
    /// Build the slug table from the catalog
    pub fn new() -> Self {
        let by_slug = CATALOG
            .iter()
            .flat_map(|op| op.slugs.iter().map(move |slug| (*slug, op)))
            .collect();
        Self { by_slug }
    }

    /// The process-wide registry, built on first use
    pub fn global() -> &'static OperatorRegistry {
        &REGISTRY
    }

    /// Look up a slug; unknown slugs yield a never-matching sentinel
    pub fn resolve(&self, slug: &str) -> &'static Operator {
        self.get(slug).unwrap_or(&NOT_FOUND)
    }

    pub fn get(&self, slug: &str) -> Option<&'static Operator> {
        self.by_slug.get(slug).copied()
    }

    /// Canonical operators in catalog order
    pub fn operators(&self) -> impl Iterator<Item = &'static Operator> {
        CATALOG.iter()
    }

    /// Number of registered slugs
    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality where numbers compare by value (`20 == 20.0`)
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, v)| b.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => left == right,
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

fn ordered(left: &Value, right: &Value, accept: fn(Ordering) -> bool) -> bool {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    };
    ordering.is_some_and(accept)
}

fn never(_: &Value, _: &Value) -> bool {
    false
}

fn equals(property: &Value, value: &Value) -> bool {
    values_equal(property, value)
}

fn not_equals(property: &Value, value: &Value) -> bool {
    !values_equal(property, value)
}

fn contains(property: &Value, value: &Value) -> bool {
    match (property.as_str(), value.as_str()) {
        (Some(text), Some(needle)) => text.contains(needle),
        _ => false,
    }
}

fn not_contains(property: &Value, value: &Value) -> bool {
    match (property.as_str(), value.as_str()) {
        (Some(text), Some(needle)) => !text.contains(needle),
        _ => false,
    }
}

fn greater_than(property: &Value, value: &Value) -> bool {
    ordered(property, value, Ordering::is_gt)
}

fn greater_than_or_equal(property: &Value, value: &Value) -> bool {
    ordered(property, value, Ordering::is_ge)
}

fn less_than(property: &Value, value: &Value) -> bool {
    ordered(property, value, Ordering::is_lt)
}

fn less_than_or_equal(property: &Value, value: &Value) -> bool {
    ordered(property, value, Ordering::is_le)
}

fn matches_regex(property: &Value, value: &Value) -> bool {
    let (Some(text), Some(pattern)) = (property.as_str(), value.as_str()) else {
        return false;
    };
    match Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(e) => {
            log::debug!("Invalid regex '{}': {}", pattern, e);
            false
        }
    }
}

fn any_of(property: &Value, value: &Value) -> bool {
    let Some(item) = property.as_str() else {
        return false;
    };
    match value {
        Value::Array(list) => list.iter().any(|v| v.as_str() == Some(item)),
        Value::String(text) => text.contains(item),
        _ => false,
    }
}

fn any_fuzzy(property: &Value, value: &Value) -> bool {
    let Some(item) = property.as_str() else {
        return false;
    };
    match value {
        Value::Array(list) => list
            .iter()
            .filter_map(Value::as_str)
            .any(|candidate| candidate.contains(item)),
        Value::String(text) => text.contains(item),
        _ => false,
    }
}

fn all_of(property: &Value, value: &Value) -> bool {
    match value {
        Value::Array(list) => list.iter().all(|v| values_equal(v, property)),
        Value::Object(_) | Value::Null => false,
        scalar => values_equal(scalar, property),
    }
}
