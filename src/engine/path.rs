// SPDX-License-Identifier: MIT

//! Dot-path lookup into nested values

use serde_json::Value;

/// Resolve a dot-separated path (e.g. `"order.items.0.sku"`) inside `subject`.
///
/// Objects are walked by key and arrays by non-negative index. Returns `None`
/// as soon as a segment cannot be followed. An empty path yields `subject`.
pub fn resolve<'a>(subject: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(subject);
    }

    let mut current = subject;
    for segment in path.split('.') {
        current = step(current, segment)?;
    }
    Some(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}
