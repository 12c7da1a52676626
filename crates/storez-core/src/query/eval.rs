//! Query expression evaluation.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use super::parse::{Condition, Node};

pub(crate) fn eval_node(node: &Node, entry: &Value) -> bool {
    match node {
        Node::And(children) => children.iter().all(|c| eval_node(c, entry)),
        Node::Or(children) => children.iter().any(|c| eval_node(c, entry)),
        Node::Nor(children) => !children.iter().any(|c| eval_node(c, entry)),
        Node::Field { path, conditions } => {
            let actual = resolve(entry, path);
            conditions.iter().all(|c| eval_condition(c, actual))
        }
    }
}

fn resolve<'a>(entry: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(entry, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn eval_condition(condition: &Condition, actual: Option<&Value>) -> bool {
    match condition {
        Condition::Eq(expected) => matches_eq(actual, expected),
        Condition::Ne(expected) => !matches_eq(actual, expected),
        Condition::Gt(bound) => matches_ord(actual, bound, Ordering::is_gt),
        Condition::Gte(bound) => matches_ord(actual, bound, Ordering::is_ge),
        Condition::Lt(bound) => matches_ord(actual, bound, Ordering::is_lt),
        Condition::Lte(bound) => matches_ord(actual, bound, Ordering::is_le),
        Condition::In(options) => options.iter().any(|o| matches_eq(actual, o)),
        Condition::Nin(options) => !options.iter().any(|o| matches_eq(actual, o)),
        Condition::Exists(expected) => actual.is_some() == *expected,
        Condition::Size(len) => matches!(actual, Some(Value::Array(items)) if items.len() == *len),
        Condition::Not(inner) => !inner.iter().all(|c| eval_condition(c, actual)),
    }
}

/// Equality; an array field also matches a scalar it contains.
/// A missing field equals `null`.
fn matches_eq(actual: Option<&Value>, expected: &Value) -> bool {
    match actual {
        None => expected.is_null(),
        Some(Value::Array(items)) if !expected.is_array() => {
            items.iter().any(|item| values_equal(item, expected))
        }
        Some(value) => values_equal(value, expected),
    }
}

fn matches_ord(actual: Option<&Value>, bound: &Value, accept: fn(Ordering) -> bool) -> bool {
    match actual {
        None => false,
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| compare(item, bound).is_some_and(accept)),
        Some(value) => compare(value, bound).is_some_and(accept),
    }
}

/// Numbers compare numerically regardless of integer/float representation.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Ordering is only defined between two numbers or two strings.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Integers compare exactly; floats and mixed pairs go through f64.
fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return Some(a.cmp(&b));
    }
    // A negative integer against one above i64::MAX.
    if x.as_i64().is_some() && y.as_u64().is_some() {
        return Some(Ordering::Less);
    }
    if x.as_u64().is_some() && y.as_i64().is_some() {
        return Some(Ordering::Greater);
    }
    x.as_f64()?.partial_cmp(&y.as_f64()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(value: Value) -> Number {
        match value {
            Value::Number(n) => n,
            other => panic!("not a number: {}", other),
        }
    }

    #[test]
    fn large_integers_compare_exactly() {
        let a = num(json!(9007199254740993u64));
        let b = num(json!(9007199254740992u64));
        assert_eq!(compare_numbers(&a, &b), Some(Ordering::Greater));
        assert!(!values_equal(&json!(9007199254740993u64), &json!(9007199254740992u64)));

        let neg = num(json!(-9007199254740993i64));
        let neg2 = num(json!(-9007199254740992i64));
        assert_eq!(compare_numbers(&neg, &neg2), Some(Ordering::Less));
    }

    #[test]
    fn signed_against_large_unsigned() {
        let neg = num(json!(-1));
        let huge = num(json!(u64::MAX));
        assert_eq!(compare_numbers(&neg, &huge), Some(Ordering::Less));
        assert_eq!(compare_numbers(&huge, &neg), Some(Ordering::Greater));
    }

    #[test]
    fn integers_equal_their_float_form() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert_eq!(
            compare_numbers(&num(json!(2)), &num(json!(1.5))),
            Some(Ordering::Greater)
        );
    }
}
