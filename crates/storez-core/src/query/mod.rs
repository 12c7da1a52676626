//! Query expressions for filtering entries.
//!
//! An [`Expression`] is plain data: a JSON object in the familiar
//! document-query style. It is parsed once and then evaluated against each
//! entry's JSON representation. Nothing in an expression is ever executed.
//!
//! Supported forms:
//!
//! - `{"field": literal}`: equality. An array field matches a scalar it
//!   contains. A missing field equals `null`.
//! - `{"a.b.0": ...}`: dotted paths descend into objects and array indices.
//! - Field operators `$eq $ne $gt $gte $lt $lte $in $nin $exists $size $not`.
//!   Several operators on one field must all hold.
//! - Logical operators `$and $or $nor`, each taking a non-empty array.
//!
//! Ordering operators only hold between two numbers or two strings.
//!
//! ```
//! use serde_json::json;
//! use storez_core::Expression;
//!
//! let expr = Expression::parse(json!({"v": {"$gte": 2}, "tags": "rust"})).unwrap();
//! assert!(expr.matches(&json!({"v": 3, "tags": ["rust", "cms"]})));
//! assert!(!expr.matches(&json!({"v": 1, "tags": ["rust"]})));
//! ```

mod eval;
mod parse;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, InvalidInputError};

use parse::Node;

/// A parsed, data-only filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: Value,
    root: Node,
}

impl Expression {
    /// Parse an expression from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Query`] for non-object expressions,
    /// unknown operators, or malformed operands.
    pub fn parse(source: Value) -> Result<Self, Error> {
        let root = parse::parse_document(&source)?;
        Ok(Self { source, root })
    }

    /// The expression that matches every entry.
    pub fn all() -> Self {
        Self {
            source: Value::Object(Default::default()),
            root: Node::And(Vec::new()),
        }
    }

    /// Returns true if this expression has no terms and so matches everything.
    pub fn is_empty(&self) -> bool {
        matches!(&self.root, Node::And(children) if children.is_empty())
    }

    /// Evaluate against one entry.
    pub fn matches(&self, entry: &Value) -> bool {
        eval::eval_node(&self.root, entry)
    }

    /// Returns the JSON form this expression was parsed from.
    pub fn as_value(&self) -> &Value {
        &self.source
    }
}

/// Evaluate `expr` against `entry`.
pub fn matches(expr: &Expression, entry: &Value) -> bool {
    expr.matches(entry)
}

impl Default for Expression {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Query {
                reason: format!("not valid JSON: {}", e),
            })
        })?;
        Self::parse(value)
    }
}

impl TryFrom<Value> for Expression {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for Expression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.source.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Expression::parse(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expr(value: Value) -> Expression {
        Expression::parse(value).unwrap()
    }

    #[test]
    fn empty_matches_everything() {
        let e = expr(json!({}));
        assert!(e.is_empty());
        assert!(e.matches(&json!({"v": 1})));
        assert!(e.matches(&json!(null)));
        assert!(Expression::all().is_empty());
    }

    #[test]
    fn key_value_equality() {
        let e = expr(json!({"v": 1}));
        assert!(e.matches(&json!({"id": "a", "v": 1})));
        assert!(!e.matches(&json!({"id": "b", "v": 2})));
        assert!(!e.matches(&json!({"id": "c"})));
    }

    #[test]
    fn numbers_compare_by_value() {
        let e = expr(json!({"v": 1.0}));
        assert!(e.matches(&json!({"v": 1})));
    }

    #[test]
    fn multiple_fields_are_conjunctive() {
        let e = expr(json!({"v": 1, "published": true}));
        assert!(e.matches(&json!({"v": 1, "published": true})));
        assert!(!e.matches(&json!({"v": 1, "published": false})));
    }

    #[test]
    fn array_contains_scalar() {
        let e = expr(json!({"tags": "rust"}));
        assert!(e.matches(&json!({"tags": ["cms", "rust"]})));
        assert!(!e.matches(&json!({"tags": ["cms"]})));

        let exact = expr(json!({"tags": ["cms", "rust"]}));
        assert!(exact.matches(&json!({"tags": ["cms", "rust"]})));
        assert!(!exact.matches(&json!({"tags": ["rust", "cms"]})));
    }

    #[test]
    fn null_matches_missing() {
        let e = expr(json!({"deleted": null}));
        assert!(e.matches(&json!({"id": 1})));
        assert!(e.matches(&json!({"deleted": null})));
        assert!(!e.matches(&json!({"deleted": true})));
    }

    #[test]
    fn comparisons() {
        let entry = json!({"v": 5, "title": "beta"});
        assert!(expr(json!({"v": {"$gt": 4}})).matches(&entry));
        assert!(!expr(json!({"v": {"$gt": 5}})).matches(&entry));
        assert!(expr(json!({"v": {"$gte": 5, "$lte": 5}})).matches(&entry));
        assert!(expr(json!({"v": {"$lt": 5.5}})).matches(&entry));
        assert!(expr(json!({"title": {"$gt": "alpha"}})).matches(&entry));
        assert!(!expr(json!({"title": {"$gt": 1}})).matches(&entry));
        assert!(!expr(json!({"missing": {"$lt": 10}})).matches(&entry));
    }

    #[test]
    fn set_membership() {
        let entry = json!({"status": "draft"});
        assert!(expr(json!({"status": {"$in": ["draft", "review"]}})).matches(&entry));
        assert!(!expr(json!({"status": {"$nin": ["draft"]}})).matches(&entry));
        assert!(expr(json!({"other": {"$nin": ["draft"]}})).matches(&entry));
        assert!(expr(json!({"other": {"$ne": "draft"}})).matches(&entry));
    }

    #[test]
    fn large_ids_are_not_rounded() {
        let entry = json!({"n": 9007199254740993u64});
        assert!(expr(json!({"n": 9007199254740993u64})).matches(&entry));
        assert!(!expr(json!({"n": 9007199254740992u64})).matches(&entry));
        assert!(expr(json!({"n": {"$gt": 9007199254740992u64}})).matches(&entry));
    }

    #[test]
    fn existence_and_size() {
        let entry = json!({"tags": ["a", "b"], "body": null});
        assert!(expr(json!({"tags": {"$exists": true}})).matches(&entry));
        assert!(expr(json!({"body": {"$exists": true}})).matches(&entry));
        assert!(expr(json!({"image": {"$exists": false}})).matches(&entry));
        assert!(expr(json!({"tags": {"$size": 2}})).matches(&entry));
        assert!(!expr(json!({"body": {"$size": 0}})).matches(&entry));
    }

    #[test]
    fn negation() {
        let entry = json!({"v": 3});
        assert!(expr(json!({"v": {"$not": {"$gt": 5}}})).matches(&entry));
        assert!(!expr(json!({"v": {"$not": 3}})).matches(&entry));
    }

    #[test]
    fn logical_combinators() {
        let a = json!({"v": 1, "kind": "post"});
        let b = json!({"v": 2, "kind": "page"});

        let or = expr(json!({"$or": [{"v": 1}, {"kind": "page"}]}));
        assert!(or.matches(&a) && or.matches(&b));

        let and = expr(json!({"$and": [{"v": {"$gte": 1}}, {"kind": "post"}]}));
        assert!(and.matches(&a) && !and.matches(&b));

        let nor = expr(json!({"$nor": [{"v": 1}]}));
        assert!(!nor.matches(&a) && nor.matches(&b));
    }

    #[test]
    fn nested_paths() {
        let entry = json!({"author": {"name": "ada", "roles": ["admin"]}, "images": [{"w": 10}]});
        assert!(expr(json!({"author.name": "ada"})).matches(&entry));
        assert!(expr(json!({"author.roles": "admin"})).matches(&entry));
        assert!(expr(json!({"images.0.w": {"$gt": 5}})).matches(&entry));
        assert!(!expr(json!({"images.1.w": {"$gt": 5}})).matches(&entry));
        assert!(!expr(json!({"author.name.first": "ada"})).matches(&entry));
    }

    #[test]
    fn parses_from_text() {
        let e: Expression = r#"{"v": {"$in": [1, 2]}}"#.parse().unwrap();
        assert!(matches(&e, &json!({"v": 2})));
        assert!("not json".parse::<Expression>().is_err());
        assert!("[1]".parse::<Expression>().is_err());
    }

    #[test]
    fn serde_round_trip_keeps_source() {
        let e = expr(json!({"v": 1}));
        assert_eq!(serde_json::to_value(&e).unwrap(), json!({"v": 1}));

        let back: Expression = serde_json::from_value(json!({"v": 1})).unwrap();
        assert_eq!(back, e);
        assert!(serde_json::from_value::<Expression>(json!({"v": {"$bogus": 1}})).is_err());
    }
}
