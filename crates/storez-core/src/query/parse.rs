//! Query expression parser.

use serde_json::{Map, Value};

use crate::error::InvalidInputError;

/// Parsed predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    And(Vec<Node>),
    Or(Vec<Node>),
    Nor(Vec<Node>),
    Field {
        path: Vec<String>,
        conditions: Vec<Condition>,
    },
}

/// A test applied to the value found at a field path.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Condition {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    Exists(bool),
    Size(usize),
    Not(Vec<Condition>),
}

pub(crate) fn parse_document(value: &Value) -> Result<Node, InvalidInputError> {
    let map = value
        .as_object()
        .ok_or_else(|| InvalidInputError::query("expression must be a JSON object"))?;

    let mut nodes = Vec::with_capacity(map.len());
    for (key, operand) in map {
        if let Some(op) = key.strip_prefix('$') {
            nodes.push(parse_logical(op, operand)?);
        } else {
            nodes.push(parse_field(key, operand)?);
        }
    }

    Ok(Node::And(nodes))
}

fn parse_logical(op: &str, operand: &Value) -> Result<Node, InvalidInputError> {
    let items = operand
        .as_array()
        .ok_or_else(|| InvalidInputError::query(format!("${} expects an array", op)))?;

    if items.is_empty() {
        return Err(InvalidInputError::query(format!(
            "${} expects a non-empty array",
            op
        )));
    }

    let children = items
        .iter()
        .map(parse_document)
        .collect::<Result<Vec<_>, _>>()?;

    match op {
        "and" => Ok(Node::And(children)),
        "or" => Ok(Node::Or(children)),
        "nor" => Ok(Node::Nor(children)),
        other => Err(InvalidInputError::query(format!(
            "unknown top-level operator ${}",
            other
        ))),
    }
}

fn parse_field(key: &str, operand: &Value) -> Result<Node, InvalidInputError> {
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(InvalidInputError::query(format!(
            "invalid field path '{}'",
            key
        )));
    }

    let path = key.split('.').map(str::to_string).collect();
    let conditions = match operand {
        Value::Object(map) if is_operator_map(map)? => parse_conditions(key, map)?,
        literal => vec![Condition::Eq(literal.clone())],
    };

    Ok(Node::Field { path, conditions })
}

/// An object operand is either all operators or a plain literal.
fn is_operator_map(map: &Map<String, Value>) -> Result<bool, InvalidInputError> {
    let operators = map.keys().filter(|k| k.starts_with('$')).count();
    if operators == 0 {
        return Ok(false);
    }
    if operators != map.len() {
        return Err(InvalidInputError::query(
            "cannot mix operators and literal fields in one object",
        ));
    }
    Ok(true)
}

fn parse_conditions(
    field: &str,
    map: &Map<String, Value>,
) -> Result<Vec<Condition>, InvalidInputError> {
    map.iter()
        .map(|(op, operand)| parse_condition(field, op, operand))
        .collect()
}

fn parse_condition(field: &str, op: &str, operand: &Value) -> Result<Condition, InvalidInputError> {
    let condition = match op {
        "$eq" => Condition::Eq(operand.clone()),
        "$ne" => Condition::Ne(operand.clone()),
        "$gt" => Condition::Gt(operand.clone()),
        "$gte" => Condition::Gte(operand.clone()),
        "$lt" => Condition::Lt(operand.clone()),
        "$lte" => Condition::Lte(operand.clone()),
        "$in" => Condition::In(list_operand(field, op, operand)?),
        "$nin" => Condition::Nin(list_operand(field, op, operand)?),
        "$exists" => match operand {
            Value::Bool(b) => Condition::Exists(*b),
            _ => {
                return Err(InvalidInputError::query(format!(
                    "$exists on '{}' expects a boolean",
                    field
                )));
            }
        },
        "$size" => match operand.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(n) => Condition::Size(n),
            None => {
                return Err(InvalidInputError::query(format!(
                    "$size on '{}' expects a non-negative integer",
                    field
                )));
            }
        },
        "$not" => match operand {
            Value::Object(map) if is_operator_map(map)? => {
                Condition::Not(parse_conditions(field, map)?)
            }
            literal => Condition::Not(vec![Condition::Eq(literal.clone())]),
        },
        other => {
            return Err(InvalidInputError::query(format!(
                "unknown operator {} on '{}'",
                other, field
            )));
        }
    };

    Ok(condition)
}

fn list_operand(field: &str, op: &str, operand: &Value) -> Result<Vec<Value>, InvalidInputError> {
    operand.as_array().cloned().ok_or_else(|| {
        InvalidInputError::query(format!("{} on '{}' expects an array", op, field))
    })
}
