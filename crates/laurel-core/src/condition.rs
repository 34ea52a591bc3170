//! Quest completion conditions
//!
//! Conditions are loaded from RON catalog files and evaluated at runtime
//! against the event payload reported by the caller. They are plain data,
//! so quest templates round-trip through storage and catalog files without
//! carrying code.

use crate::{EventData, Value};
use serde::{Deserialize, Serialize};

/// A predicate over an engagement event's payload
///
/// A quest instance only advances when its template's condition passes for
/// the reported event. Templates without a condition always advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuestCondition {
    /// The event's `hashtag` field equals the given tag
    HashtagIs(String),
    /// A named event field equals a literal value
    FieldEquals { field: String, value: Value },
    /// A named event field is present and non-null
    FieldPresent(String),
    /// All sub-conditions must pass
    All(Vec<QuestCondition>),
    /// At least one sub-condition must pass
    Any(Vec<QuestCondition>),
    /// Invert a condition
    Not(Box<QuestCondition>),
}

impl QuestCondition {
    /// Evaluate this condition against an event payload
    ///
    /// Evaluation is total: a field missing from the payload simply fails
    /// the predicate that references it.
    pub fn eval(&self, event: &EventData) -> bool {
        match self {
            QuestCondition::HashtagIs(tag) => event
                .get("hashtag")
                .and_then(Value::as_str)
                .is_some_and(|h| h == tag),
            QuestCondition::FieldEquals { field, value } => {
                event.get(field).is_some_and(|v| values_equal(v, value))
            }
            QuestCondition::FieldPresent(field) => {
                event.get(field).is_some_and(|v| !v.is_null())
            }
            QuestCondition::All(conds) => conds.iter().all(|c| c.eval(event)),
            QuestCondition::Any(conds) => conds.iter().any(|c| c.eval(event)),
            QuestCondition::Not(cond) => !cond.eval(event),
        }
    }

    /// Create a hashtag-match condition
    pub fn hashtag(tag: impl Into<String>) -> Self {
        QuestCondition::HashtagIs(tag.into())
    }

    /// Create a field-equality condition
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        QuestCondition::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Check if two payload values are equal
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        _ => false,
    }
}
