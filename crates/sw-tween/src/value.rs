//! Tweenable values and the blend function

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Closed set of shapes a tweened field can carry
///
/// Numbers interpolate; lists and records interpolate recursively; anything
/// else snaps discretely at the halfway point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    List(Vec<Value>),
    Record(BTreeMap<String, Value>),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Named field values of a tween target
pub type FieldValues = BTreeMap<String, Value>;

/// Field map with a single entry
pub fn single_field(name: &str, value: impl Into<Value>) -> FieldValues {
    FieldValues::from([(name.to_string(), value.into())])
}

/// Blend two same-shaped values at progress ratio `t`
///
/// - numbers: `a + (b - a) * t`
/// - lists: element-wise over the common prefix, surplus elements dropped
/// - records: keys present in both operands, keys absent from `b` dropped
/// - any other pairing: `b` once `t > 0.5`, else `a`
pub fn blend(a: &Value, b: &Value, t: f64) -> Value {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Value::Number(x + (y - x) * t),
        (Value::List(xs), Value::List(ys)) => Value::List(
            xs.iter()
                .zip(ys.iter())
                .map(|(x, y)| blend(x, y, t))
                .collect(),
        ),
        (Value::Record(xs), Value::Record(ys)) => Value::Record(
            xs.iter()
                .filter_map(|(key, x)| ys.get(key).map(|y| (key.clone(), blend(x, y, t))))
                .collect(),
        ),
        _ => {
            if t > 0.5 {
                b.clone()
            } else {
                a.clone()
            }
        }
    }
}

/// Blend two field maps key-wise, with the record rule of [`blend`]
pub fn blend_records(a: &FieldValues, b: &FieldValues, t: f64) -> FieldValues {
    a.iter()
        .filter_map(|(key, x)| b.get(key).map(|y| (key.clone(), blend(x, y, t))))
        .collect()
}
