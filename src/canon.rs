// src/canon.rs
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Number, Serializer, Value};
use std::cmp::Ordering;

use crate::types::SortKey;

/// Recursively sorts object keys and orders arrays of objects by their
/// shared `path`, `name` or `id` field.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(m) => {
            let mut entries: Vec<(String, Value)> = m.into_iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
            let mut out = Map::with_capacity(entries.len());
            for (k, v) in entries {
                out.insert(k, normalize(v));
            }
            Value::Object(out)
        }
        Value::Array(arr) => {
            let mut items: Vec<Value> = arr.into_iter().map(normalize).collect();
            if let Some(key) = SortKey::select(&items) {
                order_by_field(&mut items, key.field());
            }
            Value::Array(items)
        }
        scalar => scalar,
    }
}

/// Comparable kind shared by every sort-key value of one array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Str,
    Bool,
    Int,
    Float,
}

impl KeyClass {
    fn of(v: &Value) -> Option<KeyClass> {
        match v {
            Value::String(_) => Some(KeyClass::Str),
            Value::Bool(_) => Some(KeyClass::Bool),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(KeyClass::Int),
            Value::Number(_) => Some(KeyClass::Float),
            _ => None,
        }
    }

    fn merge(self, other: KeyClass) -> Option<KeyClass> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (KeyClass::Int, KeyClass::Float) | (KeyClass::Float, KeyClass::Int) => {
                Some(KeyClass::Float)
            }
            _ => None,
        }
    }

    fn shared<'a>(mut values: impl Iterator<Item = &'a Value>) -> Option<KeyClass> {
        let first = KeyClass::of(values.next()?)?;
        values.try_fold(first, |acc, v| acc.merge(KeyClass::of(v)?))
    }

    fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            KeyClass::Str => a.as_str().cmp(&b.as_str()),
            KeyClass::Bool => a.as_bool().cmp(&b.as_bool()),
            KeyClass::Int => as_int(a).cmp(&as_int(b)),
            // Integers mixed with floats go through f64; above 2^53 distinct
            // integers may tie and then keep their input order.
            KeyClass::Float => {
                let (a, b) = (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default());
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
        }
    }
}

fn as_int(v: &Value) -> i128 {
    match v {
        Value::Number(n) => int_of(n),
        _ => 0,
    }
}

fn int_of(n: &Number) -> i128 {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
        .unwrap_or_default()
}

// Stable sort; key values of differing kinds compare equal across the
// whole array, which leaves it in input order.
fn order_by_field(items: &mut [Value], field: &str) {
    let Some(class) = KeyClass::shared(items.iter().map(|item| &item[field])) else {
        return;
    };
    items.sort_by(|a, b| class.compare(&a[field], &b[field]));
}

/// Pretty-prints with `indent` spaces per level and a trailing newline.
/// Object keys are written in the order they are stored.
pub fn to_pretty_string(value: &Value, indent: usize) -> Result<String, serde_json::Error> {
    let indent = vec![b' '; indent];
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(&indent);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)
        .map_err(<serde_json::Error as serde::ser::Error>::custom)?;
    json.push('\n');
    Ok(json)
}
