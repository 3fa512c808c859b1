//! Turns raw edit values into the values stored for a record field.

use serde_json::{Map, Value};

use crate::model::{DatasetKind, Field, FieldValue};
use crate::numeric::normalize;

/// Coerces one raw edit value for `field`.
///
/// Prices go through the number normaliser and fall back to the trimmed raw
/// text when they do not resolve; every other field is stored as trimmed
/// text. Returns `None` for fields the dataset kind does not accept.
pub fn coerce(kind: DatasetKind, field_name: &str, raw: &str) -> Option<FieldValue> {
    let field = permitted(kind, field_name)?;
    Some(coerce_text(field, raw))
}

/// Coerces every permitted field of a JSON update object. Keys are resolved
/// the same way as in [`coerce`], so `stock-quantity` edits `stock`; unknown
/// or non-permitted keys and `null` values are skipped.
pub fn coerce_update(kind: DatasetKind, update: &Map<String, Value>) -> Vec<(Field, FieldValue)> {
    update
        .iter()
        .filter_map(|(key, raw)| {
            let field = permitted(kind, key)?;
            let value = match raw {
                Value::Null => return None,
                Value::Number(number) if field == Field::Price => match number.as_f64() {
                    Some(value) => FieldValue::Number(value),
                    None => FieldValue::Text(number.to_string()),
                },
                Value::String(text) => coerce(kind, key, text)?,
                other => coerce(kind, key, &other.to_string())?,
            };
            Some((field, value))
        })
        .collect()
}

fn permitted(kind: DatasetKind, field_name: &str) -> Option<Field> {
    field_name
        .trim()
        .parse::<Field>()
        .ok()
        .filter(|field| kind.permits(*field))
}

fn coerce_text(field: Field, raw: &str) -> FieldValue {
    let trimmed = raw.trim();
    if field == Field::Price {
        if let Some(number) = normalize(trimmed) {
            return FieldValue::Number(number);
        }
    }
    FieldValue::Text(trimmed.to_string())
}
