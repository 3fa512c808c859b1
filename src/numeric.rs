//! Locale-tolerant number recognition for regional spreadsheets.
//!
//! Separator rules, applied after discarding everything except digits,
//! `.`, `,` and `-`:
//!
//! | present      | `.` means | `,` means | example                        |
//! |--------------|-----------|-----------|--------------------------------|
//! | both         | thousands | decimal   | `1.234.567,89` → `1234567.89`  |
//! | only `.`     | thousands | -         | `102.800` → `102800`           |
//! | only `,`     | -         | decimal   | `102,80` → `102.8`             |
//!
//! A lone dot is never read as a decimal point, so `123.45` becomes `12345`.
//! Stored data already depends on that reading.

use crate::sheet::{Cell, CellValue};

/// Input accepted by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber<'a> {
    /// Already numeric; passed through untouched.
    Number(f64),
    Text(&'a str),
}

impl<'a> From<&'a str> for RawNumber<'a> {
    fn from(value: &'a str) -> Self {
        RawNumber::Text(value)
    }
}

impl From<f64> for RawNumber<'_> {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

/// Resolves a raw value to a number, or `None` when it cannot be read as one.
pub fn normalize<'a>(raw: impl Into<RawNumber<'a>>) -> Option<f64> {
    match raw.into() {
        RawNumber::Number(value) => Some(value).filter(|value| value.is_finite()),
        RawNumber::Text(text) => normalize_text(text),
    }
}

/// Resolves the content of a cell. Native numbers win over display text;
/// absent cells and booleans are not numbers.
pub fn normalize_cell(cell: Option<&Cell>) -> Option<f64> {
    let cell = cell?;
    match &cell.value {
        Some(CellValue::Number(value)) => normalize(*value),
        Some(CellValue::Text(text)) => normalize_text(text),
        Some(CellValue::Bool(_)) => None,
        None => cell.text.as_deref().and_then(normalize_text),
    }
}

fn normalize_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let has_dot = cleaned.contains('.');
    let has_comma = cleaned.contains(',');
    let canonical = match (has_dot, has_comma) {
        (true, true) => cleaned.replace('.', "").replacen(',', ".", 1),
        (true, false) => cleaned.replace('.', ""),
        (false, true) => cleaned.replacen(',', ".", 1),
        (false, false) => cleaned,
    };

    canonical
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders a number the way a comma-decimal locale writes it.
    fn render_comma_decimal(value: f64) -> String {
        value.to_string().replace('.', ",")
    }

    #[test]
    fn resolves_regional_separators() {
        assert_eq!(normalize("1.234.567,89"), Some(1234567.89));
        assert_eq!(normalize("102.800"), Some(102800.0));
        assert_eq!(normalize("102,80"), Some(102.8));
        assert_eq!(normalize("4500"), Some(4500.0));
        assert_eq!(normalize("-12,5"), Some(-12.5));
    }

    #[test]
    fn strips_currency_and_whitespace() {
        assert_eq!(normalize("US$ 1.250,00"), Some(1250.0));
        assert_eq!(normalize(" $ 99 "), Some(99.0));
        assert_eq!(normalize("12\u{a0}345"), Some(12345.0));
    }

    #[test]
    fn lone_dot_is_read_as_thousands() {
        assert_eq!(normalize("123.45"), Some(12345.0));
    }

    #[test]
    fn unparsable_inputs() {
        for text in ["", "   ", "abc", "-", "--", ".", "1,234,567", "5-3", "n/a"] {
            assert_eq!(normalize(text), None, "{text:?} should not resolve");
        }
    }

    #[test]
    fn native_numbers_pass_through() {
        assert_eq!(normalize(123.45), Some(123.45));
        assert_eq!(normalize(f64::NAN), None);
        assert_eq!(normalize_cell(Some(&Cell::number(0.5))), Some(0.5));
        assert_eq!(normalize_cell(Some(&Cell::text("1.000"))), Some(1000.0));
        assert_eq!(normalize_cell(None), None);
    }

    #[test]
    fn display_text_is_used_without_raw_value() {
        let cell = Cell {
            value: None,
            text: Some("2.500,75".into()),
        };
        assert_eq!(normalize_cell(Some(&cell)), Some(2500.75));

        let flag = Cell {
            value: Some(CellValue::Bool(true)),
            text: Some("1".into()),
        };
        assert_eq!(normalize_cell(Some(&flag)), None);
    }

    #[test]
    fn idempotent_on_rendered_output() {
        for text in ["1.234.567,89", "102.800", "102,80", "-7", "0,001", "15"] {
            let first = normalize(text).expect("resolves");
            let second = normalize(render_comma_decimal(first).as_str());
            assert_eq!(second, Some(first), "{text}");
        }
    }
}
