use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One inventory line read from a stock sheet.
///
/// The quantity stays textual: source sheets mix plain counts with annotated
/// quantities such as `"12 (reservados 2)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub code: String,
    pub description: String,
    pub category: String,
    pub stock: String,
}

impl StockRecord {
    pub fn is_blank(&self) -> bool {
        self.code.is_empty()
            && self.description.is_empty()
            && self.category.is_empty()
            && self.stock.is_empty()
    }
}

/// One price line. `price` is `None` when the cell could not be read as a
/// number; `code` may be empty when only a price was present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub code: String,
    pub price: Option<f64>,
}

/// Which layout a dataset was ingested with, and which fields it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Inventory,
    Price,
}

impl DatasetKind {
    /// Fields an edit may touch for this kind of dataset.
    pub fn permitted_fields(self) -> &'static [Field] {
        match self {
            DatasetKind::Inventory => &[
                Field::Code,
                Field::Description,
                Field::Category,
                Field::Stock,
            ],
            DatasetKind::Price => &[Field::Code, Field::Price],
        }
    }

    pub fn permits(self, field: Field) -> bool {
        self.permitted_fields().contains(&field)
    }
}

/// Editable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Code,
    Description,
    Category,
    Stock,
    Price,
}

impl Field {
    /// Key used for the field in stored documents.
    pub fn key(self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::Description => "description",
            Field::Category => "category",
            Field::Stock => "stock",
            Field::Price => "price",
        }
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "code" => Ok(Field::Code),
            "description" => Ok(Field::Description),
            "category" => Ok(Field::Category),
            "stock" | "stock-quantity" => Ok(Field::Stock),
            "price" => Ok(Field::Price),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value to persist for a single edited field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Number(value) => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(value) => serde_json::Value::String(value.clone()),
        }
    }
}
