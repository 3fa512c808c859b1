//! Maps user-facing dataset names onto store collections.

use crate::error::{Result, ToolError};
use crate::model::DatasetKind;

/// Name that selects the price layout.
pub const PRICES: &str = "prices";
/// Name that takes its collection from a free-form custom name.
pub const CUSTOM: &str = "personalizado";

const KNOWN_STOCK: [&str; 6] = ["olav", "polo", "cba", "llantas", "camaras", "protectores"];

/// A resolved dataset target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Normalised dataset name as given by the caller.
    pub name: String,
    /// Store collection holding the records.
    pub collection: String,
    pub kind: DatasetKind,
}

/// Resolves a dataset name (and, for [`CUSTOM`], the custom name) into the
/// collection and layout to use.
pub fn resolve_dataset(name: &str, custom_name: Option<&str>) -> Result<Dataset> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(ToolError::MissingParameter("dataset"));
    }

    let (collection, kind) = match name.as_str() {
        PRICES => (PRICES.to_string(), DatasetKind::Price),
        CUSTOM => {
            let raw = custom_name.unwrap_or_default();
            let custom = normalize_name(raw);
            if custom.is_empty() {
                return Err(ToolError::InvalidDatasetName(raw.to_string()));
            }
            (format!("stock_{custom}"), DatasetKind::Inventory)
        }
        known if KNOWN_STOCK.contains(&known) => (format!("stock_{known}"), DatasetKind::Inventory),
        other => (format!("stock_{}", normalize_name(other)), DatasetKind::Inventory),
    };

    Ok(Dataset {
        name,
        collection,
        kind,
    })
}

/// Lower-cases, joins whitespace runs with `_` and drops anything outside
/// `[a-z0-9_]`.
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_map_to_stock_collections() {
        let dataset = resolve_dataset(" OLAV ", None).expect("resolved");
        assert_eq!(dataset.collection, "stock_olav");
        assert_eq!(dataset.kind, DatasetKind::Inventory);
        assert_eq!(dataset.name, "olav");
    }

    #[test]
    fn prices_select_price_layout() {
        let dataset = resolve_dataset("Prices", Some("ignored")).expect("resolved");
        assert_eq!(dataset.collection, "prices");
        assert_eq!(dataset.kind, DatasetKind::Price);
    }

    #[test]
    fn custom_names_are_normalised() {
        let dataset =
            resolve_dataset("personalizado", Some("  Depósito Norte 2 ")).expect("resolved");
        assert_eq!(dataset.collection, "stock_depsito_norte_2");

        assert!(matches!(
            resolve_dataset("personalizado", Some(" ¡! ")),
            Err(ToolError::InvalidDatasetName(_))
        ));
        assert!(matches!(
            resolve_dataset("personalizado", None),
            Err(ToolError::InvalidDatasetName(_))
        ));
    }

    #[test]
    fn unknown_names_become_stock_collections() {
        let dataset = resolve_dataset("San Juan", None).expect("resolved");
        assert_eq!(dataset.collection, "stock_san_juan");
        assert_eq!(dataset.kind, DatasetKind::Inventory);
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(matches!(
            resolve_dataset("   ", None),
            Err(ToolError::MissingParameter("dataset"))
        ));
    }
}
