use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::coerce::coerce_update;
use crate::dataset::Dataset;
use crate::error::{Result, ToolError};
use crate::extract::{ScanLimits, extract_prices, extract_stock};
use crate::io::excel_read::read_first_sheet;
use crate::io::store::{Document, RecordStore};
use crate::model::{DatasetKind, Field};
use crate::numeric::normalize;

/// Upload size accepted by default: 25 MiB.
pub const DEFAULT_MAX_BYTES: usize = 25 * 1024 * 1024;

/// Bounds applied to one ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub max_bytes: usize,
    pub limits: ScanLimits,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            limits: ScanLimits::default(),
        }
    }
}

/// Outcome of an ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub dataset: String,
    pub collection: String,
    pub parsed: usize,
    pub inserted: usize,
}

/// Price as served to readers: always a number or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceView {
    pub code: String,
    pub price: Option<f64>,
}

/// Contents of a dataset shaped for its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing {
    Prices(Vec<PriceView>),
    Inventory {
        dataset: String,
        collection: String,
        items: Vec<Document>,
    },
}

/// Parses a spreadsheet document and replaces the dataset's collection with
/// the extracted records.
#[instrument(
    level = "info",
    skip_all,
    fields(collection = %dataset.collection, size = bytes.len())
)]
pub fn ingest(
    store: &dyn RecordStore,
    dataset: &Dataset,
    bytes: &[u8],
    options: IngestOptions,
    now: DateTime<Utc>,
) -> Result<IngestSummary> {
    if bytes.len() > options.max_bytes {
        return Err(ToolError::InputTooLarge {
            size: bytes.len(),
            limit: options.max_bytes,
        });
    }

    let sheet = read_first_sheet(bytes);
    let documents = match dataset.kind {
        DatasetKind::Price => to_documents(&extract_prices(&sheet, options.limits))?,
        DatasetKind::Inventory => to_documents(&extract_stock(&sheet, options.limits))?,
    };
    let parsed = documents.len();
    info!(parsed, kind = ?dataset.kind, "document parsed");

    let inserted = store.replace_all(&dataset.collection, documents, now)?;
    info!(inserted, "collection replaced");

    Ok(IngestSummary {
        dataset: dataset.name.clone(),
        collection: dataset.collection.clone(),
        parsed,
        inserted,
    })
}

/// Reads a dataset back for display.
#[instrument(level = "info", skip_all, fields(collection = %dataset.collection))]
pub fn list(store: &dyn RecordStore, dataset: &Dataset) -> Result<Listing> {
    let documents = store.list(&dataset.collection)?;
    info!(count = documents.len(), "dataset listed");

    Ok(match dataset.kind {
        DatasetKind::Price => Listing::Prices(documents.iter().map(price_view).collect()),
        DatasetKind::Inventory => Listing::Inventory {
            dataset: dataset.name.clone(),
            collection: dataset.collection.clone(),
            items: documents,
        },
    })
}

/// Applies an edit to the record stored under `original_code`. Returns the
/// number of fields that were set.
#[instrument(
    level = "info",
    skip_all,
    fields(collection = %dataset.collection, code = original_code)
)]
pub fn edit(
    store: &dyn RecordStore,
    dataset: &Dataset,
    original_code: &str,
    update: &Map<String, Value>,
    now: DateTime<Utc>,
) -> Result<usize> {
    let code = original_code.trim();
    if code.is_empty() {
        return Err(ToolError::MissingParameter("code"));
    }
    if update.is_empty() {
        return Err(ToolError::MissingParameter("update"));
    }

    let fields = coerce_update(dataset.kind, update);
    if !store.update(&dataset.collection, code, &fields, now)? {
        return Err(ToolError::RecordNotFound {
            collection: dataset.collection.clone(),
            code: code.to_string(),
        });
    }
    info!(fields = fields.len(), "record updated");
    Ok(fields.len())
}

fn to_documents<T: Serialize>(records: &[T]) -> Result<Vec<Document>> {
    records
        .iter()
        .map(|record| match serde_json::to_value(record)? {
            Value::Object(document) => Ok(document),
            other => Err(ToolError::Json(serde::ser::Error::custom(format!(
                "record serialised to {other}"
            )))),
        })
        .collect()
}

fn price_view(document: &Document) -> PriceView {
    let code = match document.get(Field::Code.key()) {
        Some(Value::String(code)) => code.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let price = match document.get(Field::Price.key()) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => normalize(text.as_str()),
        _ => None,
    };
    PriceView { code, price }
}
