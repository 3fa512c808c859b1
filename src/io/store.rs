//! Persistence for ingested datasets.
//!
//! Records are kept as loose JSON documents, so an edit that could not be
//! coerced (e.g. a price typed as `"consultar"`) is stored as given.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::model::{Field, FieldValue};

/// A stored record.
pub type Document = Map<String, Value>;

/// Key holding the time a document was ingested or last edited.
pub const UPLOADED_AT: &str = "uploadedAt";

/// Storage collaborator used by the ingestion and edit services.
pub trait RecordStore {
    /// Replaces the full contents of `collection`, stamping every document
    /// with `at`. Returns the number of documents written.
    fn replace_all(
        &self,
        collection: &str,
        documents: Vec<Document>,
        at: DateTime<Utc>,
    ) -> Result<usize>;

    /// Sets `fields` on the first document whose `code` equals `code`.
    /// Returns `false` when no document matched.
    fn update(
        &self,
        collection: &str,
        code: &str,
        fields: &[(Field, FieldValue)],
        at: DateTime<Utc>,
    ) -> Result<bool>;

    /// All documents of `collection`, in insertion order.
    fn list(&self, collection: &str) -> Result<Vec<Document>>;
}

/// Directory-backed store holding one JSON array file per collection.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    fn write(&self, collection: &str, documents: &[Document]) -> Result<()> {
        let path = self.collection_path(collection);
        let staged = self.root.join(format!(".{collection}.json.tmp"));
        fs::write(&staged, serde_json::to_string_pretty(documents)?)?;
        fs::rename(&staged, &path)?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn replace_all(
        &self,
        collection: &str,
        documents: Vec<Document>,
        at: DateTime<Utc>,
    ) -> Result<usize> {
        let stamp = Value::String(timestamp(at));
        let documents: Vec<Document> = documents
            .into_iter()
            .map(|mut document| {
                document.insert(UPLOADED_AT.to_string(), stamp.clone());
                document
            })
            .collect();
        self.write(collection, &documents)?;
        debug!(collection, count = documents.len(), "collection replaced");
        Ok(documents.len())
    }

    fn update(
        &self,
        collection: &str,
        code: &str,
        fields: &[(Field, FieldValue)],
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut documents = self.list(collection)?;
        let Some(document) = documents.iter_mut().find(|document| {
            document.get(Field::Code.key()).and_then(Value::as_str) == Some(code)
        }) else {
            return Ok(false);
        };

        for (field, value) in fields {
            document.insert(field.key().to_string(), value.to_json());
        }
        document.insert(UPLOADED_AT.to_string(), Value::String(timestamp(at)));

        self.write(collection, &documents)?;
        Ok(true)
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        match serde_json::from_str::<Value>(&data)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(document) => Ok(document),
                    other => Err(ToolError::CorruptStore {
                        path: path.clone(),
                        reason: format!("expected an object, found {other}"),
                    }),
                })
                .collect(),
            _ => Err(ToolError::CorruptStore {
                path,
                reason: "expected a JSON array".into(),
            }),
        }
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::tempdir;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().expect("object")
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
            .single()
            .expect("valid time")
    }

    #[test]
    fn missing_collection_lists_empty() {
        let dir = tempdir().expect("temporary directory");
        let store = JsonStore::open(dir.path()).expect("store opened");
        assert!(store.list("stock_olav").expect("listed").is_empty());
    }

    #[test]
    fn replace_all_overwrites_and_stamps() {
        let dir = tempdir().expect("temporary directory");
        let store = JsonStore::open(dir.path().join("db")).expect("store opened");

        store
            .replace_all("prices", vec![doc(json!({"code": "OLD", "price": 1.0}))], at(8))
            .expect("first ingest");
        let inserted = store
            .replace_all(
                "prices",
                vec![
                    doc(json!({"code": "A", "price": 2.5})),
                    doc(json!({"code": "B", "price": null})),
                ],
                at(9),
            )
            .expect("second ingest");

        let documents = store.list("prices").expect("listed");
        assert_eq!(inserted, 2);
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["code"], json!("A"));
        assert_eq!(documents[1][UPLOADED_AT], json!("2026-03-01T09:00:00.000Z"));
    }

    #[test]
    fn update_sets_fields_on_matching_code() {
        let dir = tempdir().expect("temporary directory");
        let store = JsonStore::open(dir.path()).expect("store opened");
        store
            .replace_all(
                "prices",
                vec![
                    doc(json!({"code": "A", "price": 1.0})),
                    doc(json!({"code": "B", "price": 2.0})),
                ],
                at(8),
            )
            .expect("ingest");

        let matched = store
            .update(
                "prices",
                "B",
                &[(Field::Price, FieldValue::Text("consultar".into()))],
                at(10),
            )
            .expect("update");
        assert!(matched);

        let missing = store
            .update("prices", "Z", &[(Field::Price, FieldValue::Number(1.0))], at(10))
            .expect("update");
        assert!(!missing);

        let documents = store.list("prices").expect("listed");
        assert_eq!(documents[0][UPLOADED_AT], json!("2026-03-01T08:00:00.000Z"));
        assert_eq!(documents[1]["price"], json!("consultar"));
        assert_eq!(documents[1][UPLOADED_AT], json!("2026-03-01T10:00:00.000Z"));
    }

    #[test]
    fn corrupt_files_are_reported() {
        let dir = tempdir().expect("temporary directory");
        let store = JsonStore::open(dir.path()).expect("store opened");
        fs::write(dir.path().join("prices.json"), "{}").expect("written");

        assert!(matches!(
            store.list("prices"),
            Err(ToolError::CorruptStore { .. })
        ));
    }
}
