//! Upload ingestion: parse, shape-check, append to history.
//!
//! Validation is deliberately shallow — parseable JSON with a `results` or
//! `datasets` key is accepted, and projectors tolerate anything below that.
//! Rejections leave the history store untouched; the user just retries.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;

use crate::history::HistoryStore;
use crate::logging::{json_log, obj, v_num, v_str};
use crate::schema::{Family, RawDataset};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("document has neither `results` nor `datasets`")]
    InvalidShape,
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Advisory description of one accepted upload. Warnings never block
/// ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct UploadManifest {
    /// Sha256 of the raw document text.
    pub fingerprint_sha256: String,
    /// Parsed upload timestamp re-rendered as RFC3339, when parseable.
    pub timestamp: Option<String>,
    pub families: Vec<FamilyCount>,
    pub total_items: usize,
    pub warnings: Vec<String>,
    pub received_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilyCount {
    pub family: Family,
    pub items: usize,
}

/// Parse and shape-check `raw`, append the dataset to `store`, and return
/// it. The store is unchanged on any error.
pub fn ingest(store: &mut HistoryStore, raw: &str) -> Result<RawDataset, IngestError> {
    let dataset: RawDataset = serde_json::from_str(raw).map_err(|err| {
        json_log(
            "ingest",
            obj(&[
                ("event", v_str("rejected")),
                ("reason", v_str("malformed")),
                ("detail", v_str(&err.to_string())),
            ]),
        );
        IngestError::Malformed(err)
    })?;
    if !dataset.has_payload() {
        json_log(
            "ingest",
            obj(&[
                ("event", v_str("rejected")),
                ("reason", v_str("invalid_shape")),
            ]),
        );
        return Err(IngestError::InvalidShape);
    }

    let manifest = manifest_for(raw, &dataset);
    json_log(
        "ingest",
        obj(&[
            ("event", v_str("accepted")),
            ("fingerprint", v_str(&manifest.fingerprint_sha256)),
            ("total_items", v_num(manifest.total_items as f64)),
            ("warnings", v_num(manifest.warnings.len() as f64)),
        ]),
    );
    store.append(dataset.clone());
    Ok(dataset)
}

/// Read an uploaded file and ingest its contents. The read is the only
/// suspension point in the pipeline; everything after it is synchronous.
pub async fn ingest_file(
    store: &mut HistoryStore,
    path: impl AsRef<Path>,
) -> Result<RawDataset, IngestError> {
    let raw = tokio::fs::read_to_string(path.as_ref()).await?;
    ingest(store, &raw)
}

/// Build the advisory manifest for an upload.
pub fn manifest_for(raw: &str, dataset: &RawDataset) -> UploadManifest {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    let fingerprint_sha256 = hex::encode(hasher.finalize());

    let mut warnings = Vec::new();
    let timestamp = match (&dataset.timestamp, dataset.parsed_timestamp()) {
        (None, _) => {
            warnings.push("missing_timestamp".to_string());
            None
        }
        (Some(_), None) => {
            warnings.push("unparseable_timestamp".to_string());
            None
        }
        (Some(_), Some(ts)) => Some(ts.to_rfc3339()),
    };

    let families: Vec<FamilyCount> = Family::ALL
        .iter()
        .map(|&family| FamilyCount {
            family,
            items: dataset.family(family).len(),
        })
        .collect();
    let total_items: usize = families.iter().map(|f| f.items).sum();
    if total_items == 0 {
        warnings.push("empty_results".to_string());
    }

    UploadManifest {
        fingerprint_sha256,
        timestamp,
        families,
        total_items,
        warnings,
        received_at: crate::logging::ts_now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_text_is_rejected() {
        let mut store = HistoryStore::new();
        let err = ingest(&mut store, "{not json").unwrap_err();
        assert!(matches!(err, IngestError::Malformed(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn valid_json_without_keys_is_invalid_shape() {
        let mut store = HistoryStore::new();
        let err = ingest(&mut store, "{}").unwrap_err();
        assert!(matches!(err, IngestError::InvalidShape));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_results_map_is_accepted() {
        let mut store = HistoryStore::new();
        let dataset = ingest(&mut store, r#"{"results":{}}"#).unwrap();
        assert!(dataset.results.is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn datasets_key_alone_is_accepted() {
        let mut store = HistoryStore::new();
        ingest(&mut store, r#"{"datasets": {"shor": [15, 21]}}"#).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejected_uploads_leave_history_intact() {
        let mut store = HistoryStore::new();
        ingest(&mut store, r#"{"results":{}}"#).unwrap();
        let _ = ingest(&mut store, "{oops");
        let _ = ingest(&mut store, "{}");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn accepted_upload_becomes_current() {
        let mut store = HistoryStore::new();
        ingest(
            &mut store,
            r#"{"timestamp": "2025-03-01T00:00:00+00:00", "seed": 7, "results": {}}"#,
        )
        .unwrap();
        assert_eq!(store.current().unwrap().seed, Some(7));
    }

    #[test]
    fn manifest_fingerprint_and_warnings() {
        let raw = r#"{"results": {"grover": [{}]}}"#;
        let dataset: RawDataset = serde_json::from_str(raw).unwrap();
        let manifest = manifest_for(raw, &dataset);
        assert_eq!(manifest.fingerprint_sha256.len(), 64);
        assert_eq!(manifest.total_items, 1);
        assert!(manifest
            .warnings
            .contains(&"missing_timestamp".to_string()));
        assert!(!manifest.warnings.contains(&"empty_results".to_string()));

        let again = manifest_for(raw, &dataset);
        assert_eq!(manifest.fingerprint_sha256, again.fingerprint_sha256);
    }

    #[test]
    fn manifest_flags_empty_and_unparseable() {
        let raw = r#"{"timestamp": "whenever", "results": {}}"#;
        let dataset: RawDataset = serde_json::from_str(raw).unwrap();
        let manifest = manifest_for(raw, &dataset);
        assert!(manifest
            .warnings
            .contains(&"unparseable_timestamp".to_string()));
        assert!(manifest.warnings.contains(&"empty_results".to_string()));
        assert!(manifest.timestamp.is_none());
    }

    #[tokio::test]
    async fn file_read_failure_is_io() {
        let mut store = HistoryStore::new();
        let err = ingest_file(&mut store, "/nonexistent/upload.json")
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
        assert!(store.is_empty());
    }
}
