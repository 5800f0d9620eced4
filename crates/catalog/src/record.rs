use std::borrow::Cow;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::filename::prettify_filename;

/// Normalized certificate entry. At least one field is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub file: String,
    pub title: String,
    pub url: String,
}

impl CertificateRecord {
    pub fn new(file: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    /// Explicit title, or one derived from the filename. Computed on demand,
    /// never stored back on the record.
    pub fn effective_title(&self) -> Cow<'_, str> {
        if self.title.is_empty() {
            Cow::Owned(prettify_filename(&self.file))
        } else {
            Cow::Borrowed(&self.title)
        }
    }

    fn from_entry(entry: &Value) -> Option<Self> {
        let object = entry.as_object()?;
        let field = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let record = Self {
            file: field("file"),
            title: field("title"),
            url: field("url"),
        };
        if record.file.is_empty() && record.title.is_empty() && record.url.is_empty() {
            return None;
        }
        Some(record)
    }
}

/// Reshape a parsed certificates document into records.
///
/// Accepts a bare array or an object with an `items` array; any other shape
/// yields an empty catalog. Entries that are not objects, or that carry none
/// of `file`/`title`/`url` as a non-empty string, are dropped individually.
pub fn normalize_catalog(data: &Value) -> Vec<CertificateRecord> {
    let entries = match data {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    let records: Vec<CertificateRecord> = entries
        .iter()
        .filter_map(CertificateRecord::from_entry)
        .collect();
    if records.len() < entries.len() {
        debug!(
            "dropped {} of {} catalog entries without file/title/url",
            entries.len() - records.len(),
            entries.len()
        );
    }
    records
}

/// Parse raw JSON bytes and normalize them.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<CertificateRecord>> {
    let data: Value = serde_json::from_slice(bytes)?;
    Ok(normalize_catalog(&data))
}
