use std::borrow::Cow;
use std::sync::Arc;

use log::debug;

use crate::record::CertificateRecord;

/// Incremental search over an immutable catalog.
///
/// Matching is a case-insensitive substring test against each record's
/// effective title. The catalog itself is never modified.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    catalog: Arc<[CertificateRecord]>,
    query: String,
}

impl SearchFilter {
    pub fn new(catalog: Arc<[CertificateRecord]>) -> Self {
        Self {
            catalog,
            query: String::new(),
        }
    }

    pub fn catalog(&self) -> &[CertificateRecord] {
        &self.catalog
    }

    /// Current query, already trimmed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and return the records it selects.
    pub fn set_query(&mut self, raw: &str) -> Cow<'_, [CertificateRecord]> {
        self.query = raw.trim().to_string();
        self.visible()
    }

    /// Reset the query; the full catalog becomes visible again.
    pub fn clear(&mut self) -> &[CertificateRecord] {
        self.query.clear();
        &self.catalog
    }

    /// Records selected by the current query.
    pub fn visible(&self) -> Cow<'_, [CertificateRecord]> {
        filter_records(&self.catalog, &self.query)
    }
}

/// Select records whose effective title contains `query`, ignoring case.
/// A blank query selects everything.
pub fn filter_records<'a>(
    records: &'a [CertificateRecord],
    query: &str,
) -> Cow<'a, [CertificateRecord]> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(records);
    }
    let kept: Vec<CertificateRecord> = records
        .iter()
        .filter(|record| record.effective_title().to_lowercase().contains(&needle))
        .cloned()
        .collect();
    debug!(
        "search '{}' kept {} of {} certificates",
        needle,
        kept.len(),
        records.len()
    );
    Cow::Owned(kept)
}
