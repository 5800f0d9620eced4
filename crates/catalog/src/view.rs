//! Pure projection of catalog records into card view-models.
//!
//! Mutating the visible document is the page crate's job; this module only
//! decides what each card shows and where it links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::record::CertificateRecord;

/// Title used when neither an explicit nor a derived title is available.
pub const DEFAULT_CARD_TITLE: &str = "Certificate";

/// Directory, relative to the page, holding certificate documents.
pub const DEFAULT_CERTIFICATE_DIR: &str = "Certificate";

const PLACEHOLDER_HREF: &str = "#";

// Characters left alone by a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One viewable certificate card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateCard {
    /// Heading text
    pub title: String,
    /// Raw filename caption (may be empty)
    pub file: String,
    /// Embedded/linked document location
    pub href: String,
}

impl CertificateCard {
    pub fn from_record(record: &CertificateRecord, certificate_dir: &str) -> Self {
        let title = record.effective_title();
        let title = if title.is_empty() {
            DEFAULT_CARD_TITLE.to_string()
        } else {
            title.into_owned()
        };
        Self {
            title,
            file: record.file.clone(),
            href: document_href(record, certificate_dir),
        }
    }
}

/// Cards plus the count shown next to them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    /// Number of records in this view (filtered, not global)
    pub count: usize,
    pub cards: Vec<CertificateCard>,
}

impl CatalogView {
    pub fn project(records: &[CertificateRecord]) -> Self {
        Self::project_in(records, DEFAULT_CERTIFICATE_DIR)
    }

    pub fn project_in(records: &[CertificateRecord], certificate_dir: &str) -> Self {
        Self {
            count: records.len(),
            cards: records
                .iter()
                .map(|record| CertificateCard::from_record(record, certificate_dir))
                .collect(),
        }
    }

    /// Whether the empty-state indicator should be shown.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn document_href(record: &CertificateRecord, certificate_dir: &str) -> String {
    if !record.url.is_empty() {
        return record.url.clone();
    }
    if record.file.is_empty() {
        return PLACEHOLDER_HREF.to_string();
    }
    let encoded = utf8_percent_encode(&record.file, COMPONENT);
    let dir = certificate_dir.trim_end_matches('/');
    if dir.is_empty() {
        encoded.to_string()
    } else {
        format!("{dir}/{encoded}")
    }
}
