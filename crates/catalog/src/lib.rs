//! # Portfolio Catalog
//!
//! Certificate catalog subsystem for the portfolio page.
//!
//! ## Pipeline
//!
//! ```text
//! certificates.json
//!     │
//!     ├──> Catalog Normalizer (bare list or { items: [...] })
//!     │    └─> CertificateRecord[] (entries without file/title/url dropped)
//!     │
//!     ├──> Search Filter (case-insensitive substring on effective titles)
//!     │
//!     ├──> Catalog View (cards: title, filename, document link)
//!     │
//!     └──> Tag Inferencer (ordered keyword dictionary → chips)
//! ```
//!
//! Everything in this crate is pure: no I/O, no rendering surface. The
//! page crate owns fetching and mutation of the visible document.
//!
//! ## Example
//!
//! ```rust
//! use portfolio_catalog::{normalize_catalog, CatalogView, TagDictionary};
//!
//! let raw = serde_json::json!([{ "file": "CertificateOfCompletion_Python_Intro.pdf" }]);
//! let catalog = normalize_catalog(&raw);
//!
//! let view = CatalogView::project(&catalog);
//! assert_eq!(view.cards[0].title, "Python Intro");
//!
//! let titles: Vec<_> = catalog.iter().map(|c| c.effective_title()).collect();
//! assert_eq!(TagDictionary::default().infer(&titles), vec!["Python"]);
//! ```

mod error;
mod filename;
mod record;
mod search;
mod tags;
mod view;

pub use error::{CatalogError, Result};
pub use filename::prettify_filename;
pub use record::{normalize_catalog, parse_catalog, CertificateRecord};
pub use search::{filter_records, SearchFilter};
pub use tags::{TagDictionary, TagRule, TagRuleSpec};
pub use view::{CatalogView, CertificateCard, DEFAULT_CARD_TITLE, DEFAULT_CERTIFICATE_DIR};
