//! # Portfolio Page
//!
//! Bootstraps the portfolio page: initialises page chrome, fetches the
//! profile and certificate documents, binds the profile, renders the
//! certificate catalog with its chips, and wires catalog search.
//!
//! ## Architecture
//!
//! ```text
//! Bootstrap::start(surface) ──> PageSession
//!     │
//!     ├──> PageChrome::init (theme, loader, reveal, header, nav, anchors)
//!     │
//!     ├──> tokio::spawn, one task per document
//!     │    ├─> profile.json      → Profile::bind       (failure: placeholders)
//!     │    └─> certificates.json → render + chips      (failure: empty state)
//!     │         applied by PageSession::next_section in completion order
//!     │
//!     └──> PageSession::dispatch(event) for host events, usable immediately
//! ```
//!
//! The page itself is reached only through the [`Surface`] trait. [`Document`]
//! is an in-memory implementation used for pre-rendering and tests.

pub mod bootstrap;
pub mod chrome;
pub mod config;
pub mod document;
mod error;
pub mod fetch;
pub mod profile;
pub mod render;
pub mod surface;
pub mod theme;

pub use bootstrap::{
    Bootstrap, CertificateSearch, EventEffect, PageEvent, PageSession, Section,
    SectionOutcome,
};
pub use config::PageConfig;
pub use document::{Document, Element};
pub use error::{PageError, Result};
pub use fetch::{fetch_json, FileFetcher, HttpFetcher, ResourceFetcher, StaticFetcher};
pub use profile::{Profile, ProfileLinks};
pub use surface::Surface;
pub use theme::{FileThemeStore, MemoryThemeStore, Theme, ThemeStore, THEME_STORAGE_KEY};
