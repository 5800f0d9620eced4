//! Page bootstrap: chrome first, then the profile and certificate documents,
//! each applied when its own fetch finishes and degrading to the page's
//! default state on failure.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use portfolio_catalog::{parse_catalog, CatalogView, CertificateRecord, SearchFilter, TagDictionary};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::chrome::{ChromeBehavior, PageChrome};
use crate::config::PageConfig;
use crate::error::Result;
use crate::fetch::{fetch_json, ResourceFetcher};
use crate::profile::Profile;
use crate::render::{render_certificates, render_chips};
use crate::surface::{ids, Surface};
use crate::theme::{Theme, ThemeStore};

/// How a fetched section ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOutcome {
    /// Fetch still in flight; the section shows its static markup
    Pending,
    /// Document fetched and applied
    Loaded,
    /// Fetch or decode failed; the section shows its default state
    Defaulted,
}

/// The two independently fetched parts of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    Certificates,
}

/// A finished fetch waiting to be applied to the surface.
enum Fetched {
    Profile(Result<Profile>),
    Certificates(Result<Vec<CertificateRecord>>),
}

/// Host events forwarded to a running page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The whole page finished loading
    Load,
    Scroll { offset: f64 },
    /// An observed element's visible ratio changed
    Intersect { id: String, ratio: f32 },
    AnchorClick { href: String },
    ThemeToggle,
    /// The search input's value changed
    SearchInput,
    SearchClear,
}

/// What the host should do after an event, beyond the surface changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventEffect {
    None,
    /// Smoothly scroll the element with this id into view
    ScrollTo(String),
    /// Theme now applied to the page
    Theme(Theme),
}

/// Binds the certificate search box to the catalog.
pub struct CertificateSearch {
    filter: SearchFilter,
    certificate_dir: String,
}

impl CertificateSearch {
    /// `None` when the page has no search input or clear button.
    pub fn bind(
        surface: &dyn Surface,
        catalog: Arc<[CertificateRecord]>,
        certificate_dir: impl Into<String>,
    ) -> Option<Self> {
        if !surface.contains(ids::CERT_SEARCH) || !surface.contains(ids::CLEAR_SEARCH) {
            return None;
        }
        Some(Self {
            filter: SearchFilter::new(catalog),
            certificate_dir: certificate_dir.into(),
        })
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    /// Re-filter from the input's current value. Returns the visible count.
    pub fn on_input(&mut self, surface: &mut dyn Surface) -> usize {
        let query = surface.value(ids::CERT_SEARCH).unwrap_or_default();
        let view = CatalogView::project_in(&self.filter.set_query(&query), &self.certificate_dir);
        render_certificates(surface, &view);
        view.count
    }

    /// Empty the input, focus it, and show the full catalog again.
    pub fn on_clear(&mut self, surface: &mut dyn Surface) -> usize {
        surface.set_value(ids::CERT_SEARCH, "");
        surface.focus(ids::CERT_SEARCH);
        let view = CatalogView::project_in(self.filter.clear(), &self.certificate_dir);
        render_certificates(surface, &view);
        view.count
    }
}

/// State kept for the lifetime of a bootstrapped page.
///
/// Events can be dispatched as soon as the session exists. Section fetches
/// run in background tasks and are applied through [`PageSession::next_section`]
/// or [`PageSession::apply_ready`] in whatever order they finish.
pub struct PageSession {
    pub chrome: PageChrome,
    pub catalog: Arc<[CertificateRecord]>,
    pub search: Option<CertificateSearch>,
    pub chips: Vec<String>,
    pub profile: SectionOutcome,
    pub certificates: SectionOutcome,
    tags: Arc<TagDictionary>,
    certificate_dir: String,
    fetched: mpsc::UnboundedReceiver<Fetched>,
    tasks: Vec<JoinHandle<()>>,
}

impl PageSession {
    /// Wait for the next fetch to finish and apply it.
    ///
    /// Returns `None` once every section has been applied.
    pub async fn next_section(&mut self, surface: &mut dyn Surface) -> Option<Section> {
        let fetched = self.fetched.recv().await?;
        Some(self.apply(surface, fetched))
    }

    /// Apply whatever has already finished without waiting.
    pub fn apply_ready(&mut self, surface: &mut dyn Surface) -> Vec<Section> {
        let mut applied = Vec::new();
        while let Ok(fetched) = self.fetched.try_recv() {
            applied.push(self.apply(surface, fetched));
        }
        applied
    }

    /// Apply every section, waiting for fetches still in flight.
    pub async fn settle(&mut self, surface: &mut dyn Surface) {
        while self.next_section(surface).await.is_some() {}
    }

    /// True while at least one section has not been applied.
    pub fn is_loading(&self) -> bool {
        self.profile == SectionOutcome::Pending || self.certificates == SectionOutcome::Pending
    }

    fn apply(&mut self, surface: &mut dyn Surface, fetched: Fetched) -> Section {
        match fetched {
            Fetched::Profile(Ok(profile)) => {
                profile.bind(surface);
                self.profile = SectionOutcome::Loaded;
                Section::Profile
            }
            Fetched::Profile(Err(err)) => {
                warn!("profile unavailable, keeping placeholders: {err}");
                self.profile = SectionOutcome::Defaulted;
                Section::Profile
            }
            Fetched::Certificates(Ok(records)) => {
                let catalog: Arc<[CertificateRecord]> = records.into();
                info!("loaded {} certificate(s)", catalog.len());
                let dir = self.certificate_dir.as_str();
                render_certificates(surface, &CatalogView::project_in(&catalog, dir));
                self.search = CertificateSearch::bind(surface, Arc::clone(&catalog), dir);
                let titles: Vec<_> = catalog.iter().map(|c| c.effective_title()).collect();
                self.chips = self.tags.infer(&titles);
                render_chips(surface, &self.chips);
                self.catalog = catalog;
                self.certificates = SectionOutcome::Loaded;
                Section::Certificates
            }
            Fetched::Certificates(Err(err)) => {
                warn!("certificates unavailable, showing empty catalog: {err}");
                render_certificates(surface, &CatalogView::project_in(&[], &self.certificate_dir));
                self.certificates = SectionOutcome::Defaulted;
                Section::Certificates
            }
        }
    }

    pub async fn dispatch(&mut self, surface: &mut dyn Surface, event: PageEvent) -> EventEffect {
        match event {
            PageEvent::Load => {
                self.chrome.loader.on_load(surface).await;
                EventEffect::None
            }
            PageEvent::Scroll { offset } => {
                self.chrome.header.on_scroll(surface, offset);
                EventEffect::None
            }
            PageEvent::Intersect { id, ratio } => {
                self.chrome.reveal.on_intersect(surface, &id, ratio);
                self.chrome.nav.on_intersect(surface, &id, ratio);
                EventEffect::None
            }
            PageEvent::AnchorClick { href } => self
                .chrome
                .anchors
                .on_anchor_click(surface, &href)
                .map_or(EventEffect::None, EventEffect::ScrollTo),
            PageEvent::ThemeToggle => self
                .chrome
                .theme
                .toggle(surface)
                .map_or(EventEffect::None, EventEffect::Theme),
            PageEvent::SearchInput => {
                if let Some(search) = self.search.as_mut() {
                    search.on_input(surface);
                }
                EventEffect::None
            }
            PageEvent::SearchClear => {
                if let Some(search) = self.search.as_mut() {
                    search.on_clear(surface);
                }
                EventEffect::None
            }
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

pub struct Bootstrap {
    config: PageConfig,
    fetcher: Arc<dyn ResourceFetcher>,
    theme_store: Arc<dyn ThemeStore>,
    tags: Arc<TagDictionary>,
}

impl Bootstrap {
    pub fn new(
        config: PageConfig,
        fetcher: Arc<dyn ResourceFetcher>,
        theme_store: Arc<dyn ThemeStore>,
    ) -> Result<Self> {
        config.validate()?;
        let tags = Arc::new(config.tag_dictionary()?);
        Ok(Self {
            config,
            fetcher,
            theme_store,
            tags,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Wire the page chrome and start both fetches in the background.
    ///
    /// Must be called inside a tokio runtime. The returned session accepts
    /// events right away; neither section waits on the other.
    pub fn start(&self, surface: &mut dyn Surface) -> PageSession {
        let mut chrome = PageChrome::new(
            Arc::clone(&self.theme_store),
            self.config.loader_delay(),
            self.config.header_scroll_threshold,
        );
        chrome.init(surface);
        surface.set_text(ids::YEAR, &current_year().to_string());

        let (tx, rx) = mpsc::unbounded_channel();
        let profile = {
            let tx = tx.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let location = self.config.profile_url.clone();
            tokio::spawn(async move {
                let profile = fetch_json(fetcher.as_ref(), &location).await;
                let _ = tx.send(Fetched::Profile(profile));
            })
        };
        let certificates = {
            let fetcher = Arc::clone(&self.fetcher);
            let location = self.config.certificates_url.clone();
            tokio::spawn(async move {
                let records = load_certificates(fetcher.as_ref(), &location).await;
                let _ = tx.send(Fetched::Certificates(records));
            })
        };

        PageSession {
            chrome,
            catalog: Arc::from(Vec::new()),
            search: None,
            chips: Vec::new(),
            profile: SectionOutcome::Pending,
            certificates: SectionOutcome::Pending,
            tags: Arc::clone(&self.tags),
            certificate_dir: self.config.certificate_dir.clone(),
            fetched: rx,
            tasks: vec![profile, certificates],
        }
    }

    /// [`Bootstrap::start`], then wait until both sections are applied.
    pub async fn run(&self, surface: &mut dyn Surface) -> PageSession {
        let mut session = self.start(surface);
        session.settle(surface).await;
        session
    }
}

async fn load_certificates(
    fetcher: &dyn ResourceFetcher,
    location: &str,
) -> Result<Vec<CertificateRecord>> {
    let body = fetcher.fetch(location).await?;
    Ok(parse_catalog(&body)?)
}

fn current_year() -> u64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    year_from_unix_days(secs / 86_400)
}

/// Calendar year of a day count since 1970-01-01 (Howard Hinnant's civil
/// calendar algorithm).
fn year_from_unix_days(days: u64) -> u64 {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let year = yoe + era * 400;
    if mp >= 10 {
        year + 1
    } else {
        year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_boundaries() {
        assert_eq!(year_from_unix_days(0), 1970);
        assert_eq!(year_from_unix_days(364), 1970);
        assert_eq!(year_from_unix_days(365), 1971);
        assert_eq!(year_from_unix_days(19_722), 2023);
        assert_eq!(year_from_unix_days(19_723), 2024);
        // 2024-12-31, leap year
        assert_eq!(year_from_unix_days(20_088), 2024);
        assert_eq!(year_from_unix_days(20_089), 2025);
    }

    #[test]
    fn current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
