//! Page chrome: theme toggle, loading screen, scroll reveal, header styling,
//! active navigation link and in-page anchor scrolling.
//!
//! None of these interact with the certificate catalog. Each is initialised
//! once by the bootstrap; the host then forwards raw events to the methods
//! below.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::surface::{classes, ids, Surface};
use crate::theme::{Theme, ThemeStore};

const THEME_ATTRIBUTE: &str = "data-theme";
const REVEAL_THRESHOLD: f32 = 0.1;
const NAV_THRESHOLD: f32 = 0.3;

pub trait ChromeBehavior {
    fn init(&mut self, surface: &mut dyn Surface);
}

/// Restores the persisted theme and flips it on each toggle click.
pub struct ThemeToggle {
    store: Arc<dyn ThemeStore>,
    bound: bool,
}

impl ThemeToggle {
    pub fn new(store: Arc<dyn ThemeStore>) -> Self {
        Self {
            store,
            bound: false,
        }
    }

    pub fn toggle(&self, surface: &mut dyn Surface) -> Option<Theme> {
        if !self.bound {
            return None;
        }
        let current = surface
            .root_attribute(THEME_ATTRIBUTE)
            .as_deref()
            .and_then(Theme::parse);
        let next = Theme::toggled(current);
        apply_theme(surface, Some(next));
        if let Err(err) = self.store.set(next) {
            warn!("failed to persist theme: {err}");
        }
        Some(next)
    }
}

impl ChromeBehavior for ThemeToggle {
    fn init(&mut self, surface: &mut dyn Surface) {
        if let Some(saved) = self.store.get() {
            apply_theme(surface, Some(saved));
        }
        self.bound = surface.contains(ids::THEME_TOGGLE);
    }
}

fn apply_theme(surface: &mut dyn Surface, theme: Option<Theme>) {
    surface.set_root_attribute(THEME_ATTRIBUTE, theme.map(Theme::as_str));
}

/// Hides the loading screen a fixed delay after the page finishes loading.
pub struct LoaderDismissal {
    delay: Duration,
    armed: bool,
}

impl LoaderDismissal {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn on_load(&self, surface: &mut dyn Surface) {
        if !self.armed {
            return;
        }
        tokio::time::sleep(self.delay).await;
        surface.add_class(ids::LOADER, classes::HIDDEN);
    }
}

impl ChromeBehavior for LoaderDismissal {
    fn init(&mut self, surface: &mut dyn Surface) {
        self.armed = surface.contains(ids::LOADER);
    }
}

/// Adds `active` to `.reveal` elements once they scroll into view.
#[derive(Default)]
pub struct ScrollReveal {
    targets: BTreeSet<String>,
}

impl ScrollReveal {
    pub fn on_intersect(&self, surface: &mut dyn Surface, id: &str, ratio: f32) {
        if ratio >= REVEAL_THRESHOLD && self.targets.contains(id) {
            surface.add_class(id, classes::ACTIVE);
        }
    }
}

impl ChromeBehavior for ScrollReveal {
    fn init(&mut self, surface: &mut dyn Surface) {
        self.targets = surface.ids_with_class(classes::REVEAL).into_iter().collect();
        debug!("observing {} reveal target(s)", self.targets.len());
    }
}

/// Marks the header once the page scrolls past a threshold.
pub struct HeaderScroll {
    threshold: f64,
    bound: bool,
}

impl HeaderScroll {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            bound: false,
        }
    }

    pub fn on_scroll(&self, surface: &mut dyn Surface, offset: f64) {
        if !self.bound {
            return;
        }
        if offset > self.threshold {
            surface.add_class(ids::HEADER, classes::SCROLLED);
        } else {
            surface.remove_class(ids::HEADER, classes::SCROLLED);
        }
    }
}

impl ChromeBehavior for HeaderScroll {
    fn init(&mut self, surface: &mut dyn Surface) {
        self.bound = surface.contains(ids::HEADER);
    }
}

/// Highlights the nav link pointing at the section currently in view.
#[derive(Default)]
pub struct ActiveNavLink {
    links: Vec<String>,
}

impl ActiveNavLink {
    pub fn on_intersect(&self, surface: &mut dyn Surface, id: &str, ratio: f32) {
        if ratio < NAV_THRESHOLD || surface.tag(id).as_deref() != Some("section") {
            return;
        }
        let target = format!("#{id}");
        for link in &self.links {
            surface.remove_class(link, classes::ACTIVE);
            if surface.attribute(link, "href").as_deref() == Some(target.as_str()) {
                surface.add_class(link, classes::ACTIVE);
            }
        }
    }
}

impl ChromeBehavior for ActiveNavLink {
    fn init(&mut self, surface: &mut dyn Surface) {
        self.links = surface.ids_with_class(classes::NAV_LINK);
    }
}

/// Resolves in-page anchors to the element the host should scroll to.
#[derive(Default)]
pub struct SmoothScroll;

impl SmoothScroll {
    pub fn on_anchor_click(&self, surface: &dyn Surface, href: &str) -> Option<String> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() || !surface.contains(id) {
            return None;
        }
        Some(id.to_string())
    }
}

impl ChromeBehavior for SmoothScroll {
    fn init(&mut self, _surface: &mut dyn Surface) {}
}

/// All chrome behaviours, initialised together.
pub struct PageChrome {
    pub theme: ThemeToggle,
    pub loader: LoaderDismissal,
    pub reveal: ScrollReveal,
    pub header: HeaderScroll,
    pub nav: ActiveNavLink,
    pub anchors: SmoothScroll,
}

impl PageChrome {
    pub fn new(store: Arc<dyn ThemeStore>, loader_delay: Duration, header_threshold: f64) -> Self {
        Self {
            theme: ThemeToggle::new(store),
            loader: LoaderDismissal::new(loader_delay),
            reveal: ScrollReveal::default(),
            header: HeaderScroll::new(header_threshold),
            nav: ActiveNavLink::default(),
            anchors: SmoothScroll,
        }
    }
}

impl ChromeBehavior for PageChrome {
    fn init(&mut self, surface: &mut dyn Surface) {
        self.loader.init(surface);
        self.theme.init(surface);
        self.reveal.init(surface);
        self.header.init(surface);
        self.nav.init(surface);
        self.anchors.init(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Element};
    use crate::theme::MemoryThemeStore;

    fn chrome(store: Arc<MemoryThemeStore>) -> PageChrome {
        PageChrome::new(store, Duration::from_millis(500), 50.0)
    }

    #[test]
    fn saved_theme_is_applied_on_init() {
        let mut doc = Document::portfolio();
        let mut chrome = chrome(Arc::new(MemoryThemeStore::with_raw("dark")));
        chrome.init(&mut doc);
        assert_eq!(doc.root_attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
    }

    #[test]
    fn invalid_saved_theme_leaves_root_untouched() {
        let mut doc = Document::portfolio();
        let mut chrome = chrome(Arc::new(MemoryThemeStore::with_raw("neon")));
        chrome.init(&mut doc);
        assert_eq!(doc.root_attribute(THEME_ATTRIBUTE), None);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let store = Arc::new(MemoryThemeStore::new());
        let mut doc = Document::portfolio();
        let mut chrome = chrome(Arc::clone(&store));
        chrome.init(&mut doc);

        assert_eq!(chrome.theme.toggle(&mut doc), Some(Theme::Light));
        assert_eq!(chrome.theme.toggle(&mut doc), Some(Theme::Dark));
        assert_eq!(doc.root_attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        assert_eq!(store.get(), Some(Theme::Dark));
    }

    #[test]
    fn toggle_without_button_is_inert() {
        let store = Arc::new(MemoryThemeStore::new());
        let mut doc = Document::new();
        let mut chrome = chrome(Arc::clone(&store));
        chrome.init(&mut doc);
        assert_eq!(chrome.theme.toggle(&mut doc), None);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn header_class_follows_scroll_offset() {
        let mut doc = Document::portfolio();
        let mut chrome = chrome(Arc::new(MemoryThemeStore::new()));
        chrome.init(&mut doc);
        chrome.header.on_scroll(&mut doc, 51.0);
        assert!(doc.has_class(ids::HEADER, classes::SCROLLED));
        chrome.header.on_scroll(&mut doc, 50.0);
        assert!(!doc.has_class(ids::HEADER, classes::SCROLLED));
    }

    #[test]
    fn reveal_only_marks_observed_targets_past_threshold() {
        let mut doc = Document::portfolio().with(Element::new("late", "div").class(classes::REVEAL));
        let mut chrome = chrome(Arc::new(MemoryThemeStore::new()));
        chrome.init(&mut doc);

        chrome.reveal.on_intersect(&mut doc, "about", 0.05);
        assert!(!doc.has_class("about", classes::ACTIVE));
        chrome.reveal.on_intersect(&mut doc, "about", 0.2);
        assert!(doc.has_class("about", classes::ACTIVE));
        chrome.reveal.on_intersect(&mut doc, ids::TITLE, 1.0);
        assert!(!doc.has_class(ids::TITLE, classes::ACTIVE));
    }

    #[test]
    fn nav_link_tracks_visible_section() {
        let mut doc = Document::portfolio();
        let mut chrome = chrome(Arc::new(MemoryThemeStore::new()));
        chrome.init(&mut doc);

        chrome.nav.on_intersect(&mut doc, "about", 0.5);
        assert!(doc.has_class("navAbout", classes::ACTIVE));
        chrome.nav.on_intersect(&mut doc, "contact", 0.5);
        assert!(!doc.has_class("navAbout", classes::ACTIVE));
        assert!(doc.has_class("navContact", classes::ACTIVE));
        chrome.nav.on_intersect(&mut doc, "certificates", 0.1);
        assert!(doc.has_class("navContact", classes::ACTIVE));
    }

    #[test]
    fn anchors_resolve_only_to_existing_ids() {
        let doc = Document::portfolio();
        let anchors = SmoothScroll;
        assert_eq!(
            anchors.on_anchor_click(&doc, "#contact").as_deref(),
            Some("contact")
        );
        assert_eq!(anchors.on_anchor_click(&doc, "#missing"), None);
        assert_eq!(anchors.on_anchor_click(&doc, "#"), None);
        assert_eq!(anchors.on_anchor_click(&doc, "https://x"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn loader_hides_after_delay() {
        let mut doc = Document::portfolio();
        let mut chrome = chrome(Arc::new(MemoryThemeStore::new()));
        chrome.init(&mut doc);

        let started = tokio::time::Instant::now();
        chrome.loader.on_load(&mut doc).await;
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(doc.has_class(ids::LOADER, classes::HIDDEN));
    }
}
