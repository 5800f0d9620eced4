//! In-memory page used for pre-rendering and tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::render::escape_html;
use crate::surface::{classes, ids, Surface};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    id: String,
    tag: String,
    text: String,
    hidden: bool,
    value: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    children: Vec<String>,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    fn to_html(&self) -> String {
        let mut out = format!("<{} id=\"{}\"", self.tag, escape_html(&self.id));
        if !self.classes.is_empty() {
            let joined: Vec<&str> = self.classes.iter().map(String::as_str).collect();
            out.push_str(&format!(" class=\"{}\"", escape_html(&joined.join(" "))));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        if !self.value.is_empty() {
            out.push_str(&format!(" value=\"{}\"", escape_html(&self.value)));
        }
        if self.hidden {
            out.push_str(" hidden");
        }
        out.push('>');
        out.push_str(&escape_html(&self.text));
        for child in &self.children {
            out.push_str(child);
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

/// Flat, id-addressed document. Elements without an id are not modelled.
#[derive(Debug, Clone, Default)]
pub struct Document {
    root_attributes: BTreeMap<String, String>,
    elements: Vec<Element>,
    focused: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element, replacing any existing one with the same id.
    pub fn insert(&mut self, element: Element) {
        match self.position(&element.id) {
            Some(idx) => self.elements[idx] = element,
            None => self.elements.push(element),
        }
    }

    pub fn with(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(Element::text_content)
    }

    pub fn is_hidden(&self, id: &str) -> Option<bool> {
        self.element(id).map(Element::is_hidden)
    }

    pub fn children(&self, id: &str) -> &[String] {
        self.element(id).map(Element::children).unwrap_or_default()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Serialize every element, in insertion order, as a flat HTML fragment.
    pub fn to_html(&self) -> String {
        self.elements
            .iter()
            .map(Element::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The portfolio page skeleton with its static placeholder content.
    pub fn portfolio() -> Self {
        Self::new()
            .with(Element::new(ids::LOADER, "div").class("loader"))
            .with(Element::new(ids::HEADER, "header").class("header"))
            .with(Element::new(ids::BRAND_NAME, "span").text("Portfolio"))
            .with(Element::new(ids::THEME_TOGGLE, "button").text("Toggle theme"))
            .with(nav_link("navAbout", "#about"))
            .with(nav_link("navCertificates", "#certificates"))
            .with(nav_link("navContact", "#contact"))
            .with(Element::new("hero", "section").class(classes::REVEAL))
            .with(Element::new(ids::FULL_NAME, "h1").text("Your Name"))
            .with(Element::new(ids::TITLE, "p").text("Your Title"))
            .with(Element::new(ids::SUMMARY, "p").text("A short summary about you."))
            .with(Element::new("about", "section").class(classes::REVEAL))
            .with(Element::new(ids::ABOUT_TEXT, "p").text("About you."))
            .with(Element::new(ids::FOCUS_TEXT, "p").text("Current focus."))
            .with(Element::new(ids::CHIPS, "div").class("chips"))
            .with(Element::new("certificates", "section").class(classes::REVEAL))
            .with(Element::new(ids::CERT_COUNT, "span").text("0"))
            .with(
                Element::new(ids::CERT_SEARCH, "input")
                    .attr("type", "search")
                    .attr("placeholder", "Search certificates"),
            )
            .with(Element::new(ids::CLEAR_SEARCH, "button").text("Clear"))
            .with(Element::new(ids::CERT_GRID, "div").class("cert-grid"))
            .with(
                Element::new(ids::CERT_EMPTY, "p")
                    .text("No certificates found.")
                    .hidden(true),
            )
            .with(Element::new("contact", "section").class(classes::REVEAL))
            .with(Element::new(ids::CONTACT_EMAIL_ROW, "li").hidden(true))
            .with(Element::new(ids::CONTACT_EMAIL, "a"))
            .with(Element::new(ids::CONTACT_PHONE_ROW, "li").hidden(true))
            .with(Element::new(ids::CONTACT_PHONE, "a"))
            .with(Element::new(ids::CONTACT_LOCATION_ROW, "li").hidden(true))
            .with(Element::new(ids::CONTACT_LOCATION, "span"))
            .with(Element::new(ids::LINK_GITHUB_ROW, "li").hidden(true))
            .with(Element::new(ids::LINK_GITHUB, "a"))
            .with(Element::new(ids::LINK_LINKEDIN_ROW, "li").hidden(true))
            .with(Element::new(ids::LINK_LINKEDIN, "a"))
            .with(Element::new(ids::LINK_WEBSITE_ROW, "li").hidden(true))
            .with(Element::new(ids::LINK_WEBSITE, "a"))
            .with(Element::new(ids::FOOTER_NAME, "span").text("Portfolio"))
            .with(Element::new(ids::YEAR, "span"))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    fn update(&mut self, id: &str, apply: impl FnOnce(&mut Element)) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                apply(el);
                true
            }
            None => false,
        }
    }
}

fn nav_link(id: &str, href: &str) -> Element {
    Element::new(id, "a")
        .class(classes::NAV_LINK)
        .attr("href", href)
}

impl Surface for Document {
    fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.update(id, |el| {
            el.text = text.to_string();
            el.children.clear();
        })
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        self.update(id, |el| el.hidden = hidden)
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.element(id)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool {
        self.update(id, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.update(id, |el| {
            el.classes.insert(class.to_string());
        })
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.update(id, |el| {
            el.classes.remove(class);
        })
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|el| el.classes.contains(class))
            .map(|el| el.id.clone())
            .collect()
    }

    fn tag(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.tag.clone())
    }

    fn clear_children(&mut self, id: &str) -> bool {
        self.update(id, |el| {
            el.text.clear();
            el.children.clear();
        })
    }

    fn append_markup(&mut self, id: &str, markup: String) -> bool {
        self.update(id, |el| el.children.push(markup))
    }

    fn value(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) -> bool {
        self.update(id, |el| el.value = value.to_string())
    }

    fn focus(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.get(name).cloned()
    }

    fn set_root_attribute(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.root_attributes
                    .insert(name.to_string(), value.to_string());
            }
            None => {
                self.root_attributes.remove(name);
            }
        }
    }
}
