//! The mutable page the bootstrap writes into.
//!
//! Every mutator reports whether the target element exists; a missing
//! element is never an error, callers simply skip the section.

/// Element ids the page is expected to expose.
pub mod ids {
    pub const YEAR: &str = "year";

    pub const BRAND_NAME: &str = "brandName";
    pub const FULL_NAME: &str = "fullName";
    pub const FOOTER_NAME: &str = "footerName";
    pub const TITLE: &str = "title";
    pub const SUMMARY: &str = "summary";
    pub const ABOUT_TEXT: &str = "aboutText";
    pub const FOCUS_TEXT: &str = "focusText";

    pub const CONTACT_EMAIL_ROW: &str = "contactEmailRow";
    pub const CONTACT_EMAIL: &str = "contactEmail";
    pub const CONTACT_PHONE_ROW: &str = "contactPhoneRow";
    pub const CONTACT_PHONE: &str = "contactPhone";
    pub const CONTACT_LOCATION_ROW: &str = "contactLocationRow";
    pub const CONTACT_LOCATION: &str = "contactLocation";

    pub const LINK_GITHUB_ROW: &str = "linkGithubRow";
    pub const LINK_GITHUB: &str = "linkGithub";
    pub const LINK_LINKEDIN_ROW: &str = "linkLinkedinRow";
    pub const LINK_LINKEDIN: &str = "linkLinkedin";
    pub const LINK_WEBSITE_ROW: &str = "linkWebsiteRow";
    pub const LINK_WEBSITE: &str = "linkWebsite";

    pub const CERT_GRID: &str = "certGrid";
    pub const CERT_EMPTY: &str = "certEmpty";
    pub const CERT_COUNT: &str = "certCount";
    pub const CERT_SEARCH: &str = "certSearch";
    pub const CLEAR_SEARCH: &str = "clearSearch";
    pub const CHIPS: &str = "chips";

    pub const THEME_TOGGLE: &str = "themeToggle";
    pub const LOADER: &str = "loader";
    pub const HEADER: &str = "header";
}

/// Classes the page chrome reacts to.
pub mod classes {
    pub const REVEAL: &str = "reveal";
    pub const NAV_LINK: &str = "nav__link";
    pub const ACTIVE: &str = "active";
    pub const HIDDEN: &str = "hidden";
    pub const SCROLLED: &str = "scrolled";
}

pub trait Surface {
    fn contains(&self, id: &str) -> bool;

    fn set_text(&mut self, id: &str, text: &str) -> bool;

    fn set_hidden(&mut self, id: &str, hidden: bool) -> bool;

    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool;

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn add_class(&mut self, id: &str, class: &str) -> bool;

    fn remove_class(&mut self, id: &str, class: &str) -> bool;

    /// Ids of elements carrying `class`, in document order.
    fn ids_with_class(&self, class: &str) -> Vec<String>;

    /// Lower-case tag name of the element.
    fn tag(&self, id: &str) -> Option<String>;

    /// Drop all child content of the element.
    fn clear_children(&mut self, id: &str) -> bool;

    /// Append trusted markup as the element's last child.
    fn append_markup(&mut self, id: &str, markup: String) -> bool;

    /// Current value of a form control.
    fn value(&self, id: &str) -> Option<String>;

    fn set_value(&mut self, id: &str, value: &str) -> bool;

    fn focus(&mut self, id: &str) -> bool;

    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Set or remove (`None`) an attribute on the document root.
    fn set_root_attribute(&mut self, name: &str, value: Option<&str>);
}
