use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::surface::{ids, Surface};

const DEFAULT_DISPLAY_NAME: &str = "Portfolio";
const DEFAULT_GITHUB_LABEL: &str = "github.com";
const DEFAULT_LINKEDIN_LABEL: &str = "linkedin.com";
const DEFAULT_WEBSITE_LABEL: &str = "website";

/// Profile document. Every field is optional and unknown fields are ignored.
///
/// Text fields accept strings and numbers; any other value counts as absent
/// for that field alone. A `links` value that is not an object counts as no
/// links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub about: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub focus: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_links")]
    pub links: ProfileLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileLinks {
    #[serde(deserialize_with = "lenient_text")]
    pub github: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub github_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub linkedin_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub website_label: Option<String>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_links<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ProfileLinks, D::Error> {
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(ProfileLinks::deserialize(value).unwrap_or_default()),
        _ => Ok(ProfileLinks::default()),
    }
}

// Empty strings count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Profile {
    /// `fullName`, else `name`, else a generic placeholder.
    pub fn display_name(&self) -> &str {
        present(&self.full_name)
            .or_else(|| present(&self.name))
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Short name for brand and footer.
    pub fn short_name(&self) -> &str {
        present(&self.name).unwrap_or_else(|| self.display_name())
    }

    /// Write the profile into the page.
    ///
    /// Name, title, summary and about text are always written. Focus and the
    /// contact rows are only touched when the profile provides them, so the
    /// page keeps its placeholders otherwise. Social link rows are hidden when
    /// their link is missing.
    pub fn bind<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_text(ids::BRAND_NAME, self.short_name());
        surface.set_text(ids::FULL_NAME, self.display_name());
        surface.set_text(ids::FOOTER_NAME, self.short_name());
        surface.set_text(ids::TITLE, present(&self.title).unwrap_or_default());
        surface.set_text(ids::SUMMARY, present(&self.summary).unwrap_or_default());
        surface.set_text(ids::ABOUT_TEXT, present(&self.about).unwrap_or_default());

        if let Some(focus) = present(&self.focus) {
            surface.set_text(ids::FOCUS_TEXT, focus);
        }
        if let Some(email) = present(&self.email) {
            set_link(
                surface,
                ids::CONTACT_EMAIL_ROW,
                ids::CONTACT_EMAIL,
                Some(&format!("mailto:{email}")),
                email,
            );
        }
        if let Some(phone) = present(&self.phone) {
            set_link(
                surface,
                ids::CONTACT_PHONE_ROW,
                ids::CONTACT_PHONE,
                Some(&format!("tel:{phone}")),
                phone,
            );
        }
        if let Some(location) = present(&self.location) {
            set_span(
                surface,
                ids::CONTACT_LOCATION_ROW,
                ids::CONTACT_LOCATION,
                location,
            );
        }

        let links = &self.links;
        set_link(
            surface,
            ids::LINK_GITHUB_ROW,
            ids::LINK_GITHUB,
            present(&links.github),
            present(&links.github_label).unwrap_or(DEFAULT_GITHUB_LABEL),
        );
        set_link(
            surface,
            ids::LINK_LINKEDIN_ROW,
            ids::LINK_LINKEDIN,
            present(&links.linkedin),
            present(&links.linkedin_label).unwrap_or(DEFAULT_LINKEDIN_LABEL),
        );
        set_link(
            surface,
            ids::LINK_WEBSITE_ROW,
            ids::LINK_WEBSITE,
            present(&links.website),
            present(&links.website_label).unwrap_or(DEFAULT_WEBSITE_LABEL),
        );
    }
}

fn set_link<S: Surface + ?Sized>(
    surface: &mut S,
    row_id: &str,
    link_id: &str,
    href: Option<&str>,
    label: &str,
) {
    if !surface.contains(row_id) || !surface.contains(link_id) {
        return;
    }
    let Some(href) = href else {
        surface.set_hidden(row_id, true);
        return;
    };
    surface.set_attribute(link_id, "href", href);
    surface.set_text(link_id, label);
    surface.set_hidden(row_id, false);
}

fn set_span<S: Surface + ?Sized>(surface: &mut S, row_id: &str, span_id: &str, value: &str) {
    if !surface.contains(row_id) || !surface.contains(span_id) {
        return;
    }
    surface.set_text(span_id, value);
    surface.set_hidden(row_id, false);
}
