//! Writes catalog views and chips into a [`Surface`].

use log::debug;
use portfolio_catalog::{CatalogView, CertificateCard};

use crate::surface::{ids, Surface};

/// Replace the certificate grid with `view`.
///
/// Clears previous cards, updates the count and the empty-state indicator.
/// Does nothing if the grid or the empty-state element is missing.
pub fn render_certificates<S: Surface + ?Sized>(surface: &mut S, view: &CatalogView) {
    if !surface.contains(ids::CERT_GRID) || !surface.contains(ids::CERT_EMPTY) {
        debug!("certificate grid not present; skipping render");
        return;
    }

    surface.clear_children(ids::CERT_GRID);
    surface.set_text(ids::CERT_COUNT, &view.count.to_string());

    if view.is_empty() {
        surface.set_hidden(ids::CERT_EMPTY, false);
        return;
    }
    surface.set_hidden(ids::CERT_EMPTY, true);

    for card in &view.cards {
        surface.append_markup(ids::CERT_GRID, card_markup(card));
    }
}

/// Replace the chip row with one `span.chip` per label.
pub fn render_chips<S: Surface + ?Sized>(surface: &mut S, chips: &[String]) {
    if !surface.clear_children(ids::CHIPS) {
        return;
    }
    for chip in chips {
        surface.append_markup(
            ids::CHIPS,
            format!("<span class=\"chip\">{}</span>", escape_html(chip)),
        );
    }
}

/// Card markup: heading, filename caption, and an embedded PDF viewer whose
/// fallback offers open/download links.
pub fn card_markup(card: &CertificateCard) -> String {
    let title = escape_html(&card.title);
    let file = escape_html(&card.file);
    let href = escape_html(&card.href);
    format!(
        r#"<article class="card card--pad cert">
  <div class="cert__meta">
    <h3 class="cert__title">{title}</h3>
    <p class="cert__file">{file}</p>
  </div>
  <div class="cert-embed">
    <object data="{href}" type="application/pdf" width="100%" height="100%">
      <div class="cert-embed__fallback">
        <p>PDF preview not available in your browser.</p>
        <a class="button" href="{href}" target="_blank" rel="noreferrer">Open PDF</a>
        <a class="button button--ghost" href="{href}" download>Download</a>
      </div>
    </object>
  </div>
</article>"#
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
