use portfolio_catalog::{
    parse_catalog, CatalogView, SearchFilter, TagDictionary, TagRuleSpec,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::sync::Arc;

const CERTIFICATES: &str = r#"{
  "items": [
    { "file": "CertificateOfCompletion_Python_Intro.pdf" },
    { "file": "Certification of Completion - Risk Basics (1).pdf" },
    { "file": "dashboards.pdf", "title": "Power BI Analytics" },
    { "note": "no identifying fields" },
    { "url": "https://cdn.example.com/data-viz.pdf", "title": "Data Visualization Foundations" }
  ]
}"#;

fn effective_titles(filter: &SearchFilter) -> Vec<String> {
    filter
        .catalog()
        .iter()
        .map(|record| record.effective_title().into_owned())
        .collect()
}

#[test]
fn wrapped_document_flows_into_cards_and_chips() {
    let records = parse_catalog(CERTIFICATES.as_bytes()).expect("catalog parses");
    assert_eq!(records.len(), 4);

    let view = CatalogView::project(&records);
    let titles: Vec<_> = view.cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Python Intro",
            "Risk Basics",
            "Power BI Analytics",
            "Data Visualization Foundations"
        ]
    );
    assert_eq!(
        view.cards[1].href,
        "Certificate/Certification%20of%20Completion%20-%20Risk%20Basics%20(1).pdf"
    );

    let filter = SearchFilter::new(records.into());
    let chips = TagDictionary::default().infer(&effective_titles(&filter));
    assert_eq!(
        chips,
        vec!["Python", "Power BI", "Data Visualization", "Analytics", "Risk"]
    );
}

#[test]
fn filtered_view_counts_only_visible_records() {
    let records: Arc<[_]> = parse_catalog(CERTIFICATES.as_bytes()).unwrap().into();
    let mut filter = SearchFilter::new(records);

    let view = CatalogView::project(&filter.set_query("BASICS"));
    assert_eq!(view.count, 1);
    assert_eq!(view.cards[0].title, "Risk Basics");

    let view = CatalogView::project(&filter.set_query("java"));
    assert!(view.is_empty());
    assert_eq!(view.count, 0);

    let view = CatalogView::project(filter.clear());
    assert_eq!(view.count, 4);
}

#[derive(Deserialize)]
struct ChipConfig {
    tags: Vec<TagRuleSpec>,
}

#[test]
fn dictionary_loads_from_configuration() {
    let config: ChipConfig = toml::from_str(
        r#"
        [[tags]]
        label = "SQL"
        pattern = '\bsql\b'

        [[tags]]
        label = "Python"
        pattern = "python"
        "#,
    )
    .expect("config parses");
    let dict = TagDictionary::from_specs(&config.tags).expect("patterns compile");
    assert_eq!(dict.len(), 2);
    assert_eq!(
        dict.infer(&["Python for SQL users"]),
        vec!["SQL", "Python"]
    );
}
