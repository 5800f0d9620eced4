use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Built-in keyword dictionary, in chip display order.
///
/// Keywords fold case over ASCII only and `\b` sees only ASCII word
/// characters, so accented letters are boundaries and `ſ` is not an `s`.
/// `\s` stays Unicode-aware.
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("Python", r"(?-u:python)"),
    ("Power BI", r"(?-u:power)\s*(?-u:bi)"),
    ("Data Visualization", r"(?-u:data)\s*(?-u:visual)"),
    ("Analytics", r"(?-u:analytics)"),
    ("Risk", r"(?-u:\brisk\b)"),
];

/// Serializable form of a dictionary entry, as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRuleSpec {
    pub label: String,
    pub pattern: String,
}

impl TagRuleSpec {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }
}

/// Compiled dictionary entry: a chip label and its case-insensitive pattern
#[derive(Debug, Clone)]
pub struct TagRule {
    label: String,
    pattern: Regex,
}

impl TagRule {
    pub fn compile(spec: &TagRuleSpec) -> Result<Self> {
        let pattern = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| CatalogError::invalid_pattern(&spec.label, err.to_string()))?;
        Ok(Self {
            label: spec.label.clone(),
            pattern,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_match(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }
}

/// Ordered keyword → label dictionary used to derive topic chips from titles
#[derive(Debug, Clone)]
pub struct TagDictionary {
    rules: Vec<TagRule>,
}

impl TagDictionary {
    /// Compile a dictionary from specs, keeping their order.
    pub fn from_specs(specs: &[TagRuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(TagRule::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Specs of the built-in dictionary.
    pub fn builtin_specs() -> Vec<TagRuleSpec> {
        BUILTIN_RULES
            .iter()
            .map(|(label, pattern)| TagRuleSpec::new(*label, *pattern))
            .collect()
    }

    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Labels whose pattern matches at least one title.
    ///
    /// Output follows dictionary order, never input order, and lists each
    /// label at most once.
    pub fn infer<S: AsRef<str>>(&self, titles: &[S]) -> Vec<String> {
        let chips: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| titles.iter().any(|t| rule.is_match(t.as_ref())))
            .map(|rule| rule.label.clone())
            .collect();
        debug!(
            "inferred {} chip(s) from {} title(s)",
            chips.len(),
            titles.len()
        );
        chips
    }
}

impl Default for TagDictionary {
    fn default() -> Self {
        Self::from_specs(&Self::builtin_specs()).expect("built-in tag patterns compile")
    }
}
