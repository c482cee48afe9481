//! Glossary lookup
//!
//! Terms are supplied by the content layer (JSON in camelCase). Search is a
//! case-insensitive substring match over term, abbreviation, definition and
//! category; an empty query returns every term.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub id: String,
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    pub definition: String,
    pub category: String,
    /// Ids of related terms
    #[serde(default)]
    pub related_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_relevance: Option<String>,
}

impl GlossaryTerm {
    /// `needle` must already be lowercase
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.term.to_lowercase().contains(needle)
            || self
                .abbreviation
                .as_deref()
                .is_some_and(|abbr| abbr.to_lowercase().contains(needle))
            || self.definition.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }

    pub fn matches(&self, query: &str) -> bool {
        self.matches_lowercase(&query.to_lowercase())
    }
}

/// Terms matching `query`, in their original order
pub fn search<'a>(terms: &'a [GlossaryTerm], query: &str) -> Vec<&'a GlossaryTerm> {
    let needle = query.to_lowercase();
    terms
        .iter()
        .filter(|t| t.matches_lowercase(&needle))
        .collect()
}

/// Distinct categories in first-seen order
pub fn categories(terms: &[GlossaryTerm]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for term in terms {
        if !seen.contains(&term.category.as_str()) {
            seen.push(&term.category);
        }
    }
    seen
}

pub fn find_term<'a>(terms: &'a [GlossaryTerm], id: &str) -> Option<&'a GlossaryTerm> {
    terms.iter().find(|t| t.id == id)
}

/// Resolve a term's related ids, skipping ids with no entry
pub fn related<'a>(terms: &'a [GlossaryTerm], term: &GlossaryTerm) -> Vec<&'a GlossaryTerm> {
    term.related_terms
        .iter()
        .filter_map(|id| find_term(terms, id))
        .collect()
}
