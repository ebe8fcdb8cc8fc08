use serde::{Deserialize, Serialize};

use crate::links;

/// Bibliographic record returned by a catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    /// Author credits in catalog order. Empty when the catalog has none.
    #[serde(default)]
    pub authors: Vec<String>,
    pub year: String,
    pub publisher: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
}

impl CatalogRecord {
    /// Placeholder record for a query the catalog could not resolve.
    /// The raw query stands in as the title so downstream display still
    /// has something to show. Never used to seed a synthetic market.
    pub fn fallback(query: &str) -> Self {
        Self {
            title: query.to_string(),
            authors: vec![],
            year: String::new(),
            publisher: "Unknown".to_string(),
            description: "Search Result".to_string(),
            image: None,
            category: "Search".to_string(),
            preview_link: None,
        }
    }

    /// Author credits joined for display, "Unknown" when the catalog had none.
    pub fn author_label(&self) -> String {
        if self.authors.is_empty() {
            "Unknown".to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// Canonical "title authors" form used by the suggestion heuristic.
    pub fn full_title(&self) -> String {
        format!("{} {}", self.title, self.authors.join(", "))
            .trim()
            .to_string()
    }

    /// Link to a digital copy: preview page when available, archive
    /// full-text search otherwise.
    pub fn read_online_link(&self) -> String {
        links::read_online_url(
            &self.title,
            &self.authors.join(", "),
            self.preview_link.as_deref(),
        )
    }
}

/// Outcome of resolving a raw query against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Catalog agreed with the query as written.
    Verified,
    /// Catalog returned a plausibly better title.
    Suggestion,
    /// Catalog had no match.
    NotFound,
    /// Catalog was unreachable or returned garbage.
    Unknown,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Verified => "verified",
            Verdict::Suggestion => "suggestion",
            Verdict::NotFound => "not_found",
            Verdict::Unknown => "unknown",
        }
    }
}

/// A query after catalog resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedBook {
    /// The query as entered.
    pub query: String,
    pub verdict: Verdict,
    /// Better form of the query, present only when `verdict` is Suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<CatalogRecord>,
    /// Digital-copy link derived from the matched record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_online: Option<String>,
}

impl ResolvedBook {
    /// The term downstream searches should use: the suggestion when one
    /// exists, the original query otherwise.
    pub fn search_term(&self) -> &str {
        self.suggestion.as_deref().unwrap_or(&self.query)
    }

    /// Whether the catalog actually matched the query. A not-found
    /// resolution still carries a placeholder record, so callers that
    /// need a real match must check this rather than `record`.
    pub fn catalog_hit(&self) -> bool {
        matches!(self.verdict, Verdict::Verified | Verdict::Suggestion)
    }
}
