//! Listing extraction from model output.
//!
//! The model is asked for a bare JSON object but routinely wraps it in a
//! markdown code fence; parsing tolerates that and nothing else. A draft
//! that fails to parse yields `None` rather than a partial listing.

use serde::{Deserialize, Serialize};

use crate::listing::{map_condition, Condition, Listing};

/// Prompt instructing the model to emit a listing as JSON.
pub const EXTRACT_PROMPT: &str = r#"Extract info JSON: { "price": (number), "condition": (string), "details": (string), "author": (string), "year": (string), "publisher": (string), "missingPages": (string), "url": (string, extract full http link if present in text) }"#;

/// Partial listing as extracted by the model. Every field is optional;
/// the model only fills what it can see.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingDraft {
    pub price: Option<f64>,
    pub condition: Option<String>,
    pub details: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub publisher: Option<String>,
    #[serde(rename = "missingPages")]
    pub missing_pages: Option<String>,
    pub url: Option<String>,
}

/// Parse model output into a draft, stripping any ```json fence first.
/// Returns `None` when the payload is not valid JSON.
pub fn parse_draft(text: &str) -> Option<ListingDraft> {
    let clean = text.replace("```json", "").replace("```", "");
    serde_json::from_str(clean.trim()).ok()
}

/// Merge a draft into an existing listing, field by field.
///
/// Absent or zero prices leave the current price alone; condition always
/// lands on the ordinal scale, defaulting to `Good` when the model stayed
/// silent.
pub fn apply_draft(draft: &ListingDraft, listing: &mut Listing) {
    match draft.price {
        Some(price) if price > 0.0 => listing.price = price,
        _ => {}
    }

    listing.condition = draft
        .condition
        .as_deref()
        .map(map_condition)
        .unwrap_or(Condition::Good);

    if let Some(details) = &draft.details {
        if !details.is_empty() {
            listing.details.push(details.clone());
        }
    }
    if let Some(author) = &draft.author {
        listing.author = author.clone();
    }
    if let Some(year) = &draft.year {
        listing.year = year.clone();
    }
    if let Some(publisher) = &draft.publisher {
        listing.publisher = publisher.clone();
    }
    if let Some(missing) = &draft.missing_pages {
        listing.missing_pages = missing.clone();
    }
    if let Some(url) = &draft.url {
        if !url.is_empty() {
            listing.link = url.clone();
        }
    }
}
