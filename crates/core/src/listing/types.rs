//! Types for marketplace listings.

use serde::{Deserialize, Serialize};

/// Sentinel value for a listing with no canonical URL.
pub const NO_LINK: &str = "#";

/// Physical condition on the 5-value ordinal book trade scale.
///
/// Ordering is worst-to-best so that `Ord` matches collector intuition
/// (`Poor < Fair < Good < VeryGood < Fine`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    Poor,
    Fair,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Fine,
}

impl Condition {
    /// Display label as used by the book trade.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Fine => "Fine",
            Condition::VeryGood => "Very Good",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }

    /// Parse an exact label, defaulting to `Good` for anything unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Fine" => Condition::Fine,
            "Very Good" => Condition::VeryGood,
            "Fair" => Condition::Fair,
            "Poor" => Condition::Poor,
            _ => Condition::Good,
        }
    }

    /// All conditions, best first.
    pub fn all() -> [Condition; 5] {
        [
            Condition::Fine,
            Condition::VeryGood,
            Condition::Good,
            Condition::Fair,
            Condition::Poor,
        ]
    }
}

/// Map a provider's free-form condition vocabulary onto the ordinal scale.
///
/// Keyword matching is case-insensitive and substring-based; unknown
/// vocabularies land on `Good`. The match order mirrors provider usage:
/// "Brand New" and "Like New" both hit the "new" rule.
pub fn map_condition(raw: &str) -> Condition {
    let lower = raw.to_lowercase();
    if lower.contains("new") {
        Condition::Fine
    } else if lower.contains("very good") {
        Condition::VeryGood
    } else if lower.contains("acceptable") {
        Condition::Fair
    } else if lower.contains("parts") {
        Condition::Poor
    } else {
        Condition::Good
    }
}

/// A single marketplace offer in the normalized schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Provenance tag: adapter name, "Manual", "Visual Scan", etc.
    pub source: String,
    /// Listing or book title.
    pub title: String,
    /// Asking price; 0.0 means unparseable/unknown.
    pub price: f64,
    /// Condition on the ordinal scale.
    pub condition: Condition,
    /// Free-text detail tags ("Signed", "Dust Jacket", "Simulated Result", ...).
    #[serde(default)]
    pub details: Vec<String>,
    /// Seller rating in [0, 5]; display-only, never scored.
    #[serde(default)]
    pub seller_rating: f64,
    /// Canonical URL, or `NO_LINK`.
    #[serde(default = "default_link")]
    pub link: String,
    /// Bibliographic echo, copied from the resolved book when the adapter
    /// does not supply its own.
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub publisher: String,
    /// "None" unless the seller discloses missing pages.
    #[serde(default = "default_missing_pages")]
    pub missing_pages: String,
    /// Derived desirability score; recomputed on every sort.
    #[serde(default)]
    pub score: u32,
}

fn default_link() -> String {
    NO_LINK.to_string()
}

fn default_missing_pages() -> String {
    "None".to_string()
}

impl Listing {
    /// A listing with neutral values for everything but source and price.
    pub fn new(source: impl Into<String>, price: f64) -> Self {
        Self {
            source: source.into(),
            title: String::new(),
            price,
            condition: Condition::Good,
            details: Vec::new(),
            seller_rating: 0.0,
            link: default_link(),
            author: String::new(),
            year: String::new(),
            publisher: String::new(),
            missing_pages: default_missing_pages(),
            score: 0,
        }
    }

    /// Whether this listing carries a real outbound URL.
    pub fn has_link(&self) -> bool {
        !self.link.is_empty() && self.link != NO_LINK
    }

    /// Fill empty bibliographic fields from a resolved book.
    pub fn enrich(&mut self, title: &str, author: &str, year: &str, publisher: &str) {
        if self.title.is_empty() {
            self.title = title.to_string();
        }
        if self.author.is_empty() {
            self.author = author.to_string();
        }
        if self.year.is_empty() {
            self.year = year.to_string();
        }
        if self.publisher.is_empty() {
            self.publisher = publisher.to_string();
        }
    }
}

/// The listing identity heuristic used for save/dedup.
///
/// Two listings are the "same" iff their links match and are not the
/// sentinel, or their (price, source) pair matches exactly. This relation is
/// knowingly lossy in both directions and is kept as-is for behavior parity.
pub fn same_listing(a: &Listing, b: &Listing) -> bool {
    (a.has_link() && a.link == b.link) || (a.price == b.price && a.source == b.source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_ordering() {
        assert!(Condition::Poor < Condition::Fair);
        assert!(Condition::Fair < Condition::Good);
        assert!(Condition::Good < Condition::VeryGood);
        assert!(Condition::VeryGood < Condition::Fine);
    }

    #[test]
    fn test_condition_label_round_trip() {
        for c in Condition::all() {
            assert_eq!(Condition::from_label(c.label()), c);
        }
    }

    #[test]
    fn test_condition_from_unknown_label() {
        assert_eq!(Condition::from_label("Mint???"), Condition::Good);
        assert_eq!(Condition::from_label(""), Condition::Good);
    }

    #[test]
    fn test_map_condition_keywords() {
        assert_eq!(map_condition("Brand New"), Condition::Fine);
        assert_eq!(map_condition("Like New"), Condition::Fine);
        assert_eq!(map_condition("Very Good"), Condition::VeryGood);
        assert_eq!(map_condition("Acceptable"), Condition::Fair);
        assert_eq!(map_condition("For parts or not working"), Condition::Poor);
        assert_eq!(map_condition("Used"), Condition::Good);
        assert_eq!(map_condition(""), Condition::Good);
    }

    #[test]
    fn test_condition_serde_rename() {
        let json = serde_json::to_string(&Condition::VeryGood).unwrap();
        assert_eq!(json, "\"Very Good\"");
        let parsed: Condition = serde_json::from_str("\"Very Good\"").unwrap();
        assert_eq!(parsed, Condition::VeryGood);
    }

    #[test]
    fn test_same_listing_by_link() {
        let mut a = Listing::new("eBay", 10.0);
        a.link = "https://example.com/x".to_string();
        let mut b = Listing::new("AbeBooks", 99.0);
        b.link = "https://example.com/x".to_string();
        assert!(same_listing(&a, &b));
    }

    #[test]
    fn test_same_listing_sentinel_link_ignored() {
        let a = Listing::new("eBay", 10.0);
        let b = Listing::new("AbeBooks", 99.0);
        // Both have the sentinel link; identity falls through to (price, source)
        assert!(!same_listing(&a, &b));
    }

    #[test]
    fn test_same_listing_by_price_and_source() {
        let a = Listing::new("eBay", 25.0);
        let b = Listing::new("eBay", 25.0);
        assert!(same_listing(&a, &b));

        let c = Listing::new("eBay", 25.01);
        assert!(!same_listing(&a, &c));
    }

    #[test]
    fn test_enrich_fills_only_empty_fields() {
        let mut l = Listing::new("eBay", 10.0);
        l.author = "Existing Author".to_string();
        l.enrich("Title", "Book Author", "1950", "Scribner");
        assert_eq!(l.title, "Title");
        assert_eq!(l.author, "Existing Author");
        assert_eq!(l.year, "1950");
        assert_eq!(l.publisher, "Scribner");
    }

    #[test]
    fn test_listing_deserialize_defaults() {
        let json = r#"{"source": "Manual", "title": "X", "price": 5.0, "condition": "Good"}"#;
        let l: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(l.link, NO_LINK);
        assert_eq!(l.missing_pages, "None");
        assert!(l.details.is_empty());
    }
}
