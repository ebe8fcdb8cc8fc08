use serde::{Deserialize, Serialize};

use crate::links;
use crate::listing::Listing;
use crate::resolver::{ResolvedBook, Verdict};

/// Attribute filters appended to every batch search term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchFilter {
    /// Publication year bounds. A lone minimum renders as "after:min";
    /// a lone maximum is ignored.
    #[serde(default)]
    pub year_min: Option<u32>,
    #[serde(default)]
    pub year_max: Option<u32>,
    #[serde(default)]
    pub first_edition: bool,
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub dust_jacket: bool,
    /// Extra free-text keywords.
    #[serde(default)]
    pub keywords: String,
}

impl BatchFilter {
    /// Search term suffix, leading space included. Empty when no filter
    /// is active.
    pub fn suffix(&self) -> String {
        let mut suffix = String::new();
        match (self.year_min, self.year_max) {
            (Some(min), Some(max)) => suffix.push_str(&format!(" {}..{}", min, max)),
            (Some(min), None) => suffix.push_str(&format!(" after:{}", min)),
            _ => {}
        }
        if self.first_edition {
            suffix.push_str(" \"First Edition\"");
        }
        if self.signed {
            suffix.push_str(" \"Signed\"");
        }
        if self.dust_jacket {
            suffix.push_str(" \"Dust Jacket\"");
        }
        if !self.keywords.is_empty() {
            suffix.push(' ');
            suffix.push_str(&self.keywords);
        }
        suffix
    }
}

/// Live market summary for one batch query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStats {
    /// Number of positively priced listings found.
    pub count: usize,
    pub min: f64,
    /// Mean price, rounded to the nearest whole unit.
    pub avg: f64,
}

impl MarketStats {
    /// Summarize fetched listings. `None` when no listing carries a
    /// positive price.
    pub fn from_listings(listings: &[Listing]) -> Option<Self> {
        let prices: Vec<f64> = listings.iter().map(|l| l.price).filter(|p| *p > 0.0).collect();
        if prices.is_empty() {
            return None;
        }
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let avg = (prices.iter().sum::<f64>() / prices.len() as f64).round();
        Some(Self {
            count: prices.len(),
            min,
            avg,
        })
    }
}

/// Validation result for one line of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// The query as entered (or as corrected, once a suggestion is applied).
    pub original: String,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<MarketStats>,
    /// Digital-copy link from the catalog match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_online: Option<String>,
    pub ebay_url: String,
    pub abebooks_url: String,
    pub google_url: String,
}

impl BatchResult {
    /// Build a result from a resolved query plus the stats of its market.
    /// `search_term` is the resolved term with the filter suffix applied.
    pub fn new(resolved: &ResolvedBook, search_term: &str, stats: Option<MarketStats>) -> Self {
        Self {
            original: resolved.query.clone(),
            verdict: resolved.verdict,
            suggestion: resolved.suggestion.clone(),
            stats,
            read_online: resolved.read_online.clone(),
            ebay_url: links::ebay_search_url(search_term),
            abebooks_url: links::abebooks_search_url(search_term),
            google_url: links::google_search_url(search_term),
        }
    }

    /// Promote the suggestion to the query. No-op when there is none,
    /// so applying twice is safe. Stale stats are dropped since they
    /// were gathered for the old term.
    pub fn apply_suggestion(&mut self) {
        if let Some(suggestion) = self.suggestion.take() {
            self.original = suggestion;
            self.verdict = Verdict::Verified;
            self.stats = None;
        }
    }
}

/// Apply every pending suggestion in a batch.
pub fn apply_all_suggestions(results: &mut [BatchResult]) {
    for result in results.iter_mut() {
        result.apply_suggestion();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_suffix() {
        let filter = BatchFilter {
            first_edition: true,
            signed: true,
            keywords: "leather bound".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.suffix(), " \"First Edition\" \"Signed\" leather bound");
        assert_eq!(BatchFilter::default().suffix(), "");
    }

    #[test]
    fn test_filter_suffix_year_range() {
        let both = BatchFilter {
            year_min: Some(1900),
            year_max: Some(1950),
            ..Default::default()
        };
        assert_eq!(both.suffix(), " 1900..1950");

        let min_only = BatchFilter {
            year_min: Some(1900),
            ..Default::default()
        };
        assert_eq!(min_only.suffix(), " after:1900");

        let max_only = BatchFilter {
            year_max: Some(1950),
            ..Default::default()
        };
        assert_eq!(max_only.suffix(), "");
    }

    #[test]
    fn test_market_stats_ignores_zero_prices() {
        let listings = vec![
            Listing::new("eBay", 0.0),
            Listing::new("eBay", 100.0),
            Listing::new("eBay", 51.0),
        ];
        let stats = MarketStats::from_listings(&listings).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, 51.0);
        assert_eq!(stats.avg, 76.0);
    }

    #[test]
    fn test_market_stats_none_without_prices() {
        assert!(MarketStats::from_listings(&[Listing::new("eBay", 0.0)]).is_none());
        assert!(MarketStats::from_listings(&[]).is_none());
    }

    #[test]
    fn test_apply_suggestion_is_idempotent() {
        let mut result = BatchResult {
            original: "moby dick".to_string(),
            verdict: Verdict::Suggestion,
            suggestion: Some("Moby Dick Herman Melville".to_string()),
            stats: Some(MarketStats {
                count: 3,
                min: 10.0,
                avg: 20.0,
            }),
            read_online: None,
            ebay_url: String::new(),
            abebooks_url: String::new(),
            google_url: String::new(),
        };

        result.apply_suggestion();
        assert_eq!(result.original, "Moby Dick Herman Melville");
        assert_eq!(result.verdict, Verdict::Verified);
        assert!(result.suggestion.is_none());
        assert!(result.stats.is_none());

        let snapshot = result.clone();
        result.apply_suggestion();
        assert_eq!(result.original, snapshot.original);
        assert_eq!(result.verdict, snapshot.verdict);
    }

    #[test]
    fn test_apply_all_leaves_verified_rows_alone() {
        let verified = BatchResult {
            original: "known title".to_string(),
            verdict: Verdict::Verified,
            suggestion: None,
            stats: Some(MarketStats {
                count: 1,
                min: 5.0,
                avg: 5.0,
            }),
            read_online: None,
            ebay_url: String::new(),
            abebooks_url: String::new(),
            google_url: String::new(),
        };
        let pending = BatchResult {
            suggestion: Some("better title".to_string()),
            verdict: Verdict::Suggestion,
            ..verified.clone()
        };

        let mut results = vec![verified, pending];
        apply_all_suggestions(&mut results);

        assert!(results[0].stats.is_some());
        assert_eq!(results[1].original, "better title");
        assert!(results[1].stats.is_none());
    }
}
