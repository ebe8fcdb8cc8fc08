//! Desirability scoring and sort order.

use serde::{Deserialize, Serialize};

use super::{Condition, Listing};

/// Sort key for a listing set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortKey {
    /// Descending by recomputed score.
    #[serde(rename = "value")]
    Value,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Value
    }
}

fn condition_bonus(condition: Condition) -> f64 {
    match condition {
        Condition::Fine => 40.0,
        Condition::VeryGood => 30.0,
        Condition::Good => 15.0,
        Condition::Fair => 0.0,
        Condition::Poor => -20.0,
    }
}

/// Compute the desirability score for a listing.
///
/// `50 − price/100 + conditionBonus + 50 for a "Signed" tag − 50 for missing
/// pages`, rounded and clamped at zero. A pure function of the listing's
/// fields; the stored `score` is never an input.
pub fn calculate_score(listing: &Listing) -> u32 {
    let mut s = 50.0 - listing.price / 100.0;
    s += condition_bonus(listing.condition);
    if listing.details.iter().any(|d| d.contains("Signed")) {
        s += 50.0;
    }
    if listing.missing_pages != "None" {
        s -= 50.0;
    }
    s.round().max(0.0) as u32
}

/// Re-score every listing and sort by the given key.
///
/// Sorts are stable, so ties keep their input relative order. Scores are
/// always recomputed from scratch first, even for price sorts.
pub fn sort_listings(mut listings: Vec<Listing>, key: SortKey) -> Vec<Listing> {
    for l in listings.iter_mut() {
        l.score = calculate_score(l);
    }
    match key {
        SortKey::Value => listings.sort_by(|a, b| b.score.cmp(&a.score)),
        SortKey::PriceAsc => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
    listings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, condition: Condition) -> Listing {
        let mut l = Listing::new("Test", price);
        l.condition = condition;
        l
    }

    #[test]
    fn test_score_baseline_good() {
        // 50 - 100/100 + 15 = 64
        let l = listing(100.0, Condition::Good);
        assert_eq!(calculate_score(&l), 64);
    }

    #[test]
    fn test_score_condition_bonuses() {
        assert_eq!(calculate_score(&listing(0.0, Condition::Fine)), 90);
        assert_eq!(calculate_score(&listing(0.0, Condition::VeryGood)), 80);
        assert_eq!(calculate_score(&listing(0.0, Condition::Good)), 65);
        assert_eq!(calculate_score(&listing(0.0, Condition::Fair)), 50);
        assert_eq!(calculate_score(&listing(0.0, Condition::Poor)), 30);
    }

    #[test]
    fn test_score_signed_bonus() {
        let mut l = listing(0.0, Condition::Fair);
        l.details.push("Signed by author".to_string());
        assert_eq!(calculate_score(&l), 100);
    }

    #[test]
    fn test_score_missing_pages_penalty() {
        let mut l = listing(0.0, Condition::Fair);
        l.missing_pages = "pp. 12-14".to_string();
        assert_eq!(calculate_score(&l), 0);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        // 50 - 100 + (-20) = -70 -> 0
        let l = listing(10_000.0, Condition::Poor);
        assert_eq!(calculate_score(&l), 0);
    }

    #[test]
    fn test_score_rounding() {
        // 50 - 0.51 + 15 = 64.49 -> 64
        assert_eq!(calculate_score(&listing(51.0, Condition::Good)), 64);
        // 50 - 0.49 + 15 = 64.51 -> 65
        assert_eq!(calculate_score(&listing(49.0, Condition::Good)), 65);
    }

    #[test]
    fn test_score_is_deterministic() {
        let mut l = listing(123.45, Condition::VeryGood);
        l.details.push("Dust Jacket".to_string());
        assert_eq!(calculate_score(&l), calculate_score(&l));
    }

    #[test]
    fn test_sort_by_value_descending() {
        let listings = vec![
            listing(500.0, Condition::Poor),
            listing(10.0, Condition::Fine),
            listing(10.0, Condition::Good),
        ];
        let sorted = sort_listings(listings, SortKey::Value);
        for pair in sorted.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(sorted[0].condition, Condition::Fine);
    }

    #[test]
    fn test_sort_recomputes_stale_scores() {
        let mut cheap = listing(10.0, Condition::Fine);
        cheap.score = 1; // stale, must be ignored
        let expensive = listing(900.0, Condition::Poor);
        let sorted = sort_listings(vec![expensive, cheap], SortKey::Value);
        assert_eq!(sorted[0].condition, Condition::Fine);
        assert_eq!(sorted[0].score, calculate_score(&sorted[0]));
    }

    #[test]
    fn test_sort_price_asc_then_desc_reverses() {
        let listings = vec![
            listing(30.0, Condition::Good),
            listing(10.0, Condition::Good),
            listing(20.0, Condition::Good),
        ];
        let asc = sort_listings(listings.clone(), SortKey::PriceAsc);
        let desc = sort_listings(listings, SortKey::PriceDesc);
        let asc_prices: Vec<f64> = asc.iter().map(|l| l.price).collect();
        let mut desc_prices: Vec<f64> = desc.iter().map(|l| l.price).collect();
        desc_prices.reverse();
        assert_eq!(asc_prices, desc_prices);
        assert_eq!(asc_prices, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_sort_stable_on_ties() {
        let mut a = listing(25.0, Condition::Good);
        a.title = "first".to_string();
        let mut b = listing(25.0, Condition::Good);
        b.title = "second".to_string();
        let sorted = sort_listings(vec![a, b], SortKey::PriceAsc);
        assert_eq!(sorted[0].title, "first");
        assert_eq!(sorted[1].title, "second");
    }

    #[test]
    fn test_sort_key_serde() {
        assert_eq!(
            serde_json::to_string(&SortKey::PriceAsc).unwrap(),
            "\"price-asc\""
        );
        let parsed: SortKey = serde_json::from_str("\"value\"").unwrap();
        assert_eq!(parsed, SortKey::Value);
    }
}
