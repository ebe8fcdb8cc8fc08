//! Price analytics over a set of listings.
//!
//! Summary statistics and a fixed five-bucket histogram, computed only
//! over positive prices; a zero price means "unknown", not "free".

use serde::Serialize;

use crate::listing::Listing;

const BUCKET_COUNT: usize = 5;

/// Minimum bucket width, so a tightly clustered market still produces
/// readable ranges.
const MIN_BUCKET_STEP: f64 = 10.0;

/// One histogram bucket over the price range `[start, end)`.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBucket {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// Height normalized to the fullest bucket, in percent.
    pub height: f64,
}

impl PriceBucket {
    /// Height for display. Empty buckets still get a sliver so buyers can
    /// see the bucket exists.
    pub fn bar_height(&self) -> f64 {
        self.height.max(5.0)
    }
}

/// Market summary for one set of listings.
#[derive(Debug, Clone, Serialize)]
pub struct PriceAnalytics {
    /// Number of positively priced listings that fed the stats.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    /// Mean price, rounded to the nearest whole unit.
    pub avg: f64,
    /// Upper median: the element at index `len / 2` of the sorted prices.
    pub median: f64,
    /// Price spread relative to the average, in percent.
    pub volatility_pct: u32,
    pub buckets: Vec<PriceBucket>,
}

impl PriceAnalytics {
    /// Compute analytics for a set of listings.
    /// Returns `None` when no listing carries a positive price.
    pub fn from_listings(listings: &[Listing]) -> Option<Self> {
        let mut prices: Vec<f64> = listings.iter().map(|l| l.price).filter(|p| *p > 0.0).collect();
        if prices.is_empty() {
            return None;
        }
        prices.sort_by(|a, b| a.total_cmp(b));

        let min = prices[0];
        let max = prices[prices.len() - 1];
        let avg = (prices.iter().sum::<f64>() / prices.len() as f64).round();
        let median = prices[prices.len() / 2];

        let range = max - min;
        let volatility_pct = (range / avg * 100.0).round() as u32;

        let step = (range / BUCKET_COUNT as f64).max(MIN_BUCKET_STEP);
        let mut buckets: Vec<PriceBucket> = (0..BUCKET_COUNT)
            .map(|i| {
                let start = min + i as f64 * step;
                let end = start + step;
                let count = prices.iter().filter(|p| **p >= start && **p < end).count();
                PriceBucket {
                    start,
                    end,
                    count,
                    height: 0.0,
                }
            })
            .collect();

        let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0);
        if max_count > 0 {
            for bucket in &mut buckets {
                bucket.height = bucket.count as f64 / max_count as f64 * 100.0;
            }
        }

        Some(Self {
            count: prices.len(),
            min,
            max,
            avg,
            median,
            volatility_pct,
            buckets,
        })
    }
}
