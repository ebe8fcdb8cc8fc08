//! Synthetic listing generator.
//!
//! When every live source comes back empty the UI still needs a market to
//! show. Listings generated here are priced around a random base so they
//! cluster like a real market would, and every one is tagged so it can
//! never be mistaken for a live result.

use rand::Rng;

use crate::links;
use crate::listing::{Condition, Listing};
use crate::resolver::CatalogRecord;

/// Number of listings a synthetic market contains.
pub const SIMULATED_COUNT: usize = 12;

/// Detail tag carried by every synthetic listing.
pub const SIMULATED_TAG: &str = "Simulated Result";

const SOURCES: [&str; 4] = ["AbeBooks", "Biblio", "Sothebys", "Local Estate"];

/// Generate a synthetic market for a resolved book.
///
/// Prices spread from 80% to 130% of a base drawn from 50..250, so the
/// analytics panels have a believable distribution to chew on.
pub fn synthetic_listings<R: Rng>(record: &CatalogRecord, rng: &mut R) -> Vec<Listing> {
    let author = record.author_label();
    let base_price = rng.gen_range(50..250) as f64;

    (0..SIMULATED_COUNT)
        .map(|_| {
            let source = SOURCES[rng.gen_range(0..SOURCES.len())];
            let price = (base_price * (1.0 + (rng.gen::<f64>() * 0.5 - 0.2))).floor();
            let condition = Condition::all()[rng.gen_range(0..Condition::all().len())];

            let mut listing = Listing::new(source, price);
            listing.title = record.title.clone();
            listing.condition = condition;
            listing.details = vec![SIMULATED_TAG.to_string()];
            listing.seller_rating = 4.5;
            listing.link = links::market_search_url(source, &record.title, &author);
            listing.author = author.clone();
            listing.year = record.year.clone();
            listing.publisher = record.publisher.clone();
            listing
        })
        .collect()
}
