//! Marketplace listing model, scoring and ranking.
//!
//! A `Listing` is one offer from one source (live adapter, synthetic
//! generator, manual entry). Scores are derived values: they are recomputed
//! on every sort and never trusted as cached state.

mod score;
mod types;

pub use score::{calculate_score, sort_listings, SortKey};
pub use types::{map_condition, same_listing, Condition, Listing, NO_LINK};
