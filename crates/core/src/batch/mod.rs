//! Batch validation of question-mark inventories.
//!
//! A dealer pastes one query per line; each line is resolved against the
//! catalog, corrected where the catalog knows better, and optionally
//! priced against the live market. Results export to CSV.

mod export;
mod pipeline;
mod types;

pub use export::{export_filename, to_csv};
pub use pipeline::BatchPipeline;
pub use types::{apply_all_suggestions, BatchFilter, BatchResult, MarketStats};
