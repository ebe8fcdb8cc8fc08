pub mod aggregator;
pub mod analytics;
pub mod batch;
pub mod config;
pub mod insight;
pub mod links;
pub mod listing;
pub mod metrics;
pub mod resolver;
pub mod sources;
pub mod store;
pub mod testing;

pub use aggregator::{Aggregator, SearchOutcome};
pub use analytics::PriceAnalytics;
pub use batch::{BatchFilter, BatchPipeline, BatchResult, MarketStats};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use insight::{InsightClient, InsightError};
pub use listing::{Condition, Listing, SortKey};
pub use resolver::{BookCatalog, CatalogRecord, ResolvedBook, ResolverError, Verdict};
pub use sources::{ListingSource, SourceError};
pub use store::{Alert, NewAlert, SavedListing, StoreError, WatchStore};
