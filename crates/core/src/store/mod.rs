//! Persistent store for alerts and the wishlist.
//!
//! Single-user by design: the store backs one collector's watch state,
//! not a multi-tenant service.

mod sqlite;

pub use sqlite::SqliteWatchStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::Listing;

/// Errors that can occur in the watch store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Stored payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A standing search alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub keywords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Condition label, or "Any".
    pub min_condition: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create an alert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlert {
    pub keywords: String,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default = "default_min_condition")]
    pub min_condition: String,
}

fn default_min_condition() -> String {
    "Any".to_string()
}

/// A wishlisted listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedListing {
    pub id: String,
    pub listing: Listing,
    pub saved_at: DateTime<Utc>,
}

/// Trait for the alert and wishlist store.
///
/// Wishlist membership uses listing identity, not an id: the same offer
/// seen in two searches toggles the same saved row.
pub trait WatchStore: Send + Sync {
    fn add_alert(&self, alert: NewAlert) -> Result<Alert, StoreError>;
    fn list_alerts(&self) -> Result<Vec<Alert>, StoreError>;
    /// Returns false when the alert did not exist.
    fn delete_alert(&self, id: &str) -> Result<bool, StoreError>;

    /// Save the listing if it is not on the wishlist, remove it if it is.
    /// Returns true when the listing is saved after the call.
    fn toggle_saved(&self, listing: &Listing) -> Result<bool, StoreError>;
    fn list_saved(&self) -> Result<Vec<SavedListing>, StoreError>;
    /// Returns false when the saved listing did not exist.
    fn delete_saved(&self, id: &str) -> Result<bool, StoreError>;
    /// Find a saved listing matching this one's identity.
    fn find_saved(&self, listing: &Listing) -> Result<Option<SavedListing>, StoreError>;
}
