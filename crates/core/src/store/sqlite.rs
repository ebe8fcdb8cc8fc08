//! SQLite-backed watch store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::listing::{Listing, NO_LINK};

use super::{Alert, NewAlert, SavedListing, StoreError, WatchStore};

/// SQLite-backed watch store.
pub struct SqliteWatchStore {
    conn: Mutex<Connection>,
}

impl SqliteWatchStore {
    /// Create a new store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- Standing search alerts
            CREATE TABLE IF NOT EXISTS alerts (
                id TEXT PRIMARY KEY,
                keywords TEXT NOT NULL,
                max_price REAL,
                min_condition TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Wishlisted listings; identity columns are denormalized from
            -- the JSON payload so toggling can match in SQL
            CREATE TABLE IF NOT EXISTS saved_listings (
                id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                link TEXT NOT NULL,
                price REAL NOT NULL,
                source TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_saved_listings_link ON saved_listings(link);
            CREATE INDEX IF NOT EXISTS idx_saved_listings_identity ON saved_listings(price, source);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_alert(row: &rusqlite::Row) -> rusqlite::Result<Alert> {
        let created_at_str: String = row.get(4)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Alert {
            id: row.get(0)?,
            keywords: row.get(1)?,
            max_price: row.get(2)?,
            min_condition: row.get(3)?,
            created_at,
        })
    }

    fn row_to_saved(row: &rusqlite::Row) -> rusqlite::Result<(String, String, String)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    }

    fn decode_saved(
        (id, payload, saved_at_str): (String, String, String),
    ) -> Result<SavedListing, StoreError> {
        let listing: Listing = serde_json::from_str(&payload)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let saved_at = DateTime::parse_from_rfc3339(&saved_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        Ok(SavedListing {
            id,
            listing,
            saved_at,
        })
    }
}

impl WatchStore for SqliteWatchStore {
    fn add_alert(&self, alert: NewAlert) -> Result<Alert, StoreError> {
        let conn = self.conn.lock().unwrap();
        let created = Alert {
            id: Uuid::new_v4().to_string(),
            keywords: alert.keywords,
            max_price: alert.max_price,
            min_condition: alert.min_condition,
            created_at: Utc::now(),
        };

        conn.execute(
            "INSERT INTO alerts (id, keywords, max_price, min_condition, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                &created.id,
                &created.keywords,
                created.max_price,
                &created.min_condition,
                created.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(created)
    }

    fn list_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, keywords, max_price, min_condition, created_at
                 FROM alerts ORDER BY created_at DESC",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_alert)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut alerts = Vec::new();
        for row in rows {
            alerts.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(alerts)
    }

    fn delete_alert(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn
            .execute("DELETE FROM alerts WHERE id = ?", params![id])
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(deleted > 0)
    }

    fn toggle_saved(&self, listing: &Listing) -> Result<bool, StoreError> {
        if let Some(existing) = self.find_saved(listing)? {
            self.delete_saved(&existing.id)?;
            return Ok(false);
        }

        let conn = self.conn.lock().unwrap();
        let payload = serde_json::to_string(listing)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        conn.execute(
            "INSERT INTO saved_listings (id, payload, link, price, source, saved_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                Uuid::new_v4().to_string(),
                &payload,
                &listing.link,
                listing.price,
                &listing.source,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(true)
    }

    fn list_saved(&self) -> Result<Vec<SavedListing>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, payload, saved_at FROM saved_listings ORDER BY saved_at DESC")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_saved)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut saved = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| StoreError::Database(e.to_string()))?;
            saved.push(Self::decode_saved(raw)?);
        }
        Ok(saved)
    }

    fn delete_saved(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn
            .execute("DELETE FROM saved_listings WHERE id = ?", params![id])
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(deleted > 0)
    }

    fn find_saved(&self, listing: &Listing) -> Result<Option<SavedListing>, StoreError> {
        let conn = self.conn.lock().unwrap();
        // Same identity rule as in-memory dedup: a real link matches by
        // link, anything else falls back to (price, source).
        let mut stmt = conn
            .prepare(
                "SELECT id, payload, saved_at FROM saved_listings
                 WHERE (link <> ?1 AND link <> '' AND link = ?2)
                    OR (price = ?3 AND source = ?4)
                 LIMIT 1",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut rows = stmt
            .query_map(
                params![NO_LINK, &listing.link, listing.price, &listing.source],
                Self::row_to_saved,
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match rows.next() {
            Some(row) => {
                let raw = row.map_err(|e| StoreError::Database(e.to_string()))?;
                Ok(Some(Self::decode_saved(raw)?))
            }
            None => Ok(None),
        }
    }
}
