// Record storage behind the REST endpoint
use async_trait::async_trait;
use shared::models::{CampaignRecord, StoredRecord};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::EngineError;

/// Create and list-all. Identifiers are assigned by the store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records in identifier order.
    async fn list(&self) -> Result<Vec<StoredRecord>, EngineError>;

    async fn create(&self, record: CampaignRecord) -> Result<StoredRecord, EngineError>;
}

pub struct InMemoryRecordStore {
    records: RwLock<Vec<StoredRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        InMemoryRecordStore {
            records: RwLock::new(Vec::new()),
        }
    }

    /// A store pre-filled with `seed`, numbered from 1.
    pub fn with_records(seed: Vec<CampaignRecord>) -> Self {
        let records = seed
            .into_iter()
            .zip(1..)
            .map(|(record, id)| StoredRecord { id, record })
            .collect();
        InMemoryRecordStore {
            records: RwLock::new(records),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self) -> Result<Vec<StoredRecord>, EngineError> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, record: CampaignRecord) -> Result<StoredRecord, EngineError> {
        let mut records = self.records.write().await;
        let id = records.last().map_or(1, |r| r.id + 1);
        let stored = StoredRecord { id, record };
        records.push(stored.clone());
        Ok(stored)
    }
}

/// Records kept in the `ad_advertisement` table.
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

type AdRow = (i64, String, f64, i64, i64);

impl SqliteRecordStore {
    /// Connects to `url` (e.g. `sqlite://ads.db?mode=rwc` or `sqlite::memory:`)
    /// and creates the table when it does not exist yet.
    pub async fn connect(url: &str) -> Result<Self, EngineError> {
        let mut options = SqlitePoolOptions::new().max_connections(5);
        if url.contains(":memory:") {
            // An in-memory database lives and dies with its connection.
            options = options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }
        let pool = options.connect(url).await?;
        let store = SqliteRecordStore { pool };
        store.migrate().await?;
        tracing::info!(url = %url, "Connected SQLite record store");
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), EngineError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS ad_advertisement (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                cost REAL NOT NULL,
                lead_count INTEGER NOT NULL,
                message_count INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn from_row((id, date, cost, lead_count, message_count): AdRow) -> StoredRecord {
        StoredRecord {
            id,
            record: CampaignRecord {
                date,
                cost,
                lead_count: u32::try_from(lead_count).unwrap_or(0),
                message_count: u32::try_from(message_count).unwrap_or(0),
            },
        }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn list(&self) -> Result<Vec<StoredRecord>, EngineError> {
        let rows: Vec<AdRow> = sqlx::query_as(
            "SELECT id, date, cost, lead_count, message_count FROM ad_advertisement ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Self::from_row).collect())
    }

    async fn create(&self, record: CampaignRecord) -> Result<StoredRecord, EngineError> {
        let result = sqlx::query(
            "INSERT INTO ad_advertisement (date, cost, lead_count, message_count) VALUES (?, ?, ?, ?)",
        )
        .bind(record.date.as_str())
        .bind(record.cost)
        .bind(i64::from(record.lead_count))
        .bind(i64::from(record.message_count))
        .execute(&self.pool)
        .await?;
        Ok(StoredRecord {
            id: result.last_insert_rowid(),
            record,
        })
    }
}
