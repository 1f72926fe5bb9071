use crate::config::database::DatabaseConfig;
use crate::core::{ResultSink, StatisticsResult, StoredRecord};
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use sqlx::any::install_default_drivers;
use sqlx::{AnyConnection, Connection, Row};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

const INSERT_STATISTICS: &str = "INSERT INTO Statistics (Mean, Median) VALUES (?, ?)";
const SELECT_STATISTICS: &str = "SELECT ID, Mean, Median FROM Statistics WHERE ID = ?";
const SQLITE_LAST_ROWID: &str = "SELECT last_insert_rowid()";

/// How the store finds its database.
#[derive(Clone)]
enum ConnectionTarget {
    Url(String),
    /// Settings are loaded on first use, so a broken config only fails the insert.
    Config { path: Option<PathBuf> },
}

/// Writes to the pre-existing `Statistics` table through sqlx's `Any` driver.
///
/// Each call opens its own connection and closes it before returning, on the
/// error path too. The table is never created here.
#[derive(Clone)]
pub struct SqlStatisticsStore {
    target: ConnectionTarget,
}

impl SqlStatisticsStore {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            target: ConnectionTarget::Url(url.into()),
        }
    }

    /// Reads `DatabaseConfig::load(path)` when the store is first used.
    pub fn from_config_path(path: Option<PathBuf>) -> Self {
        Self {
            target: ConnectionTarget::Config { path },
        }
    }

    fn connection_url(&self) -> Result<String> {
        match &self.target {
            ConnectionTarget::Url(url) => Ok(url.clone()),
            ConnectionTarget::Config { path } => {
                let config = DatabaseConfig::load(path.as_deref())?;
                tracing::debug!("Database config: {:?}", config);
                config.connection_url()
            }
        }
    }

    async fn connect(&self) -> Result<AnyConnection> {
        let url = self.connection_url()?;
        install_default_drivers();
        let conn = AnyConnection::connect(&url).await?;
        tracing::debug!("Opened {} connection", conn.backend_name());
        Ok(conn)
    }

    async fn close(conn: AnyConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!("Failed to close database connection: {}", e);
        }
    }

    /// Inserts one row and returns its generated key, using the same connection.
    async fn insert(conn: &mut AnyConnection, statistics: &StatisticsResult) -> Result<i64> {
        let inserted = sqlx::query(INSERT_STATISTICS)
            .bind(statistics.mean)
            .bind(statistics.median)
            .execute(&mut *conn)
            .await?;

        if let Some(id) = inserted.last_insert_id() {
            return Ok(id);
        }

        // the Any driver does not carry SQLite's rowid through
        if conn.backend_name() == "SQLite" {
            let id: i64 = sqlx::query_scalar(SQLITE_LAST_ROWID)
                .fetch_one(&mut *conn)
                .await?;
            return Ok(id);
        }

        Err(StatsError::persistence(
            "datastore did not return a generated ID",
        ))
    }

    pub async fn fetch(&self, id: i64) -> Result<Option<StoredRecord>> {
        let mut conn = self.connect().await?;
        let row = sqlx::query(SELECT_STATISTICS)
            .bind(id)
            .fetch_optional(&mut conn)
            .await;
        Self::close(conn).await;

        let Some(row) = row? else {
            return Ok(None);
        };
        Ok(Some(StoredRecord {
            id: row.try_get("ID")?,
            statistics: StatisticsResult {
                mean: row.try_get("Mean")?,
                median: row.try_get("Median")?,
            },
        }))
    }
}

impl fmt::Debug for SqlStatisticsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlStatisticsStore")
            .field("url", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ResultSink for SqlStatisticsStore {
    async fn store(&self, statistics: &StatisticsResult) -> Result<StoredRecord> {
        let mut conn = self.connect().await?;
        let inserted = Self::insert(&mut conn, statistics).await;
        Self::close(conn).await;

        let id = inserted?;

        Ok(StoredRecord {
            id,
            statistics: *statistics,
        })
    }
}

/// In-process sink; identifiers start at 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<StoredRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl ResultSink for MemoryStore {
    async fn store(&self, statistics: &StatisticsResult) -> Result<StoredRecord> {
        let mut records = self.records.lock().await;
        let record = StoredRecord {
            id: records.len() as i64 + 1,
            statistics: *statistics,
        };
        records.push(record);
        Ok(record)
    }
}
