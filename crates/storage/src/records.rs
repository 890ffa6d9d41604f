//! Record store for parsed readings, keyed by `(user_id, date)`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use usage_common::{UsageError, UsageResult};

/// Durable store for validated readings.
///
/// One write per row; each call fails independently. Duplicate keys
/// overwrite (last-write-wins). The ingestion pipeline never reads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write-or-overwrite the usage value for `(user_id, date)`.
    async fn put_reading(&self, user_id: &str, date: &str, usage: Decimal) -> UsageResult<()>;
}

/// PostgreSQL-backed record store.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Connect to the database.
    pub async fn connect(database_url: &str) -> UsageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| UsageError::DatabaseError(format!("Connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> UsageResult<()> {
        // Split SQL statements and execute them individually
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| UsageError::DatabaseError(format!("Migration failed: {}", e)))?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn put_reading(&self, user_id: &str, date: &str, usage: Decimal) -> UsageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO energy_usage (user_id, date, usage, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, date)
            DO UPDATE SET
                usage = EXCLUDED.usage,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(usage)
        .execute(&self.pool)
        .await
        .map_err(|e| UsageError::DatabaseError(format!("Insert failed: {}", e)))?;

        debug!(user_id, date, %usage, "Stored reading");
        Ok(())
    }
}

/// In-memory record store for tests.
#[derive(Default)]
pub struct MemoryRecordStore {
    readings: Mutex<HashMap<(String, String), Decimal>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored reading (test assertions).
    pub fn get(&self, user_id: &str, date: &str) -> Option<Decimal> {
        self.readings
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), date.to_string()))
            .copied()
    }

    /// Number of stored readings.
    pub fn len(&self) -> usize {
        self.readings.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put_reading(&self, user_id: &str, date: &str, usage: Decimal) -> UsageResult<()> {
        self.readings
            .lock()
            .unwrap()
            .insert((user_id.to_string(), date.to_string()), usage);
        Ok(())
    }
}

/// Database schema SQL.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS energy_usage (
    user_id VARCHAR(100) NOT NULL,
    date VARCHAR(50) NOT NULL,
    usage NUMERIC NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    PRIMARY KEY (user_id, date)
);
"#;
