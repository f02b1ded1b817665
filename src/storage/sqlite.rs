//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteOrderStore`, an [`OrderStore`] backed by a single
//! `orders` table.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag:
//! ```toml
//! [dependencies]
//! honeybee = { version = "0.1", features = ["sqlite"] }
//! ```

use crate::core::error::StoreError;
use crate::core::order::{Fulfillment, NewOrder, Order};
use crate::core::service::OrderStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::str::FromStr;
use uuid::Uuid;

const BACKEND: &str = "SQLite";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    choice      TEXT NOT NULL CHECK (choice IN ('P', 'D')),
    date_needed TEXT NOT NULL,
    details     TEXT NOT NULL,
    created     TEXT NOT NULL
)
"#;

// `created` is fixed-width RFC 3339, so text comparison is chronological.
// Clamping to the latest stored value keeps it non-decreasing in insertion order.
const INSERT_ORDER: &str = r#"
INSERT INTO orders (id, name, email, phone, choice, date_needed, details, created)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7,
        MAX(?8, COALESCE((SELECT MAX(created) FROM orders), ?8)))
RETURNING created
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, name, email, phone, choice, date_needed, details, created FROM orders";

/// Order store backed by SQLite
#[derive(Clone, Debug)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    /// Create a store over an existing pool. Call [`migrate`](Self::migrate) before use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a `sqlite:` URL, creating the database file and table if needed
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(connection_error)?
            .create_if_missing(true);

        // Every connection to `:memory:` is its own database, so keep exactly one alive.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(connection_error)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Create the `orders` table if it does not exist
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| operation_error("migrate", e))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn connection_error(e: sqlx::Error) -> StoreError {
    StoreError::Connection {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
}

fn operation_error(operation: &str, e: sqlx::Error) -> StoreError {
    StoreError::OperationFailed {
        operation: operation.to_string(),
        message: e.to_string(),
    }
}

fn corrupt(column: &str, value: &str) -> StoreError {
    StoreError::Corrupt {
        message: format!("column '{}' holds '{}'", column, value),
    }
}

fn format_created(created: DateTime<Utc>) -> String {
    created.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_created(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupt("created", value))
}

fn order_from_row(row: &SqliteRow) -> Result<Order, StoreError> {
    let text = |column: &str| -> Result<String, StoreError> {
        row.try_get::<String, _>(column)
            .map_err(|e| operation_error("decode", e))
    };

    let id = text("id")?;
    let choice = text("choice")?;
    let date_needed = text("date_needed")?;
    let created = text("created")?;

    Ok(Order {
        id: Uuid::parse_str(&id).map_err(|_| corrupt("id", &id))?,
        name: text("name")?,
        email: text("email")?,
        phone: text("phone")?,
        choice: Fulfillment::from_code(&choice).ok_or_else(|| corrupt("choice", &choice))?,
        date_needed: NaiveDate::parse_from_str(&date_needed, "%Y-%m-%d")
            .map_err(|_| corrupt("date_needed", &date_needed))?,
        details: text("details")?,
        created: parse_created(&created)?,
    })
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let id = Uuid::new_v4();

        let row = sqlx::query(INSERT_ORDER)
            .bind(id.to_string())
            .bind(&order.name)
            .bind(&order.email)
            .bind(&order.phone)
            .bind(order.choice.code())
            .bind(order.date_needed.format("%Y-%m-%d").to_string())
            .bind(&order.details)
            .bind(format_created(Utc::now()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| operation_error("create", e))?;

        let created: String = row
            .try_get("created")
            .map_err(|e| operation_error("create", e))?;

        Ok(Order::from_new(order, id, parse_created(&created)?))
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| operation_error("get", e))?;

        row.as_ref().map(order_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(&format!("{} ORDER BY seq", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| operation_error("list", e))?;

        rows.iter().map(order_from_row).collect()
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| operation_error("count", e))?;

        Ok(count as usize)
    }
}
