//! Stored-object lookup: the allow-listed key fields, the `ModelStore`
//! abstraction with in-memory and Postgres implementations, and the
//! fetch-by-field converters built on top of them.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod fetch;
pub mod lookup;
pub mod memory;
pub mod pg;
pub mod store;

pub use config::DbConfig;
pub use fetch::{get_by, get_raw_by, FetchError, Fetched, GetBy};
pub use lookup::{LookupField, UnknownLookupField};
pub use memory::MemoryStore;
pub use pg::PgStore;
pub use store::{ModelStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the database configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}
