//! Postgres-backed model store.
//!
//! Rows are read as `row_to_json` documents, so any table can back a store
//! without a compile-time row type.

use async_trait::async_trait;
use entidto_core::StoredRow;
use serde_json::Value;

use crate::lookup::LookupField;
use crate::store::{exactly_one, ModelStore, StoreError};
use crate::DbPool;

/// Looks up rows of one table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
    table: String,
    model: String,
}

impl PgStore {
    /// `table` may be schema-qualified (`auth.users`).
    pub fn new(
        pool: DbPool,
        table: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let table = table.into();
        validate_table(&table)?;
        Ok(Self {
            pool,
            table,
            model: model.into(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl ModelStore for PgStore {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn get(&self, field: LookupField, value: &str) -> Result<StoredRow, StoreError> {
        let query = select_by(&self.table, field);
        // Two rows are enough to tell "exactly one" from "ambiguous".
        let documents: Vec<Value> = sqlx::query_scalar::<_, Value>(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            table = %self.table,
            field = %field,
            matched = documents.len(),
            "Looked up stored object"
        );

        let rows = documents
            .into_iter()
            .map(|document| StoredRow::from_json(self.model.clone(), document))
            .collect::<Result<Vec<_>, _>>()?;
        exactly_one(&self.model, field, value, rows)
    }
}

fn select_by(table: &str, field: LookupField) -> String {
    format!(
        "SELECT row_to_json(t)::jsonb FROM {table} AS t WHERE t.{column}::text = $1 LIMIT 2",
        column = field.as_str()
    )
}

/// Accept `name` or `schema.name`, each part a plain SQL identifier.
fn validate_table(table: &str) -> Result<(), StoreError> {
    let parts: Vec<&str> = table.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}
