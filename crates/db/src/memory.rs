//! In-memory model store, used by tests and the demo server.

use async_trait::async_trait;
use entidto_core::StoredRow;
use tokio::sync::RwLock;

use crate::lookup::LookupField;
use crate::store::{exactly_one, matches_text, ModelStore, StoreError};

/// Holds the rows of one model in insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    model: String,
    rows: RwLock<Vec<StoredRow>>,
}

impl MemoryStore {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            rows: RwLock::new(Vec::new()),
        }
    }

    pub fn with_rows(model: impl Into<String>, rows: Vec<StoredRow>) -> Self {
        Self {
            model: model.into(),
            rows: RwLock::new(rows),
        }
    }

    pub async fn insert(&self, row: StoredRow) {
        self.rows.write().await.push(row);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ModelStore for MemoryStore {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn get(&self, field: LookupField, value: &str) -> Result<StoredRow, StoreError> {
        let candidates: Vec<StoredRow> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| {
                row.column(field.as_str())
                    .is_some_and(|column| matches_text(column, value))
            })
            .take(2)
            .cloned()
            .collect();

        exactly_one(&self.model, field, value, candidates)
    }
}
