use async_trait::async_trait;
use entidto_core::{ConvertError, StoredRow};
use serde_json::Value;

use crate::lookup::LookupField;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{model} matching {field}={value} does not exist")]
    DoesNotExist {
        model: String,
        field: LookupField,
        value: String,
    },

    #[error("get() returned more than one {model} for {field}={value}")]
    MultipleObjects {
        model: String,
        field: LookupField,
        value: String,
    },

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("Invalid row: {0}")]
    Row(#[from] ConvertError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Query interface over one kind of stored object.
#[async_trait]
pub trait ModelStore: Send + Sync {
    fn model_name(&self) -> &str;

    /// Fetch exactly one object whose `field` equals `value`.
    ///
    /// Fails with [`StoreError::DoesNotExist`] when nothing matches and
    /// [`StoreError::MultipleObjects`] when the match is ambiguous.
    async fn get(&self, field: LookupField, value: &str) -> Result<StoredRow, StoreError>;
}

/// Reduce a candidate list to the single expected match.
pub(crate) fn exactly_one(
    model: &str,
    field: LookupField,
    value: &str,
    mut rows: Vec<StoredRow>,
) -> Result<StoredRow, StoreError> {
    match rows.len() {
        0 => Err(StoreError::DoesNotExist {
            model: model.to_string(),
            field,
            value: value.to_string(),
        }),
        1 => Ok(rows.remove(0)),
        _ => Err(StoreError::MultipleObjects {
            model: model.to_string(),
            field,
            value: value.to_string(),
        }),
    }
}

/// Whether a stored column value matches a lookup value given as text.
pub(crate) fn matches_text(column: &Value, value: &str) -> bool {
    match column {
        Value::String(s) => s == value,
        Value::Number(n) => n.to_string() == value,
        Value::Bool(b) => b.to_string() == value,
        _ => false,
    }
}
