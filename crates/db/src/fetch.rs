//! Single-object lookups converted straight into records.

use entidto_core::{model_to_entity, Adapters, ConvertError, FieldMapping, Record, StoredRow};

use crate::lookup::LookupField;
use crate::store::{ModelStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Options for [`get_by`].
#[derive(Clone, Default)]
pub struct GetBy {
    /// Return the stored row itself instead of converting it.
    pub return_raw: bool,
    /// Record field name → stored attribute name.
    pub field_mapping: Option<FieldMapping>,
    /// Adapters keyed by stored attribute name.
    pub adapters: Option<Adapters>,
}

impl GetBy {
    pub fn raw() -> Self {
        Self {
            return_raw: true,
            ..Self::default()
        }
    }

    pub fn field_mapping(mut self, mapping: FieldMapping) -> Self {
        self.field_mapping = Some(mapping);
        self
    }

    pub fn adapters(mut self, adapters: Adapters) -> Self {
        self.adapters = Some(adapters);
        self
    }
}

/// What [`get_by`] found: a converted record, or the raw stored row.
#[derive(Debug, Clone)]
pub enum Fetched<R> {
    Entity(R),
    Raw(StoredRow),
}

impl<R> Fetched<R> {
    pub fn into_entity(self) -> Option<R> {
        match self {
            Fetched::Entity(entity) => Some(entity),
            Fetched::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<StoredRow> {
        match self {
            Fetched::Raw(row) => Some(row),
            Fetched::Entity(_) => None,
        }
    }
}

/// Look up one stored object by an allow-listed field and convert it to `R`.
///
/// Returns `Ok(None)` when nothing matches. An ambiguous match is an error.
pub async fn get_by<R: Record>(
    store: &dyn ModelStore,
    field: LookupField,
    value: &str,
    options: &GetBy,
) -> Result<Option<Fetched<R>>, FetchError> {
    let Some(row) = get_raw_by(store, field, value).await? else {
        return Ok(None);
    };

    if options.return_raw {
        return Ok(Some(Fetched::Raw(row)));
    }

    let entity = model_to_entity::<R>(
        &row,
        options.field_mapping.as_ref(),
        options.adapters.as_ref(),
    )?;
    Ok(Some(Fetched::Entity(entity)))
}

/// Look up one stored object by an allow-listed field, unconverted.
pub async fn get_raw_by(
    store: &dyn ModelStore,
    field: LookupField,
    value: &str,
) -> Result<Option<StoredRow>, StoreError> {
    match store.get(field, value).await {
        Ok(row) => Ok(Some(row)),
        Err(StoreError::DoesNotExist { .. }) => {
            tracing::debug!(model = store.model_name(), field = %field, "No stored object matched");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
