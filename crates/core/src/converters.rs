//! Conversions between requests, transfer objects, records and stored models.
//!
//! Every function here is a synchronous, stateless transformation. Errors are
//! returned to the caller untouched; a missing object is never an error at
//! this layer.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::dto::{Dto, DumpOptions, Revalidate, TransferObject};
use crate::error::{ConvertError, ValidationError};
use crate::record::{kind_of, Record};
use crate::request::RequestData;
use crate::schema::Fields;
use crate::stored::{Adapter, Adapters, Attribute, FieldMapping, StoredObject};

/// Target record type for one nested field in [`dto_to_entity`].
#[derive(Debug, Clone, Copy)]
pub struct Nested {
    type_name: &'static str,
    convert: fn(Fields) -> Result<Value, ConvertError>,
}

impl Nested {
    pub fn record<R: Record>() -> Self {
        Self {
            type_name: R::type_name(),
            convert: convert_nested::<R>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

fn convert_nested<R: Record>(fields: Fields) -> Result<Value, ConvertError> {
    let entity = R::from_fields(fields)?;
    entity.to_fields().map(Value::Object)
}

/// Transfer object field name → nested record type.
pub type FieldMap = HashMap<String, Nested>;

/// Build a validated transfer object from a request.
///
/// Reads the body when it is non-empty, otherwise the query parameters. Only
/// fields declared on `T` are picked up; absent ones are passed as `null`.
pub fn request_to_dto<T: TransferObject>(request: &RequestData) -> Result<Dto<T>, ValidationError> {
    let source = request.source();
    let fields: Fields = T::fields()
        .iter()
        .map(|field| {
            let value = source.get(field.name).cloned().unwrap_or(Value::Null);
            (field.name.to_string(), value)
        })
        .collect();

    tracing::debug!(
        dto = T::type_name(),
        from_body = !request.data.is_empty(),
        "Building transfer object from request"
    );
    Dto::validate(fields)
}

/// Copy a record into a validated transfer object.
pub fn entity_to_dto<R: Record, T: TransferObject>(entity: &R) -> Result<Dto<T>, ConvertError> {
    Dto::from_attributes(entity)
}

/// [`entity_to_dto`] over a slice, preserving order.
pub fn entity_to_dtos<R: Record, T: TransferObject>(
    entities: &[R],
) -> Result<Vec<Dto<T>>, ConvertError> {
    tracing::trace!(count = entities.len(), dto = T::type_name(), "Converting entities");
    entities.iter().map(entity_to_dto::<R, T>).collect()
}

/// Build a record from the explicitly set, non-null fields of a transfer object.
///
/// Fields left out fall back to `R`'s declared defaults. Each `field_map`
/// entry converts that field into the given nested record type first.
pub fn dto_to_entity<T: TransferObject, R: Record>(
    dto: &Dto<T>,
    field_map: Option<&FieldMap>,
) -> Result<R, ConvertError> {
    let fresh = revalidated(dto)?;
    let dto = fresh.as_ref().unwrap_or(dto);

    let mut data = dto.dump(DumpOptions::EXPLICIT);

    for (field, nested) in field_map.into_iter().flatten() {
        let Some(value) = data.remove(field) else {
            continue;
        };
        let converted = match value {
            Value::Object(sub) => (nested.convert)(sub)?,
            other => {
                return Err(ConvertError::Type(format!(
                    "field `{field}` is not a valid nested transfer object, got {} (target {})",
                    kind_of(&other),
                    nested.type_name
                )))
            }
        };
        data.insert(field.clone(), converted);
    }

    R::from_fields(data)
}

/// Build one record per transfer object from the full dump of each.
///
/// Unlike [`dto_to_entity`], unset and null fields are copied as well.
pub fn dto_to_entities<T: TransferObject, R: Record>(
    dtos: &[Dto<T>],
) -> Result<Vec<R>, ConvertError> {
    tracing::trace!(count = dtos.len(), entity = R::type_name(), "Converting transfer objects");
    dtos.iter()
        .map(|dto| {
            let fresh = revalidated(dto)?;
            let dto = fresh.as_ref().unwrap_or(dto);
            R::from_fields(dto.dump(DumpOptions::ALL))
        })
        .collect()
}

/// A copy of `base` with every non-null field of `update` laid over it.
pub fn update_entity<R: Record>(base: &R, update: &R) -> Result<R, ConvertError> {
    let patch: Fields = update
        .to_fields()?
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect();
    base.replace(patch)
}

/// Build a record from a stored model instance.
///
/// `field_mapping` renames record fields to stored attribute names.
/// `adapters` are looked up by the resolved *stored* attribute name.
pub fn model_to_entity<R: Record>(
    model: &dyn StoredObject,
    field_mapping: Option<&FieldMapping>,
    adapters: Option<&Adapters>,
) -> Result<R, ConvertError> {
    model.check()?;

    let mut fields = Fields::new();
    for field in R::fields() {
        let source = field_mapping
            .and_then(|mapping| mapping.get(field.name))
            .map(String::as_str)
            .unwrap_or(field.name);

        let attribute = model
            .attribute(source)
            .ok_or_else(|| ConvertError::UnknownAttribute {
                model: model.model_name().to_string(),
                attribute: source.to_string(),
            })?;

        let value = match adapters.and_then(|adapters| adapters.get(source)) {
            Some(adapter) => adapter(attribute)?,
            None => attribute.into_value(source)?,
        };
        fields.insert(field.name.to_string(), value);
    }

    tracing::trace!(
        model = model.model_name(),
        entity = R::type_name(),
        "Converted model to entity"
    );
    R::from_fields(fields)
}

/// An adapter turning a related collection into a list of `R` records.
///
/// Meant to be registered in the `adapters` of [`model_to_entity`]; `remap`
/// and `field_map` are forwarded as its field mapping and adapters.
pub fn m2m_to_entities<R: Record + 'static>(
    remap: Option<FieldMapping>,
    field_map: Option<Adapters>,
) -> Adapter {
    Arc::new(move |attribute: Attribute| {
        let related = match attribute {
            Attribute::Related(related) => related,
            Attribute::Value(other) => {
                return Err(ConvertError::Type(format!(
                    "{} list expects a related collection, got {}",
                    R::type_name(),
                    kind_of(&other)
                )))
            }
        };

        related
            .all()
            .map(|object| {
                let entity: R = model_to_entity(object, remap.as_ref(), field_map.as_ref())?;
                entity.to_fields().map(Value::Object)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    })
}

fn revalidated<T: TransferObject>(dto: &Dto<T>) -> Result<Option<Dto<T>>, ValidationError> {
    match T::CONFIG.revalidate_instances {
        Revalidate::Always => dto.revalidate().map(Some),
        Revalidate::Never => Ok(None),
    }
}
