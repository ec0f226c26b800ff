//! Field-by-field mapping between web requests, validated transfer objects,
//! immutable record entities and stored model instances.

pub mod converters;
pub mod dto;
pub mod error;
pub mod record;
pub mod request;
pub mod schema;
pub mod stored;

pub use converters::{
    dto_to_entities, dto_to_entity, entity_to_dto, entity_to_dtos, m2m_to_entities,
    model_to_entity, request_to_dto, update_entity, FieldMap, Nested,
};
pub use dto::{Dto, DtoConfig, DumpOptions, Extra, Revalidate, TransferObject, BASE_DTO};
pub use error::{ConvertError, FieldIssue, IssueKind, ValidationError};
pub use record::Record;
pub use request::RequestData;
pub use schema::{Coerce, Field, FieldDefault, Fields, Schema};
pub use stored::{
    adapter, value_adapter, Adapter, Adapters, Attribute, FieldMapping, Related, StoredObject,
    StoredRow,
};
