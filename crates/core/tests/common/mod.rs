//! Record and transfer object types shared by the converter tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use entidto_core::{Coerce, Field, Record, Schema, TransferObject};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonEntity {
    pub first_name: String,
    pub age: i64,
}

impl Schema for PersonEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[Field::required("first_name"), Field::required("age")];
        FIELDS
    }
}

impl Record for PersonEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonDto {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(range(min = 0))]
    pub age: i64,
}

impl Schema for PersonDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::required("age").coerce(Coerce::Integer),
        ];
        FIELDS
    }
}

impl TransferObject for PersonDto {}

// ---------------------------------------------------------------------------
// Person with a nested gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderEntity {
    pub gender: Gender,
}

impl Schema for GenderEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[Field::required("gender")];
        FIELDS
    }
}

impl Record for GenderEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GenderDto {
    pub gender: Gender,
}

impl Schema for GenderDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[Field::required("gender")];
        FIELDS
    }
}

impl TransferObject for GenderDto {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonWithGenderEntity {
    pub first_name: String,
    pub age: i64,
    pub gender: GenderEntity,
}

impl Schema for PersonWithGenderEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::required("age"),
            Field::required("gender"),
        ];
        FIELDS
    }
}

impl Record for PersonWithGenderEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonWithGenderDto {
    pub first_name: String,
    pub age: i64,
    #[validate(nested)]
    pub gender: GenderDto,
}

impl Schema for PersonWithGenderDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::required("age"),
            Field::required("gender").nested::<GenderDto>(),
        ];
        FIELDS
    }
}

impl TransferObject for PersonWithGenderDto {}

// ---------------------------------------------------------------------------
// Nested defaults on both sides
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEntity {
    pub code: String,
    pub label: String,
}

impl Schema for LabelEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("code"),
            Field::with_default("label", || json!("record-default")),
        ];
        FIELDS
    }
}

impl Record for LabelEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LabelDto {
    pub code: String,
    pub label: String,
}

impl Schema for LabelDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("code"),
            Field::with_default("label", || json!("dto-default")),
        ];
        FIELDS
    }
}

impl TransferObject for LabelDto {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEntity {
    pub name: String,
    pub tag: LabelEntity,
}

impl Schema for TaggedEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[Field::required("name"), Field::required("tag")];
        FIELDS
    }
}

impl Record for TaggedEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaggedDto {
    pub name: String,
    #[validate(nested)]
    pub tag: LabelDto,
}

impl Schema for TaggedDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("name"),
            Field::required("tag").nested::<LabelDto>(),
        ];
        FIELDS
    }
}

impl TransferObject for TaggedDto {}

// ---------------------------------------------------------------------------
// Optional fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonWithOptionalEntity {
    pub first_name: String,
    pub age: Option<i64>,
    pub email: Option<String>,
}

impl Schema for PersonWithOptionalEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::optional("age"),
            Field::optional("email"),
        ];
        FIELDS
    }
}

impl Record for PersonWithOptionalEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonWithOptionalDto {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i64>,
    #[validate(email)]
    pub email: Option<String>,
}

impl Schema for PersonWithOptionalDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::optional("age").coerce(Coerce::Integer),
            Field::optional("email"),
        ];
        FIELDS
    }
}

impl TransferObject for PersonWithOptionalDto {}

/// Record whose defaults are not null, to show they apply when a field is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntity {
    pub first_name: String,
    pub age: i64,
    pub email: String,
}

fn default_age() -> Value {
    json!(18)
}

fn default_email() -> Value {
    json!("unknown@example.com")
}

impl Schema for ProfileEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::with_default("age", default_age),
            Field::with_default("email", default_email),
        ];
        FIELDS
    }
}

impl Record for ProfileEntity {}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonWithComplexFieldsEntity {
    pub first_name: String,
    pub hobbies: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

impl Schema for PersonWithComplexFieldsEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::required("hobbies"),
            Field::required("metadata"),
        ];
        FIELDS
    }
}

impl Record for PersonWithComplexFieldsEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonWithComplexFieldsDto {
    pub first_name: String,
    pub hobbies: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

impl Schema for PersonWithComplexFieldsDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("first_name"),
            Field::required("hobbies"),
            Field::required("metadata"),
        ];
        FIELDS
    }
}

impl TransferObject for PersonWithComplexFieldsDto {}

// ---------------------------------------------------------------------------
// Stored-model shaped records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategoryEntity {
    pub id: i64,
    pub title: String,
}

impl Schema for ServiceCategoryEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[Field::required("id"), Field::required("title")];
        FIELDS
    }
}

impl Record for ServiceCategoryEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalEntity {
    pub id: i64,
    pub display_name: String,
    pub categories: Vec<ServiceCategoryEntity>,
}

impl Schema for ProfessionalEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("id"),
            Field::required("display_name"),
            Field::required("categories"),
        ];
        FIELDS
    }
}

impl Record for ProfessionalEntity {}

/// A type that serializes as a bare string, so it is not a plain record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotARecord(pub String);

impl Schema for NotARecord {
    fn fields() -> &'static [Field] {
        &[]
    }
}

impl Record for NotARecord {}

/// Unwrap a JSON object literal.
pub fn fields(value: Value) -> entidto_core::Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}
