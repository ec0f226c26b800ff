//! Merging an update record over a base record.

mod common;

use assert_matches::assert_matches;
use common::*;
use entidto_core::{update_entity, ConvertError};

#[test]
fn non_null_fields_override_and_null_fields_keep_base() {
    let base = PersonWithOptionalEntity {
        first_name: "John".to_string(),
        age: Some(25),
        email: Some("john@example.com".to_string()),
    };
    let update = PersonWithOptionalEntity {
        first_name: "Jane".to_string(),
        age: Some(30),
        email: None,
    };

    let result = update_entity(&base, &update).unwrap();

    assert_eq!(result.first_name, "Jane");
    assert_eq!(result.age, Some(30));
    assert_eq!(result.email.as_deref(), Some("john@example.com"));
}

#[test]
fn none_values_are_ignored() {
    let base = PersonWithOptionalEntity {
        first_name: "John".to_string(),
        age: Some(25),
        email: None,
    };
    let update = PersonWithOptionalEntity {
        first_name: "Jane".to_string(),
        age: None,
        email: None,
    };

    let result = update_entity(&base, &update).unwrap();

    assert_eq!(result.first_name, "Jane");
    assert_eq!(result.age, Some(25));
    assert_eq!(result.email, None);
}

#[test]
fn base_is_left_untouched() {
    let base = PersonEntity {
        first_name: "John".to_string(),
        age: 25,
    };
    let update = PersonEntity {
        first_name: "Jane".to_string(),
        age: 30,
    };

    let result = update_entity(&base, &update).unwrap();

    assert_eq!(result, update);
    assert_eq!(base.first_name, "John");
}

#[test]
fn non_record_is_a_type_error() {
    let result = update_entity(
        &NotARecord("not a record".into()),
        &NotARecord("other".into()),
    );
    assert_matches!(result, Err(ConvertError::Type(_)));
}
