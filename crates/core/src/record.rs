//! Plain immutable record entities.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ConvertError;
use crate::schema::{fill_defaults, undeclared, Fields, Schema};

/// An attribute-only domain value object.
///
/// Records are never mutated in place: [`Record::replace`] produces a copy.
/// The default methods give keyword construction, attribute dump, and field
/// replacement on top of the type's [`Schema`] and serde implementations.
pub trait Record: Schema + Serialize + DeserializeOwned {
    /// Dump every declared attribute into a field map.
    fn to_fields(&self) -> Result<Fields, ConvertError> {
        attributes_of(self, Self::type_name())
    }

    /// Construct from a field map, filling absent fields from their defaults.
    fn from_fields(mut fields: Fields) -> Result<Self, ConvertError> {
        let unknown = undeclared::<Self>(&fields);
        if let Some(name) = unknown.first() {
            return Err(ConvertError::Type(format!(
                "{} got an unexpected field '{name}'",
                Self::type_name()
            )));
        }

        let missing = fill_defaults::<Self>(&mut fields);
        if !missing.is_empty() {
            return Err(ConvertError::Type(format!(
                "{} missing required field(s): {}",
                Self::type_name(),
                missing.join(", ")
            )));
        }

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ConvertError::Type(format!("cannot build {}: {e}", Self::type_name()))
        })
    }

    /// A copy of `self` with the fields in `patch` replaced.
    fn replace(&self, patch: Fields) -> Result<Self, ConvertError> {
        let mut fields = self.to_fields()?;
        for (name, value) in patch {
            if !Self::has_field(&name) {
                return Err(ConvertError::Type(format!(
                    "{} has no field '{name}' to replace",
                    Self::type_name()
                )));
            }
            fields.insert(name, value);
        }
        Self::from_fields(fields)
    }
}

/// Serialize `value` and require the result to be a field map.
///
/// Anything that serializes to a scalar or a sequence is not a record.
pub(crate) fn attributes_of<T: Serialize + ?Sized>(
    value: &T,
    type_name: &str,
) -> Result<Fields, ConvertError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(ConvertError::Type(format!(
            "expected a record instance for {type_name}, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(ConvertError::Type(format!(
            "cannot read attributes of {type_name}: {e}"
        ))),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
