//! Explicit field descriptions for record and transfer object types.
//!
//! Types list their fields once through [`Schema::fields`]; converters use
//! that list to know which names to copy, which are required, and what a
//! missing field falls back to.
//!
//! ```ignore
//! impl Schema for PersonEntity {
//!     fn fields() -> &'static [Field] {
//!         const FIELDS: &[Field] = &[
//!             Field::required("first_name"),
//!             Field::optional("age").coerce(Coerce::Integer),
//!             Field::optional("email"),
//!         ];
//!         FIELDS
//!     }
//! }
//! ```

use std::fmt;

use serde_json::Value;

use crate::dto::Prepared;

/// A field-name → value map, the common currency of every conversion.
pub type Fields = serde_json::Map<String, Value>;

/// What a field falls back to when it is not supplied.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    /// No fallback: the field must be supplied.
    Required,
    /// Falls back to `null`.
    Null,
    /// Falls back to the value built by the function.
    Value(fn() -> Value),
}

/// Lax coercion applied to string inputs (e.g. query parameters) before
/// deserialization, unless the transfer type is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerce {
    Integer,
    Float,
    Boolean,
}

impl Coerce {
    /// Convert `raw` to the target kind, or `None` if it does not parse.
    pub fn apply(&self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match self {
            Coerce::Integer => raw.parse::<i64>().ok().map(Value::from),
            Coerce::Float => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            Coerce::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

/// The transfer object type held by a nested field.
///
/// Built with [`Field::nested`]; the nested input is checked under that
/// type's own configuration.
#[derive(Clone, Copy)]
pub struct NestedSchema {
    pub(crate) type_name: fn() -> &'static str,
    pub(crate) fields: fn() -> &'static [Field],
    pub(crate) prepare: fn(Fields, &str) -> Prepared,
}

impl NestedSchema {
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }
}

impl fmt::Debug for NestedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedSchema").field(&self.type_name()).finish()
    }
}

/// Description of one declared field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub default: FieldDefault,
    pub coerce: Option<Coerce>,
    pub nested: Option<NestedSchema>,
}

impl Field {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            default: FieldDefault::Required,
            coerce: None,
            nested: None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            default: FieldDefault::Null,
            coerce: None,
            nested: None,
        }
    }

    pub const fn with_default(name: &'static str, default: fn() -> Value) -> Self {
        Self {
            name,
            default: FieldDefault::Value(default),
            coerce: None,
            nested: None,
        }
    }

    pub const fn coerce(mut self, coerce: Coerce) -> Self {
        self.coerce = Some(coerce);
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.default, FieldDefault::Required)
    }

    /// The fallback value, or `None` for required fields.
    pub fn default_value(&self) -> Option<Value> {
        match self.default {
            FieldDefault::Required => None,
            FieldDefault::Null => Some(Value::Null),
            FieldDefault::Value(make) => Some(make()),
        }
    }
}

/// Implemented by every record and transfer object type.
pub trait Schema {
    /// Declared fields, in declaration order.
    fn fields() -> &'static [Field];

    /// Name used in error messages.
    fn type_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }

    fn field(name: &str) -> Option<&'static Field> {
        Self::fields().iter().find(|f| f.name == name)
    }

    fn has_field(name: &str) -> bool {
        Self::field(name).is_some()
    }
}

/// Fill every absent declared field from its default.
///
/// Returns the names of required fields that are still missing.
pub fn fill_defaults<S: Schema + ?Sized>(fields: &mut Fields) -> Vec<&'static str> {
    let mut missing = Vec::new();
    for field in S::fields() {
        if fields.contains_key(field.name) {
            continue;
        }
        match field.default_value() {
            Some(value) => {
                fields.insert(field.name.to_string(), value);
            }
            None => missing.push(field.name),
        }
    }
    missing
}

/// Names in `fields` that `S` does not declare.
pub fn undeclared<'a, S: Schema + ?Sized>(fields: &'a Fields) -> Vec<&'a str> {
    fields
        .keys()
        .map(String::as_str)
        .filter(|name| !S::has_field(name))
        .collect()
}
