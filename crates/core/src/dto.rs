//! Validated transfer objects.
//!
//! A transfer object type implements [`TransferObject`] (its fields plus
//! `validator` constraints) and is always handled wrapped in a [`Dto`], which
//! remembers which fields the caller supplied explicitly.

use std::collections::BTreeSet;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{ConvertError, FieldIssue, IssueKind, ValidationError};
use crate::record::attributes_of;
use crate::schema::{fill_defaults, Field, Fields, NestedSchema, Schema};

/// Policy for input fields the type does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    /// Drop them silently.
    Ignore,
    /// Reject them with an `ExtraForbidden` issue.
    Forbid,
}

/// When an already-built [`Dto`] handed to a converter is validated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revalidate {
    Never,
    Always,
}

/// Validation behaviour shared by transfer object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtoConfig {
    /// Allow construction from another object's attributes.
    pub from_attributes: bool,
    pub revalidate_instances: Revalidate,
    /// Re-run validation on [`Dto::set`].
    pub validate_assignment: bool,
    pub extra: Extra,
    /// Trim leading and trailing whitespace from every string input.
    pub str_strip_whitespace: bool,
    /// Disable lax coercion of string inputs.
    pub strict: bool,
}

/// Configuration every transfer object uses unless it overrides
/// [`TransferObject::CONFIG`].
pub const BASE_DTO: DtoConfig = DtoConfig {
    from_attributes: true,
    revalidate_instances: Revalidate::Always,
    validate_assignment: true,
    extra: Extra::Forbid,
    str_strip_whitespace: true,
    strict: false,
};

/// A schema-checked boundary value object.
pub trait TransferObject: Schema + Serialize + DeserializeOwned + Validate {
    const CONFIG: DtoConfig = BASE_DTO;
}

/// Options for [`Dto::dump`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Keep only fields that were explicitly supplied, including inside
    /// nested transfer objects.
    pub exclude_unset: bool,
    /// Drop `null` values, recursively through nested objects.
    pub exclude_none: bool,
}

impl DumpOptions {
    pub const ALL: Self = Self {
        exclude_unset: false,
        exclude_none: false,
    };

    /// The filtering used when turning a transfer object into a record.
    pub const EXPLICIT: Self = Self {
        exclude_unset: true,
        exclude_none: true,
    };
}

impl Field {
    /// Mark the field as holding a `N` transfer object (or a list of them).
    ///
    /// Object input for the field then goes through `N`'s own extra-field
    /// policy, trimming, coercion and defaults, and its set fields are
    /// tracked as `field.inner` paths.
    pub const fn nested<N: TransferObject>(mut self) -> Self {
        self.nested = Some(NestedSchema {
            type_name: <N as Schema>::type_name,
            fields: <N as Schema>::fields,
            prepare: prepare_nested::<N>,
        });
        self
    }
}

/// A validated transfer object together with its explicitly set fields.
///
/// Fields inside nested transfer objects are tracked by dotted path
/// (`gender.label`).
#[derive(Debug, Clone, PartialEq)]
pub struct Dto<T> {
    value: T,
    fields_set: BTreeSet<String>,
}

impl<T: TransferObject> Dto<T> {
    /// Validate a field map into `T`.
    pub fn validate(fields: Fields) -> Result<Self, ValidationError> {
        Self::build(fields, true)
    }

    /// Validate a JSON document, which must be an object.
    pub fn parse(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(fields) => Self::validate(fields),
            _ => Err(ValidationError::single(
                T::type_name(),
                FieldIssue::new(
                    T::type_name(),
                    IssueKind::Type,
                    format!("Input should be a valid dictionary or instance of {}", T::type_name()),
                ),
            )),
        }
    }

    /// Validate an already-typed value. Every field counts as set.
    pub fn new(value: T) -> Result<Self, ValidationError> {
        let fields = attributes_of(&value, T::type_name()).map_err(|e| {
            ValidationError::single(
                T::type_name(),
                FieldIssue::new(T::type_name(), IssueKind::Type, e.to_string()),
            )
        })?;
        Self::validate(fields)
    }

    /// Validate from the attributes of another object.
    ///
    /// Refused when the type's configuration disables `from_attributes`.
    pub fn from_attributes<S: Serialize + ?Sized>(source: &S) -> Result<Self, ConvertError> {
        if !T::CONFIG.from_attributes {
            return Err(ValidationError::single(
                T::type_name(),
                FieldIssue::new(
                    T::type_name(),
                    IssueKind::Type,
                    "from_attributes is disabled for this type",
                ),
            )
            .into());
        }
        let fields = attributes_of(source, T::type_name())?;
        Ok(Self::validate(fields)?)
    }

    /// Validate the current values again, keeping the set-field tracking.
    pub fn revalidate(&self) -> Result<Self, ValidationError> {
        let mut fresh = Self::build(self.dump(DumpOptions::ALL), true)?;
        fresh.fields_set = self.fields_set.clone();
        Ok(fresh)
    }

    /// Assign one field, revalidating when `validate_assignment` is on.
    pub fn set(&mut self, field: &str, value: Value) -> Result<(), ValidationError> {
        if !T::has_field(field) {
            return Err(ValidationError::single(
                T::type_name(),
                FieldIssue::new(
                    field,
                    IssueKind::ExtraForbidden,
                    format!("{} object has no field \"{field}\"", T::type_name()),
                ),
            ));
        }

        let mut fields = self.dump(DumpOptions::ALL);
        fields.insert(field.to_string(), value);
        let rebuilt = Self::build(fields, T::CONFIG.validate_assignment)?;

        self.value = rebuilt.value;
        self.fields_set.retain(|path| !is_under(path, field));
        self.fields_set
            .extend(rebuilt.fields_set.into_iter().filter(|path| is_under(path, field)));
        Ok(())
    }

    /// Dump to a field map.
    pub fn dump(&self, options: DumpOptions) -> Fields {
        // A built value always came from a field map.
        let mut fields = attributes_of(&self.value, T::type_name()).unwrap_or_default();
        if options.exclude_unset {
            retain_set(&mut fields, T::fields(), &self.fields_set, "");
        }
        if options.exclude_none {
            strip_nulls(&mut fields);
        }
        fields
    }

    fn build(fields: Fields, check_constraints: bool) -> Result<Self, ValidationError> {
        let model = T::type_name();
        let Prepared {
            input,
            set: fields_set,
            issues,
        } = prepare::<T>(T::CONFIG, fields, "");
        if !issues.is_empty() {
            return Err(ValidationError::new(model, issues));
        }

        let value: T = serde_json::from_value(Value::Object(input)).map_err(|e| {
            ValidationError::single(model, FieldIssue::new(model, IssueKind::Type, e.to_string()))
        })?;

        if check_constraints {
            if let Err(errors) = value.validate() {
                let mut issues = Vec::new();
                collect_constraint_issues("", &errors, &mut issues);
                issues.sort_by(|a, b| a.field.cmp(&b.field));
                return Err(ValidationError::new(model, issues));
            }
        }

        tracing::trace!(model, set = fields_set.len(), "Validated transfer object");
        Ok(Self { value, fields_set })
    }
}

impl<T> Dto<T> {
    pub fn inner(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// Names of the fields supplied explicitly at construction or assignment,
    /// with dotted paths for fields inside nested transfer objects.
    pub fn fields_set(&self) -> &BTreeSet<String> {
        &self.fields_set
    }

    pub fn is_set(&self, field: &str) -> bool {
        self.fields_set.contains(field)
    }
}

impl<T> Deref for Dto<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

/// One level of input checked against a type's declared fields, before
/// deserialization.
pub(crate) struct Prepared {
    input: Fields,
    set: BTreeSet<String>,
    issues: Vec<FieldIssue>,
}

/// Apply `S`'s extra-field policy, trimming, coercion and defaults to
/// `fields`. Paths in the result are prefixed with `prefix`.
fn prepare<S: Schema>(config: DtoConfig, fields: Fields, prefix: &str) -> Prepared {
    let mut prepared = Prepared {
        input: Fields::new(),
        set: BTreeSet::new(),
        issues: Vec::new(),
    };

    for (name, mut value) in fields {
        let path = format!("{prefix}{name}");
        let Some(field) = S::field(&name) else {
            if config.extra == Extra::Forbid {
                prepared.issues.push(FieldIssue::new(
                    path,
                    IssueKind::ExtraForbidden,
                    "Extra inputs are not permitted",
                ));
            }
            continue;
        };

        match field.nested {
            Some(nested) => prepare_nested_value(&nested, &mut value, &path, &mut prepared),
            None => {
                if config.str_strip_whitespace {
                    strip_whitespace(&mut value);
                }
                let coerced = match (&value, field.coerce) {
                    (Value::String(raw), Some(coerce)) if !config.strict => coerce.apply(raw),
                    _ => None,
                };
                if let Some(coerced) = coerced {
                    value = coerced;
                }
            }
        }

        prepared.set.insert(path);
        prepared.input.insert(name, value);
    }

    for name in fill_defaults::<S>(&mut prepared.input) {
        prepared.issues.push(FieldIssue::new(
            format!("{prefix}{name}"),
            IssueKind::Missing,
            "Field required",
        ));
    }
    prepared
}

fn prepare_nested<N: TransferObject>(fields: Fields, prefix: &str) -> Prepared {
    prepare::<N>(N::CONFIG, fields, prefix)
}

/// Run an object (or each object in a list) through the nested type.
/// Anything else is left for deserialization to reject.
fn prepare_nested_value(nested: &NestedSchema, value: &mut Value, path: &str, out: &mut Prepared) {
    let mut apply = |sub: &mut Fields, prefix: String| {
        let inner = (nested.prepare)(std::mem::take(sub), &prefix);
        *sub = inner.input;
        out.set.extend(inner.set);
        out.issues.extend(inner.issues);
    };

    match value {
        Value::Object(sub) => apply(sub, format!("{path}.")),
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                if let Value::Object(sub) = item {
                    apply(sub, format!("{path}[{index}]."));
                }
            }
        }
        _ => {}
    }
}

/// Drop every field whose path is not in `set`, descending into nested
/// transfer objects.
fn retain_set(fields: &mut Fields, declared: &[Field], set: &BTreeSet<String>, prefix: &str) {
    fields.retain(|name, _| set.contains(&format!("{prefix}{name}")));
    for (name, value) in fields.iter_mut() {
        let nested = declared
            .iter()
            .find(|field| field.name == name.as_str())
            .and_then(|field| field.nested);
        if let (Some(nested), Value::Object(sub)) = (nested, value) {
            retain_set(sub, (nested.fields)(), set, &format!("{prefix}{name}."));
        }
    }
}

/// Whether `path` is `field` itself or lies inside it.
fn is_under(path: &str, field: &str) -> bool {
    path.strip_prefix(field)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.') || rest.starts_with('['))
}

fn strip_whitespace(value: &mut Value) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_whitespace),
        Value::Object(map) => map.values_mut().for_each(strip_whitespace),
        _ => {}
    }
}

pub(crate) fn strip_nulls(fields: &mut Fields) {
    fields.retain(|_, value| !value.is_null());
    fields.values_mut().for_each(strip_nulls_in);
}

fn strip_nulls_in(value: &mut Value) {
    match value {
        Value::Object(nested) => strip_nulls(nested),
        Value::Array(items) => items.iter_mut().for_each(strip_nulls_in),
        _ => {}
    }
}

fn collect_constraint_issues(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldIssue>) {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed `{}` check", err.code));
                    out.push(FieldIssue::new(path.clone(), IssueKind::Constraint, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_constraint_issues(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_constraint_issues(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}
