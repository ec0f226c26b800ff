//! Stored (persisted) model instances and the hooks used to read them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ConvertError;
use crate::record::kind_of;
use crate::schema::Fields;

/// A persisted model instance whose attribute names may differ from the
/// record it is converted into.
pub trait StoredObject: fmt::Debug + Send + Sync {
    fn model_name(&self) -> &str;

    /// Confirm this is a usable model instance.
    fn check(&self) -> Result<(), ConvertError> {
        Ok(())
    }

    /// Read one attribute, or `None` if the model has no such attribute.
    fn attribute(&self, name: &str) -> Option<Attribute>;
}

/// The value of one stored attribute.
#[derive(Debug, Clone)]
pub enum Attribute {
    Value(Value),
    /// A collection relationship (many-to-many or reverse foreign key).
    Related(Related),
}

impl Attribute {
    /// The plain value; a related collection cannot be copied as-is.
    pub fn into_value(self, name: &str) -> Result<Value, ConvertError> {
        match self {
            Attribute::Value(value) => Ok(value),
            Attribute::Related(related) => Err(ConvertError::Type(format!(
                "attribute `{name}` is a related collection of {} object(s); map it with an adapter",
                related.len()
            ))),
        }
    }
}

/// Accessor over the objects on the other side of a collection relationship.
#[derive(Debug, Clone, Default)]
pub struct Related {
    objects: Vec<Arc<dyn StoredObject>>,
}

impl Related {
    pub fn new(objects: Vec<Arc<dyn StoredObject>>) -> Self {
        Self { objects }
    }

    /// Every related object, in relationship order.
    pub fn all(&self) -> impl Iterator<Item = &dyn StoredObject> + '_ {
        self.objects.iter().map(|object| object.as_ref())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<StoredRow> for Related {
    fn from_iter<I: IntoIterator<Item = StoredRow>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|row| Arc::new(row) as Arc<dyn StoredObject>)
                .collect(),
        )
    }
}

/// A model instance as loaded by a store: column values plus related sets.
#[derive(Debug, Clone)]
pub struct StoredRow {
    model: String,
    columns: Fields,
    related: BTreeMap<String, Related>,
}

impl StoredRow {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            columns: Fields::new(),
            related: BTreeMap::new(),
        }
    }

    /// Build from a JSON document, which must be an object of columns.
    pub fn from_json(model: impl Into<String>, value: Value) -> Result<Self, ConvertError> {
        let model = model.into();
        match value {
            Value::Object(columns) => Ok(Self {
                model,
                columns,
                related: BTreeMap::new(),
            }),
            other => Err(ConvertError::NotValidModel(format!(
                "{model} row must be an object, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(name.into(), value.into());
        self
    }

    pub fn with_related(mut self, name: impl Into<String>, related: Related) -> Self {
        self.related.insert(name.into(), related);
        self
    }

    pub fn columns(&self) -> &Fields {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }
}

impl StoredObject for StoredRow {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn check(&self) -> Result<(), ConvertError> {
        if self.model.is_empty() {
            return Err(ConvertError::NotValidModel(format!(
                "row without a model name: {:?}",
                self.columns
            )));
        }
        Ok(())
    }

    fn attribute(&self, name: &str) -> Option<Attribute> {
        if let Some(value) = self.columns.get(name) {
            return Some(Attribute::Value(value.clone()));
        }
        self.related
            .get(name)
            .map(|related| Attribute::Related(related.clone()))
    }
}

/// A raw JSON document standing in for a row. Only objects are valid models.
impl StoredObject for Value {
    fn model_name(&self) -> &str {
        "json"
    }

    fn check(&self) -> Result<(), ConvertError> {
        if self.is_object() {
            Ok(())
        } else {
            Err(ConvertError::NotValidModel(format!(
                "input_type={} input_value={self}",
                kind_of(self)
            )))
        }
    }

    fn attribute(&self, name: &str) -> Option<Attribute> {
        self.as_object()
            .and_then(|map| map.get(name))
            .map(|value| Attribute::Value(value.clone()))
    }
}

/// Transforms one stored attribute into a record field value.
pub type Adapter = Arc<dyn Fn(Attribute) -> Result<Value, ConvertError> + Send + Sync>;

/// Adapters keyed by the *stored attribute name*.
pub type Adapters = HashMap<String, Adapter>;

/// Record field name → stored attribute name.
pub type FieldMapping = HashMap<String, String>;

pub fn adapter<F>(f: F) -> Adapter
where
    F: Fn(Attribute) -> Result<Value, ConvertError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An adapter over plain values; fails on related collections.
pub fn value_adapter<F>(f: F) -> Adapter
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Arc::new(move |attribute: Attribute| match attribute {
        Attribute::Value(value) => Ok(f(value)),
        Attribute::Related(_) => Err(ConvertError::Type(
            "value adapter received a related collection".to_string(),
        )),
    })
}
