//! Record schemas and field descriptors
//!
//! A [`RecordSchema`] is the declared shape of a record: a name and an ordered
//! list of [`FieldSpec`]s. Each field has a declared type, an optional default,
//! the usual per-field options (init, repr, hash, compare, metadata) and, when
//! it does not read the key named after it, a [`SourceBinding`].
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use crate::rewrites::SourceBinding;
use crate::types::TypeDesc;
use crate::value::{Map, Value};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Produces a fresh default value for each record
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Default of a field
#[derive(Clone, Default)]
pub enum FieldDefault {
    /// The field is required
    #[default]
    Missing,
    /// A fixed default value
    Value(Value),
    /// A factory called for every record that needs the default
    Factory(DefaultFactory),
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Missing => write!(f, "Missing"),
            FieldDefault::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldDefault::Factory(_) => write!(f, "Factory(<fn>)"),
        }
    }
}

/// A declared field of a record
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    ty: TypeDesc,
    default: FieldDefault,
    init: bool,
    repr: bool,
    hash: Option<bool>,
    compare: bool,
    metadata: Map,
    binding: Option<SourceBinding>,
}

impl FieldSpec {
    /// A required field reading the key named after it
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            default: FieldDefault::Missing,
            init: true,
            repr: true,
            hash: None,
            compare: true,
            metadata: Map::new(),
            binding: None,
        }
    }

    /// Start building a field with options
    pub fn builder(name: impl Into<String>, ty: TypeDesc) -> FieldBuilder {
        FieldBuilder::new(name, ty)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    pub fn default(&self) -> &FieldDefault {
        &self.default
    }

    pub fn has_default(&self) -> bool {
        !matches!(self.default, FieldDefault::Missing)
    }

    /// The default for one record, calling the factory if there is one
    pub fn default_value(&self) -> Option<Value> {
        match &self.default {
            FieldDefault::Missing => None,
            FieldDefault::Value(v) => Some(v.clone()),
            FieldDefault::Factory(factory) => Some(factory()),
        }
    }

    /// Whether the field is passed to the record factory
    pub fn init(&self) -> bool {
        self.init
    }

    pub fn repr(&self) -> bool {
        self.repr
    }

    pub fn hash(&self) -> Option<bool> {
        self.hash
    }

    pub fn compare(&self) -> bool {
        self.compare
    }

    pub fn metadata(&self) -> &Map {
        &self.metadata
    }

    /// The source binding stored on the field itself
    pub fn binding(&self) -> Option<&SourceBinding> {
        self.binding.as_ref()
    }
}

/// Builder for field descriptors
pub struct FieldBuilder {
    name: String,
    ty: TypeDesc,
    default: Option<Value>,
    default_factory: Option<DefaultFactory>,
    init: bool,
    repr: bool,
    hash: Option<bool>,
    compare: bool,
    metadata: Map,
    binding: Option<SourceBinding>,
}

impl FieldBuilder {
    /// Create a new field builder
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            default_factory: None,
            init: true,
            repr: true,
            hash: None,
            compare: true,
            metadata: Map::new(),
            binding: None,
        }
    }

    /// Set a fixed default value
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set a default factory
    pub fn default_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default_factory = Some(Arc::new(factory));
        self
    }

    pub fn init(mut self, init: bool) -> Self {
        self.init = init;
        self
    }

    pub fn repr(mut self, repr: bool) -> Self {
        self.repr = repr;
        self
    }

    pub fn hash(mut self, hash: Option<bool>) -> Self {
        self.hash = hash;
        self
    }

    pub fn compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }

    pub fn metadata(mut self, metadata: Map) -> Self {
        self.metadata = metadata;
        self
    }

    /// Read the field from a differently-named key
    pub fn source(mut self, key: impl Into<String>) -> Self {
        self.binding = Some(SourceBinding::single(key));
        self
    }

    /// Read the field as a tuple of several keys
    pub fn composite<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binding = Some(SourceBinding::Composite(keys.into_iter().map(Into::into).collect()));
        self
    }

    /// Attach an already built binding
    pub fn binding(mut self, binding: SourceBinding) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Build the field descriptor
    pub fn build(self) -> Result<FieldSpec> {
        let default = match (self.default, self.default_factory) {
            (Some(_), Some(_)) => {
                return Err(Error::Configuration {
                    message: format!(
                        "field '{}' cannot specify both a default value and a default factory",
                        self.name
                    ),
                })
            }
            (Some(value), None) => FieldDefault::Value(value),
            (None, Some(factory)) => FieldDefault::Factory(factory),
            (None, None) => FieldDefault::Missing,
        };

        let binding = match self.binding {
            Some(SourceBinding::Composite(keys)) => Some(SourceBinding::composite(keys)?),
            other => other,
        };

        Ok(FieldSpec {
            name: self.name,
            ty: self.ty,
            default,
            init: self.init,
            repr: self.repr,
            hash: self.hash,
            compare: self.compare,
            metadata: self.metadata,
            binding,
        })
    }
}

/// A field reading its value from the key `source`
pub fn from_field(name: impl Into<String>, ty: TypeDesc, source: impl Into<String>) -> FieldBuilder {
    FieldBuilder::new(name, ty).source(source)
}

/// A field reading a tuple of the values stored under `sources`, in order
pub fn composite_field<I, S>(name: impl Into<String>, ty: TypeDesc, sources: I) -> FieldBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldBuilder::new(name, ty).composite(sources)
}

/// Declared shape of a record
#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Create a schema; field names must be unique
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self> {
        let name = name.into();
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(Error::Configuration {
                    message: format!("record '{}' declares field '{}' twice", name, field.name),
                });
            }
        }
        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Wrap the schema as a declared type for nesting in other records
    pub fn into_type(self) -> TypeDesc {
        TypeDesc::record(self)
    }
}

// Structural: same name and the same field names and declared types.
impl PartialEq for RecordSchema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.ty == b.ty)
    }
}
