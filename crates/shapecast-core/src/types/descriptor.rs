//! Declared type descriptors
//!
//! A [`TypeDesc`] describes the shape a field is expected to have. Descriptors
//! are built once, when a schema is defined, and are only ever inspected by
//! the engine afterwards. Equality is structural, which is what the transform
//! table relies on for its exact-key lookup.
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use crate::rewrites::SourceBinding;
use crate::schema::RecordSchema;
use crate::value::{EnumValue, Value};
use std::fmt;
use std::sync::Arc;

/// A declared type expression
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    /// Matches any value
    Any,
    /// The absence type, matched by `Value::Null`
    NoneType,
    /// A scalar type
    Primitive(Primitive),
    /// Union of alternatives; an optional is a union with `NoneType`
    Union(Vec<TypeDesc>),
    /// An unparameterized container type
    Collection(Origin),
    /// A container (or user generic class) parameterized by type arguments
    Generic { origin: Origin, args: Vec<TypeDesc> },
    /// A closed enumeration
    Enum(Arc<EnumType>),
    /// A name-only alias over a base type
    NewType(Arc<NewTypeDef>),
    /// One of a fixed set of values
    Literal(Vec<Value>),
    /// A nested record type
    Record(Arc<RecordSchema>),
    /// A base type carrying extra metadata
    Annotated {
        base: Box<TypeDesc>,
        metadata: Vec<Annotation>,
    },
}

/// Scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int,
    Float,
    Str,
}

impl Primitive {
    /// Whether a value is an instance of this scalar type
    ///
    /// Ints are accepted where floats are declared.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Primitive::Bool => matches!(value, Value::Bool(_)),
            Primitive::Int => matches!(value, Value::Int(_)),
            Primitive::Float => matches!(value, Value::Float(_) | Value::Int(_)),
            Primitive::Str => matches!(value, Value::Str(_)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Str => "str",
        }
    }
}

/// The runtime container behind a generic type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    List,
    Tuple,
    Set,
    Dict,
    /// Abstract ordered sequence: lists and tuples
    Sequence,
    /// Abstract collection: lists, tuples, sets and dicts
    Collection,
    /// Abstract mapping: dicts
    Mapping,
    /// A user-defined generic class; never treated as a container
    Class(String),
}

impl Origin {
    /// Whether this origin is a container the engine knows how to walk
    pub fn is_container(&self) -> bool {
        !matches!(self, Origin::Class(_))
    }

    /// Whether items are key/value pairs
    pub fn is_mapping(&self) -> bool {
        matches!(self, Origin::Dict | Origin::Mapping)
    }

    /// Whether a value's container kind is an instance of this origin
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Origin::List => matches!(value, Value::List(_)),
            Origin::Tuple => matches!(value, Value::Tuple(_)),
            Origin::Set => matches!(value, Value::Set(_)),
            Origin::Dict | Origin::Mapping => matches!(value, Value::Map(_)),
            Origin::Sequence => matches!(value, Value::List(_) | Value::Tuple(_)),
            Origin::Collection => matches!(
                value,
                Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Map(_)
            ),
            Origin::Class(_) => false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Origin::List => "list",
            Origin::Tuple => "tuple",
            Origin::Set => "set",
            Origin::Dict => "dict",
            Origin::Sequence => "Sequence",
            Origin::Collection => "Collection",
            Origin::Mapping => "Mapping",
            Origin::Class(name) => name,
        }
    }
}

/// A closed enumeration type
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub members: Vec<EnumMember>,
}

/// A named member of an enumeration and its declared value
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: Value,
}

impl EnumType {
    pub fn new<I, N, V>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(n, v)| EnumMember {
                    name: n.into(),
                    value: v.into(),
                })
                .collect(),
        }
    }

    /// Look a member up by name
    pub fn member(&self, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| self.instantiate(m))
    }

    /// Look a member up by its declared value
    pub fn value_of(&self, value: &Value) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|m| m.value == *value)
            .map(|m| self.instantiate(m))
    }

    fn instantiate(&self, member: &EnumMember) -> EnumValue {
        EnumValue {
            enum_name: self.name.clone(),
            member: member.name.clone(),
            value: Box::new(member.value.clone()),
        }
    }
}

/// A name-only alias over a base type
#[derive(Debug, Clone, PartialEq)]
pub struct NewTypeDef {
    pub name: String,
    pub base: TypeDesc,
}

/// Metadata carried by an annotated type
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Where the field's raw value comes from
    Source(SourceBinding),
    /// Arbitrary caller data
    Data(Value),
}

impl TypeDesc {
    pub fn bool() -> Self {
        TypeDesc::Primitive(Primitive::Bool)
    }

    pub fn int() -> Self {
        TypeDesc::Primitive(Primitive::Int)
    }

    pub fn float() -> Self {
        TypeDesc::Primitive(Primitive::Float)
    }

    pub fn str() -> Self {
        TypeDesc::Primitive(Primitive::Str)
    }

    /// `inner | None`
    pub fn optional(inner: TypeDesc) -> Self {
        TypeDesc::Union(vec![inner, TypeDesc::NoneType])
    }

    /// Union of the given alternatives, kept as written (nested unions are not flattened)
    pub fn union<I: IntoIterator<Item = TypeDesc>>(alternatives: I) -> Self {
        TypeDesc::Union(alternatives.into_iter().collect())
    }

    pub fn generic<I: IntoIterator<Item = TypeDesc>>(origin: Origin, args: I) -> Self {
        TypeDesc::Generic {
            origin,
            args: args.into_iter().collect(),
        }
    }

    pub fn list(item: TypeDesc) -> Self {
        Self::generic(Origin::List, [item])
    }

    pub fn set(item: TypeDesc) -> Self {
        Self::generic(Origin::Set, [item])
    }

    /// A tuple type; more than one argument means fixed arity, a single
    /// argument means any number of items of that type
    pub fn tuple<I: IntoIterator<Item = TypeDesc>>(items: I) -> Self {
        Self::generic(Origin::Tuple, items)
    }

    pub fn dict(key: TypeDesc, value: TypeDesc) -> Self {
        Self::generic(Origin::Dict, [key, value])
    }

    pub fn sequence(item: TypeDesc) -> Self {
        Self::generic(Origin::Sequence, [item])
    }

    pub fn collection(item: TypeDesc) -> Self {
        Self::generic(Origin::Collection, [item])
    }

    pub fn mapping(key: TypeDesc, value: TypeDesc) -> Self {
        Self::generic(Origin::Mapping, [key, value])
    }

    pub fn enumeration(enum_type: EnumType) -> Self {
        TypeDesc::Enum(Arc::new(enum_type))
    }

    pub fn new_type(name: impl Into<String>, base: TypeDesc) -> Self {
        TypeDesc::NewType(Arc::new(NewTypeDef {
            name: name.into(),
            base,
        }))
    }

    pub fn literal<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        TypeDesc::Literal(values.into_iter().map(Into::into).collect())
    }

    pub fn record(schema: RecordSchema) -> Self {
        TypeDesc::Record(Arc::new(schema))
    }

    pub fn annotated<I: IntoIterator<Item = Annotation>>(base: TypeDesc, metadata: I) -> Self {
        TypeDesc::Annotated {
            base: Box::new(base),
            metadata: metadata.into_iter().collect(),
        }
    }

    /// Annotate `base` with a single source binding
    pub fn sourced(base: TypeDesc, binding: SourceBinding) -> Self {
        Self::annotated(base, [Annotation::Source(binding)])
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Any => write!(f, "Any"),
            TypeDesc::NoneType => write!(f, "None"),
            TypeDesc::Primitive(p) => write!(f, "{}", p.name()),
            TypeDesc::Union(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", alt)?;
                }
                Ok(())
            }
            TypeDesc::Collection(origin) => write!(f, "{}", origin.name()),
            TypeDesc::Generic { origin, args } => {
                write!(f, "{}[", origin.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, "]")
            }
            TypeDesc::Enum(e) => write!(f, "{}", e.name),
            TypeDesc::NewType(nt) => write!(f, "{}", nt.name),
            TypeDesc::Literal(values) => {
                write!(f, "Literal[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            TypeDesc::Record(schema) => write!(f, "{}", schema.name()),
            TypeDesc::Annotated { base, .. } => write!(f, "{}", base),
        }
    }
}
