//! Shapecast Core - type-directed conversion of loosely-typed data into records
//!
//! This crate turns nested mapping/sequence data, as produced by JSON or YAML
//! parsing, into validated records described by a declared schema.
//!
//! # Main Components
//!
//! - **Values**: the dynamic [`Value`] tree for raw input and converted output
//! - **Types**: [`TypeDesc`] declared types, structural predicates and the
//!   [`transform_value`] engine driven by a [`TransformTable`]
//! - **Rewrites**: [`SourceBinding`]s that let a field read a differently-named
//!   key, or combine several keys into a tuple
//! - **Conversion**: [`from_raw`] and friends, driven by a [`Config`]
//! - **Error Handling**: error types using `thiserror` and `anyhow`
//!
//! # Example
//!
//! ```
//! use shapecast_core::{composite_field, from_raw, Config, FieldSpec, Map, RecordSchema, TypeDesc, Value};
//!
//! # fn example() -> shapecast_core::Result<()> {
//! let schema = RecordSchema::new(
//!     "Payment",
//!     vec![
//!         FieldSpec::new("id", TypeDesc::int()),
//!         composite_field(
//!             "price",
//!             TypeDesc::tuple([TypeDesc::float(), TypeDesc::str()]),
//!             ["amount", "currency"],
//!         )
//!         .build()?,
//!     ],
//! )?;
//! let data = Map::from_json_str(r#"{"id": 1, "amount": 100.0, "currency": "SEK"}"#)?;
//!
//! let payment = from_raw(&schema, &data, &Config::default())?;
//! assert_eq!(
//!     payment.get("price"),
//!     Some(&Value::Tuple(vec![Value::Float(100.0), Value::from("SEK")]))
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod convert;
pub mod error;
pub mod rewrites;
pub mod schema;
pub mod types;
pub mod value;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use convert::{
    from_raw, from_raw_into, from_raw_with, Config, ConfigBuilder, ConfigOptions, RecordBuilder,
    RecordFactory, SerdeFactory,
};
pub use error::{Error, Result};
pub use rewrites::{extract, rewrite, SourceBinding};
pub use schema::{
    composite_field, from_field, DefaultFactory, FieldBuilder, FieldDefault, FieldSpec, RecordSchema,
};
pub use types::{
    built_in, transform_value, Annotation, EnumType, Origin, Primitive, TransformFn, TransformTable,
    TypeDesc,
};
pub use value::{EnumValue, Map, Record, Set, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
