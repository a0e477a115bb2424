//! Record conversion
//!
//! This module drives a whole conversion: for every field of a
//! [`RecordSchema`](crate::RecordSchema) it locates the raw value, applies the
//! configured transforms, shapes the result after the declared type, checks it
//! and finally hands all fields to a [`RecordFactory`].
//!
//! # Module Organization
//!
//! - [`config`] - [`Config`] and the serde-loadable [`ConfigOptions`]
//! - [`driver`] - [`from_raw`] and friends
//! - [`factory`] - the [`RecordFactory`] seam and its stock implementations
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod driver;
pub mod factory;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigBuilder, ConfigOptions};
pub use driver::{from_raw, from_raw_into, from_raw_with};
pub use factory::{RecordBuilder, RecordFactory, SerdeFactory};
