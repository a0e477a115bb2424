//! Field source rewriting
//!
//! - [`binding`] - [`SourceBinding`], the single-key and composite overrides
//! - [`resolver`] - [`extract`] and [`rewrite`], which find a field's raw value
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

pub mod binding;
pub mod resolver;

pub use binding::SourceBinding;
pub use resolver::{extract, resolve_binding, rewrite};
