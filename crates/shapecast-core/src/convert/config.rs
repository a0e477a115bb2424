//! Conversion configuration
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use crate::types::{TransformFn, TransformTable, TypeDesc};
use crate::value::Value;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Behavior switches for a conversion
///
/// Every switch has a default, so a partial JSON or YAML document is a valid
/// set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOptions {
    /// Check every converted field against its declared type
    pub check_types: bool,
    /// Reject input keys that no field consumes
    pub strict: bool,
    /// Reject union values that match more than one alternative
    pub strict_unions_match: bool,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            check_types: true,
            strict: false,
            strict_unions_match: false,
        }
    }
}

impl ConfigOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Everything a conversion needs besides the schema and the data
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub transforms: TransformTable,
    pub options: ConfigOptions,
}

impl Config {
    pub fn new(transforms: TransformTable, options: ConfigOptions) -> Self {
        Self { transforms, options }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    transforms: TransformTable,
    options: ConfigOptions,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform for a declared type
    pub fn transform<F>(mut self, ty: TypeDesc, transform: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.transforms.insert(ty, transform);
        self
    }

    /// Register a shared transform, e.g. one from [`built_in`](crate::types::built_in)
    pub fn transform_arc(mut self, ty: TypeDesc, transform: TransformFn) -> Self {
        self.transforms.insert_arc(ty, transform);
        self
    }

    /// Replace the whole transform table
    pub fn transforms(mut self, transforms: TransformTable) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn options(mut self, options: ConfigOptions) -> Self {
        self.options = options;
        self
    }

    pub fn check_types(mut self, check_types: bool) -> Self {
        self.options.check_types = check_types;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn strict_unions_match(mut self, strict_unions_match: bool) -> Self {
        self.options.strict_unions_match = strict_unions_match;
        self
    }

    pub fn build(self) -> Config {
        Config {
            transforms: self.transforms,
            options: self.options,
        }
    }
}
