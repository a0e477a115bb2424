//! Error types for the Shapecast core library
//!
//! This module defines the error handling system for Shapecast, using
//! thiserror for the error enum and anyhow for failures raised inside
//! user-supplied transform functions.

use thiserror::Error;

/// Main error type for Shapecast operations
#[derive(Error, Debug)]
pub enum Error {
    /// A declared type does not have the shape the caller assumed
    #[error("Shape error: {message}")]
    Shape {
        message: String,
        type_name: Option<String>,
    },

    /// A raw value cannot be turned into the declared closed type
    #[error("Invalid value {value} for {expected}{}", display_path(path))]
    InvalidValue {
        path: String,
        value: String,
        expected: String,
    },

    /// A source key is absent from the raw input
    #[error("Missing key '{key}'{}", display_path(path))]
    MissingKey { path: String, key: String },

    /// A required field has neither data nor a default
    #[error("Missing value for field \"{path}\"")]
    MissingValue { path: String },

    /// A converted value does not conform to its declared type
    #[error("Wrong value type for field \"{path}\": expected {expected}, found {actual}")]
    WrongType {
        path: String,
        expected: String,
        actual: String,
    },

    /// No union alternative (or more than one, in strict union mode) matched
    #[error("Can not match {value} to any type of \"{path}\" union: {expected}")]
    UnionMatch {
        path: String,
        expected: String,
        value: String,
    },

    /// Strict mode found input keys no field consumed
    #[error("Unexpected data keys: {}", keys.join(", "))]
    UnexpectedData { keys: Vec<String> },

    /// A user transform function failed
    #[error("Transform failed: {message}")]
    Transform {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing errors for raw input
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing errors for raw input
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

fn display_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at \"{}\"", path)
    }
}

fn join_path(field: &str, path: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", field, path)
    }
}

impl Error {
    /// Create a shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Error::Shape {
            message: message.into(),
            type_name: None,
        }
    }

    /// Create a shape error naming the offending type
    pub fn shape_of(message: impl Into<String>, type_name: impl Into<String>) -> Self {
        Error::Shape {
            message: message.into(),
            type_name: Some(type_name.into()),
        }
    }

    /// Prefix the field path of path-carrying variants with `field`
    ///
    /// Nested record conversion calls this on the way out so the final
    /// error names the full dotted path, e.g. `order.customer.name`.
    pub fn at_field(self, field: &str) -> Self {
        match self {
            Error::InvalidValue { path, value, expected } => Error::InvalidValue {
                path: join_path(field, &path),
                value,
                expected,
            },
            Error::MissingKey { path, key } => Error::MissingKey {
                path: join_path(field, &path),
                key,
            },
            Error::MissingValue { path } => Error::MissingValue {
                path: join_path(field, &path),
            },
            Error::WrongType { path, expected, actual } => Error::WrongType {
                path: join_path(field, &path),
                expected,
                actual,
            },
            Error::UnionMatch { path, expected, value } => Error::UnionMatch {
                path: join_path(field, &path),
                expected,
                value,
            },
            other => other,
        }
    }

    /// Whether this error is a schema misuse rather than a data problem
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Error::Shape { .. })
    }

    /// Whether this error is a data-validation failure
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidValue { .. }
                | Error::MissingKey { .. }
                | Error::MissingValue { .. }
                | Error::WrongType { .. }
                | Error::UnionMatch { .. }
                | Error::UnexpectedData { .. }
        )
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Transform {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
