use std::any::type_name;

use error_stack::Report;
use serde_json::Value;
use thiserror::Error;

use crate::raw_kind::RawKind;

/// Result type for field extraction
pub type Result<T> = std::result::Result<T, MapperError>;

/// Result type for decoding a whole document
pub type DocumentResult<T> = std::result::Result<T, Report<DocumentError>>;

/// Why a value could not be mapped into the requested type
///
/// The set of kinds is closed. Required extraction surfaces exactly one of these per failure;
/// optional extraction turns all of them into absence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    /// No value was found under the requested key
    #[error("Missing field '{field}'")]
    MissingField {
        /// The dotted key that was requested
        field: String,
    },

    /// A value was found but has the wrong container shape
    #[error("Type mismatch for field '{field}': expected {expected_type}, found {}", RawKind::of(.value))]
    TypeMismatch {
        /// The dotted key that was requested
        field:         String,
        /// The raw value that was found
        value:         Value,
        /// The type the value had to be
        expected_type: &'static str,
    },

    /// A scalar conversion rejected the shape of its input
    #[error("Cannot convert {} {value} to {expected_type}", RawKind::of(.value))]
    Conversion {
        /// The raw value handed to the conversion
        value:         Value,
        /// The type the conversion expected
        expected_type: &'static str,
    },

    /// A raw value converted to the backing type but matches no enum case
    #[error("Invalid raw value {value} for field '{field}' of {enum_type}")]
    InvalidRawValue {
        /// The dotted key that was requested
        field:     String,
        /// The raw value that was found
        value:     Value,
        /// The enum that has no matching case
        enum_type: &'static str,
    },

    /// A type-specific or caller-supplied validation failed
    #[error("{}", describe_custom(.field, .message))]
    Custom {
        /// The field being mapped, when known
        field:   Option<String>,
        /// What went wrong
        message: String,
    },
}

fn describe_custom(field: &Option<String>, message: &str) -> String {
    field.as_deref().map_or_else(
        || message.to_string(),
        |field| format!("Invalid field '{field}': {message}"),
    )
}

impl MapperError {
    // Builder methods for each kind

    /// Create a "missing field" error
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a type mismatch error for a value that had to be a `T`
    #[must_use]
    pub fn type_mismatch<T: ?Sized>(field: impl Into<String>, value: &Value) -> Self {
        Self::TypeMismatch {
            field:         field.into(),
            value:         value.clone(),
            expected_type: type_name::<T>(),
        }
    }

    /// Create a conversion error for a value that had to be a `T`
    #[must_use]
    pub fn conversion<T: ?Sized>(value: &Value) -> Self {
        Self::Conversion {
            value:         value.clone(),
            expected_type: type_name::<T>(),
        }
    }

    /// Create an error for a raw value that matches no case of `T`
    #[must_use]
    pub fn invalid_raw_value<T: ?Sized>(field: impl Into<String>, value: &Value) -> Self {
        Self::InvalidRawValue {
            field:     field.into(),
            value:     value.clone(),
            enum_type: type_name::<T>(),
        }
    }

    /// Create a custom error that does not know its field yet
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            field:   None,
            message: message.into(),
        }
    }

    /// Create a custom error for a specific field
    #[must_use]
    pub fn custom_for(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            field:   Some(field.into()),
            message: message.into(),
        }
    }

    /// The field this failure names, if any
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::TypeMismatch { field, .. }
            | Self::InvalidRawValue { field, .. } => Some(field),
            Self::Custom { field, .. } => field.as_deref(),
            Self::Conversion { .. } => None,
        }
    }

    /// Fill in the field name where the failing conversion could not know it.
    ///
    /// Only `Custom` errors without a field are touched; every other kind already carries its
    /// context or (for `Conversion`) has no field to carry.
    #[must_use]
    pub(crate) fn with_field(self, field: &str) -> Self {
        match self {
            Self::Custom {
                field: None,
                message,
            } => Self::custom_for(field, message),
            other => other,
        }
    }
}

/// Context for reports produced when decoding a whole document
///
/// The underlying `MapperError` or `serde_json::Error` stays in the report below this context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The text could not be parsed as JSON
    #[error("Document is not valid JSON")]
    InvalidJson,

    /// The document root is not a mapping
    #[error("Document root is not a JSON object")]
    NotAnObject,

    /// The root mapping could not be mapped into the target type
    #[error("Failed to map document into {type_name}")]
    Mapping {
        /// The type being built
        type_name: &'static str,
    },
}
