//! Error types for circuit JSON reading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;

/// Errors that can occur while reading a circuit JSON document.
#[derive(Debug, Error)]
pub enum CircuitError {
    /// Failed to open or read the file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON.
    #[error("Invalid circuit JSON")]
    Json {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is valid JSON but not an array of elements.
    #[error("Circuit JSON must be an array of elements")]
    NotAnArray,

    /// An element of a known type does not match its schema.
    #[error("Invalid {element_type} at index {index}")]
    InvalidElement {
        /// Position of the element in the document.
        index: usize,
        /// The element's `type` tag.
        element_type: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A field required by the element's shape is missing.
    #[error("{element_type} '{element_id}' is missing required field '{field}'")]
    MissingField {
        /// The element's `type` tag.
        element_type: String,
        /// The element's id.
        element_id: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A layer name is not a known copper layer.
    #[error("Element '{element_id}' references unknown layer '{layer}'")]
    UnknownLayer {
        /// The element's id.
        element_id: String,
        /// The unrecognised layer name.
        layer: String,
    },
}

impl CircuitError {
    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid element error.
    pub fn invalid_element(
        index: usize,
        element_type: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::InvalidElement {
            index,
            element_type: element_type.into(),
            source,
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(
        element_type: impl Into<String>,
        element_id: impl Into<String>,
        field: &'static str,
    ) -> Self {
        Self::MissingField {
            element_type: element_type.into(),
            element_id: element_id.into(),
            field,
        }
    }

    /// Creates an unknown layer error.
    pub fn unknown_layer(element_id: impl Into<String>, layer: impl Into<String>) -> Self {
        Self::UnknownLayer {
            element_id: element_id.into(),
            layer: layer.into(),
        }
    }
}
