//! Error types for the store module.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur during store operations.
///
/// Every variant is a local failure reported to the immediate caller. A call
/// that fails leaves the entries and the buffer exactly as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Type mismatch{}: expected {expected}, found {actual}", key_suffix(.key))]
    TypeMismatch {
        key: Option<String>,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("Null payload{}", key_suffix(.key))]
    NullPayload { key: Option<String> },

    #[error("Index out of bounds: {index} not in 0..{capacity}")]
    IndexOutOfRange { index: i64, capacity: usize },

    #[error("Buffer not initialized")]
    NotReady,

    #[error("Invalid range: start {start}, end {end}")]
    InvalidRange { start: i64, end: i64 },

    #[error("Range overflow: end {end} exceeds capacity {capacity}")]
    RangeOverflow { end: i64, capacity: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn key_suffix(key: &Option<String>) -> String {
    match key {
        Some(k) => format!(" for key '{}'", k),
        None => String::new(),
    }
}

impl StoreError {
    /// Attach the store key to a value-level error that was raised without one.
    pub fn with_key(self, key: &str) -> Self {
        match self {
            Self::TypeMismatch {
                key: None,
                expected,
                actual,
            } => Self::TypeMismatch {
                key: Some(key.to_string()),
                expected,
                actual,
            },
            Self::NullPayload { key: None } => Self::NullPayload {
                key: Some(key.to_string()),
            },
            other => other,
        }
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    pub fn is_null_payload(&self) -> bool {
        matches!(self, Self::NullPayload { .. })
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady)
    }

    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }

    pub fn is_range_overflow(&self) -> bool {
        matches!(self, Self::RangeOverflow { .. })
    }
}
