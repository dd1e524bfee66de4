//! Unified error type for the config-store library.
//!
//! This module provides a single [`Error`] type that encompasses the errors
//! of every module, so application code can use one `Result` throughout.

use thiserror::Error;

#[cfg(feature = "config")]
use crate::config::ConfigError;
use crate::store::StoreError;

/// Unified error type for all config-store operations.
///
/// # Example
///
/// ```ignore
/// use config_store::{ConfigStore, Result};
///
/// fn timeout(store: &ConfigStore) -> Result<f32> {
///     Ok(store.get_float("timeout")?)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from a store operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error loading or applying configuration.
    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a store error.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns `true` if this is a configuration error.
    #[cfg(feature = "config")]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// The underlying store error, if any.
    pub fn as_store(&self) -> Option<&StoreError> {
        match self {
            Self::Store(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Config(_) => None,
        }
    }
}
