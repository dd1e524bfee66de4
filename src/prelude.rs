//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```ignore
//! use config_store::prelude::*;
//!
//! let mut store = ConfigStore::new();
//! store.set_string("server_name", "Test Server");
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Values
pub use crate::value::{Payload, TaggedValue, ValueKind};

// Store
pub use crate::store::{ConfigStore, DEFAULT_CAPACITY, IntBuffer, StoreError, process_data};

// Configuration (requires "config" feature)
#[cfg(feature = "config")]
pub use crate::config::{ConfigError, LogFormat, LoggingConfig, StoreConfig};
