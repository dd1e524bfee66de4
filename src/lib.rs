//! A keyed store of tagged values with a bounds-checked integer buffer.
//!
//! Each entry holds exactly one payload of one of four kinds (integer,
//! float, string, integer sequence). The kind tag is derived from the
//! payload, copies are deep, and overwriting a key drops the old payload
//! before the new one becomes visible. Alongside the entries the store owns
//! a zero-initialized buffer of fixed capacity with checked writes and
//! range sums.
//!
//! # Quick Start
//!
//! ```ignore
//! use config_store::prelude::*;
//!
//! let mut store = ConfigStore::new();
//! store.set_int("max_connections", 100);
//! store.set_float("timeout", 3.5);
//! store.set_vector("ports", &[8080, 8081, 8082]);
//!
//! assert_eq!(store.get_int("max_connections")?, 100);
//! assert!(store.get_int("timeout").unwrap_err().is_type_mismatch());
//!
//! store.process_buffer(2, 40)?;
//! assert_eq!(store.sum_buffer(0, store.capacity() as i64)?, 40);
//! ```
//!
//! # Modules
//!
//! - [`value`] - [`TaggedValue`], [`Payload`] and [`ValueKind`]
//! - [`store`] - [`ConfigStore`], its buffer and [`StoreError`]
//! - [`config`] - TOML configuration and store seeding (requires `config` feature)
//! - [`subscriber`] - tracing subscriber setup for the binary (requires `cli` feature)
//!
//! # Feature Flags
//!
//! - `config` - TOML configuration and serde serialization (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

#[cfg(feature = "config")]
pub mod config;
mod error;
#[macro_use]
pub(crate) mod logging;
pub mod prelude;
pub mod store;
#[cfg(feature = "cli")]
pub mod subscriber;
pub mod value;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export the core types at crate root for convenience
pub use store::{ConfigStore, DEFAULT_CAPACITY, IntBuffer, StoreError, process_data};
pub use value::{Payload, TaggedValue, ValueKind};

#[cfg(feature = "config")]
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, LogFormat, LoggingConfig, StoreConfig};
