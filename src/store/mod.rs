//! Keyed store of tagged values.
//!
//! [`ConfigStore`] maps string keys to [`TaggedValue`](crate::TaggedValue)s
//! and owns a fixed-capacity [`IntBuffer`]. Buffer reads and writes are
//! bounds-checked; nothing exposes raw indexing.

mod buffer;
mod config_store;
mod error;

pub use buffer::{IntBuffer, process_data};
pub use config_store::{ConfigStore, DEFAULT_CAPACITY};
pub use error::StoreError;
