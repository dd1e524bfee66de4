//! Configuration loaded from a TOML file.
//!
//! ```toml
//! [store]
//! capacity = 10
//!
//! [logging]
//! level = "info"
//! format = "text"
//! output = "stderr"
//!
//! [values]
//! max_connections = 100
//! timeout = 3.5
//! server_name = "Test Server"
//! ports = [8080, 8081, 8082]
//! ```
//!
//! Every section is optional. `[values]` seeds the store built by
//! [`StoreConfig::build_store`].

use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

use crate::logging::info;
use crate::store::{ConfigStore, DEFAULT_CAPACITY};
use crate::value::Payload;

/// Largest buffer a configuration file may request.
pub const MAX_CAPACITY: usize = 1 << 24;

/// File read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config-store.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Store settings.
    pub store: StoreSection,
    /// Logging settings (used by the binary).
    pub logging: LoggingConfig,
    /// Initial entries.
    pub values: toml::Table,
}

/// Store construction settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// Buffer length.
    pub capacity: usize,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"config_store=debug"`.
    pub level: String,
    pub format: LogFormat,
    /// `"stdout"`, `"stderr"`, or a file path to append to.
    pub output: String,
    pub timestamps: bool,
    /// ANSI colors, only applied when the output is a terminal.
    pub color: bool,
    /// Include the event target (module path).
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            timestamps: true,
            color: true,
            target: false,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, relative to the working directory.
    ///
    /// A missing [`DEFAULT_CONFIG_PATH`] yields the defaults. Any other
    /// missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_in(Path::new(""), path)
    }

    /// Like [`StoreConfig::load`], resolving a relative `path` against `dir`.
    pub fn load_in(dir: &Path, path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(dir.join(path)) {
            Err(ConfigError::Io(_, e))
                if e.kind() == ErrorKind::NotFound && path == Path::new(DEFAULT_CONFIG_PATH) =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Convert `[values]` into payloads, in key order.
    ///
    /// Fails on the first value with no matching kind.
    pub fn payloads(&self) -> Result<Vec<(String, Payload)>, ConfigError> {
        self.values
            .iter()
            .map(|(key, value)| Ok((key.clone(), to_payload(key, value)?)))
            .collect()
    }

    /// Build a store with the configured capacity and seed it with `[values]`.
    ///
    /// Nothing is built unless every value converts.
    pub fn build_store(&self) -> Result<ConfigStore, ConfigError> {
        let capacity = self.store.capacity;
        if capacity > MAX_CAPACITY {
            return Err(ConfigError::InvalidCapacity {
                capacity,
                max: MAX_CAPACITY,
            });
        }
        let payloads = self.payloads()?;

        let mut store = ConfigStore::with_capacity(capacity);
        for (key, payload) in payloads {
            store.set(&key, payload);
        }
        info!(entries = store.len(), capacity, "seeded store from configuration");
        Ok(store)
    }
}

fn to_payload(key: &str, value: &toml::Value) -> Result<Payload, ConfigError> {
    let unsupported = |reason: &str| ConfigError::UnsupportedValue {
        key: key.to_string(),
        reason: reason.to_string(),
    };
    match value {
        toml::Value::Integer(i) => i32::try_from(*i)
            .map(Payload::Int)
            .map_err(|_| unsupported("integer does not fit in 32 bits")),
        toml::Value::Float(f) => {
            let narrowed = *f as f32;
            if f.is_finite() && !narrowed.is_finite() {
                return Err(unsupported("float does not fit in 32 bits"));
            }
            Ok(Payload::Float(narrowed))
        }
        toml::Value::String(s) => Ok(Payload::String(s.clone())),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                toml::Value::Integer(i) => i32::try_from(*i)
                    .map_err(|_| unsupported("array element does not fit in 32 bits")),
                _ => Err(unsupported("arrays may only hold integers")),
            })
            .collect::<Result<Vec<i32>, _>>()
            .map(Payload::IntSequence),
        toml::Value::Boolean(_) => Err(unsupported("booleans are not supported")),
        toml::Value::Datetime(_) => Err(unsupported("datetimes are not supported")),
        toml::Value::Table(_) => Err(unsupported("tables are not supported")),
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
    /// A `[values]` entry has no matching value kind.
    UnsupportedValue { key: String, reason: String },
    /// Requested buffer is larger than [`MAX_CAPACITY`].
    InvalidCapacity { capacity: usize, max: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::UnsupportedValue { key, reason } => {
                write!(f, "Unsupported value for '{}': {}", key, reason)
            }
            ConfigError::InvalidCapacity { capacity, max } => {
                write!(f, "Buffer capacity {} exceeds maximum {}", capacity, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}
