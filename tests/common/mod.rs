//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use config_store::ConfigStore;

/// Configuration file matching the sample program's entries.
pub const SAMPLE_CONFIG: &str = r#"
[store]
capacity = 10

[logging]
level = "warn"
output = "stderr"

[values]
max_connections = 100
timeout = 3.5
server_name = "Test Server"
ports = [8080, 8081, 8082]
"#;

/// The four kinds of entry, one per key.
pub fn populated_store() -> ConfigStore {
    let mut store = ConfigStore::new();
    store.set_int("int", 42);
    store.set_float("float", 2.5);
    store.set_string("string", "value");
    store.set_vector("vector", &[1, 2, 3]);
    store
}
