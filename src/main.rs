use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

use config_store::subscriber::{self, LoggingError};
use config_store::{
    ConfigError, ConfigStore, DEFAULT_CONFIG_PATH, Payload, StoreConfig, StoreError, process_data,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid buffer write '{0}': expected INDEX=VALUE")]
    InvalidWrite(String),
}

/// Value kind selector for `get`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Int,
    Float,
    String,
    Vector,
}

/// A single `INDEX=VALUE` buffer assignment.
#[derive(Debug, Clone, Copy)]
struct BufferWrite {
    index: i64,
    value: i32,
}

fn parse_buffer_write(raw: &str) -> Result<BufferWrite, AppError> {
    let invalid = || AppError::InvalidWrite(raw.to_string());
    let (index, value) = raw.split_once('=').ok_or_else(invalid)?;
    Ok(BufferWrite {
        index: index.trim().parse().map_err(|_| invalid())?,
        value: value.trim().parse().map_err(|_| invalid())?,
    })
}

#[derive(Parser)]
#[command(name = "config-store")]
#[command(about = "Inspect a tagged-value store seeded from a TOML configuration file")]
struct Cli {
    /// Path to the configuration file (defaults are used if the default file is absent)
    #[arg(short, long, global = true, env = "CONFIG_STORE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every entry with its kind, sorted by key
    Show {
        /// Print a JSON object instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the value stored at a key
    Get {
        /// Key to look up
        key: String,

        /// Read through the typed getter for this kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Write buffer cells, then print the sum of a range
    Sum {
        /// First index of the range
        #[arg(long, default_value_t = 0)]
        start: i64,

        /// End of the range, exclusive (defaults to the capacity)
        #[arg(long)]
        end: Option<i64>,

        /// Buffer assignment applied before summing, as INDEX=VALUE
        #[arg(short, long = "write", value_parser = parse_buffer_write)]
        writes: Vec<BufferWrite>,
    },

    /// Run the sample program: seed a few entries and fold a data array
    Demo,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    capacity: usize,
    buffer: Vec<i32>,
    entries: BTreeMap<&'a str, Option<&'a Payload>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = StoreConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    subscriber::init(&config.logging).map_err(AppError::from)?;

    let mut store = config.build_store().map_err(AppError::from)?;
    tracing::debug!(entries = store.len(), "store ready");

    run(cli.command, &mut store, &mut io::stdout().lock())?;
    Ok(())
}

fn run(command: Commands, store: &mut ConfigStore, out: &mut impl Write) -> Result<(), AppError> {
    match command {
        Commands::Show { json } => {
            let entries: BTreeMap<&str, _> = store.iter().collect();
            if json {
                let snapshot = Snapshot {
                    capacity: store.capacity(),
                    buffer: store.buffer_snapshot(),
                    entries: entries
                        .iter()
                        .map(|(key, value)| (*key, value.payload()))
                        .collect(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            } else {
                for (key, value) in &entries {
                    match value.payload() {
                        Some(payload) => writeln!(out, "{}\t{}\t{}", key, value.kind(), payload)?,
                        None => writeln!(out, "{}\t{}\t<empty>", key, value.kind())?,
                    }
                }
                eprintln!("{} entries, buffer capacity {}", entries.len(), store.capacity());
            }
            Ok(())
        }
        Commands::Get { key, kind } => {
            match kind {
                None => {
                    let value = store.get(&key)?;
                    match value.payload() {
                        Some(payload) => writeln!(out, "{}", payload)?,
                        None => writeln!(out, "<empty>")?,
                    }
                }
                Some(KindArg::Int) => writeln!(out, "{}", store.get_int(&key)?)?,
                Some(KindArg::Float) => writeln!(out, "{}", store.get_float(&key)?)?,
                Some(KindArg::String) => writeln!(out, "{}", store.get_string(&key)?)?,
                Some(KindArg::Vector) => {
                    writeln!(out, "{}", Payload::IntSequence(store.get_vector(&key)?))?
                }
            }
            Ok(())
        }
        Commands::Sum { start, end, writes } => {
            for write in &writes {
                store.process_buffer(write.index, write.value)?;
            }
            let end = match end {
                Some(end) => end,
                None => i64::try_from(store.capacity()).map_err(|_| StoreError::RangeOverflow {
                    end: i64::MAX,
                    capacity: store.capacity(),
                })?,
            };
            writeln!(out, "{}", store.sum_buffer(start, end)?)?;
            Ok(())
        }
        Commands::Demo => {
            store.set_int("max_connections", 100);
            store.set_float("timeout", 3.5);
            store.set_string("server_name", "Test Server");
            store.set_vector("ports", &[8080, 8081, 8082]);

            writeln!(out, "max_connections = {}", store.get_int("max_connections")?)?;
            writeln!(out, "timeout = {}", store.get_float("timeout")?)?;
            writeln!(out, "server_name = {}", store.get_string("server_name")?)?;
            writeln!(
                out,
                "ports = {}",
                Payload::IntSequence(store.get_vector("ports")?)
            )?;

            let mut values = vec![1, 2, 3, 4, 5];
            let sum = process_data(&mut values)?;
            writeln!(out, "process_data sum = {} -> {:?}", sum, values)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(command: Commands, store: &mut ConfigStore) -> Result<String, AppError> {
        let mut out = Vec::new();
        run(command, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn sum(start: i64, end: Option<i64>, writes: Vec<BufferWrite>) -> Commands {
        Commands::Sum { start, end, writes }
    }

    #[test]
    fn test_parse_buffer_write() {
        let write = parse_buffer_write("2=5").unwrap();
        assert_eq!((write.index, write.value), (2, 5));

        let write = parse_buffer_write(" 3 = -4 ").unwrap();
        assert_eq!((write.index, write.value), (3, -4));

        for raw in ["3", "a=1", "1=x", "=1", "1=", "1=4294967296"] {
            assert!(
                matches!(parse_buffer_write(raw), Err(AppError::InvalidWrite(ref s)) if s == raw),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_sum_defaults_end_to_capacity() {
        let mut store = ConfigStore::with_capacity(4);
        let writes = vec![
            parse_buffer_write("0=1").unwrap(),
            parse_buffer_write("3=10").unwrap(),
        ];
        assert_eq!(run_to_string(sum(0, None, writes), &mut store).unwrap(), "11\n");
        assert_eq!(run_to_string(sum(1, Some(3), vec![]), &mut store).unwrap(), "0\n");
        assert_eq!(store.buffer_snapshot(), vec![1, 0, 0, 10]);
    }

    #[test]
    fn test_sum_rejects_out_of_range_write() {
        let mut store = ConfigStore::with_capacity(4);
        let writes = vec![
            parse_buffer_write("1=7").unwrap(),
            parse_buffer_write("4=9").unwrap(),
        ];
        let err = run_to_string(sum(0, None, writes), &mut store).unwrap_err();
        assert!(matches!(
            err,
            AppError::Store(StoreError::IndexOutOfRange { index: 4, capacity: 4 })
        ));
        assert_eq!(store.sum_buffer(0, 4).unwrap(), 7);

        let writes = vec![parse_buffer_write("-1=9").unwrap()];
        assert!(matches!(
            run_to_string(sum(0, None, writes), &mut store),
            Err(AppError::Store(StoreError::IndexOutOfRange { index: -1, .. }))
        ));
    }

    #[test]
    fn test_sum_rejects_bad_range() {
        let mut store = ConfigStore::with_capacity(4);
        assert!(matches!(
            run_to_string(sum(3, Some(1), vec![]), &mut store),
            Err(AppError::Store(StoreError::InvalidRange { start: 3, end: 1 }))
        ));
        assert!(matches!(
            run_to_string(sum(0, Some(5), vec![]), &mut store),
            Err(AppError::Store(StoreError::RangeOverflow { end: 5, capacity: 4 }))
        ));
    }

    #[test]
    fn test_get_with_kind() {
        let mut store = ConfigStore::with_capacity(4);
        store.set_string("server_name", "Test Server");
        store.set_vector("ports", &[8080, 8081]);

        let get = |key: &str, kind| Commands::Get {
            key: key.to_string(),
            kind,
        };

        assert_eq!(
            run_to_string(get("server_name", Some(KindArg::String)), &mut store).unwrap(),
            "Test Server\n"
        );
        assert_eq!(
            run_to_string(get("server_name", None), &mut store).unwrap(),
            "Test Server\n"
        );

        let err = run_to_string(get("server_name", Some(KindArg::Int)), &mut store).unwrap_err();
        assert!(matches!(
            err,
            AppError::Store(StoreError::TypeMismatch { .. })
        ));

        let err = run_to_string(get("ports", Some(KindArg::Float)), &mut store).unwrap_err();
        assert!(matches!(
            err,
            AppError::Store(StoreError::TypeMismatch { .. })
        ));

        let err = run_to_string(get("missing", Some(KindArg::Int)), &mut store).unwrap_err();
        assert!(matches!(
            err,
            AppError::Store(StoreError::KeyNotFound { ref key }) if key == "missing"
        ));
    }

    #[test]
    fn test_show_json() {
        let mut store = ConfigStore::with_capacity(2);
        store.set_int("max_connections", 100);
        store.process_buffer(1, 3).unwrap();

        let out = run_to_string(Commands::Show { json: true }, &mut store).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["capacity"], 2);
        assert_eq!(json["buffer"], serde_json::json!([0, 3]));
        assert!(json["entries"].get("max_connections").is_some());
    }

    #[test]
    fn test_demo_seeds_store() {
        let mut store = ConfigStore::with_capacity(4);
        let out = run_to_string(Commands::Demo, &mut store).unwrap();
        assert!(out.contains("max_connections = 100"));
        assert!(out.contains("process_data sum = 15"));
        assert_eq!(store.get_vector("ports").unwrap(), vec![8080, 8081, 8082]);
    }
}
