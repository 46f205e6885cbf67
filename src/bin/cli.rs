//! diskkv CLI
//!
//! Command-line access to a storage directory, without going through a server.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use diskkv::{Config, FileStore, Store};

/// diskkv CLI
#[derive(Parser, Debug)]
#[command(name = "diskkv-cli")]
#[command(about = "CLI for the diskkv data file")]
#[command(version)]
struct Args {
    /// Storage directory (defaults to $DISKKV_STORAGE_DIR, then the system temp directory)
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key (prints nothing if absent)
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Print every entry as `key<TAB>value`, sorted by key
    Dump,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let storage_dir = args
        .storage_dir
        .unwrap_or_else(|| Config::from_env().storage_dir);
    let store = FileStore::open_path(&storage_dir);

    let output = match run(&store, args.command) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = std::io::stdout().lock().write_all(&output) {
        eprintln!("error: failed to write to stdout: {}", e);
        std::process::exit(1);
    }
}

/// Run one command, returning what should be printed to stdout
fn run(store: &FileStore, command: Commands) -> diskkv::Result<Vec<u8>> {
    let mut output = Vec::new();

    match command {
        Commands::Get { key } => {
            output = store.get(key.as_bytes())?;
            output.push(b'\n');
        }
        Commands::Set { key, value } => {
            store.set(key.as_bytes(), value.as_bytes())?;
        }
        Commands::Del { key } => {
            store.delete(key.as_bytes())?;
        }
        Commands::Dump => {
            let mut entries: Vec<_> = store.load()?.into_iter().collect();
            entries.sort();
            for (key, value) in entries {
                output.extend_from_slice(&key_value_line(&key, &value));
            }
        }
    }

    Ok(output)
}

fn key_value_line(key: &[u8], value: &[u8]) -> Vec<u8> {
    format!(
        "{}\t{}\n",
        String::from_utf8_lossy(key),
        String::from_utf8_lossy(value)
    )
    .into_bytes()
}
