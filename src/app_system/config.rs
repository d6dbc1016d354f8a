use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

pub const DEFAULT_STORAGE_KEY: &str = "gridRows";
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Runtime settings for the catalog system.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Storage slot holding the catalog snapshot.
    pub storage_key: String,
    /// How long a notification stays visible unless dismissed.
    pub notification_ttl: Duration,
    /// Request channel capacity of the catalog actor.
    pub buffer_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "product_catalog", about = "Edit a locally stored product catalog", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "CATALOG_DATA_DIR",
        value_name = "DIR",
        default_value = ".catalog",
        help = "Directory holding the catalog snapshot",
        global = true
    )]
    pub data_dir: PathBuf,

    #[arg(
        long,
        env = "CATALOG_STORAGE_KEY",
        value_name = "KEY",
        default_value = DEFAULT_STORAGE_KEY,
        help = "Storage slot name for the snapshot",
        global = true
    )]
    pub storage_key: String,

    #[arg(
        long,
        env = "CATALOG_NOTIFICATION_TTL_MS",
        value_name = "MS",
        default_value_t = 5000,
        help = "Notification lifetime in milliseconds",
        global = true
    )]
    pub notification_ttl_ms: u64,

    #[arg(
        long,
        env = "CATALOG_SEED",
        value_name = "FILE",
        help = "JSON seed dataset used when no snapshot is stored",
        global = true
    )]
    pub seed: Option<PathBuf>,

    #[arg(
        long,
        help = "Work on an in-memory copy of the snapshot; nothing is written to disk",
        global = true
    )]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the catalog
    List,
    /// Add a product (the form)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        reference: String,
        #[arg(long, allow_hyphen_values = true)]
        price: String,
        #[arg(long, allow_hyphen_values = true)]
        rating: String,
    },
    /// Edit cells of an existing product (the grid)
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        rating: Option<String>,
    },
}

impl CliArgs {
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            storage_key: self.storage_key.clone(),
            notification_ttl: Duration::from_millis(self.notification_ttl_ms),
            ..CatalogConfig::default()
        }
    }
}
