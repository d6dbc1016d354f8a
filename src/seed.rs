//! Default catalog used when no valid snapshot is stored.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Product;
use crate::persistence::{check_snapshot, PersistenceError};

const DEFAULT_PRODUCTS: &str = include_str!("../data/products.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed seed data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid seed data: {0}")]
    Invalid(#[from] PersistenceError),
}

/// The bundled seed dataset. Each record carries its own id.
pub fn default_products() -> Result<Vec<Product>, SeedError> {
    parse(DEFAULT_PRODUCTS)
}

/// Reads a seed dataset from a JSON file with the same shape as a snapshot.
pub fn load_seed_file(path: &Path) -> Result<Vec<Product>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw)
}

fn parse(raw: &str) -> Result<Vec<Product>, SeedError> {
    let products: Vec<Product> = serde_json::from_str(raw)?;
    check_snapshot(&products)?;
    Ok(products)
}
