mod domain;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod notification;
mod persistence;
mod product_actor;
mod seed;
mod storage;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, CatalogSystem, CliArgs, Command};
use crate::domain::{parse_number, Product, ProductDraft, ProductPatch};
use crate::notification::{Notification, Severity};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();
    setup_tracing();

    let seed = match &args.seed {
        Some(path) => seed::load_seed_file(path),
        None => seed::default_products(),
    }
    .context("loading seed dataset")?;

    let config = args.config();
    let store = open_store(&args, &config.storage_key)?;
    let system = CatalogSystem::new(&config, store, seed);
    let client = &system.product_client;

    let span = tracing::info_span!("command", command = ?args.command);
    let outcome = async {
        match args.command.clone() {
            Command::List => client.list_products().await.map(|products| print_catalog(&products)),
            Command::Add { name, reference, price, rating } => {
                let draft = ProductDraft::from_form(name, reference, &price, &rating);
                client.add_product(draft).await.map(|product| print_catalog(&[product]))
            }
            Command::Edit { id, name, reference, price, rating } => {
                let patch = ProductPatch {
                    name,
                    reference,
                    price: price.as_deref().map(parse_number),
                    rating: rating.as_deref().map(parse_number),
                };
                client.edit_product(id, patch).await.map(|product| print_catalog(&[product]))
            }
        }
    }
    .instrument(span)
    .await;

    let banner = system.notifier.current();
    if let Some(notification) = &banner {
        print_notification(notification);
        system.notifier.clear();
    }

    system.shutdown().await.context("stopping catalog service")?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            // Rejections already produced an error banner.
            if !banner.is_some_and(|n| n.severity == Severity::Error) {
                eprintln!("error: {e}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// The snapshot directory, or an in-memory copy of its slot for `--dry-run`.
fn open_store(args: &CliArgs, key: &str) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let files = FileStore::new(&args.data_dir);
    if !args.dry_run {
        info!(dir = %files.dir().display(), "Using file storage");
        return Ok(Arc::new(files));
    }

    let memory = MemoryStore::new();
    if let Some(raw) = files.get(key).context("reading snapshot for dry run")? {
        memory.set(key, &raw)?;
    }
    info!("Dry run, changes will not be saved");
    Ok(Arc::new(memory))
}

fn print_catalog(products: &[Product]) {
    println!("{:>4}  {:<28} {:<12} {:>10} {:>6}", "ID", "NAME", "REFERENCE", "PRICE", "RATING");
    for p in products {
        println!(
            "{:>4}  {:<28} {:<12} {:>10.2} {:>6.1}",
            p.id, p.name, p.reference, p.price, p.rating
        );
    }
}

fn print_notification(notification: &Notification) {
    match notification.severity {
        Severity::Success => println!("[success] {}", notification.text),
        Severity::Error => eprintln!("[error] {}", notification.text),
    }
}
