use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::app_system::CatalogConfig;
use crate::clients::ProductClient;
use crate::domain::Product;
use crate::notification::Notifier;
use crate::persistence::SnapshotSlot;
use crate::product_actor;
use crate::storage::KeyValueStore;

/// The application system: owns the catalog actor and hands out its client and
/// the notification slot to the UI layer.
pub struct CatalogSystem {
    pub product_client: ProductClient,
    pub notifier: Notifier,
    handle: JoinHandle<()>,
}

impl CatalogSystem {
    /// Restores the catalog from `store` (or `seed`) and starts the actor.
    #[instrument(name = "catalog_system", skip(store, seed), fields(key = %config.storage_key))]
    pub fn new(config: &CatalogConfig, store: Arc<dyn KeyValueStore>, seed: Vec<Product>) -> Self {
        info!("Starting catalog system");

        let notifier = Notifier::new(config.notification_ttl);
        let slot = SnapshotSlot::new(store, config.storage_key.clone());
        let (actor, product_client) = product_actor::new(config.buffer_size, slot, notifier.clone(), seed);
        let handle = tokio::spawn(actor.run());

        info!("Catalog system started successfully");

        Self {
            product_client,
            notifier,
            handle,
        }
    }

    /// Drops the client, which closes the actor's channel, and waits for it to stop.
    ///
    /// Clones of the client held elsewhere keep the actor alive until they are dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down catalog system");
        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Catalog service shutdown error");
            return Err(e);
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}
