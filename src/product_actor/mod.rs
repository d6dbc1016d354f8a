//! Product-specific catalog logic: validation rules and the entity hooks that plug
//! products into the resource actor.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;

use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::domain::Product;
use crate::notification::Notifier;
use crate::persistence::SnapshotSlot;

/// Creates a new Product actor and its client, restoring the catalog from `slot`
/// or from `seed` when nothing valid is stored.
pub fn new(
    buffer_size: usize,
    slot: SnapshotSlot,
    notifier: Notifier,
    seed: Vec<Product>,
) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::initialize(buffer_size, slot, notifier, seed);
    let client = ProductClient::new(generic_client);

    (actor, client)
}
