use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::notification::Notifier;
use crate::persistence::SnapshotSlot;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with validation hooks)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Id: Copy + Eq + Hash + Display + Debug + Send + Sync + 'static;
    /// Payload for creating a new entity. Carries no id.
    type Draft: Send + Sync + Debug + 'static;
    /// Why a draft or an edited entity was rejected.
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Success banner after a create.
    const CREATED_MESSAGE: &'static str;
    /// Success banner after an update.
    const UPDATED_MESSAGE: &'static str;

    fn id(&self) -> Self::Id;

    /// Ids loaded from storage are checked with this. Defaults to accepting all.
    fn has_valid_id(&self) -> bool {
        true
    }

    /// A secondary key that must be unique across the collection, if the entity has one.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// The id the next created entity receives, given the current collection.
    fn next_id(existing: &[Self]) -> Self::Id;

    /// Construct the full Entity from the assigned ID and the draft
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    // --- Validation Hooks ---

    fn validate_create(draft: &Self::Draft, existing: &[Self]) -> Result<(), Self::Error>;
    fn validate_update(&self, existing: &[Self]) -> Result<(), Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("{0}")]
    Rejected(E),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        draft: T::Draft,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        entity: T,
        respond_to: Response<T, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the ordered collection. Every successful mutation is persisted as a full
/// snapshot, published to subscribers and announced through the notifier.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    items: Vec<T>,
    slot: SnapshotSlot,
    notifier: Notifier,
    changes: watch::Sender<Vec<T>>,
}

impl<T: Entity> ResourceActor<T> {
    /// Loads the persisted snapshot, falling back to `seed` when the slot is empty
    /// or unreadable, and returns the actor together with its client.
    #[instrument(name = "resource_init", skip(slot, notifier, seed), fields(key = %slot.key()))]
    pub fn initialize(
        buffer_size: usize,
        slot: SnapshotSlot,
        notifier: Notifier,
        seed: Vec<T>,
    ) -> (Self, ResourceClient<T>) {
        let items = match slot.load::<T>() {
            Ok(Some(items)) => {
                info!(count = items.len(), "Restored persisted snapshot");
                items
            }
            Ok(None) => {
                info!(count = seed.len(), "No persisted snapshot, using seed data");
                seed
            }
            Err(e) => {
                warn!(error = %e, count = seed.len(), "Could not restore snapshot, using seed data");
                seed
            }
        };

        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, changes_rx) = watch::channel(items.clone());
        let actor = Self {
            receiver,
            items,
            slot,
            notifier,
            changes,
        };
        actor.persist();

        let client = ResourceClient::new(sender, changes_rx);
        (actor, client)
    }

    /// Main actor loop. Runs until every client has been dropped.
    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!(count = self.items.len(), "Service starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { draft, respond_to } => {
                    let _ = respond_to.send(self.handle_create(draft));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.items.iter().find(|item| item.id() == id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                ResourceRequest::Update { entity, respond_to } => {
                    let _ = respond_to.send(self.handle_update(entity));
                }
            }
        }

        info!("Service stopped");
    }

    #[instrument(skip(self, draft))]
    fn handle_create(&mut self, draft: T::Draft) -> Result<T, FrameworkError<T::Error>> {
        debug!(?draft, "Processing create request");

        if let Err(e) = T::validate_create(&draft, &self.items) {
            error!(error = %e, "Validation failed");
            self.notifier.error(e.to_string());
            return Err(FrameworkError::Rejected(e));
        }

        let id = T::next_id(&self.items);
        let item = T::from_draft(id, draft);
        self.items.push(item.clone());
        self.commit(T::CREATED_MESSAGE);

        info!(id = %id, "Item created successfully");
        Ok(item)
    }

    #[instrument(fields(id = %entity.id()), skip(self, entity))]
    fn handle_update(&mut self, entity: T) -> Result<T, FrameworkError<T::Error>> {
        debug!("Processing update request");

        if let Err(e) = entity.validate_update(&self.items) {
            error!(error = %e, "Validation failed");
            self.notifier.error(e.to_string());
            return Err(FrameworkError::Rejected(e));
        }

        let id = entity.id();
        let Some(stored) = self.items.iter_mut().find(|item| item.id() == id) else {
            let e = FrameworkError::NotFound(id.to_string());
            error!(error = %e, "Update target missing");
            self.notifier.error(e.to_string());
            return Err(e);
        };
        *stored = entity.clone();
        self.commit(T::UPDATED_MESSAGE);

        info!("Item updated successfully");
        Ok(entity)
    }

    fn commit(&self, message: &str) {
        self.persist();
        self.changes.send_replace(self.items.clone());
        self.notifier.success(message);
    }

    // A failed write leaves the in-memory collection authoritative.
    fn persist(&self) {
        if let Err(e) = self.slot.save(&self.items) {
            error!(error = %e, "Snapshot write failed");
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    changes: watch::Receiver<Vec<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, changes: watch::Receiver<Vec<T>>) -> Self {
        Self { sender, changes }
    }

    pub async fn create(&self, draft: T::Draft) -> Result<T, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Create { draft, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Get { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::List { respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, entity: T) -> Result<T, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Update { entity, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Watch handle over the collection; it changes after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.changes.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use serde::Deserialize;
    use std::sync::Arc;
    use std::time::Duration;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Tag {
        id: u32,
        label: String,
    }

    #[derive(Debug, Clone, Error, PartialEq)]
    #[error("label required")]
    struct EmptyLabel;

    impl Entity for Tag {
        type Id = u32;
        type Draft = String;
        type Error = EmptyLabel;

        const CREATED_MESSAGE: &'static str = "Tag added";
        const UPDATED_MESSAGE: &'static str = "Tag renamed";

        fn id(&self) -> u32 {
            self.id
        }

        fn next_id(existing: &[Self]) -> u32 {
            existing.len() as u32 + 1
        }

        fn from_draft(id: u32, label: String) -> Self {
            Self { id, label }
        }

        fn validate_create(label: &String, _existing: &[Self]) -> Result<(), EmptyLabel> {
            if label.is_empty() { Err(EmptyLabel) } else { Ok(()) }
        }

        fn validate_update(&self, _existing: &[Self]) -> Result<(), EmptyLabel> {
            if self.label.is_empty() { Err(EmptyLabel) } else { Ok(()) }
        }
    }

    fn start(store: &MemoryStore, seed: Vec<Tag>) -> (ResourceClient<Tag>, Notifier) {
        let notifier = Notifier::new(Duration::from_secs(5));
        let slot = SnapshotSlot::new(Arc::new(store.clone()), "tags");
        let (actor, client) = ResourceActor::initialize(10, slot, notifier.clone(), seed);
        tokio::spawn(actor.run());
        (client, notifier)
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let store = MemoryStore::new();
        let (client, notifier) = start(&store, vec![]);

        // 1. Create
        let tag = client.create("urgent".to_string()).await.unwrap();
        assert_eq!(tag, Tag { id: 1, label: "urgent".into() });
        assert_eq!(notifier.current().unwrap().text, "Tag added");

        // 2. Rejected create leaves state alone
        let err = client.create(String::new()).await.unwrap_err();
        assert_eq!(err, FrameworkError::Rejected(EmptyLabel));
        assert_eq!(client.list().await.unwrap().len(), 1);

        // 3. Update
        let renamed = client.update(Tag { id: 1, label: "later".into() }).await.unwrap();
        assert_eq!(client.get(1).await.unwrap(), Some(renamed));

        // 4. Update of a missing id
        let err = client.update(Tag { id: 9, label: "x".into() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("9".into()));

        // 5. Snapshot reflects the last successful write
        let raw = store.get("tags").unwrap().unwrap();
        assert_eq!(raw, r#"[{"id":1,"label":"later"}]"#);
    }

    #[tokio::test]
    async fn test_subscribers_receive_new_collection() {
        let store = MemoryStore::new();
        let (client, _) = start(&store, vec![Tag { id: 1, label: "a".into() }]);
        let mut changes = client.subscribe();
        assert_eq!(changes.borrow_and_update().len(), 1);

        client.create("b".to_string()).await.unwrap();
        changes.changed().await.unwrap();
        assert_eq!(changes.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let store = MemoryStore::new();
        let notifier = Notifier::new(Duration::from_secs(5));
        let slot = SnapshotSlot::new(Arc::new(store), "tags");
        let (actor, client) = ResourceActor::<Tag>::initialize(10, slot, notifier, vec![]);
        drop(actor);

        assert_eq!(client.list().await.unwrap_err(), FrameworkError::ActorClosed);
    }
}
