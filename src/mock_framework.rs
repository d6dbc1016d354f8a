//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_update`] to assert behavior.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use tokio::sync::{mpsc, watch};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client talks to a channel the test controls instead of a running
/// `ResourceActor`, so the test can answer each request with success, failure or
/// nothing at all. The change feed starts empty and never updates.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, changes) = watch::channel(Vec::new());
    (ResourceClient::new(sender, changes), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Draft, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::clients::ProductClient;
    use crate::domain::{Product, ProductDraft, ProductPatch};
    use crate::product_actor::{Field, ProductError, ValidationError};

    #[tokio::test]
    async fn test_add_forwards_draft() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let add_task = tokio::spawn(async move {
            client.add_product(ProductDraft::new("Stool", "ST-1", 45.0, 3.0)).await
        });

        let (draft, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(draft.reference, "ST-1");
        responder.send(Ok(Product::new(9, "Stool", "ST-1", 45.0, 3.0))).unwrap();

        let result = add_task.await.unwrap();
        assert_eq!(result.map(|p| p.id), Ok(9));
    }

    #[tokio::test]
    async fn test_edit_merges_patch_into_stored_row() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let edit_task = tokio::spawn(async move {
            let patch = ProductPatch {
                rating: Some(4.5),
                ..ProductPatch::default()
            };
            client.edit_product(3, patch).await
        });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 3);
        responder.send(Ok(Some(Product::new(3, "Rug", "RUG-3", 80.0, 2.0)))).unwrap();

        let (entity, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(entity, Product::new(3, "Rug", "RUG-3", 80.0, 4.5));
        responder.send(Ok(entity.clone())).unwrap();

        assert_eq!(edit_task.await.unwrap(), Ok(entity));
    }

    #[tokio::test]
    async fn test_edit_of_missing_row_sends_no_update() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let edit_task = tokio::spawn(async move { client.edit_product(42, ProductPatch::default()).await });

        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        responder.send(Ok(None)).unwrap();

        assert_eq!(edit_task.await.unwrap(), Err(ProductError::NotFound("42".into())));
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_rejection_maps_to_validation_error() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let update_task = tokio::spawn(async move {
            client.update_product(Product::new(1, "A", "R1", -5.0, 3.0)).await
        });

        let (_, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        responder
            .send(Err(FrameworkError::Rejected(ValidationError::InvalidRange(Field::Price))))
            .unwrap();

        assert_eq!(
            update_task.await.unwrap(),
            Err(ProductError::Validation(ValidationError::InvalidRange(Field::Price)))
        );
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let list_task = tokio::spawn(async move { client.list_products().await });
        let request = receiver.recv().await.expect("Expected List request");
        drop(request);

        assert!(matches!(
            list_task.await.unwrap(),
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
