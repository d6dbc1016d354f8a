use crate::actor_framework::Entity;
use crate::domain::{Product, ProductDraft};
use super::error::ValidationError;
use super::validation::validate;

impl Entity for Product {
    type Id = u64;
    type Draft = ProductDraft;
    type Error = ValidationError;

    const CREATED_MESSAGE: &'static str = "Product added!";
    const UPDATED_MESSAGE: &'static str = "Product successfully updated";

    fn id(&self) -> u64 {
        self.id
    }

    /// Identifiers are positive.
    fn has_valid_id(&self) -> bool {
        self.id > 0
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.reference)
    }

    /// One past the highest id in use, or 1 for an empty catalog. Gaps are never refilled.
    fn next_id(existing: &[Self]) -> u64 {
        existing.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
    }

    /// Creates a new Product from a validated draft.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the catalog actor
    /// * `draft` - Name, reference, price and rating as submitted by the form
    fn from_draft(id: u64, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            reference: draft.reference,
            price: draft.price,
            rating: draft.rating,
        }
    }

    /// Validates a new product. Any existing product with the same reference is a conflict.
    fn validate_create(draft: &ProductDraft, existing: &[Self]) -> Result<(), ValidationError> {
        validate(&draft.candidate(), existing)
    }

    /// Validates an edited product. Its own stored row does not count as a conflict.
    fn validate_update(&self, existing: &[Self]) -> Result<(), ValidationError> {
        validate(&self.candidate(), existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id() {
        assert_eq!(Product::next_id(&[]), 1);

        let catalog = vec![
            Product::new(7, "A", "R1", 1.0, 1.0),
            Product::new(2, "B", "R2", 1.0, 1.0),
        ];
        assert_eq!(Product::next_id(&catalog), 8);
    }

    #[test]
    fn test_from_draft_keeps_fields() {
        let product = Product::from_draft(4, ProductDraft::new("Lamp", "L-4", 19.9, 4.0));
        assert_eq!(product, Product::new(4, "Lamp", "L-4", 19.9, 4.0));
    }
}
