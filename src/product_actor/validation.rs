//! Product validation rules.
//!
//! Checks run in a fixed order and the first failure wins: name, reference,
//! reference uniqueness, price, rating.

use crate::domain::{Product, ProductDraft};
use super::error::{Field, ValidationError};

/// A borrowed view of a proposed product.
///
/// `id` is `None` when the product is being added and `Some` when an existing
/// product is being edited. It decides which uniqueness rule applies.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub id: Option<u64>,
    pub name: &'a str,
    pub reference: &'a str,
    pub price: f64,
    pub rating: f64,
}

impl ProductDraft {
    pub fn candidate(&self) -> Candidate<'_> {
        Candidate {
            id: None,
            name: &self.name,
            reference: &self.reference,
            price: self.price,
            rating: self.rating,
        }
    }
}

impl Product {
    pub fn candidate(&self) -> Candidate<'_> {
        Candidate {
            id: Some(self.id),
            name: &self.name,
            reference: &self.reference,
            price: self.price,
            rating: self.rating,
        }
    }
}

/// Validates a candidate against the current catalog.
pub fn validate(candidate: &Candidate<'_>, existing: &[Product]) -> Result<(), ValidationError> {
    if candidate.name.trim().is_empty() {
        return Err(ValidationError::EmptyField(Field::Name));
    }

    if candidate.reference.trim().is_empty() {
        return Err(ValidationError::EmptyField(Field::Reference));
    }

    let duplicate = existing.iter().any(|row| {
        row.reference == candidate.reference
            && match candidate.id {
                Some(id) => row.id != id,
                None => true,
            }
    });
    if duplicate {
        return Err(ValidationError::DuplicateReference(candidate.reference.to_string()));
    }

    // NaN fails both comparisons, so finiteness is checked explicitly.
    if !candidate.price.is_finite() || candidate.price < 0.0 {
        return Err(ValidationError::InvalidRange(Field::Price));
    }

    if !candidate.rating.is_finite() || !(0.0..=5.0).contains(&candidate.rating) {
        return Err(ValidationError::InvalidRange(Field::Rating));
    }

    Ok(())
}
