use std::fmt;
use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Product fields checked by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Reference,
    Price,
    Rating,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "Name",
            Field::Reference => "Reference",
            Field::Price => "Price",
            Field::Rating => "Rating",
        };
        f.write_str(label)
    }
}

/// Reasons a product candidate is rejected. State is never touched when one is raised.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} cannot be empty.")]
    EmptyField(Field),
    #[error("Reference must be unique.")]
    DuplicateReference(String),
    #[error("{}", range_message(.0))]
    InvalidRange(Field),
}

fn range_message(field: &Field) -> &'static str {
    match field {
        Field::Price => "Price cannot be less than 0 euros.",
        Field::Rating => "Rating must be between 0 and 5.",
        Field::Name | Field::Reference => "Value is out of range.",
    }
}

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<ValidationError>> for ProductError {
    fn from(err: FrameworkError<ValidationError>) -> Self {
        match err {
            FrameworkError::Rejected(e) => ProductError::Validation(e),
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
