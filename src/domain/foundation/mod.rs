//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and error types that form the vocabulary of the
//! pricing catalog domain.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BrandId, PriceId, ProductId, UserId};
