//! Product repository port.

use async_trait::async_trait;

use crate::domain::catalog::{Fingerprint, NewProduct, Product};
use crate::domain::foundation::{DomainError, ProductId};

/// Repository port for Product persistence.
///
/// Implementations must keep the fingerprint column in step with the
/// identity fields and cascade price rule deletion on `delete_by_id`.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `DuplicateProduct` if an equal fingerprint is already stored
    /// - `DatabaseError` on persistence failure
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Find a product by its id. Returns `None` if absent.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError>;

    /// Batch lookup. Missing ids are silently skipped.
    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;

    /// Check whether any product carries the fingerprint.
    async fn exists_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<bool, DomainError>;

    /// Delete a product by id, cascading to its owned price rules.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn delete_by_id(&self, id: ProductId) -> Result<(), DomainError>;
}
