//! Brand repository port.
//!
//! The brand rows own the brand/product edge list, so this port also carries
//! the reverse lookup (`find_by_product_id`) and the atomic multi-row update
//! (`update_all`) that the relationship synchronizer relies on.

use async_trait::async_trait;

use crate::domain::catalog::{Brand, NewBrand};
use crate::domain::foundation::{BrandId, DomainError, ProductId};

/// Repository port for Brand persistence.
///
/// Implementations must enforce name uniqueness (`DuplicateBrand` on
/// violation) and make `update_all` atomic: either every brand in the slice
/// is persisted or none is.
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// Persist a new brand and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `DuplicateBrand` if the name is already taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, brand: &NewBrand) -> Result<Brand, DomainError>;

    /// Update an existing brand.
    ///
    /// # Errors
    ///
    /// - `BrandNotFound` if the brand doesn't exist
    /// - `DuplicateBrand` if renaming collides with another brand
    async fn update(&self, brand: &Brand) -> Result<(), DomainError>;

    /// Update several brands in one atomic write.
    ///
    /// Used by edge synchronization so a failure partway leaves no partial
    /// edge changes committed.
    async fn update_all(&self, brands: &[Brand]) -> Result<(), DomainError>;

    /// Find a brand by its id. Returns `None` if absent.
    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, DomainError>;

    /// Find a brand by its unique name. Returns `None` if absent.
    async fn find_by_name(&self, name: &str) -> Result<Option<Brand>, DomainError>;

    /// Batch lookup. Missing ids are silently skipped.
    async fn find_all_by_ids(&self, ids: &[BrandId]) -> Result<Vec<Brand>, DomainError>;

    /// Reverse lookup: all brands whose product list contains the product.
    async fn find_by_product_id(&self, product_id: ProductId) -> Result<Vec<Brand>, DomainError>;

    /// Delete a brand by id.
    ///
    /// # Errors
    ///
    /// - `BrandNotFound` if the brand doesn't exist
    async fn delete_by_id(&self, id: BrandId) -> Result<(), DomainError>;

    /// Delete a brand by its unique name.
    ///
    /// # Errors
    ///
    /// - `BrandNotFound` if no brand carries the name
    async fn delete_by_name(&self, name: &str) -> Result<(), DomainError>;
}
