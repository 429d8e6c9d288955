//! CreateProductHandler - creates a product and links its brands.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::application::synchronizer::BrandLinkSynchronizer;
use crate::domain::catalog::{Category, CatalogError, NewProduct, Product};
use crate::domain::foundation::{BrandId, UserId};
use crate::ports::{BrandRepository, ProductRepository};

/// Command to create a product.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub owner_user_id: i64,
    pub category: Category,
    pub brand_ids: Vec<i64>,
}

/// Handler for product creation.
///
/// Sequencing: verify all requested brands exist, reject duplicate
/// fingerprints, persist the product, then synchronize the brand edges.
/// A missing brand fails the whole operation before the product or any
/// edge is persisted.
pub struct CreateProductHandler {
    products: Arc<dyn ProductRepository>,
    brands: Arc<dyn BrandRepository>,
    synchronizer: Arc<BrandLinkSynchronizer>,
}

impl CreateProductHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        brands: Arc<dyn BrandRepository>,
        synchronizer: Arc<BrandLinkSynchronizer>,
    ) -> Self {
        Self {
            products,
            brands,
            synchronizer,
        }
    }

    pub async fn handle(&self, cmd: CreateProductCommand) -> Result<Product, CatalogError> {
        let owner = UserId::new(cmd.owner_user_id)?;
        if cmd.brand_ids.is_empty() {
            return Err(CatalogError::bad_request("brand_ids", "cannot be empty"));
        }
        let brand_ids = cmd
            .brand_ids
            .iter()
            .map(|id| BrandId::new(*id))
            .collect::<Result<Vec<_>, _>>()?;

        let distinct: BTreeSet<BrandId> = brand_ids.iter().copied().collect();
        let existing = self
            .brands
            .find_all_by_ids(&distinct.iter().copied().collect::<Vec<_>>())
            .await?;
        if existing.len() != distinct.len() {
            return Err(CatalogError::brand_not_found(
                "some of the provided brands do not exist",
            ));
        }

        let new_product = NewProduct::new(cmd.name, owner, cmd.category)?;
        if self
            .products
            .exists_by_fingerprint(&new_product.fingerprint())
            .await?
        {
            return Err(CatalogError::already_exists(
                "a product with the same attributes already exists",
            ));
        }

        let product = self.products.create(&new_product).await?;
        self.synchronizer.synchronize(product.id(), &brand_ids).await?;

        Ok(product)
    }
}
