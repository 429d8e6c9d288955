//! CreateBrandHandler - creates a brand, optionally pre-linking products.

use std::sync::Arc;

use crate::domain::catalog::{Brand, CatalogError, NewBrand, Product};
use crate::domain::foundation::{ProductId, UserId};
use crate::ports::{BrandRepository, ProductRepository};

/// Command to create a brand.
///
/// `product_ids` is optional seeding of the product set; ids that do not
/// resolve are skipped.
#[derive(Debug, Clone)]
pub struct CreateBrandCommand {
    pub name: String,
    pub owner_user_id: i64,
    pub product_ids: Vec<i64>,
}

/// Handler for brand creation.
pub struct CreateBrandHandler {
    brands: Arc<dyn BrandRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CreateBrandHandler {
    pub fn new(brands: Arc<dyn BrandRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { brands, products }
    }

    pub async fn handle(&self, cmd: CreateBrandCommand) -> Result<Brand, CatalogError> {
        let owner = UserId::new(cmd.owner_user_id)?;
        let product_ids = cmd
            .product_ids
            .iter()
            .map(|raw| ProductId::new(*raw))
            .collect::<Result<Vec<_>, _>>()?;

        let resolved = if product_ids.is_empty() {
            Vec::new()
        } else {
            self.products.find_all_by_ids(&product_ids).await?
        };

        let new_brand = NewBrand::new(cmd.name, owner)?
            .with_products(resolved.iter().map(Product::id).collect());

        Ok(self.brands.create(&new_brand).await?)
    }
}
