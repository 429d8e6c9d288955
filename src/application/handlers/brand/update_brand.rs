//! UpdateBrandHandler - renames a brand and replaces its product set.

use std::sync::Arc;

use crate::domain::catalog::{Brand, CatalogError, Product};
use crate::domain::foundation::{BrandId, ProductId, UserId};
use crate::ports::{BrandRepository, ProductRepository};

/// Command to update a brand.
///
/// `record_id` is the id carried inside the submitted record; when present
/// it must match `id` - the brand id itself cannot be changed.
#[derive(Debug, Clone)]
pub struct UpdateBrandCommand {
    pub id: i64,
    pub record_id: Option<i64>,
    pub name: String,
    pub owner_user_id: i64,
    pub product_ids: Vec<i64>,
}

/// Handler for brand updates.
pub struct UpdateBrandHandler {
    brands: Arc<dyn BrandRepository>,
    products: Arc<dyn ProductRepository>,
}

impl UpdateBrandHandler {
    pub fn new(brands: Arc<dyn BrandRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { brands, products }
    }

    pub async fn handle(&self, cmd: UpdateBrandCommand) -> Result<Brand, CatalogError> {
        if let Some(record_id) = cmd.record_id {
            if record_id != cmd.id {
                return Err(CatalogError::bad_request(
                    "id",
                    format!("the brand id cannot be changed (got {})", record_id),
                ));
            }
        }
        let id = BrandId::new(cmd.id)?;
        let owner = UserId::new(cmd.owner_user_id)?;
        let product_ids = cmd
            .product_ids
            .iter()
            .map(|raw| ProductId::new(*raw))
            .collect::<Result<Vec<_>, _>>()?;

        let mut brand = self
            .brands
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::brand_not_found(format!("id {}", id)))?;

        brand.rename(cmd.name)?;
        brand.change_owner(owner);

        let resolved = if product_ids.is_empty() {
            Vec::new()
        } else {
            self.products.find_all_by_ids(&product_ids).await?
        };
        brand.set_product_ids(resolved.iter().map(Product::id).collect());

        self.brands.update(&brand).await?;
        Ok(brand)
    }
}
