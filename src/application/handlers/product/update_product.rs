//! UpdateProductHandler - applies field changes and re-synchronizes edges.

use std::sync::Arc;

use crate::application::handlers::price::FindPricesHandler;
use crate::application::synchronizer::BrandLinkSynchronizer;
use crate::domain::catalog::{Category, CatalogError, Price, Product};
use crate::domain::foundation::{BrandId, PriceId, ProductId, UserId};
use crate::ports::ProductRepository;

/// Command to update a product.
///
/// `price_ids` replaces the attached rule collection; unknown ids are
/// skipped by the batch lookup. `brand_ids` is the product's new declared
/// brand set.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: i64,
    pub name: String,
    pub owner_user_id: i64,
    pub category: Category,
    pub brand_ids: Vec<i64>,
    pub price_ids: Vec<i64>,
}

/// Handler for product updates.
pub struct UpdateProductHandler {
    products: Arc<dyn ProductRepository>,
    prices: Arc<FindPricesHandler>,
    synchronizer: Arc<BrandLinkSynchronizer>,
}

impl UpdateProductHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        prices: Arc<FindPricesHandler>,
        synchronizer: Arc<BrandLinkSynchronizer>,
    ) -> Self {
        Self {
            products,
            prices,
            synchronizer,
        }
    }

    pub async fn handle(&self, cmd: UpdateProductCommand) -> Result<Product, CatalogError> {
        let id = ProductId::new(cmd.id)?;
        let owner = UserId::new(cmd.owner_user_id)?;
        let brand_ids = cmd
            .brand_ids
            .iter()
            .map(|raw| BrandId::new(*raw))
            .collect::<Result<Vec<_>, _>>()?;
        let price_ids = cmd
            .price_ids
            .iter()
            .map(|raw| PriceId::new(*raw))
            .collect::<Result<Vec<_>, _>>()?;

        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(format!("id {}", cmd.id)))?;

        product.rename(cmd.name)?;
        product.change_owner(owner);
        product.recategorize(cmd.category);

        let resolved = self.prices.handle(&price_ids).await?;
        product.set_price_ids(resolved.iter().map(Price::id).collect());

        self.synchronizer.synchronize(id, &brand_ids).await?;
        self.products.update(&product).await?;

        Ok(product)
    }
}
