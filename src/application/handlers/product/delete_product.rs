//! DeleteProductHandler - removes a product, its edges, and its price rules.

use std::sync::Arc;

use crate::application::synchronizer::BrandLinkSynchronizer;
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Handler for product deletion.
///
/// Brand edges are pruned first (synchronizing with an empty set) so the
/// symmetric association invariant still holds once the row is gone; the
/// store then cascades deletion of the owned price rules.
pub struct DeleteProductHandler {
    products: Arc<dyn ProductRepository>,
    synchronizer: Arc<BrandLinkSynchronizer>,
}

impl DeleteProductHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        synchronizer: Arc<BrandLinkSynchronizer>,
    ) -> Self {
        Self {
            products,
            synchronizer,
        }
    }

    pub async fn handle(&self, id: i64) -> Result<(), CatalogError> {
        let id = ProductId::new(id)?;
        if self.products.find_by_id(id).await?.is_none() {
            return Err(CatalogError::product_not_found(format!("id {}", id)));
        }

        self.synchronizer.synchronize(id, &[]).await?;
        Ok(self.products.delete_by_id(id).await?)
    }
}
