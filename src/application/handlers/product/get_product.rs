//! GetProductHandler - fetches a product by id.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Product};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Handler for product lookup.
pub struct GetProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl GetProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, id: i64) -> Result<Product, CatalogError> {
        let id = ProductId::new(id)?;
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(format!("id {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::domain::catalog::{Category, NewProduct};
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn returns_stored_product() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let stored = ProductRepository::create(
            catalog.as_ref(),
            &NewProduct::new("Product 1", UserId::new(1).unwrap(), Category::Shoes).unwrap(),
        )
        .await
        .unwrap();

        let handler = GetProductHandler::new(catalog);
        let found = handler.handle(stored.id().as_i64()).await.unwrap();
        assert_eq!(found.name(), "Product 1");
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let handler = GetProductHandler::new(Arc::new(InMemoryCatalog::new()));
        let err = handler.handle(99).await.unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn non_positive_id_is_bad_request() {
        let handler = GetProductHandler::new(Arc::new(InMemoryCatalog::new()));
        let err = handler.handle(-5).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest { .. }));
    }
}
