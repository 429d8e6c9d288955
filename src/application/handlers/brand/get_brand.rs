//! GetBrandHandler - fetches a brand by id or by unique name.

use std::sync::Arc;

use crate::domain::catalog::{Brand, CatalogError};
use crate::domain::foundation::BrandId;
use crate::ports::BrandRepository;

/// Handler for brand lookup.
pub struct GetBrandHandler {
    brands: Arc<dyn BrandRepository>,
}

impl GetBrandHandler {
    pub fn new(brands: Arc<dyn BrandRepository>) -> Self {
        Self { brands }
    }

    pub async fn by_id(&self, id: i64) -> Result<Brand, CatalogError> {
        let id = BrandId::new(id)?;
        self.brands
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::brand_not_found(format!("id {}", id)))
    }

    pub async fn by_name(&self, name: &str) -> Result<Brand, CatalogError> {
        self.brands
            .find_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::brand_not_found(format!("name '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::domain::catalog::NewBrand;
    use crate::domain::foundation::UserId;

    async fn seeded() -> (BrandId, GetBrandHandler) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let brand = BrandRepository::create(
            catalog.as_ref(),
            &NewBrand::new("Brand 1", UserId::new(1).unwrap()).unwrap(),
        )
        .await
        .unwrap();
        (brand.id(), GetBrandHandler::new(catalog))
    }

    #[tokio::test]
    async fn finds_brand_by_id() {
        let (id, handler) = seeded().await;
        let brand = handler.by_id(id.as_i64()).await.unwrap();
        assert_eq!(brand.name(), "Brand 1");
    }

    #[tokio::test]
    async fn finds_brand_by_name() {
        let (id, handler) = seeded().await;
        let brand = handler.by_name("Brand 1").await.unwrap();
        assert_eq!(brand.id(), id);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (_, handler) = seeded().await;
        let err = handler.by_id(99).await.unwrap_err();
        assert!(matches!(err, CatalogError::BrandNotFound(_)));
    }

    #[tokio::test]
    async fn unknown_name_is_not_found() {
        let (_, handler) = seeded().await;
        let err = handler.by_name("Nope").await.unwrap_err();
        assert!(matches!(err, CatalogError::BrandNotFound(_)));
    }

    #[tokio::test]
    async fn non_positive_id_is_bad_request() {
        let (_, handler) = seeded().await;
        let err = handler.by_id(0).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest { .. }));
    }
}
