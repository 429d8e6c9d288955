//! DeleteBrandHandler - removes a brand by id or by unique name.

use std::sync::Arc;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::BrandId;
use crate::ports::BrandRepository;

/// Handler for brand deletion.
pub struct DeleteBrandHandler {
    brands: Arc<dyn BrandRepository>,
}

impl DeleteBrandHandler {
    pub fn new(brands: Arc<dyn BrandRepository>) -> Self {
        Self { brands }
    }

    pub async fn by_id(&self, id: i64) -> Result<(), CatalogError> {
        let id = BrandId::new(id)?;
        if self.brands.find_by_id(id).await?.is_none() {
            return Err(CatalogError::brand_not_found(format!("id {}", id)));
        }
        Ok(self.brands.delete_by_id(id).await?)
    }

    pub async fn by_name(&self, name: &str) -> Result<(), CatalogError> {
        if self.brands.find_by_name(name).await?.is_none() {
            return Err(CatalogError::brand_not_found(format!("name '{}'", name)));
        }
        Ok(self.brands.delete_by_name(name).await?)
    }
}
