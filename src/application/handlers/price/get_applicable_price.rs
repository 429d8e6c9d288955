//! GetApplicablePriceHandler - resolves the price governing an instant.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::catalog::{resolution, ApplicablePrice, CatalogError};
use crate::domain::foundation::{BrandId, ProductId};
use crate::ports::PriceRepository;

/// Query for the price applicable to a (product, brand) pair at an instant.
///
/// Ids arrive raw so a caller-supplied `-1` is rejected here rather than
/// at construction time.
#[derive(Debug, Clone)]
pub struct GetApplicablePriceQuery {
    pub product_id: i64,
    pub brand_id: i64,
    pub instant: DateTime<Utc>,
}

/// Handler answering "which price applies now".
pub struct GetApplicablePriceHandler {
    prices: Arc<dyn PriceRepository>,
}

impl GetApplicablePriceHandler {
    pub fn new(prices: Arc<dyn PriceRepository>) -> Self {
        Self { prices }
    }

    pub async fn handle(
        &self,
        query: GetApplicablePriceQuery,
    ) -> Result<ApplicablePrice, CatalogError> {
        // Validation happens before any store access.
        let product_id = ProductId::new(query.product_id)?;
        let brand_id = BrandId::new(query.brand_id)?;

        let candidates = self
            .prices
            .find_applicable(product_id, brand_id, query.instant)
            .await?;

        let selected =
            resolution::select_applicable(&candidates).ok_or(CatalogError::PriceNotFound)?;

        Ok(ApplicablePrice::from(selected))
    }
}
