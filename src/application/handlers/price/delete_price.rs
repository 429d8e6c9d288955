//! DeletePriceHandler - removes a price rule matched on its full key.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::catalog::{CatalogError, ValidityWindow};
use crate::domain::foundation::{BrandId, ProductId};
use crate::ports::PriceRepository;

/// Command identifying one price rule by all five key fields.
#[derive(Debug, Clone)]
pub struct DeletePriceCommand {
    pub brand_id: i64,
    pub product_id: i64,
    pub tier: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Handler for exact-key price deletion.
pub struct DeletePriceHandler {
    prices: Arc<dyn PriceRepository>,
}

impl DeletePriceHandler {
    pub fn new(prices: Arc<dyn PriceRepository>) -> Self {
        Self { prices }
    }

    pub async fn handle(&self, cmd: DeletePriceCommand) -> Result<(), CatalogError> {
        let brand_id = BrandId::new(cmd.brand_id)?;
        let product_id = ProductId::new(cmd.product_id)?;
        let window = ValidityWindow::new(cmd.start_date, cmd.end_date)?;

        let price = self
            .prices
            .find_by_exact_key(brand_id, product_id, cmd.tier, &window)
            .await?
            .ok_or(CatalogError::PriceNotFound)?;

        Ok(self.prices.delete(price.id()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::domain::catalog::{CurrencyCode, PriceDraft};
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 14, 0, 0, 0).unwrap()
    }

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap()
    }

    async fn seeded() -> (Arc<InMemoryCatalog>, DeletePriceHandler) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let draft = PriceDraft::new(
            BrandId::new(1).unwrap(),
            ProductId::new(35455).unwrap(),
            ValidityWindow::new(start(), end()).unwrap(),
            0,
            "35.50".parse::<Decimal>().unwrap(),
            CurrencyCode::new("EUR").unwrap(),
        )
        .unwrap();
        PriceRepository::create(catalog.as_ref(), &draft).await.unwrap();
        (catalog.clone(), DeletePriceHandler::new(catalog))
    }

    #[tokio::test]
    async fn exact_key_match_deletes_the_rule() {
        let (catalog, handler) = seeded().await;
        handler
            .handle(DeletePriceCommand {
                brand_id: 1,
                product_id: 35455,
                tier: 1,
                start_date: start(),
                end_date: end(),
            })
            .await
            .unwrap();
        assert_eq!(catalog.price_count(), 0);
    }

    #[tokio::test]
    async fn mismatched_tier_is_not_found_and_deletes_nothing() {
        let (catalog, handler) = seeded().await;
        let err = handler
            .handle(DeletePriceCommand {
                brand_id: 1,
                product_id: 35455,
                tier: 2,
                start_date: start(),
                end_date: end(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::PriceNotFound);
        assert_eq!(catalog.price_count(), 1);
    }

    #[tokio::test]
    async fn mismatched_window_is_not_found_and_deletes_nothing() {
        let (catalog, handler) = seeded().await;
        let err = handler
            .handle(DeletePriceCommand {
                brand_id: 1,
                product_id: 35455,
                tier: 1,
                start_date: start(),
                end_date: Utc.with_ymd_and_hms(2020, 12, 30, 23, 59, 0).unwrap(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::PriceNotFound);
        assert_eq!(catalog.price_count(), 1);
    }

    #[tokio::test]
    async fn mismatched_brand_is_not_found_and_deletes_nothing() {
        let (catalog, handler) = seeded().await;
        let err = handler
            .handle(DeletePriceCommand {
                brand_id: 2,
                product_id: 35455,
                tier: 1,
                start_date: start(),
                end_date: end(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::PriceNotFound);
        assert_eq!(catalog.price_count(), 1);
    }
}
