//! CreatePriceHandler - persists a price rule with a store-allocated tier.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::catalog::{CatalogError, CurrencyCode, Price, PriceDraft, ValidityWindow};
use crate::domain::foundation::{BrandId, ProductId};
use crate::ports::PriceRepository;

/// Command to create a price rule.
///
/// `tier` may carry a value copied from an earlier read; the store ignores
/// it and allocates the next ordinal for the (product, brand) pair.
#[derive(Debug, Clone)]
pub struct CreatePriceCommand {
    pub brand_id: i64,
    pub product_id: i64,
    pub tier: Option<u32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub priority: u32,
    pub amount: Decimal,
    pub currency: String,
}

/// Handler for price rule creation.
pub struct CreatePriceHandler {
    prices: Arc<dyn PriceRepository>,
}

impl CreatePriceHandler {
    pub fn new(prices: Arc<dyn PriceRepository>) -> Self {
        Self { prices }
    }

    pub async fn handle(&self, cmd: CreatePriceCommand) -> Result<Price, CatalogError> {
        let brand_id = BrandId::new(cmd.brand_id)?;
        let product_id = ProductId::new(cmd.product_id)?;
        let window = ValidityWindow::new(cmd.start_date, cmd.end_date)?;
        let currency = CurrencyCode::new(cmd.currency)?;

        let draft = PriceDraft::new(
            brand_id,
            product_id,
            window,
            cmd.priority,
            cmd.amount,
            currency,
        )?;

        if let Some(tier) = cmd.tier {
            tracing::debug!(tier, "ignoring caller-supplied price tier");
        }

        Ok(self.prices.create(&draft).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use chrono::TimeZone;

    fn cmd(tier: Option<u32>) -> CreatePriceCommand {
        CreatePriceCommand {
            brand_id: 1,
            product_id: 35455,
            tier,
            start_date: Utc.with_ymd_and_hms(2020, 6, 14, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap(),
            priority: 0,
            amount: "35.50".parse().unwrap(),
            currency: "EUR".to_string(),
        }
    }

    fn handler() -> (Arc<InMemoryCatalog>, CreatePriceHandler) {
        let catalog = Arc::new(InMemoryCatalog::new());
        (catalog.clone(), CreatePriceHandler::new(catalog))
    }

    #[tokio::test]
    async fn first_rule_for_pair_gets_tier_one() {
        let (_, handler) = handler();
        let price = handler.handle(cmd(None)).await.unwrap();
        assert_eq!(price.tier(), 1);
    }

    #[tokio::test]
    async fn subsequent_rules_increment_the_tier() {
        let (_, handler) = handler();
        handler.handle(cmd(None)).await.unwrap();
        handler.handle(cmd(None)).await.unwrap();
        let third = handler.handle(cmd(None)).await.unwrap();
        assert_eq!(third.tier(), 3);
    }

    #[tokio::test]
    async fn caller_supplied_tier_is_overwritten() {
        let (_, handler) = handler();
        let price = handler.handle(cmd(Some(42))).await.unwrap();
        assert_eq!(price.tier(), 1);
    }

    #[tokio::test]
    async fn inverted_window_is_bad_request() {
        let (catalog, handler) = handler();
        let mut inverted = cmd(None);
        std::mem::swap(&mut inverted.start_date, &mut inverted.end_date);

        let err = handler.handle(inverted).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest { .. }));
        assert_eq!(catalog.price_count(), 0);
    }

    #[tokio::test]
    async fn non_positive_amount_is_bad_request() {
        let (_, handler) = handler();
        let mut bad = cmd(None);
        bad.amount = Decimal::ZERO;
        let err = handler.handle(bad).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn four_letter_currency_is_bad_request() {
        let (_, handler) = handler();
        let mut bad = cmd(None);
        bad.currency = "EURO".to_string();
        let err = handler.handle(bad).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn negative_brand_id_is_bad_request() {
        let (catalog, handler) = handler();
        let mut bad = cmd(None);
        bad.brand_id = -1;
        let err = handler.handle(bad).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest { .. }));
        assert_eq!(catalog.price_count(), 0);
    }
}
