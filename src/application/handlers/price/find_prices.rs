//! FindPricesHandler - batch lookup of price rules by id.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Price};
use crate::domain::foundation::PriceId;
use crate::ports::PriceRepository;

/// Handler for batch price lookup.
pub struct FindPricesHandler {
    prices: Arc<dyn PriceRepository>,
}

impl FindPricesHandler {
    pub fn new(prices: Arc<dyn PriceRepository>) -> Self {
        Self { prices }
    }

    /// Returns the rules matching the ids; missing ids are skipped.
    ///
    /// An empty id list short-circuits without querying the store.
    pub async fn handle(&self, ids: &[PriceId]) -> Result<Vec<Price>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.prices.find_all_by_ids(ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::domain::catalog::{CurrencyCode, PriceDraft, ValidityWindow};
    use crate::domain::foundation::{BrandId, ProductId};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    async fn seeded() -> (Arc<InMemoryCatalog>, Vec<PriceId>) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let mut ids = Vec::new();
        for _ in 0..2 {
            let draft = PriceDraft::new(
                BrandId::new(1).unwrap(),
                ProductId::new(35455).unwrap(),
                ValidityWindow::new(
                    Utc.with_ymd_and_hms(2020, 6, 14, 0, 0, 0).unwrap(),
                    Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap(),
                )
                .unwrap(),
                0,
                "35.50".parse::<Decimal>().unwrap(),
                CurrencyCode::new("EUR").unwrap(),
            )
            .unwrap();
            let price = PriceRepository::create(catalog.as_ref(), &draft).await.unwrap();
            ids.push(price.id());
        }
        (catalog, ids)
    }

    #[tokio::test]
    async fn empty_id_list_returns_empty_without_store_access() {
        let handler = FindPricesHandler::new(Arc::new(InMemoryCatalog::new()));
        let found = handler.handle(&[]).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn returns_rules_for_known_ids() {
        let (catalog, ids) = seeded().await;
        let handler = FindPricesHandler::new(catalog);
        let found = handler.handle(&ids).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn missing_ids_are_silently_skipped() {
        let (catalog, mut ids) = seeded().await;
        ids.push(PriceId::new(999).unwrap());
        let handler = FindPricesHandler::new(catalog);
        let found = handler.handle(&ids).await.unwrap();
        assert_eq!(found.len(), 2);
    }
}
