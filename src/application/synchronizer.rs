//! Brand link synchronizer.
//!
//! Reconciles a product's declared brand set against the persisted edges.
//! The brand rows own the edge list, so every change is expressed as brand
//! mutations and flushed through one atomic `update_all`.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::catalog::{diff, Brand, CatalogError};
use crate::domain::foundation::{BrandId, ProductId};
use crate::ports::BrandRepository;

/// Edges created and severed by one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub added: Vec<BrandId>,
    pub removed: Vec<BrandId>,
}

impl SyncReport {
    /// True when the run changed nothing.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Reconciles brand/product edges for one product.
pub struct BrandLinkSynchronizer {
    brands: Arc<dyn BrandRepository>,
}

impl BrandLinkSynchronizer {
    pub fn new(brands: Arc<dyn BrandRepository>) -> Self {
        Self { brands }
    }

    /// Makes the persisted edge set for `product_id` equal `target`.
    ///
    /// Fails with `BrandNotFound` before any write when a target id does not
    /// exist; the per-edge writes themselves go through one atomic
    /// `update_all`, so a store failure partway leaves no partial edges.
    /// Re-running with the same target set is a no-op.
    pub async fn synchronize(
        &self,
        product_id: ProductId,
        target: &[BrandId],
    ) -> Result<SyncReport, CatalogError> {
        let distinct: BTreeSet<BrandId> = target.iter().copied().collect();
        let target_ids: Vec<BrandId> = distinct.iter().copied().collect();

        let target_brands = self.brands.find_all_by_ids(&target_ids).await?;
        if target_brands.len() != target_ids.len() {
            let found: BTreeSet<BrandId> = target_brands.iter().map(Brand::id).collect();
            let missing: Vec<String> = distinct
                .difference(&found)
                .map(BrandId::to_string)
                .collect();
            return Err(CatalogError::brand_not_found(format!(
                "some of the provided brands do not exist (ids {})",
                missing.join(", ")
            )));
        }

        let current_brands = self.brands.find_by_product_id(product_id).await?;
        let current_ids: Vec<BrandId> = current_brands.iter().map(Brand::id).collect();

        let changes = diff(&current_ids, &target_ids);
        if changes.is_empty() {
            return Ok(SyncReport::default());
        }

        let mut touched: Vec<Brand> = Vec::new();
        for mut brand in current_brands {
            if changes.removed.contains(&brand.id()) && brand.unlink_product(product_id) {
                touched.push(brand);
            }
        }
        for mut brand in target_brands {
            if changes.added.contains(&brand.id()) && brand.link_product(product_id) {
                touched.push(brand);
            }
        }

        self.brands.update_all(&touched).await?;

        tracing::debug!(
            product_id = %product_id,
            added = changes.added.len(),
            removed = changes.removed.len(),
            "synchronized brand links"
        );

        Ok(SyncReport {
            added: changes.added,
            removed: changes.removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::domain::catalog::NewBrand;
    use crate::domain::foundation::UserId;

    async fn seeded_catalog(names: &[&str]) -> (Arc<InMemoryCatalog>, Vec<BrandId>) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let mut ids = Vec::new();
        for name in names {
            let brand = BrandRepository::create(
                catalog.as_ref(),
                &NewBrand::new(*name, UserId::new(1).unwrap()).unwrap(),
            )
            .await
            .unwrap();
            ids.push(brand.id());
        }
        (catalog, ids)
    }

    fn product(id: i64) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[tokio::test]
    async fn creates_edges_for_new_brand_set() {
        let (catalog, ids) = seeded_catalog(&["Brand 1", "Brand 2"]).await;
        let sync = BrandLinkSynchronizer::new(catalog.clone());

        let report = sync.synchronize(product(10), &ids).await.unwrap();
        assert_eq!(report.added, ids);
        assert!(report.removed.is_empty());

        let linked = catalog.find_by_product_id(product(10)).await.unwrap();
        assert_eq!(linked.len(), 2);
    }

    #[tokio::test]
    async fn rerunning_with_same_set_is_noop() {
        let (catalog, ids) = seeded_catalog(&["Brand 1", "Brand 2"]).await;
        let sync = BrandLinkSynchronizer::new(catalog.clone());

        sync.synchronize(product(10), &ids).await.unwrap();
        let second = sync.synchronize(product(10), &ids).await.unwrap();
        assert!(second.is_noop());

        let linked = catalog.find_by_product_id(product(10)).await.unwrap();
        assert_eq!(linked.len(), 2);
        for brand in linked {
            // No duplicate edges accumulated.
            assert_eq!(
                brand.product_ids().iter().filter(|p| **p == product(10)).count(),
                1
            );
        }
    }

    #[tokio::test]
    async fn shrinking_the_set_severs_departed_edges() {
        let (catalog, ids) = seeded_catalog(&["Brand 1", "Brand 2"]).await;
        let sync = BrandLinkSynchronizer::new(catalog.clone());

        sync.synchronize(product(10), &ids).await.unwrap();
        let report = sync.synchronize(product(10), &ids[1..]).await.unwrap();
        assert_eq!(report.removed, vec![ids[0]]);
        assert!(report.added.is_empty());

        let linked = catalog.find_by_product_id(product(10)).await.unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id(), ids[1]);
    }

    #[tokio::test]
    async fn empty_target_removes_all_edges() {
        let (catalog, ids) = seeded_catalog(&["Brand 1"]).await;
        let sync = BrandLinkSynchronizer::new(catalog.clone());

        sync.synchronize(product(10), &ids).await.unwrap();
        let report = sync.synchronize(product(10), &[]).await.unwrap();
        assert_eq!(report.removed, ids);

        let linked = catalog.find_by_product_id(product(10)).await.unwrap();
        assert!(linked.is_empty());
    }

    #[tokio::test]
    async fn missing_target_brand_aborts_before_any_write() {
        let (catalog, ids) = seeded_catalog(&["Brand 1", "Brand 2"]).await;
        let sync = BrandLinkSynchronizer::new(catalog.clone());

        sync.synchronize(product(10), &ids[..1]).await.unwrap();

        let ghost = BrandId::new(99).unwrap();
        let err = sync
            .synchronize(product(10), &[ids[1], ghost])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::BrandNotFound(_)));

        // The existing edge set must be untouched.
        let linked = catalog.find_by_product_id(product(10)).await.unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id(), ids[0]);
    }

    #[tokio::test]
    async fn duplicate_target_ids_create_one_edge() {
        let (catalog, ids) = seeded_catalog(&["Brand 1"]).await;
        let sync = BrandLinkSynchronizer::new(catalog.clone());

        let report = sync
            .synchronize(product(10), &[ids[0], ids[0]])
            .await
            .unwrap();
        assert_eq!(report.added, vec![ids[0]]);

        let brand = BrandRepository::find_by_id(catalog.as_ref(), ids[0])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(brand.product_ids(), &[product(10)]);
    }
}
