//! Price repository port.
//!
//! `create` owns the tier allocation: reading the current maximum and
//! inserting the next ordinal happen inside one store-level critical
//! section, so two concurrent creators for the same (product, brand) pair
//! cannot allocate the same tier.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::catalog::{Price, PriceDraft, ValidityWindow};
use crate::domain::foundation::{BrandId, DomainError, PriceId, ProductId};

/// Repository port for price rule persistence and applicability queries.
#[async_trait]
pub trait PriceRepository: Send + Sync {
    /// Persist a draft, atomically allocating `tier = max(pair) + 1`.
    async fn create(&self, draft: &PriceDraft) -> Result<Price, DomainError>;

    /// All rules for (product, brand) whose window contains the instant,
    /// ordered by priority descending.
    async fn find_applicable(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Price>, DomainError>;

    /// Exact five-field lookup used by deletion. Returns `None` on any
    /// mismatch.
    async fn find_by_exact_key(
        &self,
        brand_id: BrandId,
        product_id: ProductId,
        tier: u32,
        window: &ValidityWindow,
    ) -> Result<Option<Price>, DomainError>;

    /// Batch lookup. Missing ids are silently skipped.
    async fn find_all_by_ids(&self, ids: &[PriceId]) -> Result<Vec<Price>, DomainError>;

    /// Delete a rule by id.
    ///
    /// # Errors
    ///
    /// - `PriceNotFound` if the rule doesn't exist
    async fn delete(&self, id: PriceId) -> Result<(), DomainError>;

    /// Highest tier already allocated for the pair; 0 when none exist.
    async fn max_tier_for(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
    ) -> Result<u32, DomainError>;
}
