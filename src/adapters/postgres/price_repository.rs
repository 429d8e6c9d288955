//! PostgreSQL implementation of PriceRepository.
//!
//! Tier allocation uses a per-(product, brand) advisory transaction lock so
//! the read-max-then-insert sequence is serialized per pair without locking
//! the whole table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use crate::domain::catalog::{CurrencyCode, Price, PriceDraft, ValidityWindow};
use crate::domain::foundation::{BrandId, DomainError, ErrorCode, PriceId, ProductId};
use crate::ports::PriceRepository;

use super::map_sqlx_error;

const PRICE_COLUMNS: &str =
    "id, brand_id, product_id, price_list, start_date, end_date, priority, price, currency";

/// PostgreSQL implementation of PriceRepository.
#[derive(Clone, Debug)]
pub struct PostgresPriceRepository {
    pool: PgPool,
}

impl PostgresPriceRepository {
    /// Creates a new PostgresPriceRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Advisory lock key for one (product, brand) pair.
fn pair_lock_key(product_id: ProductId, brand_id: BrandId) -> i64 {
    product_id
        .as_i64()
        .wrapping_mul(0x9E37_79B9_7F4A_7C15_u64 as i64)
        ^ brand_id.as_i64()
}

fn row_to_price(row: sqlx::postgres::PgRow) -> Result<Price, DomainError> {
    let internal = |e: sqlx::Error| DomainError::new(ErrorCode::InternalError, e.to_string());

    let id: i64 = row.try_get("id").map_err(internal)?;
    let brand_id: i64 = row.try_get("brand_id").map_err(internal)?;
    let product_id: i64 = row.try_get("product_id").map_err(internal)?;
    let tier: i32 = row.try_get("price_list").map_err(internal)?;
    let start_date: DateTime<Utc> = row.try_get("start_date").map_err(internal)?;
    let end_date: DateTime<Utc> = row.try_get("end_date").map_err(internal)?;
    let priority: i32 = row.try_get("priority").map_err(internal)?;
    let amount: Decimal = row.try_get("price").map_err(internal)?;
    let currency: String = row.try_get("currency").map_err(internal)?;

    Ok(Price::reconstitute(
        PriceId::new(id)?,
        BrandId::new(brand_id)?,
        ProductId::new(product_id)?,
        tier as u32,
        ValidityWindow::new(start_date, end_date)?,
        priority as u32,
        amount,
        CurrencyCode::new(currency)?,
    ))
}

#[async_trait]
impl PriceRepository for PostgresPriceRepository {
    async fn create(&self, draft: &PriceDraft) -> Result<Price, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to open transaction", None))?;

        // Serialize tier allocation per (product, brand) pair; the lock is
        // released at commit/rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(pair_lock_key(draft.product_id(), draft.brand_id()))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to take tier allocation lock", None))?;

        let max_tier: (i32,) = sqlx::query_as(
            r#"
            SELECT COALESCE(MAX(price_list), 0)
            FROM prices
            WHERE product_id = $1 AND brand_id = $2
            "#,
        )
        .bind(draft.product_id().as_i64())
        .bind(draft.brand_id().as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to read max tier", None))?;

        let tier = max_tier.0 as u32 + 1;

        let row = sqlx::query(
            r#"
            INSERT INTO prices (
                brand_id, product_id, price_list, start_date, end_date,
                priority, price, currency
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(draft.brand_id().as_i64())
        .bind(draft.product_id().as_i64())
        .bind(tier as i32)
        .bind(draft.window().start())
        .bind(draft.window().end())
        .bind(draft.priority() as i32)
        .bind(draft.amount())
        .bind(draft.currency().as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to insert price", None))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to commit price insert", None))?;

        Ok(draft.clone().into_price(PriceId::new(id)?, tier))
    }

    async fn find_applicable(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Price>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM prices
            WHERE product_id = $1 AND brand_id = $2
              AND start_date <= $3 AND end_date > $3
            ORDER BY priority DESC
            "#,
            PRICE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(product_id.as_i64())
            .bind(brand_id.as_i64())
            .bind(instant)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch applicable prices", None))?;

        rows.into_iter().map(row_to_price).collect()
    }

    async fn find_by_exact_key(
        &self,
        brand_id: BrandId,
        product_id: ProductId,
        tier: u32,
        window: &ValidityWindow,
    ) -> Result<Option<Price>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM prices
            WHERE brand_id = $1 AND product_id = $2 AND price_list = $3
              AND start_date = $4 AND end_date = $5
            "#,
            PRICE_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(brand_id.as_i64())
            .bind(product_id.as_i64())
            .bind(tier as i32)
            .bind(window.start())
            .bind(window.end())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch price by key", None))?;

        row.map(row_to_price).transpose()
    }

    async fn find_all_by_ids(&self, ids: &[PriceId]) -> Result<Vec<Price>, DomainError> {
        let raw: Vec<i64> = ids.iter().map(PriceId::as_i64).collect();
        let query = format!("SELECT {} FROM prices WHERE id = ANY($1)", PRICE_COLUMNS);
        let rows = sqlx::query(&query)
            .bind(&raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch prices by ids", None))?;

        rows.into_iter().map(row_to_price).collect()
    }

    async fn delete(&self, id: PriceId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM prices WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete price", None))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PriceNotFound,
                format!("Price not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn max_tier_for(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
    ) -> Result<u32, DomainError> {
        let result: (i32,) = sqlx::query_as(
            r#"
            SELECT COALESCE(MAX(price_list), 0)
            FROM prices
            WHERE product_id = $1 AND brand_id = $2
            "#,
        )
        .bind(product_id.as_i64())
        .bind(brand_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to read max tier", None))?;

        Ok(result.0 as u32)
    }
}
