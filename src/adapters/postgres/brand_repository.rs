//! PostgreSQL implementation of BrandRepository.
//!
//! Brand rows own the brand/product edge list through the `product_brand`
//! join table; every write that touches edges replaces the brand's rows in
//! that table inside the surrounding transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::catalog::{Brand, NewBrand};
use crate::domain::foundation::{BrandId, DomainError, ErrorCode, ProductId, UserId};
use crate::ports::BrandRepository;

use super::map_sqlx_error;

const BRAND_SELECT: &str = r#"
    SELECT b.id, b.name, b.user_id,
           COALESCE(array_agg(pb.product_id) FILTER (WHERE pb.product_id IS NOT NULL), '{}') AS product_ids
    FROM brands b
    LEFT JOIN product_brand pb ON pb.brand_id = b.id
"#;

/// PostgreSQL implementation of BrandRepository.
#[derive(Clone, Debug)]
pub struct PostgresBrandRepository {
    pool: PgPool,
}

impl PostgresBrandRepository {
    /// Creates a new PostgresBrandRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_brand(row: sqlx::postgres::PgRow) -> Result<Brand, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    let user_id: i64 = row
        .try_get("user_id")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    let product_ids: Vec<i64> = row
        .try_get("product_ids")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

    let product_ids = product_ids
        .into_iter()
        .map(ProductId::new)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Brand::reconstitute(
        BrandId::new(id)?,
        name,
        UserId::new(user_id)?,
        product_ids,
    ))
}

/// Writes a brand's row and replaces its edge rows inside `tx`.
async fn update_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    brand: &Brand,
) -> Result<(), DomainError> {
    let result = sqlx::query("UPDATE brands SET name = $2, user_id = $3 WHERE id = $1")
        .bind(brand.id().as_i64())
        .bind(brand.name())
        .bind(brand.owner().as_i64())
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            map_sqlx_error(e, "Failed to update brand", Some(ErrorCode::DuplicateBrand))
        })?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::BrandNotFound,
            format!("Brand not found: {}", brand.id()),
        ));
    }

    sqlx::query("DELETE FROM product_brand WHERE brand_id = $1")
        .bind(brand.id().as_i64())
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to clear brand edges", None))?;

    for product_id in brand.product_ids() {
        sqlx::query("INSERT INTO product_brand (brand_id, product_id) VALUES ($1, $2)")
            .bind(brand.id().as_i64())
            .bind(product_id.as_i64())
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to insert brand edge", None))?;
    }

    Ok(())
}

#[async_trait]
impl BrandRepository for PostgresBrandRepository {
    async fn create(&self, brand: &NewBrand) -> Result<Brand, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to open transaction", None))?;

        let row = sqlx::query("INSERT INTO brands (name, user_id) VALUES ($1, $2) RETURNING id")
            .bind(brand.name())
            .bind(brand.owner().as_i64())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                map_sqlx_error(e, "Failed to insert brand", Some(ErrorCode::DuplicateBrand))
            })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        for product_id in brand.product_ids() {
            sqlx::query("INSERT INTO product_brand (brand_id, product_id) VALUES ($1, $2)")
                .bind(id)
                .bind(product_id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(e, "Failed to insert brand edge", None))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to commit brand insert", None))?;

        Ok(brand.clone().into_brand(BrandId::new(id)?))
    }

    async fn update(&self, brand: &Brand) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to open transaction", None))?;

        update_in_tx(&mut tx, brand).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to commit brand update", None))
    }

    async fn update_all(&self, brands: &[Brand]) -> Result<(), DomainError> {
        if brands.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to open transaction", None))?;

        for brand in brands {
            update_in_tx(&mut tx, brand).await?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to commit brand batch update", None))
    }

    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, DomainError> {
        let query = format!("{} WHERE b.id = $1 GROUP BY b.id, b.name, b.user_id", BRAND_SELECT);
        let row = sqlx::query(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch brand", None))?;

        row.map(row_to_brand).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Brand>, DomainError> {
        let query = format!(
            "{} WHERE b.name = $1 GROUP BY b.id, b.name, b.user_id",
            BRAND_SELECT
        );
        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch brand by name", None))?;

        row.map(row_to_brand).transpose()
    }

    async fn find_all_by_ids(&self, ids: &[BrandId]) -> Result<Vec<Brand>, DomainError> {
        let raw: Vec<i64> = ids.iter().map(BrandId::as_i64).collect();
        let query = format!(
            "{} WHERE b.id = ANY($1) GROUP BY b.id, b.name, b.user_id",
            BRAND_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(&raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch brands by ids", None))?;

        rows.into_iter().map(row_to_brand).collect()
    }

    async fn find_by_product_id(&self, product_id: ProductId) -> Result<Vec<Brand>, DomainError> {
        let query = format!(
            r#"{} WHERE b.id IN (SELECT brand_id FROM product_brand WHERE product_id = $1)
               GROUP BY b.id, b.name, b.user_id"#,
            BRAND_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(product_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch brands by product", None))?;

        rows.into_iter().map(row_to_brand).collect()
    }

    async fn delete_by_id(&self, id: BrandId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete brand", None))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BrandNotFound,
                format!("Brand not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM brands WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete brand by name", None))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BrandNotFound,
                format!("Brand not found: {}", name),
            ));
        }

        Ok(())
    }
}
