//! PostgreSQL implementation of ProductRepository.
//!
//! The fingerprint column carries a unique index; the owned price rule
//! collection is derived from the `prices` table on every read.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::domain::catalog::{Category, Fingerprint, NewProduct, Product};
use crate::domain::foundation::{DomainError, ErrorCode, PriceId, ProductId, UserId};
use crate::ports::ProductRepository;

use super::map_sqlx_error;

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.user_id, p.category,
           COALESCE(array_agg(pr.id) FILTER (WHERE pr.id IS NOT NULL), '{}') AS price_ids
    FROM products p
    LEFT JOIN prices pr ON pr.product_id = p.id
"#;

/// PostgreSQL implementation of ProductRepository.
#[derive(Clone, Debug)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new PostgresProductRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: sqlx::postgres::PgRow) -> Result<Product, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    let user_id: i64 = row
        .try_get("user_id")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    let category: String = row
        .try_get("category")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    let price_ids: Vec<i64> = row
        .try_get("price_ids")
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

    let price_ids = price_ids
        .into_iter()
        .map(PriceId::new)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product::reconstitute(
        ProductId::new(id)?,
        name,
        UserId::new(user_id)?,
        Category::from_str(&category)?,
        price_ids,
    ))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, user_id, category, fingerprint)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(product.name())
        .bind(product.owner().as_i64())
        .bind(product.category().as_str())
        .bind(product.fingerprint().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                e,
                "Failed to insert product",
                Some(ErrorCode::DuplicateProduct),
            )
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        Ok(product.clone().into_product(ProductId::new(id)?))
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                user_id = $3,
                category = $4,
                fingerprint = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_i64())
        .bind(product.name())
        .bind(product.owner().as_i64())
        .bind(product.category().as_str())
        .bind(product.fingerprint().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                e,
                "Failed to update product",
                Some(ErrorCode::DuplicateProduct),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", product.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        let query = format!(
            "{} WHERE p.id = $1 GROUP BY p.id, p.name, p.user_id, p.category",
            PRODUCT_SELECT
        );
        let row = sqlx::query(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch product", None))?;

        row.map(row_to_product).transpose()
    }

    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let raw: Vec<i64> = ids.iter().map(ProductId::as_i64).collect();
        let query = format!(
            "{} WHERE p.id = ANY($1) GROUP BY p.id, p.name, p.user_id, p.category",
            PRODUCT_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(&raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch products by ids", None))?;

        rows.into_iter().map(row_to_product).collect()
    }

    async fn exists_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<bool, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE fingerprint = $1")
                .bind(fingerprint.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(e, "Failed to check product fingerprint", None))?;

        Ok(result.0 > 0)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), DomainError> {
        // Owned prices go with the product via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete product", None))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", id),
            ));
        }

        Ok(())
    }
}
