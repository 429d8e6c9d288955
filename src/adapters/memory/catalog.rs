//! In-memory catalog store.
//!
//! One mutex over the whole catalog state, so the multi-step write
//! sequences (tier allocation, edge synchronization, cascading deletes)
//! are trivially atomic. This adapter is the reference implementation of
//! the port contracts and the store used by handler and integration tests.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. Acceptable for a
//! test-oriented adapter; production deployments use the PostgreSQL
//! adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::catalog::{
    Brand, Fingerprint, NewBrand, NewProduct, Price, PriceDraft, Product, ValidityWindow,
};
use crate::domain::foundation::{BrandId, DomainError, ErrorCode, PriceId, ProductId};
use crate::ports::{BrandRepository, PriceRepository, ProductRepository};

#[derive(Default)]
struct CatalogState {
    brands: BTreeMap<BrandId, Brand>,
    products: BTreeMap<ProductId, Product>,
    prices: BTreeMap<PriceId, Price>,
    next_brand_id: i64,
    next_product_id: i64,
    next_price_id: i64,
}

/// In-memory store implementing all three repository ports.
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CatalogState::default()),
        }
    }

    /// Number of stored price rules (for test assertions).
    pub fn price_count(&self) -> usize {
        self.state.lock().expect("catalog lock poisoned").prices.len()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut CatalogState) -> T) -> T {
        let mut state = self.state.lock().expect("catalog lock poisoned");
        f(&mut state)
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Product reads carry the derived collection of owned price rule ids.
fn hydrate(mut product: Product, state: &CatalogState) -> Product {
    let price_ids: Vec<PriceId> = state
        .prices
        .values()
        .filter(|p| p.product_id() == product.id())
        .map(Price::id)
        .collect();
    product.set_price_ids(price_ids);
    product
}

#[async_trait]
impl BrandRepository for InMemoryCatalog {
    async fn create(&self, brand: &NewBrand) -> Result<Brand, DomainError> {
        self.with_state(|state| {
            if state.brands.values().any(|b| b.name() == brand.name()) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateBrand,
                    format!("Brand name already taken: {}", brand.name()),
                ));
            }
            let id = BrandId::new(next_id(&mut state.next_brand_id))?;
            let persisted = brand.clone().into_brand(id);
            state.brands.insert(id, persisted.clone());
            Ok(persisted)
        })
    }

    async fn update(&self, brand: &Brand) -> Result<(), DomainError> {
        self.with_state(|state| {
            if !state.brands.contains_key(&brand.id()) {
                return Err(DomainError::new(
                    ErrorCode::BrandNotFound,
                    format!("Brand not found: {}", brand.id()),
                ));
            }
            let collision = state
                .brands
                .values()
                .any(|b| b.id() != brand.id() && b.name() == brand.name());
            if collision {
                return Err(DomainError::new(
                    ErrorCode::DuplicateBrand,
                    format!("Brand name already taken: {}", brand.name()),
                ));
            }
            state.brands.insert(brand.id(), brand.clone());
            Ok(())
        })
    }

    async fn update_all(&self, brands: &[Brand]) -> Result<(), DomainError> {
        self.with_state(|state| {
            // Validate everything before the first write so a failure leaves
            // no partial state.
            for brand in brands {
                if !state.brands.contains_key(&brand.id()) {
                    return Err(DomainError::new(
                        ErrorCode::BrandNotFound,
                        format!("Brand not found: {}", brand.id()),
                    ));
                }
            }
            for brand in brands {
                state.brands.insert(brand.id(), brand.clone());
            }
            Ok(())
        })
    }

    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, DomainError> {
        self.with_state(|state| Ok(state.brands.get(&id).cloned()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Brand>, DomainError> {
        self.with_state(|state| {
            Ok(state.brands.values().find(|b| b.name() == name).cloned())
        })
    }

    async fn find_all_by_ids(&self, ids: &[BrandId]) -> Result<Vec<Brand>, DomainError> {
        self.with_state(|state| {
            Ok(ids
                .iter()
                .filter_map(|id| state.brands.get(id).cloned())
                .collect())
        })
    }

    async fn find_by_product_id(&self, product_id: ProductId) -> Result<Vec<Brand>, DomainError> {
        self.with_state(|state| {
            Ok(state
                .brands
                .values()
                .filter(|b| b.has_product(product_id))
                .cloned()
                .collect())
        })
    }

    async fn delete_by_id(&self, id: BrandId) -> Result<(), DomainError> {
        self.with_state(|state| {
            if state.brands.remove(&id).is_none() {
                return Err(DomainError::new(
                    ErrorCode::BrandNotFound,
                    format!("Brand not found: {}", id),
                ));
            }
            Ok(())
        })
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), DomainError> {
        self.with_state(|state| {
            let id = state
                .brands
                .values()
                .find(|b| b.name() == name)
                .map(Brand::id);
            match id {
                Some(id) => {
                    state.brands.remove(&id);
                    Ok(())
                }
                None => Err(DomainError::new(
                    ErrorCode::BrandNotFound,
                    format!("Brand not found: {}", name),
                )),
            }
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        self.with_state(|state| {
            let fingerprint = product.fingerprint();
            if state
                .products
                .values()
                .any(|p| p.fingerprint() == fingerprint)
            {
                return Err(DomainError::new(
                    ErrorCode::DuplicateProduct,
                    "A product with the same attributes already exists",
                ));
            }
            let id = ProductId::new(next_id(&mut state.next_product_id))?;
            let persisted = product.clone().into_product(id);
            state.products.insert(id, persisted.clone());
            Ok(persisted)
        })
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        self.with_state(|state| {
            if !state.products.contains_key(&product.id()) {
                return Err(DomainError::new(
                    ErrorCode::ProductNotFound,
                    format!("Product not found: {}", product.id()),
                ));
            }
            let fingerprint = product.fingerprint();
            let collision = state
                .products
                .values()
                .any(|p| p.id() != product.id() && p.fingerprint() == fingerprint);
            if collision {
                return Err(DomainError::new(
                    ErrorCode::DuplicateProduct,
                    "A product with the same attributes already exists",
                ));
            }
            state.products.insert(product.id(), product.clone());
            Ok(())
        })
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        self.with_state(|state| Ok(state.products.get(&id).cloned().map(|p| hydrate(p, state))))
    }

    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        self.with_state(|state| {
            let found: Vec<Product> = ids
                .iter()
                .filter_map(|id| state.products.get(id).cloned())
                .collect();
            Ok(found.into_iter().map(|p| hydrate(p, state)).collect())
        })
    }

    async fn exists_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<bool, DomainError> {
        self.with_state(|state| {
            Ok(state
                .products
                .values()
                .any(|p| p.fingerprint() == *fingerprint))
        })
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), DomainError> {
        self.with_state(|state| {
            if state.products.remove(&id).is_none() {
                return Err(DomainError::new(
                    ErrorCode::ProductNotFound,
                    format!("Product not found: {}", id),
                ));
            }
            // Cascade: a product owns its price rules.
            state.prices.retain(|_, price| price.product_id() != id);
            Ok(())
        })
    }
}

#[async_trait]
impl PriceRepository for InMemoryCatalog {
    async fn create(&self, draft: &PriceDraft) -> Result<Price, DomainError> {
        self.with_state(|state| {
            // Tier allocation and insert happen under the same lock, so
            // concurrent creators cannot observe the same maximum.
            let max_tier = state
                .prices
                .values()
                .filter(|p| {
                    p.product_id() == draft.product_id() && p.brand_id() == draft.brand_id()
                })
                .map(Price::tier)
                .max()
                .unwrap_or(0);
            let id = PriceId::new(next_id(&mut state.next_price_id))?;
            let persisted = draft.clone().into_price(id, max_tier + 1);
            state.prices.insert(id, persisted.clone());
            Ok(persisted)
        })
    }

    async fn find_applicable(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Price>, DomainError> {
        self.with_state(|state| {
            let mut matches: Vec<Price> = state
                .prices
                .values()
                .filter(|p| {
                    p.product_id() == product_id
                        && p.brand_id() == brand_id
                        && p.window().contains(instant)
                })
                .cloned()
                .collect();
            matches.sort_by(|a, b| b.priority().cmp(&a.priority()));
            Ok(matches)
        })
    }

    async fn find_by_exact_key(
        &self,
        brand_id: BrandId,
        product_id: ProductId,
        tier: u32,
        window: &ValidityWindow,
    ) -> Result<Option<Price>, DomainError> {
        self.with_state(|state| {
            Ok(state
                .prices
                .values()
                .find(|p| p.matches_key(brand_id, product_id, tier, window))
                .cloned())
        })
    }

    async fn find_all_by_ids(&self, ids: &[PriceId]) -> Result<Vec<Price>, DomainError> {
        self.with_state(|state| {
            Ok(ids
                .iter()
                .filter_map(|id| state.prices.get(id).cloned())
                .collect())
        })
    }

    async fn delete(&self, id: PriceId) -> Result<(), DomainError> {
        self.with_state(|state| {
            if state.prices.remove(&id).is_none() {
                return Err(DomainError::new(
                    ErrorCode::PriceNotFound,
                    format!("Price not found: {}", id),
                ));
            }
            Ok(())
        })
    }

    async fn max_tier_for(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
    ) -> Result<u32, DomainError> {
        self.with_state(|state| {
            Ok(state
                .prices
                .values()
                .filter(|p| p.product_id() == product_id && p.brand_id() == brand_id)
                .map(Price::tier)
                .max()
                .unwrap_or(0))
        })
    }
}
