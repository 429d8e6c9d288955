//! Brand entity - the owning side of the brand/product association.
//!
//! A brand holds the edge list of its associated products as plain ids.
//! The opposite direction (a product's brands) is never stored; it is
//! resolved through the store's reverse lookup, which keeps the symmetric
//! invariant with a single writer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BrandId, ProductId, UserId, ValidationError};

/// Brand entity.
///
/// # Invariants
///
/// - `name` is non-empty (uniqueness is enforced by the store)
/// - `product_ids` contains no duplicates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    id: BrandId,
    name: String,
    owner: UserId,
    product_ids: Vec<ProductId>,
}

impl Brand {
    /// Reconstitute a brand from persistence (no validation).
    pub fn reconstitute(
        id: BrandId,
        name: String,
        owner: UserId,
        product_ids: Vec<ProductId>,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            product_ids,
        }
    }

    /// Returns the brand id.
    pub fn id(&self) -> BrandId {
        self.id
    }

    /// Returns the brand name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning user.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the associated product ids.
    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    /// Checks whether the product is linked to this brand.
    pub fn has_product(&self, product_id: ProductId) -> bool {
        self.product_ids.contains(&product_id)
    }

    /// Rename the brand.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        self.name = name;
        Ok(())
    }

    /// Change the owning user.
    pub fn change_owner(&mut self, owner: UserId) {
        self.owner = owner;
    }

    /// Replace the full product set, dropping duplicates.
    pub fn set_product_ids(&mut self, product_ids: Vec<ProductId>) {
        self.product_ids.clear();
        for id in product_ids {
            if !self.product_ids.contains(&id) {
                self.product_ids.push(id);
            }
        }
    }

    /// Append the product if absent. Returns whether an edge was created.
    pub fn link_product(&mut self, product_id: ProductId) -> bool {
        if self.has_product(product_id) {
            return false;
        }
        self.product_ids.push(product_id);
        true
    }

    /// Remove the product if present. Returns whether an edge was severed.
    pub fn unlink_product(&mut self, product_id: ProductId) -> bool {
        let before = self.product_ids.len();
        self.product_ids.retain(|id| *id != product_id);
        self.product_ids.len() != before
    }
}

/// Pre-persistence shape of a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    name: String,
    owner: UserId,
    product_ids: Vec<ProductId>,
}

impl NewBrand {
    /// Creates a new brand shape, rejecting blank names.
    pub fn new(name: impl Into<String>, owner: UserId) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            name,
            owner,
            product_ids: Vec::new(),
        })
    }

    /// Pre-associates products, dropping duplicates.
    pub fn with_products(mut self, product_ids: Vec<ProductId>) -> Self {
        self.product_ids.clear();
        for id in product_ids {
            if !self.product_ids.contains(&id) {
                self.product_ids.push(id);
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    /// Builds the persisted entity once the store has assigned an id.
    pub fn into_brand(self, id: BrandId) -> Brand {
        Brand {
            id,
            name: self.name,
            owner: self.owner,
            product_ids: self.product_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_brand() -> Brand {
        NewBrand::new("Brand 1", UserId::new(1).unwrap())
            .unwrap()
            .into_brand(BrandId::new(1).unwrap())
    }

    fn product(id: i64) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn new_brand_rejects_blank_name() {
        assert!(NewBrand::new("  ", UserId::new(1).unwrap()).is_err());
    }

    #[test]
    fn link_product_creates_edge_once() {
        let mut brand = test_brand();
        assert!(brand.link_product(product(35455)));
        assert!(!brand.link_product(product(35455)));
        assert_eq!(brand.product_ids(), &[product(35455)]);
    }

    #[test]
    fn unlink_product_severs_existing_edge() {
        let mut brand = test_brand();
        brand.link_product(product(35455));

        assert!(brand.unlink_product(product(35455)));
        assert!(!brand.has_product(product(35455)));
    }

    #[test]
    fn unlink_product_is_noop_for_absent_edge() {
        let mut brand = test_brand();
        assert!(!brand.unlink_product(product(99)));
    }

    #[test]
    fn set_product_ids_drops_duplicates() {
        let mut brand = test_brand();
        brand.set_product_ids(vec![product(1), product(2), product(1)]);
        assert_eq!(brand.product_ids(), &[product(1), product(2)]);
    }

    #[test]
    fn with_products_drops_duplicates() {
        let brand = NewBrand::new("Brand 2", UserId::new(2).unwrap())
            .unwrap()
            .with_products(vec![product(2), product(2)])
            .into_brand(BrandId::new(2).unwrap());
        assert_eq!(brand.product_ids(), &[product(2)]);
    }

    #[test]
    fn rename_rejects_blank_name() {
        let mut brand = test_brand();
        assert!(brand.rename(" ").is_err());
        assert_eq!(brand.name(), "Brand 1");
    }
}
