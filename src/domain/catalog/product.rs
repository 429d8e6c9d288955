//! Product entity, category, and duplicate-detection fingerprint.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{PriceId, ProductId, UserId, ValidationError};

/// Catalog category a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shoes,
    Clothes,
    Accessories,
}

impl Category {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shoes => "shoes",
            Category::Clothes => "clothes",
            Category::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoes" => Ok(Category::Shoes),
            "clothes" => Ok(Category::Clothes),
            "accessories" => Ok(Category::Accessories),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

/// Uniqueness fingerprint derived from a product's identity fields.
///
/// Two products with the same (name, owner, category) produce the same
/// fingerprint; the store rejects a second product carrying an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the SHA-256 fingerprint of (name, owner, category).
    pub fn compute(name: &str, owner: UserId, category: Category) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(owner.as_i64().to_be_bytes());
        hasher.update(category.as_str().as_bytes());
        let digest = hasher.finalize();
        Self(format!("{:x}", digest))
    }

    /// Wraps a fingerprint already stored in the database.
    pub fn from_stored(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Returns the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Product entity.
///
/// The brand side of the many-to-many association is deliberately absent:
/// brands own the edge list, and a product's brand set is always resolved
/// through the store's reverse lookup. `price_ids` is the collection of
/// price rules owned by this product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    owner: UserId,
    category: Category,
    price_ids: Vec<PriceId>,
}

impl Product {
    /// Reconstitute a product from persistence (no validation).
    pub fn reconstitute(
        id: ProductId,
        name: String,
        owner: UserId,
        category: Category,
        price_ids: Vec<PriceId>,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            category,
            price_ids,
        }
    }

    /// Returns the product id.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Returns the product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning user.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the owned price rule ids.
    pub fn price_ids(&self) -> &[PriceId] {
        &self.price_ids
    }

    /// Returns the current uniqueness fingerprint.
    ///
    /// Recomputed on demand so it always reflects the identity fields.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(&self.name, self.owner, self.category)
    }

    /// Rename the product.
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

    /// Move the product to another category.
    pub fn recategorize(&mut self, category: Category) {
        self.category = category;
    }

    /// Replace the owned price rule collection.
    pub fn set_price_ids(&mut self, price_ids: Vec<PriceId>) {
        self.price_ids = price_ids;
    }
}

/// Pre-persistence shape of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    owner: UserId,
    category: Category,
}

impl NewProduct {
    /// Creates a new product shape, rejecting blank names.
    pub fn new(
        name: impl Into<String>,
        owner: UserId,
        category: Category,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            name,
            owner,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Fingerprint the product would carry once persisted.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(&self.name, self.owner, self.category)
    }

    /// Builds the persisted entity once the store has assigned an id.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            owner: self.owner,
            category: self.category,
            price_ids: Vec::new(),
        }
    }
}
