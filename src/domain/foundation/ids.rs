//! Strongly-typed identifier value objects.
//!
//! Identifiers are numeric (store-assigned, monotonically increasing) and
//! must be positive. Inbound raw ids are validated here so that a
//! non-positive id never reaches a repository.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Unique identifier for a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(i64);

impl BrandId {
    /// Creates a BrandId, rejecting non-positive values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::not_positive("brand_id", id));
        }
        Ok(Self(id))
    }

    /// Returns the inner numeric value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BrandId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .parse()
            .map_err(|_| ValidationError::invalid_format("brand_id", "not a number"))?;
        Self::new(raw)
    }
}

/// Unique identifier for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a ProductId, rejecting non-positive values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::not_positive("product_id", id));
        }
        Ok(Self(id))
    }

    /// Returns the inner numeric value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .parse()
            .map_err(|_| ValidationError::invalid_format("product_id", "not a number"))?;
        Self::new(raw)
    }
}

/// Unique identifier for a price rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceId(i64);

impl PriceId {
    /// Creates a PriceId, rejecting non-positive values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::not_positive("price_id", id));
        }
        Ok(Self(id))
    }

    /// Returns the inner numeric value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PriceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owning user identifier (assigned by an external identity provider).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a UserId, rejecting non-positive values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::not_positive("user_id", id));
        }
        Ok(Self(id))
    }

    /// Returns the inner numeric value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
