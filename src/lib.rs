//! Pricing Catalog - brands, products, and time-bounded price rules
//!
//! This crate resolves which price rule governs a (product, brand) pair at a
//! given instant and keeps the many-to-many brand/product association
//! consistent as products are created, updated, and deleted.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
