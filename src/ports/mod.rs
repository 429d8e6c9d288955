//! Ports - capability interfaces implemented by store adapters.
//!
//! The application layer depends only on these traits, which keeps the
//! resolver and synchronizer testable against the in-memory adapters.

mod brand_repository;
mod price_repository;
mod product_repository;

pub use brand_repository::BrandRepository;
pub use price_repository::PriceRepository;
pub use product_repository::ProductRepository;
