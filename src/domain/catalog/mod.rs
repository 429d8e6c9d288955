//! Catalog domain - brands, products, price rules, and the pure decision
//! logic over them.

mod brand;
mod errors;
mod link_diff;
mod price;
mod product;
pub mod resolution;
mod window;

pub use brand::{Brand, NewBrand};
pub use errors::CatalogError;
pub use link_diff::{diff, LinkDiff};
pub use price::{ApplicablePrice, CurrencyCode, Price, PriceDraft};
pub use product::{Category, Fingerprint, NewProduct, Product};
pub use window::ValidityWindow;
