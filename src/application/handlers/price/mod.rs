//! Price rule use cases.

mod create_price;
mod delete_price;
mod find_prices;
mod get_applicable_price;

pub use create_price::{CreatePriceCommand, CreatePriceHandler};
pub use delete_price::{DeletePriceCommand, DeletePriceHandler};
pub use find_prices::FindPricesHandler;
pub use get_applicable_price::{GetApplicablePriceHandler, GetApplicablePriceQuery};
