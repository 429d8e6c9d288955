//! Price rule entity and its value objects.
//!
//! A price rule binds an amount to one (product, brand) pair over a validity
//! window. Rules for the same pair are numbered by a tier ordinal that the
//! store allocates sequentially; overlapping windows are disambiguated by
//! `priority` at resolution time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::ValidityWindow;
use crate::domain::foundation::{BrandId, PriceId, ProductId, ValidationError};

/// ISO 4217 style currency code: exactly three ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, rejecting anything but three letters.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "must be a 3-letter code",
            ));
        }
        Ok(Self(code))
    }

    /// Returns the inner code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted price rule.
///
/// # Invariants
///
/// - `amount` is strictly positive
/// - `tier` is unique per (product, brand) pair and assigned by the store
/// - the validity window is half-open, `end` strictly after `start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    id: PriceId,
    brand_id: BrandId,
    product_id: ProductId,
    tier: u32,
    window: ValidityWindow,
    priority: u32,
    amount: Decimal,
    currency: CurrencyCode,
}

impl Price {
    /// Reconstitute a price rule from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PriceId,
        brand_id: BrandId,
        product_id: ProductId,
        tier: u32,
        window: ValidityWindow,
        priority: u32,
        amount: Decimal,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            id,
            brand_id,
            product_id,
            tier,
            window,
            priority,
            amount,
            currency,
        }
    }

    /// Returns the rule id.
    pub fn id(&self) -> PriceId {
        self.id
    }

    /// Returns the brand this rule is scoped to.
    pub fn brand_id(&self) -> BrandId {
        self.brand_id
    }

    /// Returns the product this rule is scoped to.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the tier ordinal within the (product, brand) pair.
    pub fn tier(&self) -> u32 {
        self.tier
    }

    /// Returns the validity window.
    pub fn window(&self) -> &ValidityWindow {
        &self.window
    }

    /// Returns the tie-break rank among overlapping windows.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Returns the monetary amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency code.
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Exact five-field match used by deletion lookups.
    pub fn matches_key(
        &self,
        brand_id: BrandId,
        product_id: ProductId,
        tier: u32,
        window: &ValidityWindow,
    ) -> bool {
        self.brand_id == brand_id
            && self.product_id == product_id
            && self.tier == tier
            && self.window == *window
    }
}

/// Pre-persistence shape of a price rule.
///
/// Carries no tier: the store allocates the next ordinal for the
/// (product, brand) pair at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceDraft {
    brand_id: BrandId,
    product_id: ProductId,
    window: ValidityWindow,
    priority: u32,
    amount: Decimal,
    currency: CurrencyCode,
}

impl PriceDraft {
    /// Creates a draft, rejecting non-positive amounts.
    pub fn new(
        brand_id: BrandId,
        product_id: ProductId,
        window: ValidityWindow,
        priority: u32,
        amount: Decimal,
        currency: CurrencyCode,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::not_positive("price", amount));
        }
        Ok(Self {
            brand_id,
            product_id,
            window,
            priority,
            amount,
            currency,
        })
    }

    pub fn brand_id(&self) -> BrandId {
        self.brand_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn window(&self) -> &ValidityWindow {
        &self.window
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Builds the persisted rule once the store has assigned id and tier.
    pub fn into_price(self, id: PriceId, tier: u32) -> Price {
        Price {
            id,
            brand_id: self.brand_id,
            product_id: self.product_id,
            tier,
            window: self.window,
            priority: self.priority,
            amount: self.amount,
            currency: self.currency,
        }
    }
}

/// Read-only projection answering "which price applies".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicablePrice {
    pub product_id: ProductId,
    pub brand_id: BrandId,
    pub tier: u32,
    pub window: ValidityWindow,
    pub amount: Decimal,
    pub currency: CurrencyCode,
}

impl From<&Price> for ApplicablePrice {
    fn from(price: &Price) -> Self {
        Self {
            product_id: price.product_id(),
            brand_id: price.brand_id(),
            tier: price.tier(),
            window: *price.window(),
            amount: price.amount(),
            currency: price.currency().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_window() -> ValidityWindow {
        ValidityWindow::new(
            Utc.with_ymd_and_hms(2020, 6, 14, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap(),
        )
        .unwrap()
    }

    fn test_draft(amount: Decimal) -> Result<PriceDraft, ValidationError> {
        PriceDraft::new(
            BrandId::new(1).unwrap(),
            ProductId::new(35455).unwrap(),
            test_window(),
            0,
            amount,
            CurrencyCode::new("EUR").unwrap(),
        )
    }

    #[test]
    fn currency_code_accepts_three_letters() {
        let code = CurrencyCode::new("EUR").unwrap();
        assert_eq!(code.as_str(), "EUR");
    }

    #[test]
    fn currency_code_rejects_wrong_length() {
        assert!(CurrencyCode::new("EU").is_err());
        assert!(CurrencyCode::new("EURO").is_err());
    }

    #[test]
    fn currency_code_rejects_non_letters() {
        assert!(CurrencyCode::new("EU1").is_err());
        assert!(CurrencyCode::new("€UR").is_err());
    }

    #[test]
    fn draft_rejects_zero_amount() {
        assert!(test_draft(Decimal::ZERO).is_err());
    }

    #[test]
    fn draft_rejects_negative_amount() {
        assert!(test_draft("-35.50".parse().unwrap()).is_err());
    }

    #[test]
    fn draft_accepts_positive_amount() {
        let draft = test_draft("35.50".parse().unwrap()).unwrap();
        assert_eq!(draft.amount(), "35.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn draft_into_price_applies_store_assigned_id_and_tier() {
        let draft = test_draft("35.50".parse().unwrap()).unwrap();
        let price = draft.into_price(PriceId::new(7).unwrap(), 3);
        assert_eq!(price.id(), PriceId::new(7).unwrap());
        assert_eq!(price.tier(), 3);
    }

    #[test]
    fn matches_key_requires_all_fields_equal() {
        let draft = test_draft("35.50".parse().unwrap()).unwrap();
        let price = draft.into_price(PriceId::new(1).unwrap(), 1);
        let window = test_window();

        let brand = BrandId::new(1).unwrap();
        let product = ProductId::new(35455).unwrap();
        assert!(price.matches_key(brand, product, 1, &window));
        assert!(!price.matches_key(brand, product, 2, &window));
        assert!(!price.matches_key(BrandId::new(2).unwrap(), product, 1, &window));

        let other_window = ValidityWindow::new(
            Utc.with_ymd_and_hms(2020, 6, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap(),
        )
        .unwrap();
        assert!(!price.matches_key(brand, product, 1, &other_window));
    }

    #[test]
    fn applicable_price_projects_without_priority() {
        let draft = test_draft("25.45".parse().unwrap()).unwrap();
        let price = draft.into_price(PriceId::new(2).unwrap(), 2);
        let projection = ApplicablePrice::from(&price);
        assert_eq!(projection.tier, 2);
        assert_eq!(projection.amount, "25.45".parse::<Decimal>().unwrap());
        assert_eq!(projection.currency.as_str(), "EUR");
    }
}
