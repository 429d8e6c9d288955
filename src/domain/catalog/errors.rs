//! Catalog-specific error taxonomy.
//!
//! Every operation returns `Result<_, CatalogError>` so callers must handle
//! each case explicitly; nothing is signaled by panicking.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed or invalid input; raised before any store access.
    BadRequest { field: String, message: String },
    /// A referenced brand does not exist.
    BrandNotFound(String),
    /// A referenced product does not exist.
    ProductNotFound(String),
    /// No price rule matches the query.
    PriceNotFound,
    /// A duplicate product fingerprint or brand name.
    AlreadyExists(String),
    /// Unexpected store failure.
    Infrastructure(String),
}

impl CatalogError {
    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::BadRequest {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn brand_not_found(detail: impl Into<String>) -> Self {
        CatalogError::BrandNotFound(detail.into())
    }

    pub fn product_not_found(detail: impl Into<String>) -> Self {
        CatalogError::ProductNotFound(detail.into())
    }

    pub fn price_not_found() -> Self {
        CatalogError::PriceNotFound
    }

    pub fn already_exists(detail: impl Into<String>) -> Self {
        CatalogError::AlreadyExists(detail.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::BadRequest { .. } => ErrorCode::ValidationFailed,
            CatalogError::BrandNotFound(_) => ErrorCode::BrandNotFound,
            CatalogError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CatalogError::PriceNotFound => ErrorCode::PriceNotFound,
            CatalogError::AlreadyExists(_) => ErrorCode::DuplicateProduct,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::BadRequest { field, message } => {
                format!("Invalid input for '{}': {}", field, message)
            }
            CatalogError::BrandNotFound(detail) => format!("Brand not found: {}", detail),
            CatalogError::ProductNotFound(detail) => format!("Product not found: {}", detail),
            CatalogError::PriceNotFound => "Price not found".to_string(),
            CatalogError::AlreadyExists(detail) => format!("Already exists: {}", detail),
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::BadRequest {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::NotPositive
            | ErrorCode::InvalidFormat => CatalogError::BadRequest {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::BrandNotFound => CatalogError::BrandNotFound(err.message),
            ErrorCode::ProductNotFound => CatalogError::ProductNotFound(err.message),
            ErrorCode::PriceNotFound => CatalogError::PriceNotFound,
            ErrorCode::DuplicateProduct | ErrorCode::DuplicateBrand => {
                CatalogError::AlreadyExists(err.message)
            }
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                CatalogError::Infrastructure(err.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_reports_validation_code() {
        let err = CatalogError::bad_request("product_id", "must be positive");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(
            err.message(),
            "Invalid input for 'product_id': must be positive"
        );
    }

    #[test]
    fn validation_error_converts_to_bad_request() {
        let err: CatalogError = ValidationError::not_positive("brand_id", -1).into();
        assert!(matches!(err, CatalogError::BadRequest { .. }));
    }

    #[test]
    fn domain_not_found_codes_map_to_taxonomy() {
        let brand: CatalogError = DomainError::new(ErrorCode::BrandNotFound, "id 9").into();
        assert!(matches!(brand, CatalogError::BrandNotFound(_)));

        let price: CatalogError = DomainError::new(ErrorCode::PriceNotFound, "gone").into();
        assert_eq!(price, CatalogError::PriceNotFound);
    }

    #[test]
    fn duplicate_codes_map_to_already_exists() {
        let err: CatalogError = DomainError::new(ErrorCode::DuplicateBrand, "Brand 1").into();
        assert!(matches!(err, CatalogError::AlreadyExists(_)));
    }

    #[test]
    fn database_errors_map_to_infrastructure() {
        let err: CatalogError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert!(matches!(err, CatalogError::Infrastructure(_)));
    }
}
