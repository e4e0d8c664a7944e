use thiserror::Error;

/// Every rejection the fulfilment and warehouse services can produce.
///
/// All variants except `Internal` are deterministic validation outcomes and
/// must never be retried.
#[derive(Debug, Error)]
pub enum FulfilmentError {
    #[error("product {product_code} already fulfilled by {limit} warehouses for store {store_code}")]
    ProductLimitExceeded {
        product_code: String,
        store_code: String,
        limit: u64,
    },

    #[error("store {store_code} already fulfilled by {limit} warehouses")]
    StoreLimitExceeded { store_code: String, limit: u64 },

    #[error("warehouse {warehouse_code} already stores {limit} different product types")]
    WarehouseLimitExceeded { warehouse_code: String, limit: u64 },

    #[error("assignment already exists: product {product_code}, store {store_code}, warehouse {warehouse_code}")]
    DuplicateAssignment {
        product_code: String,
        store_code: String,
        warehouse_code: String,
    },

    #[error("warehouse already exists with code: {0}")]
    AlreadyExists(String),

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("{0}")]
    CapacityExceeded(String),

    #[error("{0}")]
    InvalidStock(String),

    #[error("warehouse not found: {0}")]
    NotFound(String),

    #[error("warehouse already archived: {0}")]
    AlreadyArchived(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl FulfilmentError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::DuplicateAssignment { .. } => 409,
            Self::Internal(_) => 500,
            Self::ProductLimitExceeded { .. }
            | Self::StoreLimitExceeded { .. }
            | Self::WarehouseLimitExceeded { .. }
            | Self::AlreadyExists(_)
            | Self::LocationNotFound(_)
            | Self::CapacityExceeded(_)
            | Self::InvalidStock(_)
            | Self::AlreadyArchived(_)
            | Self::InvalidInput(_) => 400,
        }
    }

    /// Stable machine-readable code carried in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProductLimitExceeded { .. } => "PRODUCT_FULFILMENT_LIMIT_EXCEEDED",
            Self::StoreLimitExceeded { .. } => "STORE_FULFILMENT_LIMIT_EXCEEDED",
            Self::WarehouseLimitExceeded { .. } => "WAREHOUSE_PRODUCT_LIMIT_EXCEEDED",
            Self::DuplicateAssignment { .. } => "FULFILMENT_ASSIGNMENT_EXISTS",
            Self::AlreadyExists(_) => "WAREHOUSE_ALREADY_EXISTS",
            Self::LocationNotFound(_) => "LOCATION_NOT_FOUND",
            Self::CapacityExceeded(_) => "WAREHOUSE_LOCATION_CAPACITY_EXCEEDED",
            Self::InvalidStock(_) => "WAREHOUSE_STOCK_CAPACITY_EXCEEDED",
            Self::NotFound(_) => "WAREHOUSE_NOT_FOUND",
            Self::AlreadyArchived(_) => "WAREHOUSE_ALREADY_ARCHIVED",
            Self::InvalidInput(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}
