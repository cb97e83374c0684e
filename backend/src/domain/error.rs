//! Domain error taxonomy for the store and donation ledger.
//!
//! Every business-rule failure is a distinct kind so the API boundary can map
//! it to a fixed status code without parsing messages. Storage failures pass
//! through as [`LedgerError::Storage`] and surface as transient server errors.

use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("store not found: {0}")]
    StoreNotFound(String),

    #[error("donation usage not found: {0}")]
    DonationUsageNotFound(String),

    /// A merchant tried to manage donations of a store they do not own.
    #[error("no permission to use donations of another store")]
    ForbiddenStoreAccess,

    /// An account tried to write a thank-you message for a redemption it did
    /// not perform.
    #[error("no permission to write a message for this donation usage")]
    ForbiddenMessageWrite,

    #[error("donation amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("usable donation {available} is less than requested {requested}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("child accounts may use donations at most {limit} times per day")]
    DailyLimitExceeded { limit: u32 },

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
