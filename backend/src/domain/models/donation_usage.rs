//! Ledger entry for a single redemption event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One redemption of a store's usable donation balance.
///
/// Rows accumulate append-only: the daily usage cap for child accounts is
/// enforced by counting an account's rows for the current calendar day, and
/// only the account that owns a row may attach a thank-you message to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationUsage {
    pub id: String,
    /// Account that performed the redemption.
    pub account_id: String,
    pub store_id: String,
    pub amount: i64,
    pub used_at: DateTime<Utc>,
    /// Thank-you message to the donors, written after the fact.
    pub message: Option<String>,
}

impl DonationUsage {
    pub fn generate_id() -> String {
        format!("usage::{}", Uuid::new_v4())
    }
}
