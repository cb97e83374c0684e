//! Domain models for accounts and the child specialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role an account acts under. Role-specific behavior is keyed off this tag
/// rather than a type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    /// Donates credit to stores.
    Donor,
    /// Child beneficiary; redemptions are capped per calendar day.
    Child,
    /// Operates exactly one store and may only manage that store's ledger.
    Merchant,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("account::{}", timestamp_millis)
    }
}

/// Child beneficiary record, bound 1:1 to an [`Account`] with the
/// [`AccountRole::Child`] role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub account_id: String,
    /// Meal-card number the child redeems with.
    pub card_number: String,
}
