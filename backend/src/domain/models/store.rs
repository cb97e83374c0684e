//! Domain model for a store and its menu.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub name: String,
    pub price: i64,
}

/// A participating store with its location, popularity counter and the two
/// donation counters.
///
/// Invariant: `0 <= usable_donation <= all_donation`. Every credit raises
/// both counters, every debit lowers only `usable_donation`, and
/// `all_donation` never decreases. The mutating methods below are the only
/// way the counters move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub zip_code: String,
    pub address: String,
    pub image_path: String,
    pub stars: f64,
    pub like_count: i64,
    /// Lifetime total ever credited to this store.
    pub all_donation: i64,
    /// Currently redeemable balance.
    pub usable_donation: i64,
    pub longitude: f64,
    pub latitude: f64,
    /// Owning merchant account.
    pub account_id: String,
    pub menus: Vec<Menu>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("store::{}", timestamp_millis)
    }

    pub fn increment_like_count(&mut self) {
        self.like_count += 1;
    }

    pub fn decrement_like_count(&mut self) {
        self.like_count -= 1;
    }

    /// Credit a donation: both counters rise together.
    pub fn credit_donation(&mut self, amount: i64) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.all_donation += amount;
        self.usable_donation += amount;
        Ok(())
    }

    /// Debit the redeemable balance; `all_donation` is untouched.
    pub fn debit_donation(&mut self, amount: i64) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if self.usable_donation < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: self.usable_donation,
            });
        }
        self.usable_donation -= amount;
        Ok(())
    }
}
