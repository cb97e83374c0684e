//! # Storage Traits
//!
//! The black-box contract between the domain layer and whatever holds the
//! records. The domain only ever calls these save / find-by-id / delete and
//! predicate-finder primitives, so a SQL realization can replace the
//! in-memory one without touching the services.

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::models::account::{Account, Child};
use crate::domain::models::donation_usage::DonationUsage;
use crate::domain::models::relation::{BookMark, Like};
use crate::domain::models::store::Store;

/// Account records plus the 1:1 child specialization.
pub trait AccountStorage {
    fn save_account(&mut self, account: &Account) -> Result<()>;

    fn find_account(&self, account_id: &str) -> Result<Option<Account>>;

    fn save_child(&mut self, child: &Child) -> Result<()>;

    /// Resolve the child record bound to an account, if the account is a
    /// child beneficiary.
    fn find_child_by_account(&self, account_id: &str) -> Result<Option<Child>>;

    fn child_exists_for_account(&self, account_id: &str) -> Result<bool>;
}

/// Store records and the filtered queries the listing endpoints need.
pub trait StoreStorage {
    fn save_store(&mut self, store: &Store) -> Result<()>;

    fn find_store(&self, store_id: &str) -> Result<Option<Store>>;

    /// All stores, ordered by id.
    fn list_stores(&self) -> Result<Vec<Store>>;

    /// Stores whose name or address contains `keyword`, paginated.
    /// Returns the page slice and whether further pages exist.
    fn search_stores(
        &self,
        keyword: &str,
        ignore_case: bool,
        page: usize,
        size: usize,
    ) -> Result<(Vec<Store>, bool)>;
}

/// Like and bookmark relation rows, uniquely keyed by `(account, store)`.
pub trait RelationStorage {
    fn find_like(&self, account_id: &str, store_id: &str) -> Result<Option<Like>>;

    fn save_like(&mut self, like: &Like) -> Result<()>;

    /// Returns whether a row existed and was deleted.
    fn delete_like(&mut self, account_id: &str, store_id: &str) -> Result<bool>;

    fn likes_by_account(&self, account_id: &str) -> Result<Vec<Like>>;

    fn find_bookmark(&self, account_id: &str, store_id: &str) -> Result<Option<BookMark>>;

    fn save_bookmark(&mut self, bookmark: &BookMark) -> Result<()>;

    fn delete_bookmark(&mut self, account_id: &str, store_id: &str) -> Result<bool>;

    /// An account's bookmarks ordered by creation time, paginated.
    /// Returns the page slice and whether further pages exist.
    fn bookmarks_by_account(
        &self,
        account_id: &str,
        page: usize,
        size: usize,
    ) -> Result<(Vec<BookMark>, bool)>;
}

/// Donation-usage ledger entries.
pub trait DonationUsageStorage {
    /// Insert or update a usage row (updates carry the thank-you message).
    fn save_usage(&mut self, usage: &DonationUsage) -> Result<()>;

    fn find_usage(&self, usage_id: &str) -> Result<Option<DonationUsage>>;

    /// Number of redemptions an account performed on the given calendar day,
    /// across all stores. Drives the child daily cap.
    fn count_usages_on_day(&self, account_id: &str, day: NaiveDate) -> Result<usize>;

    fn usages_by_store(&self, store_id: &str) -> Result<Vec<DonationUsage>>;
}
