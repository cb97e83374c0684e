//! In-memory realization of the storage traits.
//!
//! One `Tables` value is the whole record set. It is cheap to clone, which is
//! what gives [`super::connection::MemoryConnection`] its copy-and-commit
//! transaction scope.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::models::account::{Account, Child};
use crate::domain::models::donation_usage::DonationUsage;
use crate::domain::models::relation::{BookMark, Like};
use crate::domain::models::store::Store;
use crate::storage::traits::{
    AccountStorage, DonationUsageStorage, RelationStorage, StoreStorage,
};

/// Unique key of a relation row.
type RelationKey = (String, String);

#[derive(Debug, Default, Clone)]
pub struct Tables {
    accounts: HashMap<String, Account>,
    children: HashMap<String, Child>,
    // BTreeMap keeps full listings ordered by store id.
    stores: BTreeMap<String, Store>,
    likes: HashMap<RelationKey, Like>,
    bookmarks: HashMap<RelationKey, BookMark>,
    usages: HashMap<String, DonationUsage>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    fn relation_key(account_id: &str, store_id: &str) -> RelationKey {
        (account_id.to_string(), store_id.to_string())
    }
}

impl AccountStorage for Tables {
    fn save_account(&mut self, account: &Account) -> Result<()> {
        self.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    fn find_account(&self, account_id: &str) -> Result<Option<Account>> {
        Ok(self.accounts.get(account_id).cloned())
    }

    fn save_child(&mut self, child: &Child) -> Result<()> {
        self.children.insert(child.id.clone(), child.clone());
        Ok(())
    }

    fn find_child_by_account(&self, account_id: &str) -> Result<Option<Child>> {
        Ok(self
            .children
            .values()
            .find(|c| c.account_id == account_id)
            .cloned())
    }

    fn child_exists_for_account(&self, account_id: &str) -> Result<bool> {
        Ok(self.children.values().any(|c| c.account_id == account_id))
    }
}

impl StoreStorage for Tables {
    fn save_store(&mut self, store: &Store) -> Result<()> {
        self.stores.insert(store.id.clone(), store.clone());
        Ok(())
    }

    fn find_store(&self, store_id: &str) -> Result<Option<Store>> {
        Ok(self.stores.get(store_id).cloned())
    }

    fn list_stores(&self) -> Result<Vec<Store>> {
        Ok(self.stores.values().cloned().collect())
    }

    fn search_stores(
        &self,
        keyword: &str,
        ignore_case: bool,
        page: usize,
        size: usize,
    ) -> Result<(Vec<Store>, bool)> {
        let needle = if ignore_case {
            keyword.to_lowercase()
        } else {
            keyword.to_string()
        };
        let matches = |hay: &str| {
            if ignore_case {
                hay.to_lowercase().contains(&needle)
            } else {
                hay.contains(&needle)
            }
        };

        let hits: Vec<&Store> = self
            .stores
            .values()
            .filter(|s| matches(&s.name) || matches(&s.address))
            .collect();

        let start = page.saturating_mul(size);
        let slice: Vec<Store> = hits
            .iter()
            .skip(start)
            .take(size)
            .map(|s| (*s).clone())
            .collect();
        let has_more = start + slice.len() < hits.len();
        Ok((slice, has_more))
    }
}

impl RelationStorage for Tables {
    fn find_like(&self, account_id: &str, store_id: &str) -> Result<Option<Like>> {
        Ok(self
            .likes
            .get(&Self::relation_key(account_id, store_id))
            .cloned())
    }

    fn save_like(&mut self, like: &Like) -> Result<()> {
        self.likes.insert(
            Self::relation_key(&like.account_id, &like.store_id),
            like.clone(),
        );
        Ok(())
    }

    fn delete_like(&mut self, account_id: &str, store_id: &str) -> Result<bool> {
        Ok(self
            .likes
            .remove(&Self::relation_key(account_id, store_id))
            .is_some())
    }

    fn likes_by_account(&self, account_id: &str) -> Result<Vec<Like>> {
        Ok(self
            .likes
            .values()
            .filter(|l| l.account_id == account_id)
            .cloned()
            .collect())
    }

    fn find_bookmark(&self, account_id: &str, store_id: &str) -> Result<Option<BookMark>> {
        Ok(self
            .bookmarks
            .get(&Self::relation_key(account_id, store_id))
            .cloned())
    }

    fn save_bookmark(&mut self, bookmark: &BookMark) -> Result<()> {
        self.bookmarks.insert(
            Self::relation_key(&bookmark.account_id, &bookmark.store_id),
            bookmark.clone(),
        );
        Ok(())
    }

    fn delete_bookmark(&mut self, account_id: &str, store_id: &str) -> Result<bool> {
        Ok(self
            .bookmarks
            .remove(&Self::relation_key(account_id, store_id))
            .is_some())
    }

    fn bookmarks_by_account(
        &self,
        account_id: &str,
        page: usize,
        size: usize,
    ) -> Result<(Vec<BookMark>, bool)> {
        let mut hits: Vec<&BookMark> = self
            .bookmarks
            .values()
            .filter(|b| b.account_id == account_id)
            .collect();
        hits.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.store_id.cmp(&b.store_id))
        });

        let start = page.saturating_mul(size);
        let slice: Vec<BookMark> = hits
            .iter()
            .skip(start)
            .take(size)
            .map(|b| (*b).clone())
            .collect();
        let has_more = start + slice.len() < hits.len();
        Ok((slice, has_more))
    }
}

impl DonationUsageStorage for Tables {
    fn save_usage(&mut self, usage: &DonationUsage) -> Result<()> {
        self.usages.insert(usage.id.clone(), usage.clone());
        Ok(())
    }

    fn find_usage(&self, usage_id: &str) -> Result<Option<DonationUsage>> {
        Ok(self.usages.get(usage_id).cloned())
    }

    fn count_usages_on_day(&self, account_id: &str, day: NaiveDate) -> Result<usize> {
        Ok(self
            .usages
            .values()
            .filter(|u| u.account_id == account_id && u.used_at.date_naive() == day)
            .count())
    }

    fn usages_by_store(&self, store_id: &str) -> Result<Vec<DonationUsage>> {
        let mut usages: Vec<DonationUsage> = self
            .usages
            .values()
            .filter(|u| u.store_id == store_id)
            .cloned()
            .collect();
        usages.sort_by(|a, b| a.used_at.cmp(&b.used_at).then_with(|| a.id.cmp(&b.id)));
        Ok(usages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_utils::{account, child_of, like, store_at};
    use chrono::{TimeZone, Utc};

    #[test]
    fn store_round_trip_and_ordering() {
        let mut tables = Tables::new();
        tables.save_store(&store_at("store::b", 127.0, 37.5)).unwrap();
        tables.save_store(&store_at("store::a", 127.1, 37.5)).unwrap();

        let listed = tables.list_stores().unwrap();
        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["store::a", "store::b"]);
        assert!(tables.find_store("store::a").unwrap().is_some());
        assert!(tables.find_store("store::missing").unwrap().is_none());
    }

    #[test]
    fn keyword_search_matches_name_or_address() {
        let mut tables = Tables::new();
        let mut s1 = store_at("store::1", 127.0, 37.5);
        s1.name = "Happy Bunsik".to_string();
        s1.address = "12 River Rd".to_string();
        let mut s2 = store_at("store::2", 127.0, 37.5);
        s2.name = "Noodle House".to_string();
        s2.address = "3 bunsik alley".to_string();
        let mut s3 = store_at("store::3", 127.0, 37.5);
        s3.name = "Grill".to_string();
        s3.address = "9 Hill St".to_string();
        for s in [&s1, &s2, &s3] {
            tables.save_store(s).unwrap();
        }

        let (hits, has_more) = tables.search_stores("bunsik", true, 0, 10).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(!has_more);

        // Case-sensitive search misses the capitalized name.
        let (hits, _) = tables.search_stores("bunsik", false, 0, 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "store::2");
    }

    #[test]
    fn keyword_search_paginates_with_has_more() {
        let mut tables = Tables::new();
        for i in 0..5 {
            let mut s = store_at(&format!("store::{i}"), 127.0, 37.5);
            s.name = format!("Diner {i}");
            tables.save_store(&s).unwrap();
        }
        let (page0, more0) = tables.search_stores("Diner", true, 0, 2).unwrap();
        assert_eq!(page0.len(), 2);
        assert!(more0);
        let (page2, more2) = tables.search_stores("Diner", true, 2, 2).unwrap();
        assert_eq!(page2.len(), 1);
        assert!(!more2);
        let (page3, more3) = tables.search_stores("Diner", true, 3, 2).unwrap();
        assert!(page3.is_empty());
        assert!(!more3);
    }

    #[test]
    fn relation_rows_are_keyed_by_account_and_store() {
        let mut tables = Tables::new();
        tables.save_like(&like("account::a", "store::1")).unwrap();

        assert!(tables.find_like("account::a", "store::1").unwrap().is_some());
        assert!(tables.find_like("account::a", "store::2").unwrap().is_none());
        assert!(tables.find_like("account::b", "store::1").unwrap().is_none());

        assert!(tables.delete_like("account::a", "store::1").unwrap());
        assert!(!tables.delete_like("account::a", "store::1").unwrap());
    }

    #[test]
    fn child_lookup_by_account() {
        let mut tables = Tables::new();
        let acct = account("account::kid", crate::domain::models::account::AccountRole::Child);
        tables.save_account(&acct).unwrap();
        tables.save_child(&child_of("child::1", "account::kid")).unwrap();

        assert!(tables.child_exists_for_account("account::kid").unwrap());
        assert!(!tables.child_exists_for_account("account::other").unwrap());
        let child = tables.find_child_by_account("account::kid").unwrap().unwrap();
        assert_eq!(child.id, "child::1");
    }

    #[test]
    fn usage_count_is_scoped_to_account_and_day() {
        let mut tables = Tables::new();
        let day1 = Utc.with_ymd_and_hms(2026, 8, 24, 11, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2026, 8, 25, 11, 0, 0).unwrap();

        for (i, (acct, at)) in [
            ("account::kid", day1),
            ("account::kid", day1),
            ("account::kid", day2),
            ("account::other", day1),
        ]
        .iter()
        .enumerate()
        {
            tables
                .save_usage(&DonationUsage {
                    id: format!("usage::{i}"),
                    account_id: acct.to_string(),
                    store_id: "store::1".to_string(),
                    amount: 100,
                    used_at: *at,
                    message: None,
                })
                .unwrap();
        }

        assert_eq!(
            tables
                .count_usages_on_day("account::kid", day1.date_naive())
                .unwrap(),
            2
        );
        assert_eq!(
            tables
                .count_usages_on_day("account::kid", day2.date_naive())
                .unwrap(),
            1
        );
        assert_eq!(tables.usages_by_store("store::1").unwrap().len(), 4);
    }
}
