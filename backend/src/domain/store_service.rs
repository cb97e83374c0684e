//! Store discovery: location-ranked listings, keyword search, bookmarks,
//! detail and menu lookups.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::commands::store::{
    GetStoreCommand, ListBookmarkedStoresCommand, ListMenusCommand, ListStoresByKeywordCommand,
    ListStoresByLocationCommand, MenuListResult, StoreDetailResult, StoreListItem,
    StoreListResult,
};
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::geo;
use crate::domain::models::store::Store;
use crate::storage::memory::MemoryConnection;
use crate::storage::traits::{RelationStorage, StoreStorage};

/// Read-side service over the store records.
#[derive(Clone)]
pub struct StoreService {
    connection: Arc<MemoryConnection>,
    /// Whether keyword search ignores case.
    keyword_ignore_case: bool,
}

impl StoreService {
    pub fn new(connection: Arc<MemoryConnection>, keyword_ignore_case: bool) -> Self {
        Self {
            connection,
            keyword_ignore_case,
        }
    }

    /// List all stores ranked by distance from the caller's position.
    pub fn list_by_location(
        &self,
        command: ListStoresByLocationCommand,
    ) -> LedgerResult<StoreListResult> {
        info!(
            "Listing stores by location: ({}, {}) page={} size={}",
            command.longitude, command.latitude, command.page, command.size
        );

        self.connection.read(|tables| {
            let candidates = tables.list_stores()?;
            let ranked = geo::rank(
                (command.longitude, command.latitude),
                candidates,
                command.page,
                command.size,
            );
            let liked = liked_store_ids(tables, &command.account_id)?;

            let items = ranked
                .stores
                .into_iter()
                .map(|r| StoreListItem {
                    liked: liked.contains(&r.store.id),
                    distance_m: r.distance_m,
                    store: r.store,
                })
                .collect();

            Ok(StoreListResult {
                items,
                total: ranked.total,
                page: command.page,
                size: command.size,
                has_more: ranked.has_more,
            })
        })
    }

    /// List stores whose name or address contains the keyword.
    ///
    /// Pagination and `has_more` come straight from the storage query;
    /// distances are annotated for display only, without re-ranking.
    pub fn list_by_keyword(
        &self,
        command: ListStoresByKeywordCommand,
    ) -> LedgerResult<StoreListResult> {
        info!(
            "Listing stores by keyword {:?} page={} size={}",
            command.keyword, command.page, command.size
        );

        self.connection.read(|tables| {
            let (stores, has_more) = tables.search_stores(
                &command.keyword,
                self.keyword_ignore_case,
                command.page,
                command.size,
            )?;
            let liked = liked_store_ids(tables, &command.account_id)?;

            let origin = (command.longitude, command.latitude);
            let items: Vec<StoreListItem> = stores
                .into_iter()
                .map(|store| annotate(store, origin, &liked))
                .collect();

            Ok(StoreListResult {
                total: items.len(),
                page: command.page,
                size: command.size,
                has_more,
                items,
            })
        })
    }

    /// List the stores the account has bookmarked, in bookmark order.
    pub fn list_bookmarked(
        &self,
        command: ListBookmarkedStoresCommand,
    ) -> LedgerResult<StoreListResult> {
        info!(
            "Listing bookmarked stores for {} page={} size={}",
            command.account_id, command.page, command.size
        );

        self.connection.read(|tables| {
            let (bookmarks, has_more) =
                tables.bookmarks_by_account(&command.account_id, command.page, command.size)?;
            let liked = liked_store_ids(tables, &command.account_id)?;

            let origin = (command.longitude, command.latitude);
            let mut items = Vec::with_capacity(bookmarks.len());
            for bookmark in bookmarks {
                // A bookmark may outlive its store; skip rather than fail the
                // whole listing.
                match tables.find_store(&bookmark.store_id)? {
                    Some(store) => items.push(annotate(store, origin, &liked)),
                    None => debug!("Bookmark points at missing store {}", bookmark.store_id),
                }
            }

            Ok(StoreListResult {
                total: items.len(),
                page: command.page,
                size: command.size,
                has_more,
                items,
            })
        })
    }

    /// Fetch one store with the caller's liked flag.
    pub fn get_store(&self, command: GetStoreCommand) -> LedgerResult<StoreDetailResult> {
        debug!("Getting store {}", command.store_id);

        self.connection.read(|tables| {
            let store = tables
                .find_store(&command.store_id)?
                .ok_or_else(|| LedgerError::StoreNotFound(command.store_id.clone()))?;
            let liked = tables
                .find_like(&command.account_id, &command.store_id)?
                .is_some();
            Ok(StoreDetailResult { store, liked })
        })
    }

    /// List a store's menu items.
    pub fn list_menus(&self, command: ListMenusCommand) -> LedgerResult<MenuListResult> {
        debug!("Listing menus for store {}", command.store_id);

        self.connection.read(|tables| {
            let store = tables
                .find_store(&command.store_id)?
                .ok_or_else(|| LedgerError::StoreNotFound(command.store_id.clone()))?;
            Ok(MenuListResult { menus: store.menus })
        })
    }
}

fn liked_store_ids(
    tables: &crate::storage::memory::Tables,
    account_id: &str,
) -> Result<HashSet<String>, LedgerError> {
    Ok(tables
        .likes_by_account(account_id)?
        .into_iter()
        .map(|l| l.store_id)
        .collect())
}

fn annotate(store: Store, origin: (f64, f64), liked: &HashSet<String>) -> StoreListItem {
    StoreListItem {
        distance_m: geo::planar_distance_m(origin, (store.longitude, store.latitude)),
        liked: liked.contains(&store.id),
        store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_utils::{bookmark, like, store_at};
    use crate::storage::traits::RelationStorage;

    const ORIGIN_LON: f64 = 127.0;
    const ORIGIN_LAT: f64 = 37.5;

    fn setup() -> (StoreService, Arc<MemoryConnection>) {
        let connection = Arc::new(MemoryConnection::new());
        // Near, mid and far stores east of the origin (~1, ~3, ~5 km).
        connection
            .transaction(|tables| {
                tables.save_store(&store_at("store::near", 127.0113, 37.5))?;
                tables.save_store(&store_at("store::mid", 127.0339, 37.5))?;
                tables.save_store(&store_at("store::far", 127.0565, 37.5))?;
                Ok(())
            })
            .unwrap();
        (StoreService::new(connection.clone(), true), connection)
    }

    fn location_command(page: usize, size: usize) -> ListStoresByLocationCommand {
        ListStoresByLocationCommand {
            longitude: ORIGIN_LON,
            latitude: ORIGIN_LAT,
            page,
            size,
            account_id: "account::donor".to_string(),
        }
    }

    #[test]
    fn location_listing_is_distance_ordered() {
        let (service, _conn) = setup();
        let result = service.list_by_location(location_command(0, 2)).unwrap();
        let ids: Vec<&str> = result.items.iter().map(|i| i.store.id.as_str()).collect();
        assert_eq!(ids, ["store::near", "store::mid"]);
        assert_eq!(result.total, 3);
        assert!(result.has_more);

        let last = service.list_by_location(location_command(1, 2)).unwrap();
        let ids: Vec<&str> = last.items.iter().map(|i| i.store.id.as_str()).collect();
        assert_eq!(ids, ["store::far"]);
        assert!(!last.has_more);

        let empty = service.list_by_location(location_command(2, 2)).unwrap();
        assert!(empty.items.is_empty());
        assert!(!empty.has_more);
    }

    #[test]
    fn location_listing_annotates_liked_stores() {
        let (service, conn) = setup();
        conn.transaction(|tables| {
            tables.save_like(&like("account::donor", "store::mid"))?;
            Ok(())
        })
        .unwrap();

        let result = service.list_by_location(location_command(0, 3)).unwrap();
        for item in &result.items {
            assert_eq!(item.liked, item.store.id == "store::mid");
        }
    }

    #[test]
    fn keyword_search_respects_case_config() {
        let (_, conn) = setup();
        let insensitive = StoreService::new(conn.clone(), true);
        let sensitive = StoreService::new(conn, false);

        let command = |keyword: &str| ListStoresByKeywordCommand {
            keyword: keyword.to_string(),
            longitude: ORIGIN_LON,
            latitude: ORIGIN_LAT,
            page: 0,
            size: 10,
            account_id: "account::donor".to_string(),
        };

        // Fixture names are "Store store::near" etc.
        let hits = insensitive.list_by_keyword(command("STORE::NEAR")).unwrap();
        assert_eq!(hits.items.len(), 1);

        let misses = sensitive.list_by_keyword(command("STORE::NEAR")).unwrap();
        assert!(misses.items.is_empty());

        // Address matches count too.
        let by_address = insensitive.list_by_keyword(command("sejong")).unwrap();
        assert_eq!(by_address.items.len(), 3);
    }

    #[test]
    fn bookmarked_listing_follows_bookmark_rows() {
        let (service, conn) = setup();
        conn.transaction(|tables| {
            tables.save_bookmark(&bookmark("account::donor", "store::far"))?;
            tables.save_bookmark(&bookmark("account::donor", "store::near"))?;
            Ok(())
        })
        .unwrap();

        let result = service
            .list_bookmarked(ListBookmarkedStoresCommand {
                account_id: "account::donor".to_string(),
                longitude: ORIGIN_LON,
                latitude: ORIGIN_LAT,
                page: 0,
                size: 10,
            })
            .unwrap();
        let ids: HashSet<&str> = result.items.iter().map(|i| i.store.id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["store::near", "store::far"]));
        assert!(!result.has_more);
    }

    #[test]
    fn get_store_reports_missing_store() {
        let (service, _conn) = setup();
        let err = service
            .get_store(GetStoreCommand {
                store_id: "store::missing".to_string(),
                account_id: "account::donor".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::StoreNotFound(_)));
    }

    #[test]
    fn menus_come_back_in_store_order() {
        let (service, _conn) = setup();
        let result = service
            .list_menus(ListMenusCommand {
                store_id: "store::near".to_string(),
            })
            .unwrap();
        let names: Vec<&str> = result.menus.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Kimbap", "Tteokbokki"]);
    }
}
