//! Commands and results for store discovery and the like/bookmark toggles.

use crate::domain::models::store::{Menu, Store};

/// Location-ranked listing of all stores.
#[derive(Debug, Clone)]
pub struct ListStoresByLocationCommand {
    pub longitude: f64,
    pub latitude: f64,
    pub page: usize,
    pub size: usize,
    /// Requesting account, used to annotate each store with its liked flag.
    pub account_id: String,
}

/// Keyword-filtered listing (substring on name or address).
#[derive(Debug, Clone)]
pub struct ListStoresByKeywordCommand {
    pub keyword: String,
    pub longitude: f64,
    pub latitude: f64,
    pub page: usize,
    pub size: usize,
    pub account_id: String,
}

/// Listing of the stores an account has bookmarked.
#[derive(Debug, Clone)]
pub struct ListBookmarkedStoresCommand {
    pub account_id: String,
    pub longitude: f64,
    pub latitude: f64,
    pub page: usize,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct GetStoreCommand {
    pub store_id: String,
    pub account_id: String,
}

#[derive(Debug, Clone)]
pub struct ListMenusCommand {
    pub store_id: String,
}

/// One store in a listing, annotated for the requesting account.
#[derive(Debug, Clone)]
pub struct StoreListItem {
    pub store: Store,
    pub distance_m: i64,
    pub liked: bool,
}

#[derive(Debug, Clone)]
pub struct StoreListResult {
    pub items: Vec<StoreListItem>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone)]
pub struct StoreDetailResult {
    pub store: Store,
    pub liked: bool,
}

#[derive(Debug, Clone)]
pub struct MenuListResult {
    pub menus: Vec<Menu>,
}

#[derive(Debug, Clone)]
pub struct ToggleLikeCommand {
    pub account_id: String,
    pub store_id: String,
}

#[derive(Debug, Clone)]
pub struct ToggleBookmarkCommand {
    pub account_id: String,
    pub store_id: String,
}

/// What a toggle did: created the relation row or removed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Added,
    Removed,
}

#[derive(Debug, Clone)]
pub struct ToggleResult {
    pub action: ToggleAction,
    /// New like count, only present for like toggles.
    pub like_count: Option<i64>,
}
