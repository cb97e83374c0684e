//! API contract shared between the backend and its clients: request and
//! response DTOs for store discovery, toggles and the donation ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One store entry in a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Integer-truncated distance in metres from the query origin.
    pub distance_m: i64,
    pub stars: f64,
    pub like_count: i64,
    pub usable_donation: i64,
    /// Whether the requesting account has liked this store.
    pub liked: bool,
}

/// Paginated store listing returned by the location, keyword and bookmark
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreListResponse {
    pub stores: Vec<StoreSummary>,
    /// Candidate count the page was cut from (page element count for
    /// storage-side queries).
    pub total: usize,
    pub page: usize,
    pub size: usize,
    pub has_more: bool,
}

/// Full detail for a single store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDetailResponse {
    pub id: String,
    pub name: String,
    pub zip_code: String,
    pub address: String,
    pub image_path: String,
    pub stars: f64,
    pub like_count: i64,
    pub all_donation: i64,
    pub usable_donation: i64,
    pub longitude: f64,
    pub latitude: f64,
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuListResponse {
    pub menus: Vec<MenuItem>,
}

/// Result of a like/bookmark toggle.
///
/// `message` carries the legacy toggle strings the mobile clients key off:
/// `"likeCount++"`, `"likeCount--"`, `"BookMark Added"`, `"BookMark Removed"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub message: String,
    /// New like count, present only for like toggles.
    pub like_count: Option<i64>,
}

/// Body for crediting a donation to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonateRequest {
    pub amount: i64,
}

/// Body for redeeming (debiting) donation balance at a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseDonationRequest {
    pub amount: i64,
}

/// Store balance after a ledger operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub store_id: String,
    pub all_donation: i64,
    pub usable_donation: i64,
}

/// Body for attaching a thank-you message to a donation usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteMessageRequest {
    pub message: String,
}

/// A single redemption event as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationUsageResponse {
    pub id: String,
    pub account_id: String,
    pub store_id: String,
    pub amount: i64,
    pub used_at: DateTime<Utc>,
    pub message: Option<String>,
}
