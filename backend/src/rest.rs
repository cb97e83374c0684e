//! REST boundary: thin axum handlers over the domain services and the
//! domain-error-to-status mapping.
//!
//! The authenticated account id arrives as the `account_id` query parameter;
//! identity verification happens upstream of this service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::commands::donation::{
    CreditDonationCommand, DebitDonationCommand, WriteUsageMessageCommand,
};
use crate::domain::commands::store::{
    GetStoreCommand, ListBookmarkedStoresCommand, ListMenusCommand, ListStoresByKeywordCommand,
    ListStoresByLocationCommand, StoreDetailResult, StoreListItem, StoreListResult, ToggleAction,
    ToggleBookmarkCommand, ToggleLikeCommand,
};
use crate::domain::error::LedgerError;
use crate::domain::models::donation_usage::DonationUsage;
use crate::{Backend, DEFAULT_PAGE_SIZE};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store_service: crate::domain::StoreService,
    pub toggle_service: crate::domain::ToggleService,
    pub donation_service: crate::domain::DonationService,
}

impl AppState {
    pub fn new(backend: &Backend) -> Self {
        Self {
            store_service: backend.store_service.clone(),
            toggle_service: backend.toggle_service.clone(),
            donation_service: backend.donation_service.clone(),
        }
    }
}

/// Build the API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/stores", get(list_stores))
        .route("/stores/search", get(search_stores))
        .route("/stores/bookmarked", get(list_bookmarked))
        .route("/stores/:id", get(get_store))
        .route("/stores/:id/menus", get(list_menus))
        .route("/stores/:id/likes", post(toggle_like))
        .route("/stores/:id/bookmarks", post(toggle_bookmark))
        .route("/stores/:id/donations", post(donate))
        .route("/stores/:id/usages", get(list_usages).post(use_donation))
        .route("/usages/:id/message", put(write_message))
        .with_state(state)
}

impl LedgerError {
    fn status(&self) -> StatusCode {
        match self {
            LedgerError::AccountNotFound(_)
            | LedgerError::StoreNotFound(_)
            | LedgerError::DonationUsageNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::ForbiddenStoreAccess | LedgerError::ForbiddenMessageWrite => {
                StatusCode::FORBIDDEN
            }
            LedgerError::InvalidAmount(_)
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::DailyLimitExceeded { .. } => StatusCode::BAD_REQUEST,
            LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        if let LedgerError::Storage(ref e) = self {
            tracing::error!("Storage failure: {e:?}");
        }
        (self.status(), self.to_string()).into_response()
    }
}

#[derive(Deserialize, Debug)]
pub struct LocationQuery {
    pub longitude: f64,
    pub latitude: f64,
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub account_id: String,
}

#[derive(Deserialize, Debug)]
pub struct KeywordQuery {
    pub keyword: String,
    pub longitude: f64,
    pub latitude: f64,
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub account_id: String,
}

#[derive(Deserialize, Debug)]
pub struct ActorQuery {
    pub account_id: String,
}

async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Response {
    info!("GET /api/stores - query: {:?}", query);
    match state.store_service.list_by_location(ListStoresByLocationCommand {
        longitude: query.longitude,
        latitude: query.latitude,
        page: query.page.unwrap_or(0),
        size: query.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        account_id: query.account_id,
    }) {
        Ok(result) => (StatusCode::OK, Json(list_to_response(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn search_stores(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> Response {
    info!("GET /api/stores/search - query: {:?}", query);
    match state.store_service.list_by_keyword(ListStoresByKeywordCommand {
        keyword: query.keyword,
        longitude: query.longitude,
        latitude: query.latitude,
        page: query.page.unwrap_or(0),
        size: query.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        account_id: query.account_id,
    }) {
        Ok(result) => (StatusCode::OK, Json(list_to_response(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_bookmarked(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Response {
    info!("GET /api/stores/bookmarked - query: {:?}", query);
    match state.store_service.list_bookmarked(ListBookmarkedStoresCommand {
        account_id: query.account_id,
        longitude: query.longitude,
        latitude: query.latitude,
        page: query.page.unwrap_or(0),
        size: query.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
    }) {
        Ok(result) => (StatusCode::OK, Json(list_to_response(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(actor): Query<ActorQuery>,
) -> Response {
    info!("GET /api/stores/{store_id}");
    match state.store_service.get_store(GetStoreCommand {
        store_id,
        account_id: actor.account_id,
    }) {
        Ok(result) => (StatusCode::OK, Json(detail_to_response(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_menus(State(state): State<AppState>, Path(store_id): Path<String>) -> Response {
    info!("GET /api/stores/{store_id}/menus");
    match state.store_service.list_menus(ListMenusCommand { store_id }) {
        Ok(result) => (
            StatusCode::OK,
            Json(shared::MenuListResponse {
                menus: result
                    .menus
                    .into_iter()
                    .map(|m| shared::MenuItem {
                        name: m.name,
                        price: m.price,
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn toggle_like(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(actor): Query<ActorQuery>,
) -> Response {
    info!("POST /api/stores/{store_id}/likes - account: {}", actor.account_id);
    match state.toggle_service.toggle_like(ToggleLikeCommand {
        account_id: actor.account_id,
        store_id,
    }) {
        Ok(result) => {
            let message = match result.action {
                ToggleAction::Added => "likeCount++",
                ToggleAction::Removed => "likeCount--",
            };
            (
                StatusCode::OK,
                Json(shared::ToggleResponse {
                    message: message.to_string(),
                    like_count: result.like_count,
                }),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn toggle_bookmark(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(actor): Query<ActorQuery>,
) -> Response {
    info!(
        "POST /api/stores/{store_id}/bookmarks - account: {}",
        actor.account_id
    );
    match state.toggle_service.toggle_bookmark(ToggleBookmarkCommand {
        account_id: actor.account_id,
        store_id,
    }) {
        Ok(result) => {
            let message = match result.action {
                ToggleAction::Added => "BookMark Added",
                ToggleAction::Removed => "BookMark Removed",
            };
            (
                StatusCode::OK,
                Json(shared::ToggleResponse {
                    message: message.to_string(),
                    like_count: None,
                }),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn donate(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(request): Json<shared::DonateRequest>,
) -> Response {
    info!("POST /api/stores/{store_id}/donations - amount: {}", request.amount);
    match state.donation_service.credit(CreditDonationCommand {
        store_id,
        amount: request.amount,
    }) {
        Ok(balance) => (
            StatusCode::OK,
            Json(shared::BalanceResponse {
                store_id: balance.store_id,
                all_donation: balance.all_donation,
                usable_donation: balance.usable_donation,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn use_donation(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(actor): Query<ActorQuery>,
    Json(request): Json<shared::UseDonationRequest>,
) -> Response {
    info!(
        "POST /api/stores/{store_id}/usages - account: {} amount: {}",
        actor.account_id, request.amount
    );
    match state.donation_service.debit(DebitDonationCommand {
        store_id,
        amount: request.amount,
        acting_account_id: actor.account_id,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(shared::BalanceResponse {
                store_id: result.balance.store_id,
                all_donation: result.balance.all_donation,
                usable_donation: result.balance.usable_donation,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_usages(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(actor): Query<ActorQuery>,
) -> Response {
    info!("GET /api/stores/{store_id}/usages - account: {}", actor.account_id);
    match state
        .donation_service
        .list_store_usages(&store_id, &actor.account_id)
    {
        Ok(usages) => {
            let body: Vec<shared::DonationUsageResponse> =
                usages.into_iter().map(usage_to_response).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn write_message(
    State(state): State<AppState>,
    Path(usage_id): Path<String>,
    Query(actor): Query<ActorQuery>,
    Json(request): Json<shared::WriteMessageRequest>,
) -> Response {
    info!("PUT /api/usages/{usage_id}/message - account: {}", actor.account_id);
    match state.donation_service.write_message(WriteUsageMessageCommand {
        usage_id,
        acting_account_id: actor.account_id,
        message: request.message,
    }) {
        Ok(result) => (StatusCode::OK, Json(usage_to_response(result.usage))).into_response(),
        Err(e) => e.into_response(),
    }
}

fn list_to_response(result: StoreListResult) -> shared::StoreListResponse {
    shared::StoreListResponse {
        stores: result.items.into_iter().map(item_to_summary).collect(),
        total: result.total,
        page: result.page,
        size: result.size,
        has_more: result.has_more,
    }
}

fn item_to_summary(item: StoreListItem) -> shared::StoreSummary {
    shared::StoreSummary {
        id: item.store.id,
        name: item.store.name,
        address: item.store.address,
        distance_m: item.distance_m,
        stars: item.store.stars,
        like_count: item.store.like_count,
        usable_donation: item.store.usable_donation,
        liked: item.liked,
    }
}

fn detail_to_response(result: StoreDetailResult) -> shared::StoreDetailResponse {
    let store = result.store;
    shared::StoreDetailResponse {
        id: store.id,
        name: store.name,
        zip_code: store.zip_code,
        address: store.address,
        image_path: store.image_path,
        stars: store.stars,
        like_count: store.like_count,
        all_donation: store.all_donation,
        usable_donation: store.usable_donation,
        longitude: store.longitude,
        latitude: store.latitude,
        liked: result.liked,
    }
}

fn usage_to_response(usage: DonationUsage) -> shared::DonationUsageResponse {
    shared::DonationUsageResponse {
        id: usage.id,
        account_id: usage.account_id,
        store_id: usage.store_id,
        amount: usage.amount,
        used_at: usage.used_at,
        message: usage.message,
    }
}
