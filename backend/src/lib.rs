//! # Store & Donation Ledger Service
//!
//! Backend for a donation-based meal support program: donors credit usable
//! balance to local stores, beneficiaries (including capped child accounts)
//! redeem it, and like/bookmark social state layers on top of geolocation-
//! ranked store discovery.

use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod rest;
pub mod seed;
pub mod storage;

use config::AppConfig;
use domain::{DonationService, StoreService, ToggleService};
use storage::memory::MemoryConnection;

/// Default page size for store listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Orchestrates the domain services over one shared connection.
pub struct Backend {
    pub connection: Arc<MemoryConnection>,
    pub store_service: StoreService,
    pub toggle_service: ToggleService,
    pub donation_service: DonationService,
}

impl Backend {
    pub fn new(config: &AppConfig) -> Self {
        let connection = Arc::new(MemoryConnection::new());

        let store_service = StoreService::new(connection.clone(), config.keyword_ignore_case);
        let toggle_service = ToggleService::new(connection.clone());
        let donation_service = DonationService::new(connection.clone(), config.daily_usage_limit);

        Backend {
            connection,
            store_service,
            toggle_service,
            donation_service,
        }
    }
}
