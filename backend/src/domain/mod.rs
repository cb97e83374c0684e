//! Domain layer: the geo-ranking engine, the toggle-state manager and the
//! donation ledger, plus their models and command types.

pub mod commands;
pub mod donation_service;
pub mod error;
pub mod geo;
pub mod models;
pub mod store_service;
pub mod toggle_service;

pub use donation_service::DonationService;
pub use error::{LedgerError, LedgerResult};
pub use store_service::StoreService;
pub use toggle_service::ToggleService;
