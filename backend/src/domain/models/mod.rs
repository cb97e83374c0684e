pub mod account;
pub mod donation_usage;
pub mod relation;
pub mod store;
