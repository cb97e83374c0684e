pub mod donation;
pub mod store;
