//! # In-Memory Storage
//!
//! HashMap-backed realization of the storage traits behind a single
//! connection type. Domain services never touch the tables directly; they go
//! through [`MemoryConnection::read`] for queries and
//! [`MemoryConnection::transaction`] for atomic mutations.

pub mod connection;
pub mod tables;

#[cfg(test)]
pub mod test_utils;

pub use connection::MemoryConnection;
pub use tables::Tables;
