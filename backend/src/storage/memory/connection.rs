//! Connection wrapper providing read and transaction scopes over [`Tables`].

use std::sync::{Mutex, PoisonError};

use crate::domain::error::LedgerError;

use super::tables::Tables;

/// Shared handle to the in-memory record set.
///
/// All access goes through the two scopes below. `transaction` is the
/// explicit replacement for a declarative database transaction: the closure
/// runs against a working copy while the table lock is held, and the copy is
/// committed only when the closure returns `Ok`. Any error path therefore
/// rolls back completely, and because the lock spans the whole
/// read-check-write sequence, two concurrent debits can never both pass the
/// balance check against a stale balance.
pub struct MemoryConnection {
    tables: Mutex<Tables>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock only means another caller panicked mid-read; the
        // committed state is still consistent.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only closure against the current record set.
    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        f(&self.lock())
    }

    /// Run an atomic mutation. Commits on `Ok`, rolls back on `Err`.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut guard = self.lock();
        let mut working = guard.clone();
        let out = f(&mut working)?;
        *guard = working;
        Ok(out)
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}
