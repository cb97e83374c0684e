//! Like/bookmark toggle semantics.
//!
//! A toggle is a pure presence flip on the `(account, store)` relation row.
//! For likes, the store's counter moves in the same transaction scope as the
//! row, so the counter can never drift from the set of existing rows.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::commands::store::{
    ToggleAction, ToggleBookmarkCommand, ToggleLikeCommand, ToggleResult,
};
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::relation::{BookMark, Like};
use crate::storage::memory::MemoryConnection;
use crate::storage::traits::{AccountStorage, RelationStorage, StoreStorage};

#[derive(Clone)]
pub struct ToggleService {
    connection: Arc<MemoryConnection>,
}

impl ToggleService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }

    /// Flip the like state for `(account, store)` and adjust the store's
    /// like count accordingly.
    pub fn toggle_like(&self, command: ToggleLikeCommand) -> LedgerResult<ToggleResult> {
        info!(
            "Toggling like: account={} store={}",
            command.account_id, command.store_id
        );

        self.connection.transaction(|tables| {
            let mut store = tables
                .find_store(&command.store_id)?
                .ok_or_else(|| LedgerError::StoreNotFound(command.store_id.clone()))?;

            if tables
                .find_like(&command.account_id, &command.store_id)?
                .is_some()
            {
                store.decrement_like_count();
                tables.save_store(&store)?;
                tables.delete_like(&command.account_id, &command.store_id)?;
                Ok(ToggleResult {
                    action: ToggleAction::Removed,
                    like_count: Some(store.like_count),
                })
            } else {
                tables
                    .find_account(&command.account_id)?
                    .ok_or_else(|| LedgerError::AccountNotFound(command.account_id.clone()))?;
                store.increment_like_count();
                tables.save_store(&store)?;
                tables.save_like(&Like {
                    account_id: command.account_id.clone(),
                    store_id: command.store_id.clone(),
                    created_at: Utc::now(),
                })?;
                Ok(ToggleResult {
                    action: ToggleAction::Added,
                    like_count: Some(store.like_count),
                })
            }
        })
    }

    /// Flip the bookmark state for `(account, store)`. No counter involved.
    pub fn toggle_bookmark(&self, command: ToggleBookmarkCommand) -> LedgerResult<ToggleResult> {
        info!(
            "Toggling bookmark: account={} store={}",
            command.account_id, command.store_id
        );

        self.connection.transaction(|tables| {
            if tables
                .find_bookmark(&command.account_id, &command.store_id)?
                .is_some()
            {
                tables.delete_bookmark(&command.account_id, &command.store_id)?;
                Ok(ToggleResult {
                    action: ToggleAction::Removed,
                    like_count: None,
                })
            } else {
                tables
                    .find_store(&command.store_id)?
                    .ok_or_else(|| LedgerError::StoreNotFound(command.store_id.clone()))?;
                tables
                    .find_account(&command.account_id)?
                    .ok_or_else(|| LedgerError::AccountNotFound(command.account_id.clone()))?;
                tables.save_bookmark(&BookMark {
                    account_id: command.account_id.clone(),
                    store_id: command.store_id.clone(),
                    created_at: Utc::now(),
                })?;
                Ok(ToggleResult {
                    action: ToggleAction::Added,
                    like_count: None,
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::account::AccountRole;
    use crate::storage::memory::test_utils::{account, store_at};

    fn setup() -> (ToggleService, Arc<MemoryConnection>) {
        let connection = Arc::new(MemoryConnection::new());
        connection
            .transaction(|tables| {
                tables.save_account(&account("account::donor", AccountRole::Donor))?;
                tables.save_store(&store_at("store::1", 127.0, 37.5))?;
                Ok(())
            })
            .unwrap();
        (ToggleService::new(connection.clone()), connection)
    }

    fn like_command() -> ToggleLikeCommand {
        ToggleLikeCommand {
            account_id: "account::donor".to_string(),
            store_id: "store::1".to_string(),
        }
    }

    fn bookmark_command() -> ToggleBookmarkCommand {
        ToggleBookmarkCommand {
            account_id: "account::donor".to_string(),
            store_id: "store::1".to_string(),
        }
    }

    #[test]
    fn like_toggle_flips_row_and_counter() {
        let (service, conn) = setup();

        let added = service.toggle_like(like_command()).unwrap();
        assert_eq!(added.action, ToggleAction::Added);
        assert_eq!(added.like_count, Some(1));
        assert!(conn
            .read(|t| t.find_like("account::donor", "store::1").unwrap())
            .is_some());

        let removed = service.toggle_like(like_command()).unwrap();
        assert_eq!(removed.action, ToggleAction::Removed);
        assert_eq!(removed.like_count, Some(0));
        assert!(conn
            .read(|t| t.find_like("account::donor", "store::1").unwrap())
            .is_none());

        // Back to the original counter, no relation row left behind.
        let store = conn.read(|t| t.find_store("store::1").unwrap()).unwrap();
        assert_eq!(store.like_count, 0);
    }

    #[test]
    fn like_counts_accumulate_across_accounts() {
        let (service, conn) = setup();
        conn.transaction(|tables| {
            tables.save_account(&account("account::second", AccountRole::Donor))?;
            Ok(())
        })
        .unwrap();

        service.toggle_like(like_command()).unwrap();
        service
            .toggle_like(ToggleLikeCommand {
                account_id: "account::second".to_string(),
                store_id: "store::1".to_string(),
            })
            .unwrap();

        let store = conn.read(|t| t.find_store("store::1").unwrap()).unwrap();
        assert_eq!(store.like_count, 2);

        // One account un-likes; the other's like remains counted.
        service.toggle_like(like_command()).unwrap();
        let store = conn.read(|t| t.find_store("store::1").unwrap()).unwrap();
        assert_eq!(store.like_count, 1);
    }

    #[test]
    fn like_requires_existing_store_and_account() {
        let (service, _conn) = setup();

        let err = service
            .toggle_like(ToggleLikeCommand {
                account_id: "account::donor".to_string(),
                store_id: "store::missing".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::StoreNotFound(_)));

        let err = service
            .toggle_like(ToggleLikeCommand {
                account_id: "account::missing".to_string(),
                store_id: "store::1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(_)));
    }

    #[test]
    fn failed_like_leaves_counter_untouched() {
        let (service, conn) = setup();
        let _ = service.toggle_like(ToggleLikeCommand {
            account_id: "account::missing".to_string(),
            store_id: "store::1".to_string(),
        });
        let store = conn.read(|t| t.find_store("store::1").unwrap()).unwrap();
        assert_eq!(store.like_count, 0);
    }

    #[test]
    fn bookmark_toggle_flips_row_only() {
        let (service, conn) = setup();

        let added = service.toggle_bookmark(bookmark_command()).unwrap();
        assert_eq!(added.action, ToggleAction::Added);
        assert_eq!(added.like_count, None);

        let removed = service.toggle_bookmark(bookmark_command()).unwrap();
        assert_eq!(removed.action, ToggleAction::Removed);
        assert!(conn
            .read(|t| t.find_bookmark("account::donor", "store::1").unwrap())
            .is_none());

        let store = conn.read(|t| t.find_store("store::1").unwrap()).unwrap();
        assert_eq!(store.like_count, 0);
    }
}
