//! The donation ledger: credits, redemptions, the child daily cap and
//! thank-you message gating.
//!
//! Every mutation runs inside one transaction scope, so the balance check,
//! the daily-limit check and the writes they guard are serialized per record
//! set. A failed operation leaves both counters and the usage ledger exactly
//! as they were.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::commands::donation::{
    BalanceResult, CreditDonationCommand, DebitDonationCommand, DebitResult, UsageMessageResult,
    WriteUsageMessageCommand,
};
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::account::AccountRole;
use crate::domain::models::donation_usage::DonationUsage;
use crate::storage::memory::MemoryConnection;
use crate::storage::traits::{AccountStorage, DonationUsageStorage, StoreStorage};

#[derive(Clone)]
pub struct DonationService {
    connection: Arc<MemoryConnection>,
    /// Redemptions a child account gets per calendar day.
    daily_usage_limit: u32,
}

impl DonationService {
    pub fn new(connection: Arc<MemoryConnection>, daily_usage_limit: u32) -> Self {
        Self {
            connection,
            daily_usage_limit,
        }
    }

    /// Credit a donation to a store. Raises both `all_donation` and
    /// `usable_donation`.
    pub fn credit(&self, command: CreditDonationCommand) -> LedgerResult<BalanceResult> {
        info!(
            "Crediting {} to store {}",
            command.amount, command.store_id
        );

        self.connection.transaction(|tables| {
            let mut store = tables
                .find_store(&command.store_id)?
                .ok_or_else(|| LedgerError::StoreNotFound(command.store_id.clone()))?;
            store.credit_donation(command.amount)?;
            store.updated_at = Utc::now();
            tables.save_store(&store)?;
            Ok(BalanceResult {
                store_id: store.id,
                all_donation: store.all_donation,
                usable_donation: store.usable_donation,
            })
        })
    }

    /// Redeem part of a store's usable balance and record the usage.
    pub fn debit(&self, command: DebitDonationCommand) -> LedgerResult<DebitResult> {
        self.debit_at(command, Utc::now())
    }

    /// Clock-explicit debit; the public [`debit`](Self::debit) passes the
    /// current instant. Validation order: amount, existence, ownership,
    /// daily cap, balance.
    fn debit_at(
        &self,
        command: DebitDonationCommand,
        now: DateTime<Utc>,
    ) -> LedgerResult<DebitResult> {
        info!(
            "Debiting {} from store {} for account {}",
            command.amount, command.store_id, command.acting_account_id
        );

        self.connection.transaction(|tables| {
            if command.amount <= 0 {
                return Err(LedgerError::InvalidAmount(command.amount));
            }

            let account = tables
                .find_account(&command.acting_account_id)?
                .ok_or_else(|| LedgerError::AccountNotFound(command.acting_account_id.clone()))?;
            let mut store = tables
                .find_store(&command.store_id)?
                .ok_or_else(|| LedgerError::StoreNotFound(command.store_id.clone()))?;

            // A merchant only manages the store they own.
            if account.role == AccountRole::Merchant && store.account_id != account.id {
                warn!(
                    "Merchant {} attempted to debit store {}",
                    account.id, store.id
                );
                return Err(LedgerError::ForbiddenStoreAccess);
            }

            if tables.child_exists_for_account(&account.id)? {
                let used_today = tables.count_usages_on_day(&account.id, now.date_naive())?;
                if used_today >= self.daily_usage_limit as usize {
                    return Err(LedgerError::DailyLimitExceeded {
                        limit: self.daily_usage_limit,
                    });
                }
            }

            store.debit_donation(command.amount)?;
            store.updated_at = now;
            tables.save_store(&store)?;

            let usage = DonationUsage {
                id: DonationUsage::generate_id(),
                account_id: account.id,
                store_id: store.id.clone(),
                amount: command.amount,
                used_at: now,
                message: None,
            };
            tables.save_usage(&usage)?;

            Ok(DebitResult {
                balance: BalanceResult {
                    store_id: store.id,
                    all_donation: store.all_donation,
                    usable_donation: store.usable_donation,
                },
                usage,
            })
        })
    }

    /// Attach a thank-you message to a usage. Only the account that performed
    /// that exact redemption may write it.
    pub fn write_message(
        &self,
        command: WriteUsageMessageCommand,
    ) -> LedgerResult<UsageMessageResult> {
        info!(
            "Writing message on usage {} by account {}",
            command.usage_id, command.acting_account_id
        );

        self.connection.transaction(|tables| {
            let mut usage = tables
                .find_usage(&command.usage_id)?
                .ok_or_else(|| LedgerError::DonationUsageNotFound(command.usage_id.clone()))?;
            if usage.account_id != command.acting_account_id {
                return Err(LedgerError::ForbiddenMessageWrite);
            }
            usage.message = Some(command.message.clone());
            tables.save_usage(&usage)?;
            Ok(UsageMessageResult { usage })
        })
    }

    /// A store's redemption history, readable only by the owning merchant
    /// (or an admin).
    pub fn list_store_usages(
        &self,
        store_id: &str,
        acting_account_id: &str,
    ) -> LedgerResult<Vec<DonationUsage>> {
        self.connection.read(|tables| {
            let account = tables
                .find_account(acting_account_id)?
                .ok_or_else(|| LedgerError::AccountNotFound(acting_account_id.to_string()))?;
            let store = tables
                .find_store(store_id)?
                .ok_or_else(|| LedgerError::StoreNotFound(store_id.to_string()))?;
            if account.role != AccountRole::Admin && store.account_id != account.id {
                return Err(LedgerError::ForbiddenStoreAccess);
            }
            Ok(tables.usages_by_store(store_id)?)
        })
    }
}
