//! Commands and results for the donation ledger.

use crate::domain::models::donation_usage::DonationUsage;

/// Credit `amount` to a store: both donation counters rise.
#[derive(Debug, Clone)]
pub struct CreditDonationCommand {
    pub store_id: String,
    pub amount: i64,
}

/// Redeem `amount` from a store's usable balance on behalf of an account.
#[derive(Debug, Clone)]
pub struct DebitDonationCommand {
    pub store_id: String,
    pub amount: i64,
    pub acting_account_id: String,
}

/// Attach a thank-you message to a previously recorded usage.
#[derive(Debug, Clone)]
pub struct WriteUsageMessageCommand {
    pub usage_id: String,
    pub acting_account_id: String,
    pub message: String,
}

/// Store balance after a ledger operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResult {
    pub store_id: String,
    pub all_donation: i64,
    pub usable_donation: i64,
}

#[derive(Debug, Clone)]
pub struct DebitResult {
    pub balance: BalanceResult,
    pub usage: DonationUsage,
}

#[derive(Debug, Clone)]
pub struct UsageMessageResult {
    pub usage: DonationUsage,
}
