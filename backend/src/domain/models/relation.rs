//! Like and bookmark relation rows.
//!
//! Each relation is uniquely keyed by `(account_id, store_id)`; the row's
//! presence is the entire "liked"/"bookmarked" state, so toggling off means
//! deleting the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub account_id: String,
    pub store_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookMark {
    pub account_id: String,
    pub store_id: String,
    pub created_at: DateTime<Utc>,
}
