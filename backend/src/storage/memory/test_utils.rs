//! Shared fixture builders for storage and service tests.

use chrono::Utc;

use crate::domain::models::account::{Account, AccountRole, Child};
use crate::domain::models::relation::{BookMark, Like};
use crate::domain::models::store::{Menu, Store};

pub fn account(id: &str, role: AccountRole) -> Account {
    let now = Utc::now();
    Account {
        id: id.to_string(),
        name: format!("Account {id}"),
        role,
        created_at: now,
        updated_at: now,
    }
}

pub fn child_of(id: &str, account_id: &str) -> Child {
    Child {
        id: id.to_string(),
        account_id: account_id.to_string(),
        card_number: "9400-0000-0000".to_string(),
    }
}

pub fn store_at(id: &str, lon: f64, lat: f64) -> Store {
    let now = Utc::now();
    Store {
        id: id.to_string(),
        name: format!("Store {id}"),
        zip_code: "04524".to_string(),
        address: "22 Sejong-daero".to_string(),
        image_path: String::new(),
        stars: 4.0,
        like_count: 0,
        all_donation: 0,
        usable_donation: 0,
        longitude: lon,
        latitude: lat,
        account_id: format!("{id}::owner"),
        menus: vec![
            Menu {
                name: "Kimbap".to_string(),
                price: 3_500,
            },
            Menu {
                name: "Tteokbokki".to_string(),
                price: 5_000,
            },
        ],
        created_at: now,
        updated_at: now,
    }
}

pub fn like(account_id: &str, store_id: &str) -> Like {
    Like {
        account_id: account_id.to_string(),
        store_id: store_id.to_string(),
        created_at: Utc::now(),
    }
}

pub fn bookmark(account_id: &str, store_id: &str) -> BookMark {
    BookMark {
        account_id: account_id.to_string(),
        store_id: store_id.to_string(),
        created_at: Utc::now(),
    }
}
