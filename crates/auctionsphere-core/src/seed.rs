//! Default admin and demo data
//!
//! The credentials below are public on purpose: this is a demo site. They are stored in
//! plaintext like every other account.

use crate::error::CoreResult;
use crate::models::{DemoSummary, Product, ProductStatus, Role, User};
use crate::session::users;
use crate::storage::{read_collection, write_collection, KeyValueStore, PRODUCTS_KEY, USERS_KEY};
use auctionsphere_utils::generate_id;
use chrono::Utc;
use serde_json::Value;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@auctionsphere.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin123";
pub const DEMO_SELLER_EMAIL: &str = "seller@demo.com";
pub const DEMO_BUYER_EMAIL: &str = "buyer@demo.com";
pub const DEMO_PASSWORD: &str = "Demo1234";

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

fn account(email: &str, password: &str, role: Role, name: &str, now_ms: i64) -> User {
    User {
        id: generate_id(),
        email: email.to_string(),
        password: password.to_string(),
        role,
        name: name.to_string(),
        upi_id: None,
        bank_account: None,
        ifsc_code: None,
        bank_name: None,
        created_at: now_ms,
        extra: Default::default(),
    }
}

/// Append the default admin unless some admin already exists. Returns whether one was added.
pub fn ensure_default_admin(store: &mut dyn KeyValueStore) -> CoreResult<bool> {
    ensure_default_admin_at(store, Utc::now().timestamp_millis())
}

/// [`ensure_default_admin`] with an explicit clock reading
pub fn ensure_default_admin_at(store: &mut dyn KeyValueStore, now_ms: i64) -> CoreResult<bool> {
    let mut all = users(store)?;
    if all.iter().any(|user| user.role == Role::Admin) {
        return Ok(false);
    }

    all.push(account(
        DEFAULT_ADMIN_EMAIL,
        DEFAULT_ADMIN_PASSWORD,
        Role::Admin,
        "System Admin",
        now_ms,
    ));
    write_collection(store, USERS_KEY, &all)?;
    log::info!("Created default admin {}", DEFAULT_ADMIN_EMAIL);
    Ok(true)
}

/// Make sure the demo seller and buyer exist, and seed two short auctions when there are
/// no products yet. Safe to call repeatedly.
pub fn create_demo_data(store: &mut dyn KeyValueStore) -> CoreResult<DemoSummary> {
    create_demo_data_at(store, Utc::now().timestamp_millis())
}

/// [`create_demo_data`] with an explicit clock reading
pub fn create_demo_data_at(store: &mut dyn KeyValueStore, now_ms: i64) -> CoreResult<DemoSummary> {
    let mut all = users(store)?;

    if !all.iter().any(|user| user.email == DEMO_SELLER_EMAIL) {
        let mut seller = account(DEMO_SELLER_EMAIL, DEMO_PASSWORD, Role::Seller, "Demo Seller", now_ms);
        seller.upi_id = Some("demoseller@upi".to_string());
        all.push(seller);
        log::info!("Created demo seller {}", DEMO_SELLER_EMAIL);
    }

    if !all.iter().any(|user| user.email == DEMO_BUYER_EMAIL) {
        let mut buyer = account(DEMO_BUYER_EMAIL, DEMO_PASSWORD, Role::Buyer, "Demo Buyer", now_ms);
        buyer.bank_account = Some("1234567890".to_string());
        buyer.ifsc_code = Some("DEMO0001234".to_string());
        buyer.bank_name = Some("Demo Bank".to_string());
        all.push(buyer);
        log::info!("Created demo buyer {}", DEMO_BUYER_EMAIL);
    }

    write_collection(store, USERS_KEY, &all)?;

    // Products are only counted, so listings written by other pages are never reshaped
    let existing: Vec<Value> = read_collection(store, PRODUCTS_KEY)?;
    let seller = all.iter().find(|user| user.email == DEMO_SELLER_EMAIL);

    if let (Some(seller), true) = (seller, existing.is_empty()) {
        let products = demo_products(seller, now_ms);
        write_collection(store, PRODUCTS_KEY, &products)?;
        log::info!("Seeded {} demo auctions", products.len());
    }

    log::info!("Demo data created successfully!");
    log::info!("Demo Seller: {} / {}", DEMO_SELLER_EMAIL, DEMO_PASSWORD);
    log::info!("Demo Buyer: {} / {}", DEMO_BUYER_EMAIL, DEMO_PASSWORD);
    log::info!("Admin: {} / {}", DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD);

    Ok(DemoSummary {
        message: "Demo data created! Check console for login credentials.".to_string(),
        seller: format!("{} / {}", DEMO_SELLER_EMAIL, DEMO_PASSWORD),
        buyer: format!("{} / {}", DEMO_BUYER_EMAIL, DEMO_PASSWORD),
        admin: format!("{} / {}", DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD),
    })
}

fn demo_products(seller: &User, now_ms: i64) -> Vec<Product> {
    let listing = |name: &str,
                   description: &str,
                   bid: f64,
                   age_hours: i64,
                   approved_hours_ago: f64,
                   duration_hours: f64,
                   ends_in_minutes: i64| Product {
        id: generate_id(),
        name: name.to_string(),
        description: description.to_string(),
        starting_bid: bid,
        current_bid: bid,
        image: None,
        seller_id: seller.id.clone(),
        seller_name: seller.name.clone(),
        seller_upi: seller.upi_id.clone(),
        status: ProductStatus::Approved,
        created_at: now_ms - age_hours * HOUR_MS,
        approved_at: Some(now_ms - (approved_hours_ago * HOUR_MS as f64) as i64),
        auction_duration: duration_hours,
        auction_end_time: Some(now_ms + ends_in_minutes * MINUTE_MS),
        extra: Default::default(),
    };

    vec![
        listing(
            "Premium Windsurf Board",
            "High-performance windsurf board perfect for advanced riders. Excellent condition.",
            5000.0,
            1,
            0.5,
            0.0833,
            5,
        ),
        listing(
            "Carbon Fiber Sail",
            "Lightweight carbon fiber sail, 7.5m, barely used. Great for racing.",
            3000.0,
            2,
            1.0,
            0.25,
            15,
        ),
    ]
}
