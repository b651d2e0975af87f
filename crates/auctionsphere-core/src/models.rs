//! Users, products and the demo summary, in the JSON layout the pages store

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account role.
///
/// Stored roles outside the three the site knows are kept verbatim as [`Role::Other`]
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Approves listings, manages the site
    Admin,
    /// Lists products for auction
    Seller,
    /// Bids on listings
    Buyer,
    Other(String),
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => Role::Admin,
            "seller" => Role::Seller,
            "buyer" => Role::Buyer,
            _ => Role::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Seller => write!(f, "seller"),
            Role::Buyer => write!(f, "buyer"),
            Role::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Page scripts store times from `Date.now()` arithmetic, which may be fractional
mod epoch_ms {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(f64::deserialize(deserializer)? as i64)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<i64>, D::Error> {
            Ok(Option::<f64>::deserialize(deserializer)?.map(|ms| ms as i64))
        }
    }
}

/// A registered account.
///
/// Passwords are stored in plaintext, exactly as the pages store them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique, compared case-sensitively
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub name: String,
    /// Seller payout address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    /// Buyer refund account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "epoch_ms::deserialize")]
    pub created_at: i64,
    /// Fields written by other pages; kept so whole-collection rewrites don't drop them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Human-readable one-liner
    pub fn summary(&self) -> String {
        format!("{} <{}> ({})", self.name, self.email, self.role)
    }
}

/// Listing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Awaiting admin approval
    Pending,
    /// Live for bidding
    Approved,
    Rejected,
    Sold,
    /// Any status string this crate does not know
    #[serde(other)]
    Unknown,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Pending
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Pending => write!(f, "pending"),
            ProductStatus::Approved => write!(f, "approved"),
            ProductStatus::Rejected => write!(f, "rejected"),
            ProductStatus::Sold => write!(f, "sold"),
            ProductStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// An auction listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub starting_bid: f64,
    pub current_bid: f64,
    /// Data URL of the product photo
    #[serde(default)]
    pub image: Option<String>,
    pub seller_id: String,
    pub seller_name: String,
    #[serde(rename = "sellerUPI", default)]
    pub seller_upi: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(deserialize_with = "epoch_ms::deserialize")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "epoch_ms::option::deserialize")]
    pub approved_at: Option<i64>,
    /// Hours
    pub auction_duration: f64,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "epoch_ms::option::deserialize")]
    pub auction_end_time: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Whether bidding has closed at `now_ms`
    pub fn has_ended(&self, now_ms: i64) -> bool {
        self.auction_end_time.map(|end| now_ms >= end).unwrap_or(false)
    }
}

/// Credentials printed after seeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSummary {
    pub message: String,
    pub seller: String,
    pub buyer: String,
    pub admin: String,
}

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub upi_id: Option<String>,
    pub bank_account: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from("admin".to_string()), Role::Admin);
        assert_eq!(Role::from("seller".to_string()), Role::Seller);
        assert_eq!(Role::from("buyer".to_string()), Role::Buyer);
        assert_eq!(
            Role::from("Seller".to_string()),
            Role::Other("Seller".to_string())
        );
        assert_eq!(String::from(Role::Other("moderator".to_string())), "moderator");
        assert_eq!(String::from(Role::Buyer), "buyer");
    }

    #[test]
    fn test_unknown_role_kept_verbatim() {
        let raw = json!({
            "id": "m1",
            "email": "mod@site.in",
            "password": "Secret123",
            "role": "moderator",
            "name": "Mod",
            "createdAt": 5
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.role, Role::Other("moderator".to_string()));
        assert_eq!(user.summary(), "Mod <mod@site.in> (moderator)");
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_user_missing_name_and_created_at() {
        let user: User = serde_json::from_value(json!({
            "id": "b1",
            "email": "b@site.in",
            "password": "Secret123",
            "role": "buyer"
        }))
        .unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.created_at, 0);
    }

    #[test]
    fn test_fractional_timestamps() {
        let product: Product = serde_json::from_value(json!({
            "id": "p2",
            "name": "Sail",
            "description": "",
            "startingBid": 3000,
            "currentBid": 3000,
            "sellerId": "s1",
            "sellerName": "Demo Seller",
            "status": "approved",
            "createdAt": 1700000000000.5,
            "approvedAt": 1700000000000i64,
            "auctionDuration": 0.0833,
            "auctionEndTime": 1700000299879.9999
        }))
        .unwrap();
        assert_eq!(product.created_at, 1_700_000_000_000);
        assert_eq!(product.approved_at, Some(1_700_000_000_000));
        assert_eq!(product.auction_end_time, Some(1_700_000_299_880));
        assert!(product.has_ended(1_700_000_299_880));
    }

    #[test]
    fn test_user_json_layout() {
        let raw = json!({
            "id": "u1",
            "email": "buyer@demo.com",
            "password": "Demo1234",
            "role": "buyer",
            "name": "Demo Buyer",
            "bankAccount": "1234567890",
            "ifscCode": "DEMO0001234",
            "bankName": "Demo Bank",
            "createdAt": 1700000000000i64,
            "wishlist": ["p1"]
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.role, Role::Buyer);
        assert_eq!(user.bank_account.as_deref(), Some("1234567890"));
        assert!(user.upi_id.is_none());
        assert_eq!(user.extra["wishlist"], json!(["p1"]));

        // unknown fields survive, absent optionals stay absent
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_product_json_layout() {
        let raw = json!({
            "id": "p1",
            "name": "Board",
            "description": "Fast",
            "startingBid": 5000,
            "currentBid": 5200,
            "image": null,
            "sellerId": "s1",
            "sellerName": "Demo Seller",
            "sellerUPI": "demoseller@upi",
            "status": "approved",
            "createdAt": 1,
            "approvedAt": 2,
            "auctionDuration": 0.25,
            "auctionEndTime": 100
        });
        let product: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(product.status, ProductStatus::Approved);
        assert_eq!(product.seller_upi.as_deref(), Some("demoseller@upi"));
        assert_eq!(product.current_bid, 5200.0);
        assert!(!product.has_ended(99));
        assert!(product.has_ended(100));

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["sellerUPI"], json!("demoseller@upi"));
        assert_eq!(back["image"], Value::Null);
    }

    #[test]
    fn test_unknown_product_status() {
        let status: ProductStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, ProductStatus::Unknown);
    }
}
