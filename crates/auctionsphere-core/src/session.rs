//! Session pointer and account lookups
//!
//! The session is the signed-in user's email stored under `currentUser`. At most one
//! session exists per store; no pointer means signed out.

use crate::error::{CoreError, CoreResult};
use crate::models::{NewUser, Role, User};
use crate::storage::{
    get_present, read_collection, write_collection, KeyValueStore, CURRENT_USER_KEY, USERS_KEY,
};
use auctionsphere_utils::{
    generate_id, is_valid_bank_account, is_valid_email, is_valid_ifsc, is_valid_password,
    is_valid_upi,
};
use chrono::Utc;

/// All stored users, in insertion order
pub fn users(store: &dyn KeyValueStore) -> CoreResult<Vec<User>> {
    read_collection(store, USERS_KEY)
}

/// First user whose email matches exactly (case-sensitive)
pub fn find_user(store: &dyn KeyValueStore, email: &str) -> CoreResult<Option<User>> {
    Ok(users(store)?.into_iter().find(|user| user.email == email))
}

/// The signed-in user.
///
/// `None` when there is no session pointer, or when the pointer names an email no
/// stored user has.
pub fn current_user(store: &dyn KeyValueStore) -> CoreResult<Option<User>> {
    let email = match get_present(store, CURRENT_USER_KEY) {
        Some(email) => email,
        None => return Ok(None),
    };

    let user = find_user(store, &email)?;
    if user.is_none() {
        log::warn!("Session pointer '{}' matches no stored user", email);
    }
    Ok(user)
}

/// Point the session at the user with this email and password
pub fn sign_in(store: &mut dyn KeyValueStore, email: &str, password: &str) -> CoreResult<User> {
    let user = find_user(store, email)?
        .filter(|user| user.password == password)
        .ok_or(CoreError::InvalidCredentials)?;

    store.set(CURRENT_USER_KEY, user.email.clone())?;
    log::info!("Signed in as {}", user.summary());
    Ok(user)
}

/// Drop the session pointer
pub fn clear_session(store: &mut dyn KeyValueStore) -> CoreResult<()> {
    store.remove(CURRENT_USER_KEY)
}

fn invalid(message: &str) -> CoreError {
    CoreError::ValidationError {
        message: message.to_string(),
    }
}

/// Validate a registration form for `role` and append the new user.
///
/// Sellers need a UPI id; buyers need a bank account and IFSC code. Admin accounts
/// cannot be registered this way.
pub fn register_user(store: &mut dyn KeyValueStore, role: Role, form: NewUser) -> CoreResult<User> {
    if role == Role::Admin {
        return Err(invalid("Admin accounts cannot be self-registered"));
    }
    if form.name.trim().is_empty() {
        return Err(invalid("Name is required"));
    }
    if !is_valid_email(&form.email) {
        return Err(invalid("Please enter a valid email address"));
    }
    if !is_valid_password(&form.password) {
        return Err(invalid(
            "Password must be at least 8 characters with letters and numbers",
        ));
    }

    let (upi_id, bank_account, ifsc_code, bank_name) = match &role {
        Role::Seller => {
            let upi = form.upi_id.unwrap_or_default();
            if !is_valid_upi(&upi) {
                return Err(invalid("Please enter a valid UPI ID"));
            }
            (Some(upi), None, None, None)
        }
        Role::Buyer => {
            let account = form.bank_account.unwrap_or_default();
            let ifsc = form.ifsc_code.unwrap_or_default();
            if !is_valid_bank_account(&account) {
                return Err(invalid("Bank account number must be 9-18 digits"));
            }
            if !is_valid_ifsc(&ifsc) {
                return Err(invalid("Please enter a valid IFSC code"));
            }
            (None, Some(account), Some(ifsc), form.bank_name)
        }
        Role::Admin | Role::Other(_) => {
            return Err(invalid(&format!("Cannot register a {} account", role)))
        }
    };

    let mut all = users(store)?;
    if all.iter().any(|user| user.email == form.email) {
        return Err(CoreError::DuplicateEntry { entry: form.email });
    }

    let user = User {
        id: generate_id(),
        email: form.email,
        password: form.password,
        role,
        name: form.name.trim().to_string(),
        upi_id,
        bank_account,
        ifsc_code,
        bank_name,
        created_at: Utc::now().timestamp_millis(),
        extra: Default::default(),
    };
    all.push(user.clone());
    write_collection(store, USERS_KEY, &all)?;
    log::info!("Registered {}", user.summary());
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{initialize_storage, MemoryStore};

    fn seller_form(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "Secret123".to_string(),
            name: "Asha".to_string(),
            upi_id: Some("asha@okbank".to_string()),
            ..Default::default()
        }
    }

    fn buyer_form(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "Secret123".to_string(),
            name: "Ravi".to_string(),
            bank_account: Some("123456789012".to_string()),
            ifsc_code: Some("HDFC0001234".to_string()),
            bank_name: Some("HDFC".to_string()),
            ..Default::default()
        }
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        initialize_storage(&mut store).unwrap();
        store
    }

    #[test]
    fn test_current_user_without_session() {
        let store = store();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn test_current_user_stale_pointer() {
        let mut store = store();
        store.set(CURRENT_USER_KEY, "ghost@nowhere.com".to_string()).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn test_current_user_empty_pointer() {
        let mut store = store();
        store.set(CURRENT_USER_KEY, String::new()).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn test_sign_in_and_current_user() {
        let mut store = store();
        register_user(&mut store, Role::Seller, seller_form("asha@shop.in")).unwrap();

        let user = sign_in(&mut store, "asha@shop.in", "Secret123").unwrap();
        assert_eq!(user.role, Role::Seller);
        assert_eq!(current_user(&store).unwrap(), Some(user));

        clear_session(&mut store).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn test_sign_in_is_case_sensitive() {
        let mut store = store();
        register_user(&mut store, Role::Seller, seller_form("asha@shop.in")).unwrap();

        assert!(matches!(
            sign_in(&mut store, "Asha@shop.in", "Secret123"),
            Err(CoreError::InvalidCredentials)
        ));
        assert!(matches!(
            sign_in(&mut store, "asha@shop.in", "secret123"),
            Err(CoreError::InvalidCredentials)
        ));
        assert!(store.get(CURRENT_USER_KEY).is_none());
    }

    #[test]
    fn test_register_buyer() {
        let mut store = store();
        let user = register_user(&mut store, Role::Buyer, buyer_form("ravi@mail.in")).unwrap();

        assert_eq!(user.ifsc_code.as_deref(), Some("HDFC0001234"));
        assert!(user.upi_id.is_none());
        assert_eq!(users(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let mut store = store();
        register_user(&mut store, Role::Buyer, buyer_form("ravi@mail.in")).unwrap();
        let result = register_user(&mut store, Role::Seller, seller_form("ravi@mail.in"));

        assert!(matches!(result, Err(CoreError::DuplicateEntry { .. })));
        assert_eq!(users(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_register_validation() {
        let mut store = store();

        let mut form = seller_form("not-an-email");
        assert!(matches!(
            register_user(&mut store, Role::Seller, form.clone()),
            Err(CoreError::ValidationError { .. })
        ));

        form.email = "asha@shop.in".to_string();
        form.password = "password".to_string();
        assert!(register_user(&mut store, Role::Seller, form.clone()).is_err());

        form.password = "Secret123".to_string();
        form.upi_id = None;
        assert!(register_user(&mut store, Role::Seller, form).is_err());

        let mut form = buyer_form("ravi@mail.in");
        form.ifsc_code = Some("hdfc0001234".to_string());
        assert!(register_user(&mut store, Role::Buyer, form).is_err());

        assert!(register_user(&mut store, Role::Admin, buyer_form("x@y.in")).is_err());
        assert!(register_user(&mut store, Role::Other("guest".to_string()), buyer_form("x@y.in")).is_err());
        assert!(users(&store).unwrap().is_empty());
    }
}
