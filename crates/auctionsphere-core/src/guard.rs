//! Page access guard
//!
//! Advisory only: the session lives in client-controlled storage, so anyone can edit
//! their way past this check. It keeps honest users on the pages meant for them.

use crate::alert::{show_alert, AlertKind};
use crate::error::CoreResult;
use crate::models::{Role, User};
use crate::session::current_user;
use crate::storage::KeyValueStore;
use crate::view::{Page, View};
use auctionsphere_config::Config;

/// Shown when a signed-in user lacks the page's role
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to access this page.";

/// Result of [`check_auth`]
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Access granted to this user
    Granted(User),
    /// No session; sent to the login page
    NotLoggedIn,
    /// Wrong role; alerted and sent home
    Forbidden { role: Role },
}

impl AuthOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthOutcome::Granted(_))
    }
}

/// Gate a page on being signed in, and optionally on having exactly `required_role`
pub fn check_auth(
    store: &dyn KeyValueStore,
    view: &mut dyn View,
    config: &Config,
    required_role: Option<Role>,
) -> CoreResult<AuthOutcome> {
    let user = match current_user(store)? {
        Some(user) => user,
        None => {
            view.navigate(Page::Login.href(&config.pages));
            return Ok(AuthOutcome::NotLoggedIn);
        }
    };

    if let Some(required) = required_role {
        if user.role != required {
            log::warn!(
                "Denied {} access to a {} page",
                user.email,
                required
            );
            show_alert(view, &config.alerts, PERMISSION_DENIED_MESSAGE, AlertKind::Danger);
            view.navigate(Page::Home.href(&config.pages));
            return Ok(AuthOutcome::Forbidden { role: user.role });
        }
    }

    Ok(AuthOutcome::Granted(user))
}
