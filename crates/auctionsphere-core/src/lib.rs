//! Client-side helpers for the AuctionSphere demo site
//!
//! Storage bootstrap, the session pointer, navigation, alerts, the access guard, file
//! encoding and demo seeding. Everything runs against an injected [`KeyValueStore`] and
//! [`View`], so the same logic drives a browser page, the console binary or a test.

pub mod alert;
pub mod error;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod seed;
pub mod session;
pub mod storage;
pub mod upload;
pub mod view;

use auctionsphere_config::Config;

pub use alert::{show_alert, Alert, AlertKind};
pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use guard::{check_auth, AuthOutcome};
pub use models::{DemoSummary, NewUser, Product, ProductStatus, Role, User};
pub use navigation::{dashboard_for, logout, update_navigation, DashboardLink};
pub use seed::{create_demo_data, ensure_default_admin};
pub use session::current_user;
pub use storage::{initialize_storage, FileStore, KeyValueStore, MemoryStore};
pub use upload::{file_to_base64, FileSource, LocalFile};
pub use view::{Action, AlertTarget, ElementId, HeadlessView, Page, View};

/// One page's worth of client state: its store, its view and the site configuration
pub struct Client<S: KeyValueStore, V: View> {
    store: S,
    view: V,
    config: Config,
}

impl<S: KeyValueStore, V: View> Client<S, V> {
    pub fn new(store: S, view: V, config: Config) -> Self {
        Self { store, view, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// What every page does when its script loads: create missing collections, then
    /// make sure an admin exists
    pub fn on_page_load(&mut self) -> CoreResult<()> {
        initialize_storage(&mut self.store)?;
        ensure_default_admin(&mut self.store)?;
        Ok(())
    }

    pub fn current_user(&self) -> CoreResult<Option<User>> {
        current_user(&self.store)
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> CoreResult<User> {
        session::sign_in(&mut self.store, email, password)
    }

    pub fn register_user(&mut self, role: Role, form: NewUser) -> CoreResult<User> {
        session::register_user(&mut self.store, role, form)
    }

    pub fn update_navigation(&mut self) -> CoreResult<()> {
        update_navigation(&self.store, &mut self.view, &self.config.pages)
    }

    pub fn logout(&mut self) -> CoreResult<()> {
        logout(&mut self.store, &mut self.view, &self.config.pages)
    }

    pub fn show_alert(&mut self, message: &str, kind: AlertKind) -> Alert {
        show_alert(&mut self.view, &self.config.alerts, message, kind)
    }

    pub fn check_auth(&mut self, required_role: Option<Role>) -> CoreResult<AuthOutcome> {
        check_auth(&self.store, &mut self.view, &self.config, required_role)
    }

    pub fn ensure_default_admin(&mut self) -> CoreResult<bool> {
        ensure_default_admin(&mut self.store)
    }

    pub fn create_demo_data(&mut self) -> CoreResult<DemoSummary> {
        create_demo_data(&mut self.store)
    }

    pub fn products(&self) -> CoreResult<Vec<Product>> {
        storage::read_collection(&self.store, storage::PRODUCTS_KEY)
    }

    /// Run an action a view bound to one of its elements
    pub fn dispatch(&mut self, action: Action) -> CoreResult<()> {
        match action {
            Action::Logout => self.logout(),
        }
    }
}

impl<S: KeyValueStore> Client<S, HeadlessView> {
    /// Click an element of a headless page; returns whether anything was bound to it
    pub fn click(&mut self, id: ElementId) -> CoreResult<bool> {
        match self.view.click(id) {
            Some(action) => {
                self.dispatch(action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ==================== Tests ====================
