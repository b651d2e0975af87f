//! The page surface the client helpers draw on
//!
//! [`View`] is everything the helpers need from a page: a few optional elements, an
//! alert insertion point and the ability to navigate. [`HeadlessView`] records every
//! call and backs both the tests and the console binary.

use crate::alert::Alert;
use auctionsphere_config::PagesConfig;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Optional page elements the navigation bar may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    AuthLink,
    DashboardLink,
    LogoutBtn,
}

impl ElementId {
    /// The element's DOM id
    pub fn dom_id(&self) -> &'static str {
        match self {
            ElementId::AuthLink => "authLink",
            ElementId::DashboardLink => "dashboardLink",
            ElementId::LogoutBtn => "logoutBtn",
        }
    }

    pub fn all() -> [ElementId; 3] {
        [ElementId::AuthLink, ElementId::DashboardLink, ElementId::LogoutBtn]
    }
}

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    AdminDashboard,
    SellerDashboard,
    Browse,
}

impl Page {
    /// The configured file name for this page
    pub fn href<'a>(&self, pages: &'a PagesConfig) -> &'a str {
        match self {
            Page::Home => &pages.home,
            Page::Login => &pages.login,
            Page::AdminDashboard => &pages.admin_dashboard,
            Page::SellerDashboard => &pages.seller_dashboard,
            Page::Browse => &pages.browse,
        }
    }
}

/// Behaviour that can be bound to a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Logout,
}

/// Where an alert was inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTarget {
    /// The page's main container
    Container,
    /// The document body, when there is no container
    Body,
}

/// Page capabilities used by the client helpers.
///
/// Element setters on an element the page does not have are no-ops.
pub trait View {
    fn has_element(&self, id: ElementId) -> bool;
    fn set_visible(&mut self, id: ElementId, visible: bool);
    fn set_href(&mut self, id: ElementId, href: &str);
    fn set_text(&mut self, id: ElementId, text: &str);
    fn bind_click(&mut self, id: ElementId, action: Action);
    /// Whether an element with this class exists to host alerts
    fn has_container(&self, class_name: &str) -> bool;
    /// Insert as the first child of `target`
    fn insert_alert(&mut self, target: AlertTarget, alert: Alert);
    fn navigate(&mut self, href: &str);
}

/// Recorded state of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    /// `None` until something sets it
    pub visible: Option<bool>,
    pub href: Option<String>,
    pub text: Option<String>,
    pub on_click: Option<Action>,
}

/// A page without a browser
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    elements: HashMap<ElementId, ElementState>,
    container_class: Option<String>,
    container_alerts: Vec<Alert>,
    body_alerts: Vec<Alert>,
    location: Option<String>,
}

impl HeadlessView {
    /// An empty page: no elements, no container
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with the full navigation bar and a container of the given class
    pub fn full_page(container_class: &str) -> Self {
        ElementId::all()
            .into_iter()
            .fold(Self::new(), |view, id| view.with_element(id))
            .with_container(container_class)
    }

    pub fn with_element(mut self, id: ElementId) -> Self {
        self.elements.entry(id).or_default();
        self
    }

    pub fn with_container(mut self, class_name: &str) -> Self {
        self.container_class = Some(class_name.to_string());
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    pub fn alerts(&self, target: AlertTarget) -> &[Alert] {
        match target {
            AlertTarget::Container => &self.container_alerts,
            AlertTarget::Body => &self.body_alerts,
        }
    }

    /// Last navigation target, if the page navigated away
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Simulate a click: the action bound to `id`, if any
    pub fn click(&self, id: ElementId) -> Option<Action> {
        self.elements.get(&id).and_then(|element| element.on_click)
    }

    /// Remove alerts whose display time is over; returns how many went away
    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.container_alerts.len() + self.body_alerts.len();
        self.container_alerts.retain(|alert| !alert.is_expired(now));
        self.body_alerts.retain(|alert| !alert.is_expired(now));
        before - (self.container_alerts.len() + self.body_alerts.len())
    }
}

impl View for HeadlessView {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.visible = Some(visible);
        }
    }

    fn set_href(&mut self, id: ElementId, href: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.href = Some(href.to_string());
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.text = Some(text.to_string());
        }
    }

    fn bind_click(&mut self, id: ElementId, action: Action) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.on_click = Some(action);
        }
    }

    fn has_container(&self, class_name: &str) -> bool {
        self.container_class.as_deref() == Some(class_name)
    }

    fn insert_alert(&mut self, target: AlertTarget, alert: Alert) {
        match target {
            AlertTarget::Container => self.container_alerts.insert(0, alert),
            AlertTarget::Body => self.body_alerts.insert(0, alert),
        }
    }

    fn navigate(&mut self, href: &str) {
        self.location = Some(href.to_string());
    }
}
