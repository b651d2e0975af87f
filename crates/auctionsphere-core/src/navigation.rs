//! Navigation bar state and logout

use crate::error::CoreResult;
use crate::models::Role;
use crate::session::{clear_session, current_user};
use crate::storage::KeyValueStore;
use crate::view::{Action, ElementId, Page, View};
use auctionsphere_config::PagesConfig;

/// Where the dashboard link points for a role, and what it says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLink {
    pub page: Page,
    pub label: &'static str,
}

/// Dashboard link for `role`. Buyers and any role the site does not know browse auctions.
pub fn dashboard_for(role: &Role) -> DashboardLink {
    match role {
        Role::Admin => DashboardLink {
            page: Page::AdminDashboard,
            label: "Admin Dashboard",
        },
        Role::Seller => DashboardLink {
            page: Page::SellerDashboard,
            label: "Seller Dashboard",
        },
        Role::Buyer | Role::Other(_) => DashboardLink {
            page: Page::Browse,
            label: "Browse Auctions",
        },
    }
}

/// Show the auth link to visitors; show the role's dashboard link and a logout
/// button to signed-in users. Elements the page lacks are skipped.
pub fn update_navigation(
    store: &dyn KeyValueStore,
    view: &mut dyn View,
    pages: &PagesConfig,
) -> CoreResult<()> {
    match current_user(store)? {
        Some(user) => {
            view.set_visible(ElementId::AuthLink, false);
            if view.has_element(ElementId::DashboardLink) {
                let link = dashboard_for(&user.role);
                view.set_visible(ElementId::DashboardLink, true);
                view.set_href(ElementId::DashboardLink, link.page.href(pages));
                view.set_text(ElementId::DashboardLink, link.label);
            }
            if view.has_element(ElementId::LogoutBtn) {
                view.set_visible(ElementId::LogoutBtn, true);
                view.bind_click(ElementId::LogoutBtn, Action::Logout);
            }
        }
        None => {
            view.set_visible(ElementId::AuthLink, true);
            view.set_visible(ElementId::DashboardLink, false);
            view.set_visible(ElementId::LogoutBtn, false);
        }
    }
    Ok(())
}

/// Clear the session and go to the home page
pub fn logout(store: &mut dyn KeyValueStore, view: &mut dyn View, pages: &PagesConfig) -> CoreResult<()> {
    clear_session(store)?;
    log::info!("Signed out");
    view.navigate(Page::Home.href(pages));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::storage::{write_collection, MemoryStore, CURRENT_USER_KEY, USERS_KEY};
    use crate::view::HeadlessView;

    fn store_with(role: Role) -> MemoryStore {
        let mut store = MemoryStore::new();
        let user = User {
            id: "u1".to_string(),
            email: "someone@site.in".to_string(),
            password: "Secret123".to_string(),
            role,
            name: "Someone".to_string(),
            upi_id: None,
            bank_account: None,
            ifsc_code: None,
            bank_name: None,
            created_at: 0,
            extra: Default::default(),
        };
        write_collection(&mut store, USERS_KEY, &[user]).unwrap();
        store.set(CURRENT_USER_KEY, "someone@site.in".to_string()).unwrap();
        store
    }

    #[test]
    fn test_dashboard_for_roles() {
        assert_eq!(dashboard_for(&Role::Admin).page, Page::AdminDashboard);
        assert_eq!(dashboard_for(&Role::Seller).label, "Seller Dashboard");
        assert_eq!(dashboard_for(&Role::Buyer).page, Page::Browse);
        assert_eq!(dashboard_for(&Role::Buyer).label, "Browse Auctions");
        assert_eq!(
            dashboard_for(&Role::Other("moderator".to_string())).page,
            Page::Browse
        );
    }

    #[test]
    fn test_logged_out_navigation() {
        let store = MemoryStore::new();
        let mut view = HeadlessView::full_page("container");
        update_navigation(&store, &mut view, &PagesConfig::default()).unwrap();

        assert_eq!(view.element(ElementId::AuthLink).unwrap().visible, Some(true));
        assert_eq!(view.element(ElementId::DashboardLink).unwrap().visible, Some(false));
        assert_eq!(view.element(ElementId::LogoutBtn).unwrap().visible, Some(false));
        assert!(view.click(ElementId::LogoutBtn).is_none());
    }

    #[test]
    fn test_logged_in_navigation_per_role() {
        let cases = [
            (Role::Admin, "admin.html", "Admin Dashboard"),
            (Role::Seller, "seller.html", "Seller Dashboard"),
            (Role::Buyer, "auction.html", "Browse Auctions"),
        ];
        for (role, href, label) in cases {
            let store = store_with(role);
            let mut view = HeadlessView::full_page("container");
            update_navigation(&store, &mut view, &PagesConfig::default()).unwrap();

            let dashboard = view.element(ElementId::DashboardLink).unwrap();
            assert_eq!(dashboard.visible, Some(true));
            assert_eq!(dashboard.href.as_deref(), Some(href));
            assert_eq!(dashboard.text.as_deref(), Some(label));
            assert_eq!(view.element(ElementId::AuthLink).unwrap().visible, Some(false));
            assert_eq!(view.click(ElementId::LogoutBtn), Some(Action::Logout));
        }
    }

    #[test]
    fn test_unknown_role_browses_auctions() {
        let store = store_with(Role::Other("moderator".to_string()));
        let mut view = HeadlessView::full_page("container");
        update_navigation(&store, &mut view, &PagesConfig::default()).unwrap();

        let dashboard = view.element(ElementId::DashboardLink).unwrap();
        assert_eq!(dashboard.href.as_deref(), Some("auction.html"));
        assert_eq!(dashboard.text.as_deref(), Some("Browse Auctions"));
        assert_eq!(view.click(ElementId::LogoutBtn), Some(Action::Logout));
    }

    #[test]
    fn test_navigation_skips_missing_elements() {
        let store = store_with(Role::Seller);
        let mut view = HeadlessView::new().with_element(ElementId::LogoutBtn);
        update_navigation(&store, &mut view, &PagesConfig::default()).unwrap();

        assert!(view.element(ElementId::DashboardLink).is_none());
        assert_eq!(view.element(ElementId::LogoutBtn).unwrap().visible, Some(true));
    }

    #[test]
    fn test_logout() {
        let mut store = store_with(Role::Buyer);
        let mut view = HeadlessView::new();
        logout(&mut store, &mut view, &PagesConfig::default()).unwrap();

        assert!(store.get(CURRENT_USER_KEY).is_none());
        assert_eq!(view.location(), Some("index.html"));
    }
}
