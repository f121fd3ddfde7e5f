//! Navigation menu.

use super::Screen;

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub screen: Screen,
    pub label: &'static str,
}

impl NavItem {
    /// Whether this entry is highlighted for the active screen.
    pub fn is_active(&self, active: Screen) -> bool {
        self.screen == active
    }
}

/// The sidebar menu, in display order.
pub static MENU: [NavItem; 6] = [
    NavItem {
        screen: Screen::Dashboard,
        label: "Dashboard",
    },
    NavItem {
        screen: Screen::Patients,
        label: "Patients",
    },
    NavItem {
        screen: Screen::Appointments,
        label: "Appointments",
    },
    NavItem {
        screen: Screen::Session,
        label: "Active Session",
    },
    NavItem {
        screen: Screen::Expenses,
        label: "Expenses",
    },
    NavItem {
        screen: Screen::Reports,
        label: "Reports",
    },
];

/// Find the menu entry for a screen id.
pub fn menu_item(id: &str) -> Option<&'static NavItem> {
    MENU.iter().find(|item| item.screen.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::ViewRouter;

    #[test]
    fn test_menu_order() {
        let ids: Vec<&str> = MENU.iter().map(|item| item.screen.id()).collect();
        assert_eq!(
            ids,
            vec!["dashboard", "patients", "appointments", "session", "expenses", "reports"]
        );
    }

    #[test]
    fn test_is_active() {
        let item = menu_item("expenses").unwrap();
        assert!(item.is_active(Screen::Expenses));
        assert!(!item.is_active(Screen::Reports));
        assert!(menu_item("patient-detail").is_none());
    }

    #[test]
    fn test_select_closes_sidebar() {
        let mut router = ViewRouter::new(Screen::Dashboard);
        router.toggle_sidebar();
        assert!(router.sidebar_open());

        let left = router.select_menu_item(&MENU[4]);
        assert_eq!(left, Some(Screen::Dashboard));
        assert_eq!(router.active(), Screen::Expenses);
        assert!(!router.sidebar_open());
    }
}
