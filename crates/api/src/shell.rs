// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dashboard shell: sidebar navigation, topbar toggles, avatar, and the
//! theme context.

use saferay_ops_domain::Theme;
use saferay_ops_persistence::{OperatorData, PersistenceError, SqlitePersistence};
use serde::Serialize;
use tracing::{info, warn};

/// Sidebar entries as `(label, href)`, in display order.
pub const NAV_ITEMS: [(&str, &str); 5] = [
    ("Dashboard", "/dashboard"),
    ("Sites", "/dashboard/sites"),
    ("Tickets", "/dashboard/tickets"),
    ("Clients", "/dashboard/clients"),
    ("Team", "/dashboard/team"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    /// The link points at the current route.
    pub active: bool,
}

/// Builds the sidebar links, marking the one whose href equals
/// `current_path`.
#[must_use]
pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    let current: &str = match current_path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    NAV_ITEMS
        .iter()
        .map(|&(label, href)| NavLink {
            label,
            href,
            active: href == current,
        })
        .collect()
}

/// First letter of the email, uppercased, or `?`.
#[must_use]
pub fn avatar_initial(email: Option<&str>) -> String {
    email
        .and_then(|e| e.trim().chars().next())
        .map_or_else(|| String::from("?"), |c| c.to_uppercase().collect())
}

/// Sidebar and topbar toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShellState {
    /// Desktop sidebar shows icons only.
    pub collapsed: bool,
    /// Mobile sidebar drawer is open.
    pub mobile_open: bool,
}

impl ShellState {
    pub const fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub const fn open_mobile(&mut self) {
        self.mobile_open = true;
    }

    pub const fn close_mobile(&mut self) {
        self.mobile_open = false;
    }

    /// Following a link closes the mobile drawer.
    pub const fn navigate(&mut self) {
        self.mobile_open = false;
    }
}

/// The active color scheme, seeded from the operator's stored preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThemeContext {
    theme: Theme,
}

impl ThemeContext {
    /// Reads the operator's stored theme. An unreadable value falls back to
    /// light.
    #[must_use]
    pub fn from_operator(operator: &OperatorData) -> Self {
        let theme: Theme = operator.theme.parse().unwrap_or_else(|e| {
            warn!(operator_id = operator.operator_id, error = %e, "Unreadable theme preference");
            Theme::default()
        });
        Self { theme }
    }

    #[must_use]
    pub const fn theme(self) -> Theme {
        self.theme
    }

    pub const fn set(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Switches to the other scheme and returns it.
    pub const fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Stores the current scheme as the operator's preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator is unknown or the write fails.
    pub fn persist(
        self,
        persistence: &mut SqlitePersistence,
        operator_id: i64,
    ) -> Result<(), PersistenceError> {
        persistence.set_theme(operator_id, self.theme.as_str())?;
        info!(operator_id, theme = %self.theme, "Stored theme preference");
        Ok(())
    }
}

/// Everything the shell renders around a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub links: Vec<NavLink>,
    pub avatar: String,
    pub email: String,
    pub theme: Theme,
    pub state: ShellState,
}

impl ShellView {
    #[must_use]
    pub fn new(operator: &OperatorData, current_path: &str, state: ShellState) -> Self {
        Self {
            links: nav_links(current_path),
            avatar: avatar_initial(Some(&operator.email)),
            email: operator.email.clone(),
            theme: ThemeContext::from_operator(operator).theme(),
            state,
        }
    }
}
