//! Navigation shell and entity screens.
//!
//! # Route Structure
//!
//! ```text
//! /login        - Sign-in (the only route when signed out)
//! /             - Redirects to /dashboard
//! /dashboard    - Store summary
//! /customers    - Customer list, add, edit, delete
//! /orders       - Order list, detail, status update
//! /products     - Product list, add, edit, delete
//! /tickets      - Support tickets
//! /settings     - Store preferences, two-factor, password
//! /profile      - Own profile
//! ```
//!
//! Signed out, every path except `/login` redirects to `/login`. Signed in,
//! `/login` redirects to `/dashboard` and unknown paths are not found. The
//! shell reads the session on every evaluation, so a sign-out anywhere takes
//! effect on the next navigation.

pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod profile;
pub mod settings;
pub mod tickets;

use core::fmt;

use crate::error::ConsoleError;
use crate::models::SessionUser;
use crate::services::{AuthService, Credentials};
use crate::state::Console;

pub use customers::CustomersScreen;
pub use dashboard::{DashboardScreen, DashboardSummary};
pub use orders::OrdersScreen;
pub use products::ProductsScreen;
pub use profile::ProfileScreen;
pub use settings::SettingsScreen;
pub use tickets::TicketsScreen;

/// A screen of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Customers,
    Orders,
    Products,
    Tickets,
    Settings,
    Profile,
}

impl Route {
    pub const ALL: [Self; 8] = [
        Self::Login,
        Self::Dashboard,
        Self::Customers,
        Self::Orders,
        Self::Products,
        Self::Tickets,
        Self::Settings,
        Self::Profile,
    ];

    /// Where the shell lands after sign-in and for `/`.
    pub const DEFAULT: Self = Self::Dashboard;

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Customers => "/customers",
            Self::Orders => "/orders",
            Self::Products => "/products",
            Self::Tickets => "/tickets",
            Self::Settings => "/settings",
            Self::Profile => "/profile",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Dashboard => "Dashboard",
            Self::Customers => "Customers",
            Self::Orders => "Orders",
            Self::Products => "Products",
            Self::Tickets => "Support Tickets",
            Self::Settings => "Settings",
            Self::Profile => "Profile",
        }
    }

    /// Exact path match; query strings and a trailing slash are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = normalize(path);
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Whether a session token is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Unauthenticated,
    Authenticated,
}

/// Outcome of evaluating a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
    NotFound,
}

/// Route table evaluation.
#[must_use]
pub fn resolve_path(state: ShellState, path: &str) -> Navigation {
    let route = Route::from_path(path);
    match state {
        ShellState::Unauthenticated => match route {
            Some(Route::Login) => Navigation::Render(Route::Login),
            _ => Navigation::Redirect(Route::Login),
        },
        ShellState::Authenticated => match route {
            Some(Route::Login) => Navigation::Redirect(Route::DEFAULT),
            Some(route) => Navigation::Render(route),
            None if normalize(path) == "/" => Navigation::Redirect(Route::DEFAULT),
            None => Navigation::NotFound,
        },
    }
}

/// The navigation shell.
#[derive(Debug, Clone)]
pub struct Shell {
    console: Console,
}

impl Shell {
    #[must_use]
    pub const fn new(console: Console) -> Self {
        Self { console }
    }

    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }

    /// Current state, read from the session.
    #[must_use]
    pub fn state(&self) -> ShellState {
        if self.console.session().is_authenticated() {
            ShellState::Authenticated
        } else {
            ShellState::Unauthenticated
        }
    }

    #[must_use]
    pub fn navigate(&self, path: &str) -> Navigation {
        let navigation = resolve_path(self.state(), path);
        tracing::debug!(path, ?navigation, "Navigate");
        navigation
    }

    /// Resolve a route, following one redirect, and return the screen to show.
    #[must_use]
    pub fn open(&self, route: Route) -> Option<Route> {
        match self.navigate(route.path()) {
            Navigation::Render(r) => Some(r),
            Navigation::Redirect(target) => match self.navigate(target.path()) {
                Navigation::Render(r) => Some(r),
                _ => None,
            },
            Navigation::NotFound => None,
        }
    }

    /// Sign in and land on the default route.
    ///
    /// # Errors
    ///
    /// See [`AuthService::sign_in`].
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<(SessionUser, Navigation), ConsoleError> {
        let user = AuthService::new(self.console.api(), self.console.config())
            .sign_in(credentials)
            .await?;
        Ok((user, Navigation::Redirect(Route::DEFAULT)))
    }

    /// Clear the session and return to the sign-in route.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Storage` if the session cannot be cleared.
    pub fn sign_out(&self) -> Result<Navigation, ConsoleError> {
        AuthService::new(self.console.api(), self.console.config()).sign_out()?;
        Ok(Navigation::Redirect(Route::Login))
    }

    #[must_use]
    pub fn customers(&self) -> CustomersScreen {
        CustomersScreen::new(self.console.api().clone())
    }

    #[must_use]
    pub fn orders(&self) -> OrdersScreen {
        OrdersScreen::new(self.console.api().clone())
    }

    #[must_use]
    pub fn products(&self) -> ProductsScreen {
        ProductsScreen::new(self.console.api().clone())
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn tickets(&self) -> TicketsScreen {
        TicketsScreen::new()
    }

    #[must_use]
    pub fn profile(&self) -> ProfileScreen {
        ProfileScreen::new(self.console.clone())
    }

    #[must_use]
    pub fn settings(&self) -> SettingsScreen {
        SettingsScreen::new(self.console.api().clone())
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardScreen {
        DashboardScreen::new(self.console.api().clone())
    }
}
