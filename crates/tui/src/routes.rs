use crate::client::Session;

/// Static route table. Every route except [`Route::Login`] is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Transactions,
    Budget,
    Reports,
}

impl Route {
    /// Routes shown in the navigation bar, in order.
    pub const NAVIGATION: [Route; 4] = [
        Route::Dashboard,
        Route::Transactions,
        Route::Budget,
        Route::Reports,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Transactions => "/transactions",
            Self::Budget => "/budget",
            Self::Reports => "/reports",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Budget => "Budget",
            Self::Reports => "Reports",
        }
    }

    pub fn is_protected(self) -> bool {
        self != Self::Login
    }

    /// Resolves a path, following the `/` and catch-all redirects.
    pub fn resolve(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        match normalized {
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/transactions" => Self::Transactions,
            "/budget" => Self::Budget,
            "/reports" => Self::Reports,
            // `/` redirects to the dashboard, anything else redirects to `/`.
            _ => Self::Dashboard,
        }
    }

    /// Position in [`Route::NAVIGATION`], selected with the digit keys.
    pub fn from_shortcut(ch: char) -> Option<Route> {
        let index = ch.to_digit(10)?.checked_sub(1)? as usize;
        Self::NAVIGATION.get(index).copied()
    }
}

/// Sends unauthenticated sessions to the login screen.
pub fn guard(route: Route, session: &Session) -> Route {
    if route.is_protected() && !session.is_authenticated() {
        Route::Login
    } else {
        route
    }
}
