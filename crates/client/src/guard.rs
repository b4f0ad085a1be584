/// A navigable view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
    Signup,
    Accounts,
    Budgets,
    Transactions,
    Categories,
    Unknown(String),
}

impl Route {
    /// Pages reachable from the tab bar once logged in.
    pub const PAGES: [Route; 5] = [
        Route::Dashboard,
        Route::Accounts,
        Route::Transactions,
        Route::Budgets,
        Route::Categories,
    ];

    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Dashboard,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/accounts" => Self::Accounts,
            "/budgets" => Self::Budgets,
            "/transactions" => Self::Transactions,
            "/categories" => Self::Categories,
            _ => Self::Unknown(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Dashboard => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Accounts => "/accounts",
            Self::Budgets => "/budgets",
            Self::Transactions => "/transactions",
            Self::Categories => "/categories",
            Self::Unknown(path) => path.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Login => "Login",
            Self::Signup => "Sign Up",
            Self::Accounts => "Accounts",
            Self::Budgets => "Budgets",
            Self::Transactions => "Transactions",
            Self::Categories => "Categories",
            Self::Unknown(_) => "Not found",
        }
    }

    /// Login and signup are the only views reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn route(&self) -> &Route {
        match self {
            Self::Allow(route) | Self::Redirect(route) => route,
        }
    }

    pub fn into_route(self) -> Route {
        match self {
            Self::Allow(route) | Self::Redirect(route) => route,
        }
    }
}

/// Decides whether `path` is reachable given the session state.
pub fn resolve(authenticated: bool, path: &str) -> Navigation {
    let route = Route::parse(path);
    match (authenticated, &route) {
        (false, route) if route.is_public() => Navigation::Allow(route.clone()),
        (false, _) => Navigation::Redirect(Route::Login),
        (true, Route::Login | Route::Signup | Route::Unknown(_)) => {
            Navigation::Redirect(Route::Dashboard)
        }
        (true, _) => Navigation::Allow(route),
    }
}
