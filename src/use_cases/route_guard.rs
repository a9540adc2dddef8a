use crate::use_cases::auth_gate::SessionContext;

pub const ROOT_PATH: &str = "/";

// Outcome of navigating to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision<V> {
    Render(V),
    Redirect(&'static str),
}

// Render the requested view only when authorized; otherwise send the user to the root.
pub fn guard<V>(authorized: bool, view: V) -> RouteDecision<V> {
    if authorized {
        RouteDecision::Render(view)
    } else {
        RouteDecision::Redirect(ROOT_PATH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

// Client-side screens of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Register,
    Login,
    Profile,
    Users,
}

struct RouteEntry<V> {
    path: String,
    access: Access,
    view: V,
}

// Path table consulted at navigation time.
pub struct ClientRoutes<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> Default for ClientRoutes<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V: Clone> ClientRoutes<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public(self, path: impl Into<String>, view: V) -> Self {
        self.with(path, Access::Public, view)
    }

    pub fn protected(self, path: impl Into<String>, view: V) -> Self {
        self.with(path, Access::Protected, view)
    }

    fn with(mut self, path: impl Into<String>, access: Access, view: V) -> Self {
        self.entries.push(RouteEntry {
            path: normalize(&path.into()).to_string(),
            access,
            view,
        });
        self
    }

    // Unknown paths fall back to the root, like protected views without a session.
    pub fn resolve(&self, path: &str, session: &SessionContext) -> RouteDecision<V> {
        let path = normalize(path);
        let Some(entry) = self.entries.iter().find(|entry| entry.path == path) else {
            return RouteDecision::Redirect(ROOT_PATH);
        };

        match entry.access {
            Access::Public => RouteDecision::Render(entry.view.clone()),
            Access::Protected => guard(session.is_authorized(), entry.view.clone()),
        }
    }
}

impl ClientRoutes<View> {
    pub fn portal() -> Self {
        ClientRoutes::new()
            .public("/", View::Home)
            .public("/register", View::Register)
            .public("/login", View::Login)
            .protected("/profile", View::Profile)
            .protected("/users", View::Users)
    }
}

// Drops the query string and any trailing slash except on the root itself.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}
