//! Route table with explicit visibility tags.
//!
//! DESIGN
//! ======
//! Every route is registered with a [`Visibility`]. A table holds exactly one
//! `Public` route, the PIN entry, and construction rejects anything else.
//! Paths the table does not know are treated as `Gated`.

use super::intent::path_only;

pub const PIN_ROUTE_PATH: &str = "/pin";
pub const PIN_ROUTE_NAME: &str = "pin-login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// Reachable without a session; bypasses the gate.
    Public,
    /// Requires an accepted session when PIN auth is enabled.
    Gated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    /// Pattern such as `/dokumente/:id`.
    pub path: &'static str,
    pub title: &'static str,
    pub visibility: Visibility,
}

impl RouteDef {
    #[must_use]
    pub const fn gated(name: &'static str, path: &'static str, title: &'static str) -> Self {
        Self { name, path, title, visibility: Visibility::Gated }
    }

    #[must_use]
    pub const fn public(name: &'static str, path: &'static str, title: &'static str) -> Self {
        Self { name, path, title, visibility: Visibility::Public }
    }

    /// Whether this pattern matches `path` (query and fragment ignored).
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = segments(self.path);
        let mut actual = segments(path_only(path));
        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') || p == a => {}
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route table has no public PIN-entry route")]
    MissingPinRoute,
    #[error("route table has {0} public routes; only the PIN-entry route may be public")]
    MultiplePublicRoutes(usize),
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
    pin_index: usize,
}

impl RouteTable {
    /// # Errors
    ///
    /// Returns a [`RouteError`] unless exactly one route is `Public`.
    pub fn new(routes: Vec<RouteDef>) -> Result<Self, RouteError> {
        let public: Vec<usize> = routes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.visibility == Visibility::Public)
            .map(|(i, _)| i)
            .collect();
        match public.as_slice() {
            [] => Err(RouteError::MissingPinRoute),
            [pin_index] => Ok(Self { pin_index: *pin_index, routes }),
            many => Err(RouteError::MultiplePublicRoutes(many.len())),
        }
    }

    /// The document manager's routes.
    #[must_use]
    pub fn standard() -> Self {
        let routes = vec![
            RouteDef::gated("dashboard", "/", "Übersicht"),
            RouteDef::gated("documents", "/dokumente", "Dokumente"),
            RouteDef::gated("document-detail", "/dokumente/:id", "Dokument"),
            RouteDef::gated("upload", "/upload", "Hochladen"),
            RouteDef::gated("review", "/pruefen", "Prüfen"),
            RouteDef::gated("search", "/suche", "Suche"),
            RouteDef::gated("tax", "/steuer", "Steuer"),
            RouteDef::gated("warranties", "/garantien", "Garantien"),
            RouteDef::gated("scan", "/scan", "Scannen"),
            RouteDef::gated("settings", "/einstellungen", "Einstellungen"),
            RouteDef::public(PIN_ROUTE_NAME, PIN_ROUTE_PATH, "PIN-Eingabe"),
        ];
        let pin_index = routes.len() - 1;
        Self { routes, pin_index }
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    #[must_use]
    pub fn pin_route(&self) -> &RouteDef {
        &self.routes[self.pin_index]
    }

    #[must_use]
    pub fn resolve(&self, full_path: &str) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.matches(full_path))
    }

    #[must_use]
    pub fn visibility(&self, full_path: &str) -> Visibility {
        self.resolve(full_path).map_or(Visibility::Gated, |r| r.visibility)
    }
}

#[cfg(test)]
#[path = "route_test.rs"]
mod tests;
