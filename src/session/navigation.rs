// Client navigation

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Views of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Main,
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Main => "/",
            Route::Login => "/login",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// Navigator that records every push
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RouteTracker {
    history: Arc<Mutex<Vec<Route>>>,
}

impl RouteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently pushed route, `Main` before any navigation
    pub fn current(&self) -> Route {
        self.history().last().copied().unwrap_or_default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RouteTracker {
    fn push(&self, route: Route) {
        info!(route = %route, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
