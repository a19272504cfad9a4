//! Navigator backed by the system browser.

use tamis_application::{NavigationError, Navigator};

/// Opens external URLs in the default browser.
///
/// In-app routes have no window to change in a terminal host; they are
/// only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNavigator;

impl SystemNavigator {
    /// Creates a new system navigator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Navigator for SystemNavigator {
    fn redirect(&self, url: &str) -> Result<(), NavigationError> {
        tracing::info!(%url, "opening browser");
        webbrowser::open(url).map_err(|e| NavigationError::OpenFailed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn navigate(&self, route: &str) -> Result<(), NavigationError> {
        tracing::info!(route, "navigated");
        Ok(())
    }
}
