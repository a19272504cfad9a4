//! Navigation port

use thiserror::Error;

/// Errors from a navigator.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The external URL could not be opened.
    #[error("failed to open {url}: {message}")]
    OpenFailed {
        /// Target URL.
        url: String,
        /// Underlying failure.
        message: String,
    },
}

/// Port for moving the user somewhere else.
pub trait Navigator: Send + Sync {
    /// Hands control to an external URL, replacing the current location.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL could not be opened.
    fn redirect(&self, url: &str) -> Result<(), NavigationError>;

    /// Moves to an in-app route such as `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the route could not be shown.
    fn navigate(&self, route: &str) -> Result<(), NavigationError>;
}
