//! Page lifetime scope.

use std::future::Future;

use tamis_application::CancellationToken;

/// Ties in-flight work to a page's lifetime.
///
/// After [`PageScope::unmount`], pending calls and timers are abandoned and
/// pages must not publish further updates.
#[derive(Debug, Clone)]
pub struct PageScope {
    token: CancellationToken,
}

impl PageScope {
    /// A scope for a freshly mounted page.
    #[must_use]
    pub fn new() -> Self {
        let (token, _) = CancellationToken::new();
        Self { token }
    }

    /// Runs `future` unless the page goes away first.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        self.token.receiver().run(future).await
    }

    /// Tears the page down. Idempotent.
    pub fn unmount(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!("page unmounted");
        }
        self.token.cancel();
    }

    /// Returns true once the page has been unmounted.
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Default for PageScope {
    fn default() -> Self {
        Self::new()
    }
}
