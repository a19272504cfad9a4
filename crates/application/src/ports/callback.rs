//! Callback delivery port

use async_trait::async_trait;
use tamis_domain::CallbackQuery;

/// Receives the provider redirect from whatever transport delivers it.
///
/// The local callback listener hands every incoming query to a handler and
/// renders the returned status message back to the browser.
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    /// Processes one redirect and returns the status message to display.
    async fn on_callback(&self, query: CallbackQuery) -> String;
}
