//! OAuth callback page controller.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tamis_application::{
    AuthApi, CallbackHandler, CallbackOutcome, CompleteGoogleLink, Navigator, Session,
    SessionStore,
};
use tamis_domain::{CallbackQuery, CallbackState, messages};
use tokio::task::JoinHandle;

use super::HOME_ROUTE;
use crate::scope::PageScope;
use crate::view::PageView;

/// Landing page for the provider redirect.
///
/// Each distinct query is processed at most once, so a re-mount or a
/// browser reload with the same parameters never repeats the exchange.
pub struct OAuthCallbackPage<A, S, N> {
    complete: CompleteGoogleLink<A, S>,
    navigator: Arc<N>,
    view: PageView<CallbackState>,
    scope: PageScope,
    redirect_delay: Duration,
    seen: Mutex<HashSet<CallbackQuery>>,
    pending_redirect: Mutex<Option<JoinHandle<()>>>,
}

impl<A, S, N> OAuthCallbackPage<A, S, N>
where
    A: AuthApi,
    S: SessionStore,
    N: Navigator + 'static,
{
    /// Creates the page. After a successful link it waits `redirect_delay`
    /// before navigating home.
    pub fn new(
        api: Arc<A>,
        session: Session<S>,
        navigator: Arc<N>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            complete: CompleteGoogleLink::new(api, session),
            navigator,
            view: PageView::new(messages::CALLBACK_PROCESSING, CallbackState::Processing),
            scope: PageScope::new(),
            redirect_delay,
            seen: Mutex::new(HashSet::new()),
            pending_redirect: Mutex::new(None),
        }
    }

    /// The page's view.
    #[must_use]
    pub const fn view(&self) -> &PageView<CallbackState> {
        &self.view
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> String {
        self.view.status()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CallbackState {
        self.view.state()
    }

    /// Processes the redirect query.
    ///
    /// Returns `None` when this query was already processed or the page
    /// went away before the exchange finished.
    pub async fn mount(&self, query: CallbackQuery) -> Option<CallbackState> {
        if self.scope.is_unmounted() {
            return None;
        }
        if !self
            .seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(query.clone())
        {
            tracing::debug!("callback query already processed");
            return None;
        }

        self.view.update(messages::CALLBACK_PROCESSING, |s| {
            *s = CallbackState::Processing;
        });

        let result = self.scope.run(self.complete.execute(&query)).await?;
        if self.scope.is_unmounted() {
            return None;
        }

        let (state, message) = match result {
            Ok(outcome) => {
                let state = match outcome {
                    CallbackOutcome::MissingCode => CallbackState::MissingCode,
                    CallbackOutcome::NotSignedIn => CallbackState::NotSignedIn,
                    CallbackOutcome::Linked => CallbackState::Linked,
                    CallbackOutcome::Rejected { .. } => CallbackState::Failed,
                };
                (state, outcome.message().to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "code exchange failed");
                (CallbackState::Failed, e.user_message())
            }
        };

        self.view.update(message, |s| *s = state);
        if state == CallbackState::Linked {
            self.schedule_home();
        }
        Some(state)
    }

    /// Waits for a scheduled navigation home, if any.
    pub async fn redirect_finished(&self) {
        let pending = self
            .pending_redirect
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending
            && let Err(e) = handle.await
        {
            tracing::warn!(error = %e, "redirect task failed");
        }
    }

    /// Leaves the page. A pending navigation home is cancelled.
    pub fn unmount(&self) {
        self.scope.unmount();
    }

    fn schedule_home(&self) {
        let navigator = Arc::clone(&self.navigator);
        let view = self.view.clone();
        let scope = self.scope.clone();
        let delay = self.redirect_delay;

        let handle = tokio::spawn(async move {
            if scope.run(tokio::time::sleep(delay)).await.is_none() || scope.is_unmounted() {
                return;
            }
            match navigator.navigate(HOME_ROUTE) {
                Ok(()) => view.set_state(|s| *s = CallbackState::Redirected),
                Err(e) => tracing::warn!(error = %e, "could not navigate home"),
            }
        });

        let previous = self
            .pending_redirect
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

#[async_trait]
impl<A, S, N> CallbackHandler for OAuthCallbackPage<A, S, N>
where
    A: AuthApi + 'static,
    S: SessionStore + 'static,
    N: Navigator + 'static,
{
    async fn on_callback(&self, query: CallbackQuery) -> String {
        self.mount(query).await;
        self.status()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tamis_application::testing::{Endpoint, FakeAuthApi, Navigation, RecordingNavigator};
    use tamis_application::{ApiError, MemorySessionStore};
    use tamis_domain::BearerToken;
    use tokio::time::Instant;

    type Page = OAuthCallbackPage<FakeAuthApi, MemorySessionStore, RecordingNavigator>;

    const DELAY: Duration = Duration::from_millis(2000);

    fn page(
        api: FakeAuthApi,
        store: MemorySessionStore,
    ) -> (Page, Arc<FakeAuthApi>, Arc<RecordingNavigator>) {
        let api = Arc::new(api);
        let navigator = Arc::new(RecordingNavigator::new());
        let page = OAuthCallbackPage::new(
            Arc::clone(&api),
            Session::new(Arc::new(store)),
            Arc::clone(&navigator),
            DELAY,
        );
        (page, api, navigator)
    }

    fn signed_in() -> MemorySessionStore {
        MemorySessionStore::with_token(BearerToken::new("jwt-123").unwrap())
    }

    #[test]
    fn starts_in_processing() {
        let (page, _, _) = page(FakeAuthApi::new(), signed_in());
        assert_eq!(page.status(), "Traitement en cours...");
        assert_eq!(page.state(), CallbackState::Processing);
    }

    #[tokio::test]
    async fn missing_code_makes_no_call() {
        let (page, api, _) = page(FakeAuthApi::new(), signed_in());

        let state = page.mount(CallbackQuery::default()).await;

        assert_eq!(state, Some(CallbackState::MissingCode));
        assert_eq!(page.status(), "Code OAuth manquant dans l'URL.");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_token_makes_no_call() {
        let (page, api, _) = page(FakeAuthApi::new(), MemorySessionStore::new());

        page.mount(CallbackQuery::with_code("abc")).await;

        assert_eq!(page.status(), "Veuillez d'abord vous connecter.");
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn success_navigates_home_once_after_the_delay() {
        let (page, api, navigator) = page(
            FakeAuthApi::new().respond(Endpoint::CompleteOAuth, json!({ "success": true })),
            signed_in(),
        );
        let query = CallbackQuery::parse("?code=abc&state=xyz").unwrap();
        let started = Instant::now();

        let state = page.mount(query.clone()).await;

        assert_eq!(state, Some(CallbackState::Linked));
        assert_eq!(page.status(), "Compte Google ajouté avec succès !");
        assert!(navigator.history().is_empty());

        assert_eq!(page.mount(query).await, None);
        page.redirect_finished().await;

        assert!(started.elapsed() >= DELAY);
        assert_eq!(navigator.history(), vec![Navigation::Route("/".to_string())]);
        assert_eq!(page.state(), CallbackState::Redirected);
        assert_eq!(api.call_count(Endpoint::CompleteOAuth), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn second_link_replaces_the_pending_redirect() {
        let (page, api, navigator) = page(
            FakeAuthApi::new()
                .respond(Endpoint::CompleteOAuth, json!({ "success": true }))
                .respond(Endpoint::CompleteOAuth, json!({ "success": true })),
            signed_in(),
        );
        let started = Instant::now();

        page.mount(CallbackQuery::with_code("first")).await;
        tokio::time::sleep(Duration::from_millis(1000)).await;
        page.mount(CallbackQuery::with_code("second")).await;
        page.redirect_finished().await;

        assert!(started.elapsed() >= Duration::from_millis(3000));
        assert_eq!(navigator.history(), vec![Navigation::Route("/".to_string())]);
        assert_eq!(api.call_count(Endpoint::CompleteOAuth), 2);
    }

    #[tokio::test]
    async fn rejection_shows_error_and_stays() {
        let (page, _, navigator) = page(
            FakeAuthApi::new().respond(
                Endpoint::CompleteOAuth,
                json!({ "success": false, "error": "E" }),
            ),
            signed_in(),
        );

        let state = page.mount(CallbackQuery::with_code("abc")).await;
        page.redirect_finished().await;

        assert_eq!(state, Some(CallbackState::Failed));
        assert_eq!(page.status(), "E");
        assert!(navigator.history().is_empty());
    }

    #[tokio::test]
    async fn decode_failure_is_reported() {
        let (page, _, _) = page(
            FakeAuthApi::new().fail(
                Endpoint::CompleteOAuth,
                ApiError::Decode {
                    status: 502,
                    message: "expected value at line 1 column 1".to_string(),
                },
            ),
            signed_in(),
        );

        page.mount(CallbackQuery::with_code("abc")).await;

        assert_eq!(
            page.status(),
            "Réponse invalide du serveur : HTTP 502, expected value at line 1 column 1"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_the_pending_redirect() {
        let (page, _, navigator) = page(
            FakeAuthApi::new().respond(Endpoint::CompleteOAuth, json!({ "success": true })),
            signed_in(),
        );

        page.mount(CallbackQuery::with_code("abc")).await;
        page.unmount();
        page.redirect_finished().await;

        assert!(navigator.history().is_empty());
        assert_eq!(page.state(), CallbackState::Linked);
    }

    #[tokio::test]
    async fn handler_returns_the_status_line() {
        let (page, _, _) = page(FakeAuthApi::new(), signed_in());
        let handler: &dyn CallbackHandler = &page;

        let message = handler
            .on_callback(CallbackQuery::parse("error=access_denied").unwrap())
            .await;

        assert_eq!(message, "Code OAuth manquant dans l'URL.");
    }
}
