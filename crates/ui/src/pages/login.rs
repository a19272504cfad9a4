//! Login page controller.

use std::sync::Arc;

use tamis_application::{
    AuthApi, InitiateGoogleLink, LinkOutcome, Login, Navigator, Session, SessionStore,
};
use tamis_domain::{FormState, GoogleLinkState, LoginForm};

use crate::scope::PageScope;
use crate::view::PageView;

/// State shown by the login page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginPageState {
    /// The credential form.
    pub form: FormState,
    /// The "link Google" action.
    pub google: GoogleLinkState,
}

/// Email/password sign-in plus the entry point of the Google link flow.
pub struct LoginPage<A, S, N> {
    login: Login<A, S>,
    link: InitiateGoogleLink<A, S>,
    navigator: Arc<N>,
    view: PageView<LoginPageState>,
    scope: PageScope,
}

impl<A: AuthApi, S: SessionStore, N: Navigator> LoginPage<A, S, N> {
    /// Mounts the page.
    pub fn new(api: Arc<A>, session: Session<S>, navigator: Arc<N>) -> Self {
        Self {
            login: Login::new(Arc::clone(&api), session.clone()),
            link: InitiateGoogleLink::new(api, session),
            navigator,
            view: PageView::new("", LoginPageState::default()),
            scope: PageScope::new(),
        }
    }

    /// The page's view.
    #[must_use]
    pub const fn view(&self) -> &PageView<LoginPageState> {
        &self.view
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> String {
        self.view.status()
    }

    /// Submits the form.
    ///
    /// Returns the resulting form state, or `None` if the page was
    /// unmounted before the answer arrived.
    pub async fn submit(&self, form: LoginForm) -> Option<FormState> {
        if self.scope.is_unmounted() {
            return None;
        }
        self.view.update("", |s| s.form = FormState::Submitting);

        let result = self.scope.run(self.login.execute(&form)).await?;
        if self.scope.is_unmounted() {
            return None;
        }

        let (state, message) = match result {
            Ok(outcome) if outcome.success => (FormState::Succeeded, outcome.message),
            Ok(outcome) => (FormState::Failed, outcome.message),
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                (FormState::Failed, e.user_message())
            }
        };
        self.view.update(message, |s| s.form = state);
        Some(state)
    }

    /// Starts linking a Google account.
    ///
    /// On success the navigator is sent to the provider URL. If the browser
    /// cannot be opened, the URL is put on the status line instead.
    pub async fn link_google(&self) -> Option<GoogleLinkState> {
        if self.scope.is_unmounted() {
            return None;
        }
        self.view.set_state(|s| s.google = GoogleLinkState::Requesting);

        let result = self.scope.run(self.link.execute()).await?;
        if self.scope.is_unmounted() {
            return None;
        }

        let (state, message) = match result {
            Ok(LinkOutcome::Redirect { auth_url }) => {
                let message = match self.navigator.redirect(&auth_url) {
                    Ok(()) => None,
                    Err(e) => {
                        tracing::warn!(error = %e, "could not open the provider page");
                        Some(auth_url.clone())
                    }
                };
                (GoogleLinkState::Redirecting { auth_url }, message)
            }
            Ok(outcome @ LinkOutcome::NotSignedIn) => {
                (GoogleLinkState::Blocked, outcome.message().map(str::to_string))
            }
            Ok(LinkOutcome::Rejected { message }) => (GoogleLinkState::Failed, Some(message)),
            Err(e) => {
                tracing::warn!(error = %e, "google link initiation failed");
                (GoogleLinkState::Failed, Some(e.user_message()))
            }
        };

        let next = state.clone();
        match message {
            Some(message) => self.view.update(message, |s| s.google = next),
            None => self.view.set_state(|s| s.google = next),
        }
        Some(state)
    }

    /// Leaves the page, abandoning anything in flight.
    pub fn unmount(&self) {
        self.scope.unmount();
    }
}
