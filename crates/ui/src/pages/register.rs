//! Registration page controller.

use std::sync::Arc;

use tamis_application::{AuthApi, Register};
use tamis_domain::{FormState, RegisterForm};

use crate::scope::PageScope;
use crate::view::PageView;

/// Account creation form. Never stores a token or navigates.
pub struct RegisterPage<A> {
    register: Register<A>,
    view: PageView<FormState>,
    scope: PageScope,
}

impl<A: AuthApi> RegisterPage<A> {
    /// Mounts the page.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            register: Register::new(api),
            view: PageView::new("", FormState::Idle),
            scope: PageScope::new(),
        }
    }

    /// The page's view.
    #[must_use]
    pub const fn view(&self) -> &PageView<FormState> {
        &self.view
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> String {
        self.view.status()
    }

    /// Submits the form. `None` if the page was unmounted meanwhile.
    pub async fn submit(&self, form: RegisterForm) -> Option<FormState> {
        if self.scope.is_unmounted() {
            return None;
        }
        self.view.update("", |s| *s = FormState::Submitting);

        let result = self.scope.run(self.register.execute(&form)).await?;
        if self.scope.is_unmounted() {
            return None;
        }

        let (state, message) = match result {
            Ok(outcome) if outcome.success => (FormState::Succeeded, outcome.message),
            Ok(outcome) => (FormState::Failed, outcome.message),
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                (FormState::Failed, e.user_message())
            }
        };
        self.view.update(message, |s| *s = state);
        Some(state)
    }

    /// Leaves the page, abandoning anything in flight.
    pub fn unmount(&self) {
        self.scope.unmount();
    }
}
