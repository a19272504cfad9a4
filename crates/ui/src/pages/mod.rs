//! The three authentication pages.

mod callback;
mod login;
mod register;

pub use callback::OAuthCallbackPage;
pub use login::{LoginPage, LoginPageState};
pub use register::RegisterPage;

/// Route shown after a successful account link.
pub const HOME_ROUTE: &str = "/";
