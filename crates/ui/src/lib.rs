//! Tamis UI - Page controllers
//!
//! Host-agnostic controllers for the login, registration and OAuth callback
//! pages. Each page owns a [`PageView`] (status line and state machine) and
//! a [`PageScope`]; hosts drive the pages and render the view.

pub mod pages;
pub mod scope;
pub mod view;

pub use pages::{HOME_ROUTE, LoginPage, LoginPageState, OAuthCallbackPage, RegisterPage};
pub use scope::PageScope;
pub use view::{PageView, ViewState};
