//! Application use cases (business logic orchestration).

mod check_health;
mod complete_google_link;
mod fetch_profile;
mod initiate_google_link;
mod login;
mod logout;
mod refresh_session;
mod register;

pub use check_health::*;
pub use complete_google_link::*;
pub use fetch_profile::*;
pub use initiate_google_link::*;
pub use login::*;
pub use logout::*;
pub use refresh_session::*;
pub use register::*;
