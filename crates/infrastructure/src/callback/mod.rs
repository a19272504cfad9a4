//! Local listener for the provider redirect.

mod page;
mod server;

pub use server::{BoundCallbackServer, CallbackServer, CallbackServerError};
