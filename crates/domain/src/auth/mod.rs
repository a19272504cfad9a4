//! Credential domain types

mod status;
mod token;

pub use status::TokenStatus;
pub use token::{AuthorizationCode, BearerToken, TokenClaims};
