//! Login and registration form state.

use std::fmt;

use crate::{DomainError, DomainResult, LoginRequest, RegisterRequest};

/// Fields of the login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginForm {
    /// Creates a filled-in form.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] naming the first empty field.
    pub fn validate(&self) -> DomainResult<()> {
        require("email", &self.email)?;
        require("password", &self.password)
    }

    /// Builds the request body.
    #[must_use]
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Fields of the registration form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Account email.
    pub email: String,
    /// Display username.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

impl RegisterForm {
    /// Creates a filled-in form.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] naming the first empty field.
    pub fn validate(&self) -> DomainResult<()> {
        require("email", &self.email)?;
        require("username", &self.username)?;
        require("password", &self.password)
    }

    /// Builds the request body.
    #[must_use]
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn require(name: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::MissingField(name))
    } else {
        Ok(())
    }
}
