//! Login form validation
//!
//! This is a mock login: any username with a long enough password is
//! accepted and the password is never checked against anything.

use super::Profile;
use thiserror::Error;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Domain used to synthesize profile email addresses
pub const EMAIL_DOMAIN: &str = "blogdash.com";

/// Values submitted on the login form
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Rejected login form. Display strings are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please enter both username and password")]
    MissingField,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), LoginError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(LoginError::MissingField);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(LoginError::PasswordTooShort);
        }
        Ok(())
    }

    /// Validate and build the profile; the password is dropped here.
    pub fn into_profile(self) -> Result<Profile, LoginError> {
        self.validate()?;
        Ok(Profile::for_username(self.username))
    }
}
