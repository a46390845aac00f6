use crate::domain::validation::ValidationError;

use secrecy::{ExposeSecret, SecretString};

#[derive(Clone)]
/// Clickatell REST API authentication token.
///
/// Invariant: non-empty after trimming. The token is kept in a [`SecretString`] and is
/// never printed by `Debug`.
pub struct Credentials(SecretString);

impl Credentials {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "auth_token";

    /// Create validated credentials from a REST API token.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(SecretString::from(trimmed.to_owned())))
    }

    /// Value of the `Authorization` header sent with every request.
    pub(crate) fn authorization_header(&self) -> String {
        format!("bearer {}", self.0.expose_secret())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credentials").field(&"[REDACTED]").finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty. The value is preserved exactly as provided.
pub struct MessageText(String);

impl MessageText {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to Clickatell (`to`).
///
/// Invariant: non-empty after trimming. The value is otherwise passed through unchanged.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "recipient";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Clickatell.
    pub fn raw(&self) -> &str {
        &self.0
    }
}
