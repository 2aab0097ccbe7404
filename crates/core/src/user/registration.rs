//! Account registration rules.
//!
//! Field-level rules live on [`NewUser`] as `validator` attributes.
//! Uniqueness of email and mobile is enforced by storage.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::auth::PasswordError;

/// Optional `+`, optional leading `1`, then 9 to 15 digits.
static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?[0-9]{9,15}$").expect("mobile pattern compiles"));

/// Errors that can occur while registering a user.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// One or more fields failed their rules.
    #[error("{0}")]
    Invalid(String),

    /// Another account already uses this email.
    #[error("A user with email {0} already exists")]
    EmailTaken(String),

    /// Another account already uses this mobile number.
    #[error("A user with mobile {0} already exists")]
    MobileTaken(String),

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Storage failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl RegistrationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "VALIDATION_ERROR",
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::MobileTaken(_) => "MOBILE_TAKEN",
            Self::Password(_) | Self::Persistence(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Invalid(_) => 400,
            Self::EmailTaken(_) | Self::MobileTaken(_) => 409,
            Self::Password(_) | Self::Persistence(_) => 500,
        }
    }
}

impl From<ValidationErrors> for RegistrationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(describe_validation_errors(&errors))
    }
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    /// Login and lookup address.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters."))]
    pub name: String,
    /// Mobile number.
    #[validate(regex(
        path = *MOBILE_PATTERN,
        message = "Mobile number must be entered in the format: '+999999999'. Up to 15 digits allowed."
    ))]
    pub mobile: String,
    /// Plaintext password, hashed before storage.
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
}

impl NewUser {
    /// Validates the payload and returns it with a normalized email.
    ///
    /// # Errors
    ///
    /// Returns the field errors when any rule fails.
    pub fn into_normalized(self) -> Result<Self, ValidationErrors> {
        self.validate()?;
        Ok(Self {
            email: normalize_email(&self.email),
            name: self.name.trim().to_string(),
            ..self
        })
    }
}

/// Lowercases the domain part of an email address.
///
/// The local part is case-sensitive and kept as entered.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Flattens validation errors into one message, fields in name order.
#[must_use]
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                })
                .collect();
            format!("{field}: {}", messages.join(" "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
