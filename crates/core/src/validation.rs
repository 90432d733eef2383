//! Field validation rules.
//!
//! The façade validates procedure inputs and the client validates forms before
//! submitting them. Both collect every failing field instead of stopping at
//! the first one, so a form can show all messages at once.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Input field name as it appears on the wire (camelCase).
    pub field: String,
    /// Human-readable message shown next to the field.
    pub message: String,
}

/// All field rules that failed for one input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Errors for a single field, e.g. a body that failed to deserialize.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    /// The individual field errors, in the order the rules ran.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for `field`, if that field failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Accumulates field errors for one input.
///
/// # Example
///
/// ```
/// use dashcart_core::validation::Validator;
///
/// let mut v = Validator::new();
/// v.non_empty("username", "", "Username is required");
/// v.non_empty("password", "hunter2", "Password is required");
///
/// let errors = v.finish().unwrap_err();
/// assert_eq!(errors.message_for("username"), Some("Username is required"));
/// assert_eq!(errors.message_for("password"), None);
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Create an empty validator.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn fail(&mut self, field: &str, message: &str) -> &mut Self {
        self.errors.push(FieldError {
            field: field.to_owned(),
            message: message.to_owned(),
        });
        self
    }

    /// Require at least one character.
    pub fn non_empty(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        self.min_len(field, value, 1, message)
    }

    /// Require at least `min` characters.
    pub fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.chars().count() < min {
            return self.fail(field, message);
        }
        self
    }

    /// Require a strictly positive amount.
    pub fn positive(&mut self, field: &str, value: Decimal, message: &str) -> &mut Self {
        if value <= Decimal::ZERO {
            return self.fail(field, message);
        }
        self
    }

    /// Require a value of zero or more.
    pub fn non_negative(&mut self, field: &str, value: i64, message: &str) -> &mut Self {
        if value < 0 {
            return self.fail(field, message);
        }
        self
    }

    /// Require an absolute URL.
    pub fn url(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if url::Url::parse(value).is_err() {
            return self.fail(field, message);
        }
        self
    }

    /// Require something shaped like `local@domain.tld`.
    pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !looks_like_email(value) {
            return self.fail(field, message);
        }
        self
    }

    /// Finish validation, returning every collected error.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if any rule failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
