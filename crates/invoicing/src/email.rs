//! Email address value object with validation.

use validator::Validate;

use invoicing_core::{DomainError, DomainResult, ValueObject};

/// A syntactically valid email address, kept exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Validate)]
pub struct Email {
    #[validate(email)]
    value: String,
}

impl Email {
    pub fn create(value: &str) -> DomainResult<Self> {
        let candidate = Self {
            value: value.to_string(),
        };
        candidate
            .validate()
            .map_err(|_| DomainError::InvalidEmailFormat(value.to_string()))?;

        Ok(candidate)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl ValueObject for Email {}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.value)
    }
}
