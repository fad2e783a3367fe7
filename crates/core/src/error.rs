//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Broad classification of a [`DomainError`].
///
/// Every category except `Defect` is recoverable by the caller: fix the input
/// and retry, surface the message, or abort the use case.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input did not have the expected shape (dates, codes, amounts, ...).
    Format,
    /// Individually valid inputs that do not fit together.
    Consistency,
    /// A draft is missing data required for the requested transition.
    Completeness,
    /// Programmer error or exhausted numeric capacity.
    Defect,
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, completeness). Each variant maps to a stable numeric code
/// exposed through [`DomainError::code`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cannot create line items with empty array")]
    LineItemsEmpty,

    #[error("all line items must have the same currency")]
    LineItemsDifferentCurrencies,

    #[error("duplicate line item: {0}")]
    LineItemsDuplicate(String),

    #[error("quantity must be an integer, received: {0}")]
    NotIntegerQuantity(String),

    #[error("quantity must be a positive integer, received: {0}")]
    NotPositiveQuantity(String),

    #[error("date must be in ISO 8601 format (YYYY-MM-DD), received: {0}")]
    InvalidDateFormat(String),

    #[error("amount must be a whole number of minor units, received: {0}")]
    MinorUnitsNotInteger(String),

    #[error("amount must be a non-negative number of minor units, received: {0}")]
    MinorUnitsNotNonNegative(String),

    #[error("currencies are not equal: {left} and {right}")]
    CurrenciesNotEqual { left: String, right: String },

    #[error("expected a valid ISO 4217 currency code, but received: {0}")]
    CurrencyNotIso4217(String),

    #[error("expected a valid email format, but received: {0}")]
    InvalidEmailFormat(String),

    #[error("expected a valid ISO 3166-1 alpha-2 country code, but received: {0}")]
    CountryCodeNotIso3166Alpha2(String),

    #[error("draft invoice is not fully complete")]
    DraftInvoiceNotFullyComplete,

    #[error("draft invoice line items cannot be empty")]
    DraftInvoiceLineItemsEmpty,

    #[error("invalid percentage format: {0}")]
    InvalidPercentageFormat(String),

    #[error("percentage must be between 0 and 100, received: {0}")]
    InvalidPercentageRange(String),

    #[error("due date {due} is before issue date {issue}")]
    DueDateBeforeIssueDate { issue: String, due: String },

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("numeric result cannot be represented exactly")]
    NumericOverflow,

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn currencies_not_equal(left: impl ToString, right: impl ToString) -> Self {
        Self::CurrenciesNotEqual {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub fn due_date_before_issue_date(issue: impl ToString, due: impl ToString) -> Self {
        Self::DueDateBeforeIssueDate {
            issue: issue.to_string(),
            due: due.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Stable error code, suitable for API payloads and client-side branching.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LineItemsEmpty => "1000",
            Self::LineItemsDifferentCurrencies => "1001",
            Self::LineItemsDuplicate(_) => "1002",
            Self::NotIntegerQuantity(_) => "2000",
            Self::NotPositiveQuantity(_) => "2001",
            Self::InvalidDateFormat(_) => "3000",
            Self::MinorUnitsNotInteger(_) => "4000",
            Self::MinorUnitsNotNonNegative(_) => "4001",
            Self::CurrenciesNotEqual { .. } => "4002",
            Self::CurrencyNotIso4217(_) => "5000",
            Self::InvalidEmailFormat(_) => "6000",
            Self::CountryCodeNotIso3166Alpha2(_) => "7000",
            Self::DraftInvoiceNotFullyComplete => "8000",
            Self::DraftInvoiceLineItemsEmpty => "8001",
            Self::InvalidPercentageFormat(_) => "9000",
            Self::InvalidPercentageRange(_) => "9001",
            Self::DueDateBeforeIssueDate { .. } => "10000",
            Self::InvalidNumber(_) => "11000",
            Self::DivisionByZero => "11001",
            Self::NumericOverflow => "11002",
            Self::InvalidId(_) => "12000",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotIntegerQuantity(_)
            | Self::NotPositiveQuantity(_)
            | Self::InvalidDateFormat(_)
            | Self::MinorUnitsNotInteger(_)
            | Self::MinorUnitsNotNonNegative(_)
            | Self::CurrencyNotIso4217(_)
            | Self::InvalidEmailFormat(_)
            | Self::CountryCodeNotIso3166Alpha2(_)
            | Self::InvalidPercentageFormat(_)
            | Self::InvalidPercentageRange(_)
            | Self::InvalidNumber(_)
            | Self::InvalidId(_) => ErrorCategory::Format,
            Self::LineItemsEmpty
            | Self::LineItemsDifferentCurrencies
            | Self::LineItemsDuplicate(_)
            | Self::CurrenciesNotEqual { .. }
            | Self::DraftInvoiceLineItemsEmpty
            | Self::DueDateBeforeIssueDate { .. } => ErrorCategory::Consistency,
            Self::DraftInvoiceNotFullyComplete => ErrorCategory::Completeness,
            Self::DivisionByZero | Self::NumericOverflow => ErrorCategory::Defect,
        }
    }

    /// Whether the caller can recover by correcting its input.
    pub fn is_recoverable(&self) -> bool {
        self.category() != ErrorCategory::Defect
    }
}
