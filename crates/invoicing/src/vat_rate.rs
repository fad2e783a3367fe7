//! Flat-percentage value added tax.

use invoicing_core::{DomainError, DomainResult, ValueObject};

use crate::money::Money;
use crate::numeric::Numeric;

/// A VAT rate stored as a fraction in `[0, 1]` (`"20"` percent -> `0.2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatRate {
    rate: Numeric,
    percent: Numeric,
}

impl VatRate {
    /// Accepts an integer or a decimal with at most two fractional digits,
    /// between 0 and 100 inclusive.
    pub fn create(percent: &str) -> DomainResult<Self> {
        if !is_percentage_literal(percent) {
            return Err(DomainError::InvalidPercentageFormat(percent.to_string()));
        }

        let percents = Numeric::parse(percent)
            .map_err(|_| DomainError::InvalidPercentageFormat(percent.to_string()))?;
        if percents.is_negative() || percents.greater_than(&Numeric::ONE_HUNDRED) {
            return Err(DomainError::InvalidPercentageRange(percent.to_string()));
        }

        let rate = percents.divide_by(&Numeric::ONE_HUNDRED)?;
        Ok(Self {
            rate,
            percent: percents,
        })
    }

    /// The fraction applied to amounts.
    pub fn rate(&self) -> &Numeric {
        &self.rate
    }

    pub fn percent(&self) -> &Numeric {
        &self.percent
    }

    /// VAT due on `money`, rounded up to whole minor units.
    pub fn vat_on(&self, money: &Money) -> DomainResult<Money> {
        money.multiply_by(&self.rate)
    }

    /// VAT-inclusive total: `money + vat_on(money)`.
    pub fn apply_to(&self, money: &Money) -> DomainResult<Money> {
        money.add(&self.vat_on(money)?)
    }

    /// Percentage as a decimal string, e.g. `"20"` or `"7.5"`.
    pub fn to_plain(&self) -> String {
        self.percent().to_string()
    }
}

impl ValueObject for VatRate {}

impl core::fmt::Display for VatRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// `[+-]digits[.d{0,2}]` or `[+-].d{1,2}`; at least one digit overall.
fn is_percentage_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole)
        && all_digits(fraction)
        && fraction.len() <= 2
        && !(whole.is_empty() && fraction.is_empty())
}
