//! Currency-scoped amounts expressed in minor units.

use serde::{Deserialize, Serialize};

use invoicing_core::{DomainError, DomainResult, ValueObject};

use crate::currency::Currency;
use crate::numeric::{Numeric, Rounding};

/// Plain form of [`Money`]; also the input shape for prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyPlain {
    pub amount: String,
    pub currency: String,
}

impl MoneyPlain {
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
        }
    }
}

/// An amount of minor units (cents for USD) in a single currency.
///
/// Arithmetic between two values requires equal currencies and never converts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    amount: Numeric,
    currency: Currency,
}

impl Money {
    /// Build from a whole, non-negative number of minor units.
    pub fn create(amount: &str, currency: &str) -> DomainResult<Self> {
        let amount = parse_minor_units(amount)?;
        let currency = Currency::create(currency)?;
        Ok(Self { amount, currency })
    }

    pub fn from_plain(plain: &MoneyPlain) -> DomainResult<Self> {
        Self::create(&plain.amount, &plain.currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Numeric::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> &Numeric {
        &self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn add(&self, other: &Money) -> DomainResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(self.with_amount(self.amount.add(&other.amount)?))
    }

    pub fn subtract(&self, other: &Money) -> DomainResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(self.with_amount(self.amount.subtract(&other.amount)?))
    }

    /// Multiply and round up to whole minor units.
    pub fn multiply_by(&self, factor: &Numeric) -> DomainResult<Money> {
        self.multiply_by_with(factor, Rounding::Up)
    }

    /// Multiply and round to whole minor units with an explicit mode.
    pub fn multiply_by_with(&self, factor: &Numeric, rounding: Rounding) -> DomainResult<Money> {
        let value = self.amount.multiply_by(factor)?.to_decimal_places(0, rounding);
        Ok(self.with_amount(value))
    }

    pub fn to_plain(&self) -> MoneyPlain {
        MoneyPlain {
            amount: self.amount.to_string(),
            currency: self.currency.to_string(),
        }
    }

    fn with_amount(&self, amount: Numeric) -> Money {
        Money {
            amount,
            currency: self.currency,
        }
    }

    fn ensure_same_currency(&self, other: &Money) -> DomainResult<()> {
        if self.currency != other.currency {
            return Err(DomainError::currencies_not_equal(
                self.currency,
                other.currency,
            ));
        }
        Ok(())
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Minor units are a plain integer literal: `"200"`, not `"200.00"`,
/// `"2e2"`, `"+200"` or `"0200"`.
fn parse_minor_units(raw: &str) -> DomainResult<Numeric> {
    if !is_integer_literal(raw) {
        return Err(DomainError::MinorUnitsNotInteger(raw.to_string()));
    }
    let value = Numeric::parse(raw)?;
    if value.is_negative() {
        return Err(DomainError::MinorUnitsNotNonNegative(raw.to_string()));
    }
    Ok(value)
}

/// Optional `-`, then `0` or digits without a leading zero.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    match digits.as_bytes() {
        [b'0'] => true,
        [first, rest @ ..] => (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit),
        [] => false,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn usd(amount: &str) -> Money {
        Money::create(amount, "USD").unwrap()
    }

    #[test]
    fn creates_money_from_minor_units() {
        let money = usd("200");
        assert_eq!(money.amount(), &Numeric::parse("200").unwrap());
        assert_eq!(money.currency(), Currency::create("USD").unwrap());
        assert_eq!(money.to_string(), "200 USD");
    }

    #[test]
    fn rejects_negative_amounts() {
        let err = Money::create("-200", "USD").unwrap_err();
        assert_eq!(err, DomainError::MinorUnitsNotNonNegative("-200".into()));
        assert_eq!(err.code(), "4001");
    }

    #[test]
    fn rejects_fractional_amounts() {
        for raw in [
            "200.50", "200.00", "0.5", "abc", "", "-", "1e3", "+100", "007", " 100", "100 ",
            "1_000",
        ] {
            let err = Money::create(raw, "USD").unwrap_err();
            assert_eq!(err.code(), "4000", "{raw}");
        }
    }

    #[test]
    fn accepts_zero_and_the_largest_amount() {
        assert_eq!(usd("0"), Money::zero(Currency::create("USD").unwrap()));
        assert_eq!(usd("-0"), usd("0"));
        assert_eq!(
            usd("79228162514264337593543950335").to_string(),
            "79228162514264337593543950335 USD"
        );
    }

    #[test]
    fn integers_beyond_capacity_are_not_reported_as_fractional() {
        let raw = "100000000000000000000000000000";
        assert_eq!(
            Money::create(raw, "USD").unwrap_err(),
            DomainError::InvalidNumber(raw.to_string())
        );
    }

    #[test]
    fn overflowing_arithmetic_is_an_error() {
        let max = usd("79228162514264337593543950335");
        assert_eq!(max.add(&usd("1")), Err(DomainError::NumericOverflow));
        assert_eq!(
            max.multiply_by(&Numeric::from(2u32)),
            Err(DomainError::NumericOverflow)
        );
    }

    #[test]
    fn propagates_currency_errors() {
        let err = Money::create("100", "XYZ").unwrap_err();
        assert_eq!(err, DomainError::CurrencyNotIso4217("XYZ".into()));
    }

    #[test]
    fn adds_and_subtracts_same_currency() {
        assert_eq!(usd("100").add(&usd("50")).unwrap(), usd("150"));
        assert_eq!(usd("100").subtract(&usd("40")).unwrap(), usd("60"));
    }

    #[test]
    fn arithmetic_rejects_mixed_currencies() {
        let eur = Money::create("50", "EUR").unwrap();
        let err = usd("100").add(&eur).unwrap_err();
        assert_eq!(err.code(), "4002");
        assert_eq!(err.to_string(), "currencies are not equal: USD and EUR");
    }

    #[test]
    fn multiply_rounds_up_to_whole_minor_units() {
        let rate = Numeric::parse("0.2").unwrap();
        assert_eq!(usd("101").multiply_by(&rate).unwrap(), usd("21"));
        assert_eq!(usd("100").multiply_by(&rate).unwrap(), usd("20"));
        assert_eq!(usd("50").multiply_by(&Numeric::from(2u32)).unwrap(), usd("100"));
        assert_eq!(
            usd("101").multiply_by_with(&rate, Rounding::Down).unwrap(),
            usd("20")
        );
    }

    #[test]
    fn plain_form_uses_decimal_strings() {
        assert_eq!(usd("120").to_plain(), MoneyPlain::new("120", "USD"));
        let json = serde_json::to_value(usd("7").to_plain()).unwrap();
        assert_eq!(json, serde_json::json!({"amount": "7", "currency": "USD"}));
    }

    proptest! {
        #[test]
        fn mixed_currency_arithmetic_always_fails(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let left = Money::create(&a.to_string(), "USD").unwrap();
            let right = Money::create(&b.to_string(), "EUR").unwrap();
            prop_assert_eq!(left.add(&right).unwrap_err().code(), "4002");
            prop_assert_eq!(left.subtract(&right).unwrap_err().code(), "4002");
        }

        #[test]
        fn fractional_minor_units_always_fail(
            whole in 0u64..1_000_000,
            frac in 0u32..1000,
            currency in prop::sample::select(vec!["USD", "JPY", "BHD", "EUR"]),
        ) {
            let raw = format!("{whole}.{frac}");
            let err = Money::create(&raw, currency).unwrap_err();
            prop_assert_eq!(err.code(), "4000");
        }

        #[test]
        fn multiply_never_under_rounds(amount in 0u64..10_000_000, percent in 0u32..=100) {
            let money = Money::create(&amount.to_string(), "USD").unwrap();
            let factor = Numeric::from(percent).divide_by(&Numeric::ONE_HUNDRED).unwrap();
            let exact = money.amount().multiply_by(&factor).unwrap();
            let rounded = money.multiply_by(&factor).unwrap();
            prop_assert!(rounded.amount().is_integer());
            prop_assert!(rounded.amount().greater_than_equal(&exact));
        }
    }
}
