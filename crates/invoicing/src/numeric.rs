//! Exact decimal arithmetic.
//!
//! `Numeric` wraps [`rust_decimal::Decimal`] so that amounts and rates never go
//! through floating point. Values are only rounded when a caller asks for it
//! via [`Numeric::to_decimal_places`].

use core::cmp::Ordering;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use invoicing_core::{DomainError, DomainResult, ValueObject};

/// Rounding mode applied by [`Numeric::to_decimal_places`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Away from zero: `1.01 -> 2`, `-1.01 -> -2`.
    #[default]
    Up,
    /// Towards zero (truncation).
    Down,
    /// Nearest, ties away from zero.
    HalfUp,
    /// Nearest, ties to even (banker's rounding).
    HalfEven,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Immutable exact decimal value. Every operation returns a new instance.
///
/// Backed by `Decimal` (96-bit mantissa, scale up to 28). Parsing and
/// arithmetic never round: a value or result that does not fit exactly is an
/// error (`InvalidNumber` when parsing, `NumericOverflow` otherwise). Only
/// [`Numeric::to_decimal_places`] and non-terminating quotients round.
#[derive(Debug, Copy, Clone, Default)]
pub struct Numeric(Decimal);

impl Numeric {
    pub const ZERO: Numeric = Numeric(Decimal::ZERO);
    pub const ONE_HUNDRED: Numeric = Numeric(Decimal::ONE_HUNDRED);

    /// Parse a decimal string such as `"123.45"`, `"-5"` or `"1e3"`.
    ///
    /// Input with more digits than fit exactly is rejected, not rounded.
    pub fn parse(value: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidNumber(value.to_string());
        let trimmed = value.trim();

        let (coefficient, exponent) = match trimmed.split_once(['e', 'E']) {
            Some((coefficient, exponent)) => {
                (coefficient, exponent.parse::<i32>().map_err(|_| invalid())?)
            }
            None => (trimmed, 0),
        };
        let coefficient = Decimal::from_str_exact(coefficient).map_err(|_| invalid())?;

        exact(
            coefficient.mantissa(),
            i64::from(coefficient.scale()) - i64::from(exponent),
        )
        .ok_or_else(invalid)
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn add(&self, other: &Numeric) -> DomainResult<Numeric> {
        let (a, b, scale) = aligned(self, other).ok_or(DomainError::NumericOverflow)?;
        a.checked_add(b)
            .and_then(|sum| exact(sum, scale))
            .ok_or(DomainError::NumericOverflow)
    }

    pub fn subtract(&self, other: &Numeric) -> DomainResult<Numeric> {
        let (a, b, scale) = aligned(self, other).ok_or(DomainError::NumericOverflow)?;
        a.checked_sub(b)
            .and_then(|difference| exact(difference, scale))
            .ok_or(DomainError::NumericOverflow)
    }

    pub fn multiply_by(&self, other: &Numeric) -> DomainResult<Numeric> {
        let (a, a_scale) = reduced(self);
        let (b, b_scale) = reduced(other);
        a.checked_mul(b)
            .and_then(|product| exact(product, a_scale + b_scale))
            .ok_or(DomainError::NumericOverflow)
    }

    /// Quotients that do not terminate within 28 fractional digits are
    /// rounded to the nearest representable value.
    pub fn divide_by(&self, other: &Numeric) -> DomainResult<Numeric> {
        if other.0.is_zero() {
            return Err(DomainError::DivisionByZero);
        }
        self.0
            .checked_div(other.0)
            .map(Self)
            .ok_or(DomainError::NumericOverflow)
    }

    pub fn to_decimal_places(&self, places: u32, mode: Rounding) -> Numeric {
        Self(self.0.round_dp_with_strategy(places, mode.strategy()))
    }

    /// Number of significant fractional digits (`"1.50"` has 1).
    pub fn decimal_places(&self) -> u32 {
        self.0.normalize().scale()
    }

    pub fn is_integer(&self) -> bool {
        self.0.fract().is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn equals(&self, other: &Numeric) -> bool {
        self.0 == other.0
    }

    pub fn less_than(&self, other: &Numeric) -> bool {
        self.0 < other.0
    }

    pub fn less_than_equal(&self, other: &Numeric) -> bool {
        self.0 <= other.0
    }

    pub fn greater_than(&self, other: &Numeric) -> bool {
        self.0 > other.0
    }

    pub fn greater_than_equal(&self, other: &Numeric) -> bool {
        self.0 >= other.0
    }
}

impl ValueObject for Numeric {}

// Equality and ordering are numeric: "10.00" == "10".
impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Numeric {}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl FromStr for Numeric {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Self(Decimal::from(value))
    }
}

/// Renders the shortest exact form: `"120"`, `"0.2"`, never `"120.00"`.
impl core::fmt::Display for Numeric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0.normalize(), f)
    }
}

/// `(mantissa, scale)` with trailing zeros moved into the scale, which may
/// go negative (`1200` is `(12, -2)`).
fn reduced(value: &Numeric) -> (i128, i64) {
    let mut mantissa = value.0.mantissa();
    let mut scale = i64::from(value.0.scale());
    if mantissa == 0 {
        return (0, 0);
    }
    while mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    (mantissa, scale)
}

/// Both mantissas brought to a common scale.
fn aligned(a: &Numeric, b: &Numeric) -> Option<(i128, i128, i64)> {
    let (a, a_scale) = reduced(a);
    let (b, b_scale) = reduced(b);
    let scale = a_scale.max(b_scale);

    let shift = |mantissa: i128, from: i64| -> Option<i128> {
        let power = u32::try_from(scale - from).ok()?;
        mantissa.checked_mul(10i128.checked_pow(power)?)
    };
    Some((shift(a, a_scale)?, shift(b, b_scale)?, scale))
}

/// The exact value `mantissa * 10^-scale`, or `None` if `Decimal` cannot
/// hold it without rounding.
fn exact(mantissa: i128, scale: i64) -> Option<Numeric> {
    if mantissa == 0 {
        return Some(Numeric::ZERO);
    }
    let (mut mantissa, mut scale) = (mantissa, scale);
    while scale < 0 {
        mantissa = mantissa.checked_mul(10)?;
        scale += 1;
    }
    while scale > 0 && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    let scale = u32::try_from(scale).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, scale)
        .ok()
        .map(Numeric)
}
