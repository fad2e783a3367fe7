//! A single priced line on an invoice.

use serde::{Deserialize, Serialize};

use invoicing_core::{DomainError, DomainResult, ValueObject};

use crate::money::{Money, MoneyPlain};
use crate::numeric::Numeric;

/// Free-text description of what is being billed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitDescription(String);

impl UnitDescription {
    pub fn create(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for UnitDescription {}

impl core::fmt::Display for UnitDescription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A positive whole quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnitQuantity(Numeric);

impl UnitQuantity {
    pub fn create(value: &str) -> DomainResult<Self> {
        let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::NotIntegerQuantity(value.to_string()));
        }

        let quantity = Numeric::parse(value)
            .map_err(|_| DomainError::NotIntegerQuantity(value.to_string()))?;
        if !quantity.greater_than(&Numeric::ZERO) {
            return Err(DomainError::NotPositiveQuantity(value.to_string()));
        }

        Ok(Self(quantity))
    }

    pub fn value(&self) -> &Numeric {
        &self.0
    }
}

impl ValueObject for UnitQuantity {}

impl core::fmt::Display for UnitQuantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Input for [`LineItem::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub description: String,
    pub price: MoneyPlain,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPlain {
    pub description: String,
    pub price: MoneyPlain,
    pub quantity: String,
    pub total: MoneyPlain,
}

/// Description, unit price and quantity, with the derived line total.
///
/// Equality is structural over description, price and quantity.
#[derive(Debug, Clone)]
pub struct LineItem {
    description: UnitDescription,
    price: Money,
    quantity: UnitQuantity,
    total: Money,
}

impl LineItem {
    pub fn create(input: &LineItemInput) -> DomainResult<Self> {
        let description = UnitDescription::create(&input.description);
        let quantity = UnitQuantity::create(&input.quantity)?;
        let price = Money::from_plain(&input.price)?;

        Self::new(description, price, quantity)
    }

    /// Assemble from already-validated parts.
    pub fn new(
        description: UnitDescription,
        price: Money,
        quantity: UnitQuantity,
    ) -> DomainResult<Self> {
        let total = price.multiply_by(quantity.value())?;
        Ok(Self {
            description,
            price,
            quantity,
            total,
        })
    }

    pub fn description(&self) -> &UnitDescription {
        &self.description
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn quantity(&self) -> &UnitQuantity {
        &self.quantity
    }

    pub fn total(&self) -> &Money {
        &self.total
    }

    pub fn to_plain(&self) -> LineItemPlain {
        LineItemPlain {
            description: self.description.to_string(),
            price: self.price.to_plain(),
            quantity: self.quantity.to_string(),
            total: self.total.to_plain(),
        }
    }
}

// `total` is derived from the other three fields.
impl PartialEq for LineItem {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.price == other.price
            && self.quantity == other.quantity
    }
}

impl Eq for LineItem {}

impl ValueObject for LineItem {}

impl core::fmt::Display for LineItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} x{} @ {}", self.description, self.quantity, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: &str, amount: &str, currency: &str, quantity: &str) -> LineItemInput {
        LineItemInput {
            description: description.to_string(),
            price: MoneyPlain::new(amount, currency),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn creates_line_item_with_total() {
        let item = LineItem::create(&input("Product 1", "100", "USD", "4")).unwrap();

        assert_eq!(item.description().as_str(), "Product 1");
        assert_eq!(item.price(), &Money::create("100", "USD").unwrap());
        assert_eq!(item.quantity(), &UnitQuantity::create("4").unwrap());
        assert_eq!(item.total(), &Money::create("400", "USD").unwrap());
    }

    #[test]
    fn rejects_non_integer_quantity() {
        for raw in ["1.5", "abc", "", "2e3"] {
            let err = LineItem::create(&input("Item", "100", "USD", raw)).unwrap_err();
            assert_eq!(err.code(), "2000", "{raw:?}");
        }
    }

    #[test]
    fn rejects_non_positive_quantity() {
        for raw in ["0", "-1"] {
            let err = LineItem::create(&input("Item", "100", "USD", raw)).unwrap_err();
            assert_eq!(err.code(), "2001", "{raw:?}");
        }
    }

    #[test]
    fn propagates_price_errors() {
        let err = LineItem::create(&input("Item", "10.5", "USD", "1")).unwrap_err();
        assert_eq!(err.code(), "4000");

        let err = LineItem::create(&input("Item", "10", "QQQ", "1")).unwrap_err();
        assert_eq!(err.code(), "5000");
    }

    #[test]
    fn total_beyond_capacity_is_an_error() {
        let err = LineItem::create(&input("Item", "79228162514264337593543950335", "USD", "2"))
            .unwrap_err();
        assert_eq!(err, DomainError::NumericOverflow);
        assert_eq!(err.code(), "11002");

        let item =
            LineItem::create(&input("Item", "79228162514264337593543950335", "USD", "1")).unwrap();
        assert_eq!(item.total(), item.price());
    }

    #[test]
    fn equality_is_structural() {
        let a = LineItem::create(&input("Product A", "100", "USD", "2")).unwrap();
        let b = LineItem::create(&input("Product A", "100", "USD", "2")).unwrap();
        let c = LineItem::create(&input("Product B", "200", "USD", "3")).unwrap();
        let d = LineItem::create(&input("Product A", "100", "USD", "3")).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn plain_form() {
        let item = LineItem::create(&input("Item 1", "50", "USD", "2")).unwrap();
        let plain = item.to_plain();

        assert_eq!(plain.description, "Item 1");
        assert_eq!(plain.quantity, "2");
        assert_eq!(plain.price, MoneyPlain::new("50", "USD"));
        assert_eq!(plain.total, MoneyPlain::new("100", "USD"));
    }
}
