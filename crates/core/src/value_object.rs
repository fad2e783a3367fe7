//! Value object trait.
//!
//! A value object has no identity of its own: amounts, rates, dates and
//! parties are equal whenever their attributes are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. `Money`,
/// `VatRate`, `LineItem` and `CalendarDate` are value objects; `DraftInvoice`
/// and `Invoice` are aggregates with an identity.
///
/// ## Immutability
///
/// To "modify" a value object, create a new one. Arithmetic on `Money` returns
/// a fresh instance, and `LineItems::add` returns a new, re-validated
/// collection. Immutable values are safe to share across threads.
///
/// ## Construction
///
/// Value objects are only built through named factories (`create`, `parse`)
/// that run validation first; fields stay private behind accessors.
///
/// ```ignore
/// let a = Money::create("100", "USD")?;
/// let b = Money::create("100", "USD")?;
/// assert_eq!(a, b); // equal by value, not identity
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
