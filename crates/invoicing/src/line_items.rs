//! Validated, ordered collection of line items with a maintained subtotal.

use serde::{Deserialize, Serialize};

use invoicing_core::{DomainError, DomainResult, ValueObject};

use crate::line_item::{LineItem, LineItemPlain};
use crate::money::{Money, MoneyPlain};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemsPlain {
    pub items: Vec<LineItemPlain>,
    pub subtotal: MoneyPlain,
}

/// Non-empty, single-currency, duplicate-free line items.
///
/// `add` and `remove` never mutate: they return a freshly validated
/// collection or the error that the resulting set would violate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItems {
    items: Vec<LineItem>,
    subtotal: Money,
}

impl LineItems {
    /// Checks run in order: non-empty, same currency, no duplicates.
    pub fn create(items: Vec<LineItem>) -> DomainResult<Self> {
        ensure_non_empty(&items)?;
        ensure_same_currency(&items)?;
        ensure_no_duplicates(&items)?;

        let subtotal = calculate_subtotal(&items)?;
        Ok(Self { items, subtotal })
    }

    pub fn add(&self, item: LineItem) -> DomainResult<Self> {
        let mut items = self.items.clone();
        items.push(item);
        Self::create(items)
    }

    /// Removes every item structurally equal to `item`.
    pub fn remove(&self, item: &LineItem) -> DomainResult<Self> {
        let items = self.items.iter().filter(|i| *i != item).cloned().collect();
        Self::create(items)
    }

    pub fn subtotal(&self) -> &Money {
        &self.subtotal
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed collection.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &LineItem) -> bool {
        self.items.contains(item)
    }

    pub fn find<P>(&self, predicate: P) -> Option<&LineItem>
    where
        P: Fn(&LineItem) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    pub fn to_plain(&self) -> LineItemsPlain {
        LineItemsPlain {
            items: self.items.iter().map(LineItem::to_plain).collect(),
            subtotal: self.subtotal.to_plain(),
        }
    }
}

impl ValueObject for LineItems {}

impl<'a> IntoIterator for &'a LineItems {
    type Item = &'a LineItem;
    type IntoIter = core::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn ensure_non_empty(items: &[LineItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::LineItemsEmpty);
    }
    Ok(())
}

fn ensure_same_currency(items: &[LineItem]) -> DomainResult<()> {
    let Some(first) = items.first() else {
        return Ok(());
    };
    let currency = first.total().currency();
    if items.iter().any(|item| item.total().currency() != currency) {
        return Err(DomainError::LineItemsDifferentCurrencies);
    }
    Ok(())
}

fn ensure_no_duplicates(items: &[LineItem]) -> DomainResult<()> {
    for (i, item) in items.iter().enumerate() {
        if items[i + 1..].contains(item) {
            return Err(DomainError::LineItemsDuplicate(item.to_string()));
        }
    }
    Ok(())
}

fn calculate_subtotal(items: &[LineItem]) -> DomainResult<Money> {
    let (first, rest) = items.split_first().ok_or(DomainError::LineItemsEmpty)?;
    rest.iter()
        .try_fold(first.total().clone(), |acc, item| acc.add(item.total()))
}
