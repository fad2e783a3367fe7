use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use invoicing_core::{AggregateRoot, DomainError, DomainResult, Id};
use invoicing_events::{Event, PublishableEvents};

use crate::calendar_date::CalendarDate;
use crate::issuer::{Issuer, IssuerPlain};
use crate::line_items::{LineItems, LineItemsPlain};
use crate::money::{Money, MoneyPlain};
use crate::recipient::{Recipient, RecipientPlain};
use crate::vat_rate::VatRate;

/// Snapshot of an [`Invoice`], carried by `invoice.created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePlain {
    pub id: String,
    pub line_items: LineItemsPlain,
    pub total: MoneyPlain,
    pub vat_rate: Option<String>,
    pub vat_amount: Option<MoneyPlain>,
    pub issue_date: String,
    pub due_date: String,
    pub issuer: IssuerPlain,
    pub recipient: RecipientPlain,
}

/// Command: CreateInvoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoice {
    pub line_items: LineItems,
    pub issue_date: CalendarDate,
    pub due_date: CalendarDate,
    pub issuer: Issuer,
    pub vat_rate: Option<VatRate>,
    pub recipient: Recipient,
}

/// Event: InvoiceCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCreated {
    pub event_id: Uuid,
    pub invoice_id: Id,
    pub data: InvoicePlain,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceEvent {
    InvoiceCreated(InvoiceCreated),
}

impl InvoiceEvent {
    pub fn data(&self) -> &InvoicePlain {
        match self {
            InvoiceEvent::InvoiceCreated(e) => &e.data,
        }
    }
}

impl Event for InvoiceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InvoiceEvent::InvoiceCreated(_) => "invoice.created",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InvoiceEvent::InvoiceCreated(e) => e.occurred_at,
        }
    }
}

/// Aggregate root: Invoice.
///
/// Created once, fully valid; not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    id: Id,
    line_items: LineItems,
    total: Money,
    vat_rate: Option<VatRate>,
    vat_amount: Option<Money>,
    issue_date: CalendarDate,
    due_date: CalendarDate,
    issuer: Issuer,
    recipient: Recipient,
    events: Vec<InvoiceEvent>,
}

impl Invoice {
    pub fn create(cmd: CreateInvoice) -> DomainResult<Self> {
        ensure_due_not_before_issue(&cmd.issue_date, &cmd.due_date)?;

        let (total, vat_amount) = compute_totals(cmd.line_items.subtotal(), cmd.vat_rate.as_ref())?;

        let mut invoice = Self {
            id: Id::new(),
            line_items: cmd.line_items,
            total,
            vat_rate: cmd.vat_rate,
            vat_amount,
            issue_date: cmd.issue_date,
            due_date: cmd.due_date,
            issuer: cmd.issuer,
            recipient: cmd.recipient,
            events: Vec::new(),
        };

        let event = InvoiceEvent::InvoiceCreated(InvoiceCreated {
            event_id: Uuid::now_v7(),
            invoice_id: invoice.id,
            data: invoice.to_plain(),
            occurred_at: Utc::now(),
        });
        invoice.events.push(event);

        tracing::debug!(invoice_id = %invoice.id, total = %invoice.total, "invoice created");

        Ok(invoice)
    }

    pub fn line_items(&self) -> &LineItems {
        &self.line_items
    }

    pub fn total(&self) -> &Money {
        &self.total
    }

    pub fn vat_rate(&self) -> Option<&VatRate> {
        self.vat_rate.as_ref()
    }

    pub fn vat_amount(&self) -> Option<&Money> {
        self.vat_amount.as_ref()
    }

    pub fn issue_date(&self) -> CalendarDate {
        self.issue_date
    }

    pub fn due_date(&self) -> CalendarDate {
        self.due_date
    }

    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn to_plain(&self) -> InvoicePlain {
        InvoicePlain {
            id: self.id.to_string(),
            line_items: self.line_items.to_plain(),
            total: self.total.to_plain(),
            vat_rate: self.vat_rate.as_ref().map(VatRate::to_plain),
            vat_amount: self.vat_amount.as_ref().map(Money::to_plain),
            issue_date: self.issue_date.to_string(),
            due_date: self.due_date.to_string(),
            issuer: self.issuer.to_plain(),
            recipient: self.recipient.to_plain(),
        }
    }
}

impl AggregateRoot for Invoice {
    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PublishableEvents for Invoice {
    type Event = InvoiceEvent;

    fn events(&self) -> &[InvoiceEvent] {
        &self.events
    }

    fn take_events(&mut self) -> Vec<InvoiceEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Equal dates are allowed.
pub(crate) fn ensure_due_not_before_issue(
    issue_date: &CalendarDate,
    due_date: &CalendarDate,
) -> DomainResult<()> {
    if due_date < issue_date {
        return Err(DomainError::due_date_before_issue_date(issue_date, due_date));
    }
    Ok(())
}

/// `(total, vat_amount)` derived from scratch from the subtotal.
///
/// Both aggregates call this after every change so rounding never accumulates.
pub(crate) fn compute_totals(
    subtotal: &Money,
    vat_rate: Option<&VatRate>,
) -> DomainResult<(Money, Option<Money>)> {
    match vat_rate {
        Some(rate) => {
            let total = rate.apply_to(subtotal)?;
            let vat_amount = total.subtract(subtotal)?;
            Ok((total, Some(vat_amount)))
        }
        None => Ok((subtotal.clone(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::PartyType;
    use crate::line_item::{LineItem, LineItemInput};
    use crate::recipient::BillingPlain;

    fn line_items() -> LineItems {
        let item = LineItem::create(&LineItemInput {
            description: "Item 1".to_string(),
            price: MoneyPlain::new("50", "USD"),
            quantity: "2".to_string(),
        })
        .unwrap();
        LineItems::create(vec![item]).unwrap()
    }

    fn issuer() -> Issuer {
        Issuer::create(&IssuerPlain {
            party_type: PartyType::Company,
            name: "Acme Ltd".to_string(),
            address: "1 Main St".to_string(),
            tax_id: "PL1234567890".to_string(),
            email: "billing@acme.test".to_string(),
        })
        .unwrap()
    }

    fn recipient() -> Recipient {
        Recipient::create(&RecipientPlain {
            party_type: PartyType::Individual,
            name: "Jane Roe".to_string(),
            address: "2 Side St".to_string(),
            tax_id: "123".to_string(),
            email: "jane@example.com".to_string(),
            tax_residence_country: "US".to_string(),
            billing: BillingPlain::Paypal {
                email: "jane@example.com".to_string(),
            },
        })
        .unwrap()
    }

    fn date(value: &str) -> CalendarDate {
        CalendarDate::create(value).unwrap()
    }

    fn cmd(vat_rate: Option<&str>, issue: &str, due: &str) -> CreateInvoice {
        CreateInvoice {
            line_items: line_items(),
            issue_date: date(issue),
            due_date: date(due),
            issuer: issuer(),
            vat_rate: vat_rate.map(|v| VatRate::create(v).unwrap()),
            recipient: recipient(),
        }
    }

    fn usd(amount: &str) -> Money {
        Money::create(amount, "USD").unwrap()
    }

    #[test]
    fn create_applies_vat_to_subtotal() {
        let invoice = Invoice::create(cmd(Some("20"), "2024-01-01", "2024-01-31")).unwrap();

        assert_eq!(invoice.line_items().subtotal(), &usd("100"));
        assert_eq!(invoice.total(), &usd("120"));
        assert_eq!(invoice.vat_amount(), Some(&usd("20")));
        assert_eq!(invoice.vat_rate(), Some(&VatRate::create("20").unwrap()));
    }

    #[test]
    fn create_without_vat_uses_subtotal() {
        let invoice = Invoice::create(cmd(None, "2024-01-01", "2024-01-31")).unwrap();

        assert_eq!(invoice.total(), &usd("100"));
        assert!(invoice.vat_amount().is_none());
        assert!(invoice.vat_rate().is_none());
    }

    #[test]
    fn create_rejects_due_date_before_issue_date() {
        let err = Invoice::create(cmd(None, "2028-02-01", "2023-01-01")).unwrap_err();
        assert_eq!(
            err,
            DomainError::due_date_before_issue_date("2028-02-01", "2023-01-01")
        );
        assert_eq!(err.code(), "10000");
    }

    #[test]
    fn create_allows_same_day_due_date() {
        assert!(Invoice::create(cmd(None, "2024-01-01", "2024-01-01")).is_ok());
    }

    #[test]
    fn create_emits_invoice_created_event() {
        let invoice = Invoice::create(cmd(Some("20"), "2024-01-01", "2024-01-31")).unwrap();

        assert_eq!(invoice.events().len(), 1);
        match &invoice.events()[0] {
            InvoiceEvent::InvoiceCreated(e) => {
                assert_eq!(e.invoice_id, *invoice.id());
                assert_eq!(e.data, invoice.to_plain());
                assert_eq!(e.data.total, MoneyPlain::new("120", "USD"));
                assert_eq!(e.data.vat_rate.as_deref(), Some("20"));
                assert_eq!(e.data.issue_date, "2024-01-01");
            }
        }
        assert_eq!(invoice.events()[0].event_type(), "invoice.created");
    }

    #[test]
    fn take_events_drains_the_log() {
        let mut invoice = Invoice::create(cmd(None, "2024-01-01", "2024-01-31")).unwrap();

        assert_eq!(invoice.take_events().len(), 1);
        assert!(invoice.events().is_empty());
    }

    #[test]
    fn each_invoice_gets_a_fresh_id() {
        let a = Invoice::create(cmd(None, "2024-01-01", "2024-01-31")).unwrap();
        let b = Invoice::create(cmd(None, "2024-01-01", "2024-01-31")).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn plain_snapshot_serializes_with_camel_case_keys() {
        let invoice = Invoice::create(cmd(None, "2024-01-01", "2024-01-31")).unwrap();
        let json = serde_json::to_value(invoice.to_plain()).unwrap();

        assert_eq!(json["vatRate"], serde_json::Value::Null);
        assert_eq!(json["vatAmount"], serde_json::Value::Null);
        assert_eq!(json["dueDate"], "2024-01-31");
        assert_eq!(json["lineItems"]["subtotal"]["amount"], "100");
    }
}
