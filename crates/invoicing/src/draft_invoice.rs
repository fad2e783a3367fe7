//! Draft invoice aggregate.
//!
//! A draft collects the parts of an [`Invoice`] one call at a time. Totals are
//! rederived from the line items and VAT rate after every change, and each
//! accepted change is appended to the draft's event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use invoicing_core::{AggregateRoot, DomainError, DomainResult, Id};
use invoicing_events::{Event, PublishableEvents};

use crate::calendar_date::CalendarDate;
use crate::invoice::{CreateInvoice, Invoice, compute_totals, ensure_due_not_before_issue};
use crate::issuer::{Issuer, IssuerPlain};
use crate::line_item::LineItem;
use crate::line_items::{LineItems, LineItemsPlain};
use crate::money::{Money, MoneyPlain};
use crate::recipient::{Recipient, RecipientPlain};
use crate::vat_rate::VatRate;

/// Snapshot of a [`DraftInvoice`]; unset fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftInvoicePlain {
    pub id: String,
    pub line_items: Option<LineItemsPlain>,
    pub total: Option<MoneyPlain>,
    pub vat_rate: Option<String>,
    pub vat_amount: Option<MoneyPlain>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub issuer: Option<IssuerPlain>,
    pub recipient: Option<RecipientPlain>,
}

/// Event: DraftInvoiceCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInvoiceCreated {
    pub event_id: Uuid,
    pub draft_invoice_id: Id,
    pub data: DraftInvoicePlain,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DraftInvoiceUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInvoiceUpdated {
    pub event_id: Uuid,
    pub draft_invoice_id: Id,
    pub data: DraftInvoicePlain,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DraftInvoiceFinished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInvoiceFinished {
    pub event_id: Uuid,
    pub draft_invoice_id: Id,
    pub data: DraftInvoicePlain,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftInvoiceEvent {
    DraftInvoiceCreated(DraftInvoiceCreated),
    DraftInvoiceUpdated(DraftInvoiceUpdated),
    DraftInvoiceFinished(DraftInvoiceFinished),
}

impl DraftInvoiceEvent {
    pub fn data(&self) -> &DraftInvoicePlain {
        match self {
            DraftInvoiceEvent::DraftInvoiceCreated(e) => &e.data,
            DraftInvoiceEvent::DraftInvoiceUpdated(e) => &e.data,
            DraftInvoiceEvent::DraftInvoiceFinished(e) => &e.data,
        }
    }

    pub fn draft_invoice_id(&self) -> Id {
        match self {
            DraftInvoiceEvent::DraftInvoiceCreated(e) => e.draft_invoice_id,
            DraftInvoiceEvent::DraftInvoiceUpdated(e) => e.draft_invoice_id,
            DraftInvoiceEvent::DraftInvoiceFinished(e) => e.draft_invoice_id,
        }
    }
}

impl Event for DraftInvoiceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DraftInvoiceEvent::DraftInvoiceCreated(_) => "draft-invoice.created",
            DraftInvoiceEvent::DraftInvoiceUpdated(_) => "draft-invoice.updated",
            DraftInvoiceEvent::DraftInvoiceFinished(_) => "draft-invoice.finished",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DraftInvoiceEvent::DraftInvoiceCreated(e) => e.occurred_at,
            DraftInvoiceEvent::DraftInvoiceUpdated(e) => e.occurred_at,
            DraftInvoiceEvent::DraftInvoiceFinished(e) => e.occurred_at,
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum Transition {
    Created,
    Updated,
    Finished,
}

/// Aggregate root: DraftInvoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftInvoice {
    id: Id,
    line_items: Option<LineItems>,
    total: Option<Money>,
    vat_rate: Option<VatRate>,
    vat_amount: Option<Money>,
    issue_date: Option<CalendarDate>,
    due_date: Option<CalendarDate>,
    issuer: Option<Issuer>,
    recipient: Option<Recipient>,
    events: Vec<DraftInvoiceEvent>,
}

impl DraftInvoice {
    /// Start an empty draft. Records `draft-invoice.created`.
    pub fn create() -> Self {
        let mut draft = Self {
            id: Id::new(),
            line_items: None,
            total: None,
            vat_rate: None,
            vat_amount: None,
            issue_date: None,
            due_date: None,
            issuer: None,
            recipient: None,
            events: Vec::new(),
        };
        draft.record(Transition::Created);
        draft
    }

    pub fn add_line_item(&mut self, item: LineItem) -> DomainResult<()> {
        let line_items = match &self.line_items {
            Some(existing) => existing.add(item)?,
            None => LineItems::create(vec![item])?,
        };
        self.replace_line_items(line_items)?;
        self.record(Transition::Updated);
        Ok(())
    }

    pub fn remove_line_item(&mut self, item: &LineItem) -> DomainResult<()> {
        let existing = self.line_items.as_ref().ok_or(DomainError::LineItemsEmpty)?;
        let line_items = existing.remove(item)?;
        self.replace_line_items(line_items)?;
        self.record(Transition::Updated);
        Ok(())
    }

    /// Set the VAT rate and rederive totals.
    ///
    /// Needs at least one line item. Does not record an event.
    pub fn apply_vat(&mut self, vat_rate: VatRate) -> DomainResult<()> {
        let line_items = self
            .line_items
            .as_ref()
            .ok_or(DomainError::DraftInvoiceLineItemsEmpty)?;

        let (total, vat_amount) = compute_totals(line_items.subtotal(), Some(&vat_rate))?;
        self.vat_rate = Some(vat_rate);
        self.total = Some(total);
        self.vat_amount = vat_amount;

        tracing::debug!(draft_invoice_id = %self.id, "vat applied to draft invoice");
        Ok(())
    }

    pub fn add_issuer(&mut self, issuer: Issuer) -> DomainResult<()> {
        self.issuer = Some(issuer);
        self.record(Transition::Updated);
        Ok(())
    }

    pub fn add_recipient(&mut self, recipient: Recipient) -> DomainResult<()> {
        self.recipient = Some(recipient);
        self.record(Transition::Updated);
        Ok(())
    }

    /// Fails when a due date is already set and precedes `issue_date`.
    pub fn add_issue_date(&mut self, issue_date: CalendarDate) -> DomainResult<()> {
        if let Some(due_date) = &self.due_date {
            ensure_due_not_before_issue(&issue_date, due_date)?;
        }
        self.issue_date = Some(issue_date);
        self.record(Transition::Updated);
        Ok(())
    }

    /// Fails when an issue date is already set and `due_date` precedes it.
    pub fn add_due_date(&mut self, due_date: CalendarDate) -> DomainResult<()> {
        if let Some(issue_date) = &self.issue_date {
            ensure_due_not_before_issue(issue_date, &due_date)?;
        }
        self.due_date = Some(due_date);
        self.record(Transition::Updated);
        Ok(())
    }

    /// All required parts are present and the VAT fields agree.
    pub fn is_valid(&self) -> bool {
        let required = self.total.is_some()
            && self.line_items.is_some()
            && self.issue_date.is_some()
            && self.due_date.is_some()
            && self.issuer.is_some()
            && self.recipient.is_some();
        let vat_consistent = self.vat_rate.is_some() == self.vat_amount.is_some();

        required && vat_consistent
    }

    /// Convert a complete draft into an [`Invoice`].
    ///
    /// Once the draft passes the completeness check, `draft-invoice.finished`
    /// is recorded whether or not the invoice itself could be created.
    pub fn to_invoice(&mut self) -> DomainResult<Invoice> {
        let cmd = match self.completed_parts() {
            Some(cmd) => cmd,
            None => {
                tracing::warn!(draft_invoice_id = %self.id, "draft invoice is not complete");
                return Err(DomainError::DraftInvoiceNotFullyComplete);
            }
        };

        let result = Invoice::create(cmd);
        self.record(Transition::Finished);

        if let Err(err) = &result {
            tracing::warn!(draft_invoice_id = %self.id, code = err.code(), error = %err, "draft invoice conversion rejected");
        }
        result
    }

    pub fn line_items(&self) -> Option<&LineItems> {
        self.line_items.as_ref()
    }

    pub fn total(&self) -> Option<&Money> {
        self.total.as_ref()
    }

    pub fn vat_rate(&self) -> Option<&VatRate> {
        self.vat_rate.as_ref()
    }

    pub fn vat_amount(&self) -> Option<&Money> {
        self.vat_amount.as_ref()
    }

    pub fn issue_date(&self) -> Option<CalendarDate> {
        self.issue_date
    }

    pub fn due_date(&self) -> Option<CalendarDate> {
        self.due_date
    }

    pub fn issuer(&self) -> Option<&Issuer> {
        self.issuer.as_ref()
    }

    pub fn recipient(&self) -> Option<&Recipient> {
        self.recipient.as_ref()
    }

    pub fn to_plain(&self) -> DraftInvoicePlain {
        DraftInvoicePlain {
            id: self.id.to_string(),
            line_items: self.line_items.as_ref().map(LineItems::to_plain),
            total: self.total.as_ref().map(Money::to_plain),
            vat_rate: self.vat_rate.as_ref().map(VatRate::to_plain),
            vat_amount: self.vat_amount.as_ref().map(Money::to_plain),
            issue_date: self.issue_date.map(|d| d.to_string()),
            due_date: self.due_date.map(|d| d.to_string()),
            issuer: self.issuer.as_ref().map(Issuer::to_plain),
            recipient: self.recipient.as_ref().map(Recipient::to_plain),
        }
    }
}

impl DraftInvoice {
    /// Swap in new line items together with totals derived from them.
    fn replace_line_items(&mut self, line_items: LineItems) -> DomainResult<()> {
        let (total, vat_amount) = compute_totals(line_items.subtotal(), self.vat_rate.as_ref())?;
        self.line_items = Some(line_items);
        self.total = Some(total);
        self.vat_amount = vat_amount;
        Ok(())
    }

    fn completed_parts(&self) -> Option<CreateInvoice> {
        if !self.is_valid() {
            return None;
        }
        Some(CreateInvoice {
            line_items: self.line_items.clone()?,
            issue_date: self.issue_date?,
            due_date: self.due_date?,
            issuer: self.issuer.clone()?,
            vat_rate: self.vat_rate.clone(),
            recipient: self.recipient.clone()?,
        })
    }

    fn record(&mut self, transition: Transition) {
        let event_id = Uuid::now_v7();
        let draft_invoice_id = self.id;
        let data = self.to_plain();
        let occurred_at = Utc::now();

        let event = match transition {
            Transition::Created => DraftInvoiceEvent::DraftInvoiceCreated(DraftInvoiceCreated {
                event_id,
                draft_invoice_id,
                data,
                occurred_at,
            }),
            Transition::Updated => DraftInvoiceEvent::DraftInvoiceUpdated(DraftInvoiceUpdated {
                event_id,
                draft_invoice_id,
                data,
                occurred_at,
            }),
            Transition::Finished => DraftInvoiceEvent::DraftInvoiceFinished(DraftInvoiceFinished {
                event_id,
                draft_invoice_id,
                data,
                occurred_at,
            }),
        };

        tracing::debug!(
            draft_invoice_id = %self.id,
            event = event.event_type(),
            "draft invoice transition"
        );
        self.events.push(event);
    }
}

impl AggregateRoot for DraftInvoice {
    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PublishableEvents for DraftInvoice {
    type Event = DraftInvoiceEvent;

    fn events(&self) -> &[DraftInvoiceEvent] {
        &self.events
    }

    fn take_events(&mut self) -> Vec<DraftInvoiceEvent> {
        std::mem::take(&mut self.events)
    }
}
