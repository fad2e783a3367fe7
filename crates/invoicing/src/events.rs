//! Every event the invoicing aggregates record, as one bus message type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invoicing_events::Event;

use crate::draft_invoice::DraftInvoiceEvent;
use crate::invoice::InvoiceEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoicingEvent {
    DraftInvoice(DraftInvoiceEvent),
    Invoice(InvoiceEvent),
}

impl From<DraftInvoiceEvent> for InvoicingEvent {
    fn from(event: DraftInvoiceEvent) -> Self {
        InvoicingEvent::DraftInvoice(event)
    }
}

impl From<InvoiceEvent> for InvoicingEvent {
    fn from(event: InvoiceEvent) -> Self {
        InvoicingEvent::Invoice(event)
    }
}

impl Event for InvoicingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InvoicingEvent::DraftInvoice(e) => e.event_type(),
            InvoicingEvent::Invoice(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            InvoicingEvent::DraftInvoice(e) => e.version(),
            InvoicingEvent::Invoice(e) => e.version(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InvoicingEvent::DraftInvoice(e) => e.occurred_at(),
            InvoicingEvent::Invoice(e) => e.occurred_at(),
        }
    }
}
