//! Invoice domain model.
//!
//! Value objects (`Numeric`, `Money`, `VatRate`, `LineItems`, parties) and the
//! two aggregates: a mutable [`DraftInvoice`] that is assembled step by step
//! and converted into an immutable [`Invoice`]. Pure domain logic: no IO, no
//! storage. Both aggregates record domain events for a caller to publish.

pub mod calendar_date;
pub mod country;
pub mod currency;
pub mod draft_invoice;
pub mod email;
pub mod events;
pub mod invoice;
pub mod issuer;
pub mod line_item;
pub mod line_items;
pub mod money;
pub mod numeric;
pub mod recipient;
pub mod vat_rate;

pub use calendar_date::CalendarDate;
pub use country::Country;
pub use currency::Currency;
pub use draft_invoice::{
    DraftInvoice, DraftInvoiceCreated, DraftInvoiceEvent, DraftInvoiceFinished, DraftInvoicePlain,
    DraftInvoiceUpdated,
};
pub use email::Email;
pub use events::InvoicingEvent;
pub use invoice::{CreateInvoice, Invoice, InvoiceCreated, InvoiceEvent, InvoicePlain};
pub use issuer::{Issuer, IssuerPlain, PartyType};
pub use line_item::{LineItem, LineItemInput, LineItemPlain, UnitDescription, UnitQuantity};
pub use line_items::{LineItems, LineItemsPlain};
pub use money::{Money, MoneyPlain};
pub use numeric::{Numeric, Rounding};
pub use recipient::{Billing, BillingPlain, Paypal, Recipient, RecipientPlain, Wire};
pub use vat_rate::VatRate;
