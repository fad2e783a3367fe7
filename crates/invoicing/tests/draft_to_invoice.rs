use invoicing_core::{AggregateRoot, DomainError};
use invoicing_domain::{
    BillingPlain, CalendarDate, DraftInvoice, InvoicingEvent, Issuer, IssuerPlain, LineItem,
    LineItemInput, Money, MoneyPlain, PartyType, Recipient, RecipientPlain, VatRate,
};
use invoicing_events::{Event, EventBus, InMemoryEventBus, PublishableEvents};

fn issuer() -> Issuer {
    Issuer::create(&IssuerPlain {
        party_type: PartyType::Company,
        name: "Acme Ltd".to_string(),
        address: "1 Main St, Warsaw".to_string(),
        tax_id: "PL1234567890".to_string(),
        email: "billing@acme.test".to_string(),
    })
    .unwrap()
}

fn recipient() -> Recipient {
    Recipient::create(&RecipientPlain {
        party_type: PartyType::Company,
        name: "Globex".to_string(),
        address: "9 Harbour Rd, Dublin".to_string(),
        tax_id: "IE6388047V".to_string(),
        email: "ap@globex.test".to_string(),
        tax_residence_country: "IE".to_string(),
        billing: BillingPlain::Wire {
            swift: "AIBKIE2D".to_string(),
            account_number: "IE29AIBK93115212345678".to_string(),
            account_holder_name: "Acme Ltd".to_string(),
            bank_name: "AIB".to_string(),
            bank_address: "Dublin".to_string(),
            bank_country: "IE".to_string(),
        },
    })
    .unwrap()
}

fn usd(amount: &str) -> Money {
    Money::create(amount, "USD").unwrap()
}

fn filled_draft() -> DraftInvoice {
    let mut draft = DraftInvoice::create();
    draft
        .add_line_item(
            LineItem::create(&LineItemInput {
                description: "Item 1".to_string(),
                price: MoneyPlain::new("50", "USD"),
                quantity: "2".to_string(),
            })
            .unwrap(),
        )
        .unwrap();
    draft.apply_vat(VatRate::create("20").unwrap()).unwrap();
    draft.add_issue_date(CalendarDate::create("2024-03-01").unwrap()).unwrap();
    draft.add_due_date(CalendarDate::create("2024-03-01").unwrap()).unwrap();
    draft.add_issuer(issuer()).unwrap();
    draft.add_recipient(recipient()).unwrap();
    draft
}

#[test]
fn draft_becomes_invoice_with_vat_inclusive_total() {
    let mut draft = filled_draft();

    let invoice = draft.to_invoice().unwrap();

    assert_eq!(invoice.total(), &usd("120"));
    assert_eq!(invoice.vat_amount(), Some(&usd("20")));
    assert_eq!(invoice.line_items().subtotal(), &usd("100"));
    assert_eq!(invoice.total().to_string(), "120 USD");
    assert_ne!(invoice.id(), draft.id());
}

#[test]
fn recorded_events_reach_subscribers_by_name() {
    let bus: InMemoryEventBus<InvoicingEvent> = InMemoryEventBus::new();
    let updates = bus.subscribe("draft-invoice.updated");
    let finished = bus.subscribe("draft-invoice.finished");
    let created = bus.subscribe("invoice.created");

    let mut draft = filled_draft();
    let mut invoice = draft.to_invoice().unwrap();

    assert_eq!(bus.publish_from(&mut draft).unwrap(), 7);
    assert_eq!(bus.publish_from(&mut invoice).unwrap(), 1);
    assert!(draft.events().is_empty());
    assert!(invoice.events().is_empty());

    assert_eq!(updates.drain().len(), 5);

    let finished = finished.drain();
    assert_eq!(finished.len(), 1);
    match &finished[0] {
        InvoicingEvent::DraftInvoice(event) => {
            assert_eq!(event.draft_invoice_id(), *draft.id());
            assert_eq!(event.data().total, Some(MoneyPlain::new("120", "USD")));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let created = created.drain();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].event_type(), "invoice.created");
    match &created[0] {
        InvoicingEvent::Invoice(event) => {
            let data = event.data();
            assert_eq!(data.id, invoice.id().to_string());
            assert_eq!(data.vat_amount, Some(MoneyPlain::new("20", "USD")));
            assert_eq!(data.line_items.subtotal, MoneyPlain::new("100", "USD"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn incomplete_draft_publishes_nothing_further() {
    let bus: InMemoryEventBus<InvoicingEvent> = InMemoryEventBus::new();
    let finished = bus.subscribe("draft-invoice.finished");

    let mut draft = DraftInvoice::create();
    draft.add_issuer(issuer()).unwrap();

    assert_eq!(
        draft.to_invoice().unwrap_err(),
        DomainError::DraftInvoiceNotFullyComplete
    );
    assert_eq!(bus.publish_from(&mut draft).unwrap(), 2);
    assert!(finished.drain().is_empty());
}
