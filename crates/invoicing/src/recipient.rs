//! The billed party and where they get paid.

use serde::{Deserialize, Serialize};

use invoicing_core::{DomainResult, ValueObject};

use crate::country::Country;
use crate::email::Email;
use crate::issuer::PartyType;

/// Plain form of [`Billing`], tagged as `{"type": "PAYPAL"|"WIRE", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "UPPERCASE")]
pub enum BillingPlain {
    Paypal {
        email: String,
    },
    #[serde(rename_all = "camelCase")]
    Wire {
        swift: String,
        account_number: String,
        account_holder_name: String,
        bank_name: String,
        bank_address: String,
        bank_country: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paypal {
    email: Email,
}

impl Paypal {
    pub fn create(email: &str) -> DomainResult<Self> {
        Ok(Self {
            email: Email::create(email)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}

/// Bank transfer details. Stored as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub swift: String,
    pub account_number: String,
    pub account_holder_name: String,
    pub bank_name: String,
    pub bank_address: String,
    pub bank_country: String,
}

/// Payment destination for the recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Billing {
    Paypal(Paypal),
    Wire(Wire),
}

impl Billing {
    pub fn create(plain: &BillingPlain) -> DomainResult<Self> {
        match plain {
            BillingPlain::Paypal { email } => Ok(Billing::Paypal(Paypal::create(email)?)),
            BillingPlain::Wire {
                swift,
                account_number,
                account_holder_name,
                bank_name,
                bank_address,
                bank_country,
            } => Ok(Billing::Wire(Wire {
                swift: swift.clone(),
                account_number: account_number.clone(),
                account_holder_name: account_holder_name.clone(),
                bank_name: bank_name.clone(),
                bank_address: bank_address.clone(),
                bank_country: bank_country.clone(),
            })),
        }
    }

    pub fn to_plain(&self) -> BillingPlain {
        match self {
            Billing::Paypal(paypal) => BillingPlain::Paypal {
                email: paypal.email.to_string(),
            },
            Billing::Wire(wire) => BillingPlain::Wire {
                swift: wire.swift.clone(),
                account_number: wire.account_number.clone(),
                account_holder_name: wire.account_holder_name.clone(),
                bank_name: wire.bank_name.clone(),
                bank_address: wire.bank_address.clone(),
                bank_country: wire.bank_country.clone(),
            },
        }
    }
}

impl ValueObject for Billing {}

/// Plain form of [`Recipient`]; also its construction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientPlain {
    #[serde(rename = "type")]
    pub party_type: PartyType,
    pub name: String,
    pub address: String,
    pub tax_id: String,
    pub email: String,
    pub tax_residence_country: String,
    pub billing: BillingPlain,
}

/// The party being invoiced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    party_type: PartyType,
    name: String,
    address: String,
    tax_id: String,
    email: Email,
    tax_residence_country: Country,
    billing: Billing,
}

impl Recipient {
    /// Validates the email, then the country, then the billing details.
    pub fn create(details: &RecipientPlain) -> DomainResult<Self> {
        let email = Email::create(&details.email)?;
        let tax_residence_country = Country::create(&details.tax_residence_country)?;
        let billing = Billing::create(&details.billing)?;

        Ok(Self {
            party_type: details.party_type,
            name: details.name.clone(),
            address: details.address.clone(),
            tax_id: details.tax_id.clone(),
            email,
            tax_residence_country,
            billing,
        })
    }

    pub fn party_type(&self) -> PartyType {
        self.party_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn tax_residence_country(&self) -> Country {
        self.tax_residence_country
    }

    pub fn billing(&self) -> &Billing {
        &self.billing
    }

    pub fn to_plain(&self) -> RecipientPlain {
        RecipientPlain {
            party_type: self.party_type,
            name: self.name.clone(),
            address: self.address.clone(),
            tax_id: self.tax_id.clone(),
            email: self.email.to_string(),
            tax_residence_country: self.tax_residence_country.to_string(),
            billing: self.billing.to_plain(),
        }
    }
}

impl ValueObject for Recipient {}

#[cfg(test)]
mod tests {
    use super::*;

    fn paypal_recipient(country: &str) -> RecipientPlain {
        RecipientPlain {
            party_type: PartyType::Individual,
            name: "Jane Roe".to_string(),
            address: "2 Side St".to_string(),
            tax_id: "123".to_string(),
            email: "jane@example.com".to_string(),
            tax_residence_country: country.to_string(),
            billing: BillingPlain::Paypal {
                email: "jane.pay@example.com".to_string(),
            },
        }
    }

    fn wire() -> BillingPlain {
        BillingPlain::Wire {
            swift: "BREXPLPW".to_string(),
            account_number: "PL61109010140000071219812874".to_string(),
            account_holder_name: "Jane Roe".to_string(),
            bank_name: "Bank".to_string(),
            bank_address: "3 Bank St".to_string(),
            bank_country: "PL".to_string(),
        }
    }

    #[test]
    fn creates_recipient_with_paypal_billing() {
        let recipient = Recipient::create(&paypal_recipient("US")).unwrap();
        assert_eq!(recipient.tax_residence_country().code(), "US");
        assert!(matches!(recipient.billing(), Billing::Paypal(p) if p.email().as_str() == "jane.pay@example.com"));
        assert_eq!(recipient.to_plain(), paypal_recipient("US"));
    }

    #[test]
    fn rejects_invalid_country() {
        let err = Recipient::create(&paypal_recipient("USA")).unwrap_err();
        assert_eq!(err.code(), "7000");
    }

    #[test]
    fn rejects_invalid_paypal_email() {
        let mut details = paypal_recipient("US");
        details.billing = BillingPlain::Paypal {
            email: "not-an-email".to_string(),
        };
        assert_eq!(Recipient::create(&details).unwrap_err().code(), "6000");
    }

    #[test]
    fn recipients_with_different_billing_differ() {
        let paypal = Recipient::create(&paypal_recipient("US")).unwrap();
        let mut details = paypal_recipient("US");
        details.billing = wire();
        let wired = Recipient::create(&details).unwrap();

        assert_ne!(paypal, wired);
    }

    #[test]
    fn billing_plain_is_tagged() {
        let json = serde_json::to_value(wire()).unwrap();
        assert_eq!(json["type"], "WIRE");
        assert_eq!(json["data"]["accountHolderName"], "Jane Roe");

        let paypal = serde_json::to_value(paypal_recipient("US").billing).unwrap();
        assert_eq!(
            paypal,
            serde_json::json!({"type": "PAYPAL", "data": {"email": "jane.pay@example.com"}})
        );
    }

    #[test]
    fn recipient_plain_round_trips_through_json() {
        let plain = paypal_recipient("PL");
        let json = serde_json::to_string(&plain).unwrap();
        let back: RecipientPlain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plain);
        assert!(json.contains("\"taxResidenceCountry\":\"PL\""));
    }
}
