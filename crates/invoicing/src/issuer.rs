//! The party issuing an invoice, a company or an individual.

use serde::{Deserialize, Serialize};

use invoicing_core::{DomainResult, ValueObject};

use crate::email::Email;

/// Legal form of an invoicing party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyType {
    Individual,
    Company,
}

/// Plain form of [`Issuer`]; also its construction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerPlain {
    #[serde(rename = "type")]
    pub party_type: PartyType,
    pub name: String,
    pub address: String,
    pub tax_id: String,
    pub email: String,
}

/// The party issuing the invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    party_type: PartyType,
    name: String,
    address: String,
    tax_id: String,
    email: Email,
}

impl Issuer {
    pub fn create(details: &IssuerPlain) -> DomainResult<Self> {
        let email = Email::create(&details.email)?;

        Ok(Self {
            party_type: details.party_type,
            name: details.name.clone(),
            address: details.address.clone(),
            tax_id: details.tax_id.clone(),
            email,
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

    pub fn to_plain(&self) -> IssuerPlain {
        IssuerPlain {
            party_type: self.party_type,
            name: self.name.clone(),
            address: self.address.clone(),
            tax_id: self.tax_id.clone(),
            email: self.email.to_string(),
        }
    }
}

impl ValueObject for Issuer {}
