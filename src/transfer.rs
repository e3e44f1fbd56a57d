//! Transfer information entity and the visitor protocol used to encode it.

use crate::amount::{format_major, Amount, AmountNormalizer};
use crate::error::{Result, TransferError};
use crate::regulatory::RegulatoryReporting;
use crate::sanitize::sanitize_text;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest accepted transfer amount, in minor units.
pub const MIN_AMOUNT: u64 = 1;

/// Largest accepted transfer amount, in minor units (999,999,999.99).
pub const MAX_AMOUNT: u64 = 99_999_999_999;

/// Currency used when none is set.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Kind of creditor behind a creditor identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditorType {
    #[default]
    Company,
    Individual,
}

impl CreditorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditorType::Company => "company",
            CreditorType::Individual => "individual",
        }
    }
}

impl FromStr for CreditorType {
    type Err = TransferError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "company" => Ok(CreditorType::Company),
            "individual" => Ok(CreditorType::Individual),
            other => Err(TransferError::InvalidArgument(format!(
                "creditor type must be either company or individual, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for CreditorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address of the counterparty, either unstructured or line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostalAddress {
    Line(String),
    Lines(Vec<String>),
}

impl PostalAddress {
    /// Returns the address as an ordered list of lines.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            PostalAddress::Line(line) => vec![line.as_str()],
            PostalAddress::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

impl From<String> for PostalAddress {
    fn from(line: String) -> Self {
        PostalAddress::Line(line)
    }
}

impl From<&str> for PostalAddress {
    fn from(line: &str) -> Self {
        PostalAddress::Line(line.to_string())
    }
}

impl From<Vec<String>> for PostalAddress {
    fn from(lines: Vec<String>) -> Self {
        PostalAddress::Lines(lines)
    }
}

/// An encoder that consumes transfer records.
///
/// The encoder decides which accessors to read and what to emit; the entity
/// never knows the output format.
pub trait TransferVisitor {
    type Error;

    fn visit_transfer_information(
        &mut self,
        transfer: &TransferInformation,
    ) -> std::result::Result<(), Self::Error>;
}

/// A record that can be handed to a [`TransferVisitor`].
pub trait Visitable {
    fn accept<V: TransferVisitor + ?Sized>(
        &self,
        visitor: &mut V,
    ) -> std::result::Result<(), V::Error>;
}

/// A single credit-transfer transaction.
///
/// # Invariants
///
/// - Amount, IBAN and name are fixed at construction
/// - The amount lies within [`MIN_AMOUNT`]..=[`MAX_AMOUNT`] minor units
/// - Free-text fields are stored sanitized
/// - At most one regulatory reporting block is attached
#[derive(Debug, Clone, PartialEq)]
pub struct TransferInformation {
    transfer_amount: u64,
    iban: String,
    name: String,
    bic: Option<String>,
    instruction_id: Option<String>,
    end_to_end_id: Option<String>,
    currency: String,
    remittance_information: Option<String>,
    creditor_id: Option<String>,
    creditor_id_type_code: Option<String>,
    creditor_reference_type: Option<String>,
    creditor_reference: Option<String>,
    creditor_type: Option<CreditorType>,
    country: Option<String>,
    postal_address: Option<PostalAddress>,
    regulatory_reporting: Option<RegulatoryReporting>,
}

impl TransferInformation {
    /// Creates a transfer with exact decimal arithmetic available.
    pub fn new(amount: impl Into<Amount>, iban: impl Into<String>, name: &str) -> Result<Self> {
        Self::with_normalizer(&AmountNormalizer::new(), amount, iban, name)
    }

    /// Creates a transfer, normalizing the amount with the given normalizer.
    ///
    /// Fails with [`TransferError::Configuration`] if a major-unit amount is
    /// given to a normalizer without exact arithmetic, and with
    /// [`TransferError::AmountOutOfRange`] if the result is not a valid
    /// transfer amount.
    pub fn with_normalizer(
        normalizer: &AmountNormalizer,
        amount: impl Into<Amount>,
        iban: impl Into<String>,
        name: &str,
    ) -> Result<Self> {
        let amount = amount.into();
        let transfer_amount = normalizer.normalize(amount)?;
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&transfer_amount) {
            return Err(TransferError::AmountOutOfRange(transfer_amount));
        }
        debug!("Normalized amount {} to {} minor units", amount, transfer_amount);

        Ok(TransferInformation {
            transfer_amount,
            iban: iban.into(),
            name: sanitize_text(name),
            bic: None,
            instruction_id: None,
            end_to_end_id: None,
            currency: DEFAULT_CURRENCY.to_string(),
            remittance_information: None,
            creditor_id: None,
            creditor_id_type_code: None,
            creditor_reference_type: None,
            creditor_reference: None,
            creditor_type: None,
            country: None,
            postal_address: None,
            regulatory_reporting: None,
        })
    }

    /// Amount in minor units.
    pub fn transfer_amount(&self) -> u64 {
        self.transfer_amount
    }

    /// Amount in major units with two decimals.
    pub fn transfer_amount_major(&self) -> Decimal {
        format_major(self.transfer_amount)
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    pub fn bic(&self) -> Option<&str> {
        self.bic.as_deref()
    }

    pub fn set_bic(&mut self, bic: impl Into<String>) {
        self.bic = Some(bic.into());
    }

    pub fn instruction_id(&self) -> Option<&str> {
        self.instruction_id.as_deref()
    }

    pub fn set_instruction_id(&mut self, instruction_id: impl Into<String>) {
        self.instruction_id = Some(instruction_id.into());
    }

    pub fn end_to_end_id(&self) -> Option<&str> {
        self.end_to_end_id.as_deref()
    }

    /// Sets the end-to-end identification (sanitized).
    pub fn set_end_to_end_id(&mut self, end_to_end_id: &str) {
        self.end_to_end_id = Some(sanitize_text(end_to_end_id));
    }

    pub fn remittance_information(&self) -> Option<&str> {
        self.remittance_information.as_deref()
    }

    /// Sets the unstructured remittance information (sanitized).
    pub fn set_remittance_information(&mut self, remittance_information: &str) {
        self.remittance_information = Some(sanitize_text(remittance_information));
    }

    pub fn creditor_id(&self) -> Option<&str> {
        self.creditor_id.as_deref()
    }

    /// Sets the creditor identification. Length limits (35) are the caller's concern.
    pub fn set_creditor_id(&mut self, creditor_id: impl Into<String>) {
        self.creditor_id = Some(creditor_id.into());
    }

    pub fn creditor_id_type_code(&self) -> Option<&str> {
        self.creditor_id_type_code.as_deref()
    }

    pub fn set_creditor_id_type_code(&mut self, code: impl Into<String>) {
        self.creditor_id_type_code = Some(code.into());
    }

    pub fn creditor_reference_type(&self) -> Option<&str> {
        self.creditor_reference_type.as_deref()
    }

    pub fn set_creditor_reference_type(&mut self, reference_type: &str) {
        self.creditor_reference_type = Some(sanitize_text(reference_type));
    }

    pub fn creditor_reference(&self) -> Option<&str> {
        self.creditor_reference.as_deref()
    }

    pub fn set_creditor_reference(&mut self, reference: &str) {
        self.creditor_reference = Some(sanitize_text(reference));
    }

    pub fn creditor_type(&self) -> Option<CreditorType> {
        self.creditor_type
    }

    pub fn set_creditor_type(&mut self, creditor_type: CreditorType) {
        self.creditor_type = Some(creditor_type);
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = Some(country.into());
    }

    pub fn postal_address(&self) -> Option<&PostalAddress> {
        self.postal_address.as_ref()
    }

    pub fn set_postal_address(&mut self, address: impl Into<PostalAddress>) {
        self.postal_address = Some(address.into());
    }

    /// Returns the attached reporting block, if any.
    ///
    /// `None` means no block was attached; an attached block may still be
    /// empty.
    pub fn regulatory_reporting(&self) -> Option<&RegulatoryReporting> {
        self.regulatory_reporting.as_ref()
    }

    /// Attaches a reporting block, replacing any previous one.
    pub fn set_regulatory_reporting(&mut self, reporting: RegulatoryReporting) {
        self.regulatory_reporting = Some(reporting);
    }

    /// Detaches and returns the reporting block.
    pub fn take_regulatory_reporting(&mut self) -> Option<RegulatoryReporting> {
        self.regulatory_reporting.take()
    }
}

impl Visitable for TransferInformation {
    fn accept<V: TransferVisitor + ?Sized>(
        &self,
        visitor: &mut V,
    ) -> std::result::Result<(), V::Error> {
        visitor.visit_transfer_information(self)
    }
}
