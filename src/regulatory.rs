//! Regulatory reporting block attached to a single transfer.
//!
//! The value has a fixed two-level shape, `Authority` and `Details`. Each
//! slot is optional and only populated slots are exported or serialized.
//! Serialization uses the ISO 20022 element names (`Authrty`, `Dtls`, ...).

use serde::Serialize;

/// Reporting authority (`Authrty`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Authority {
    /// Country of the authority (`Ctry`)
    #[serde(rename = "Ctry", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Amount reported to the authority (`Amt`): a currency-tagged value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedAmount {
    /// ISO 4217 currency code, emitted as the `Ccy` attribute
    #[serde(rename = "Ccy")]
    pub currency: String,

    /// Amount text as supplied
    pub value: String,
}

/// Reporting details (`Dtls`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportingDetails {
    #[serde(rename = "Tp", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,

    #[serde(rename = "Ctry", skip_serializing_if = "Option::is_none")]
    pub beneficiary_country: Option<String>,

    #[serde(rename = "Cd", skip_serializing_if = "Option::is_none")]
    pub transaction_code: Option<String>,

    #[serde(rename = "Amt", skip_serializing_if = "Option::is_none")]
    pub amount: Option<ReportedAmount>,

    #[serde(rename = "Inf", skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
}

/// Builder for the regulatory reporting block.
///
/// Setters are independent and may be called in any order.
///
/// # Examples
///
/// ```
/// use sepa_transfer::RegulatoryReporting;
///
/// let mut reporting = RegulatoryReporting::new();
/// reporting.set_amount("EUR", "100.00");
///
/// let exported = reporting.export();
/// assert!(exported.authority.is_none());
/// assert_eq!(exported.details.unwrap().amount.unwrap().value, "100.00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegulatoryReporting {
    #[serde(rename = "Authrty", skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,

    #[serde(rename = "Dtls", skip_serializing_if = "Option::is_none")]
    pub details: Option<ReportingDetails>,
}

impl RegulatoryReporting {
    /// Creates an empty reporting block.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_authority_country(&mut self, country: impl Into<String>) {
        self.authority.get_or_insert_with(Authority::default).country = Some(country.into());
    }

    pub fn set_transaction_type(&mut self, transaction_type: impl Into<String>) {
        self.details_mut().transaction_type = Some(transaction_type.into());
    }

    pub fn set_beneficiary_country(&mut self, country: impl Into<String>) {
        self.details_mut().beneficiary_country = Some(country.into());
    }

    pub fn set_transaction_code(&mut self, code: impl Into<String>) {
        self.details_mut().transaction_code = Some(code.into());
    }

    /// Sets the reported amount. Currency and value are always stored together.
    pub fn set_amount(&mut self, currency: impl Into<String>, value: impl Into<String>) {
        self.details_mut().amount = Some(ReportedAmount {
            currency: currency.into(),
            value: value.into(),
        });
    }

    pub fn set_information(&mut self, information: impl Into<String>) {
        self.details_mut().information = Some(information.into());
    }

    /// Returns the populated subset of the block.
    pub fn export(&self) -> RegulatoryReporting {
        self.clone()
    }

    /// Returns `true` if no slot has been set.
    pub fn is_empty(&self) -> bool {
        self.authority.is_none() && self.details.is_none()
    }

    fn details_mut(&mut self) -> &mut ReportingDetails {
        self.details.get_or_insert_with(ReportingDetails::default)
    }
}
