//! Customer credit transfers initiated on behalf of a creditor.
//!
//! [`CreditTransferFactory`] builds a [`TransferInformation`] and fills in the
//! end-to-end identification: either the caller's identification (which
//! also becomes the creditor id) or one derived from the clock.

use crate::amount::Amount;
use crate::clock::{Clock, SystemClock};
use crate::config::{IdentificationStrategy, TransferConfig};
use crate::error::Result;
use crate::transfer::{CreditorType, TransferInformation, TransferVisitor, Visitable};
use chrono::{Duration, NaiveDateTime, Timelike};
use log::debug;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

/// Format of generated identifications: `YYYYMMDDhhmmssuuuuuu`.
pub const IDENTIFICATION_FORMAT: &str = "%Y%m%d%H%M%S%6f";

/// A transfer built for a creditor. Dereferences to [`TransferInformation`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreditTransfer(TransferInformation);

impl CreditTransfer {
    pub fn creditor_name(&self) -> &str {
        self.0.name()
    }

    pub fn into_inner(self) -> TransferInformation {
        self.0
    }
}

impl Deref for CreditTransfer {
    type Target = TransferInformation;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CreditTransfer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<CreditTransfer> for TransferInformation {
    fn from(transfer: CreditTransfer) -> Self {
        transfer.0
    }
}

impl Visitable for CreditTransfer {
    fn accept<V: TransferVisitor + ?Sized>(
        &self,
        visitor: &mut V,
    ) -> std::result::Result<(), V::Error> {
        self.0.accept(visitor)
    }
}

/// Builds credit transfers and issues their identifications.
pub struct CreditTransferFactory {
    clock: Box<dyn Clock>,
    config: TransferConfig,
    last_issued: Mutex<Option<NaiveDateTime>>,
}

impl CreditTransferFactory {
    /// Creates a factory on the system clock with default configuration.
    pub fn new() -> Self {
        Self::with_config(TransferConfig::default())
    }

    pub fn with_config(config: TransferConfig) -> Self {
        Self::with_clock(SystemClock, config)
    }

    pub fn with_clock(clock: impl Clock + 'static, config: TransferConfig) -> Self {
        CreditTransferFactory {
            clock: Box::new(clock),
            config,
            last_issued: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Creates a credit transfer.
    ///
    /// With an `identification`, it is stored as both creditor id and
    /// end-to-end id, and `creditor_type` (default `company`) must be
    /// `company` or `individual`; anything else fails with
    /// [`TransferError::InvalidArgument`](crate::TransferError::InvalidArgument)
    /// before the transfer is built. Without one, an identification is
    /// generated from the clock, no creditor id is set and `creditor_type`
    /// is ignored.
    pub fn new_credit_transfer(
        &self,
        amount: impl Into<Amount>,
        iban: impl Into<String>,
        name: &str,
        identification: Option<&str>,
        creditor_type: Option<&str>,
    ) -> Result<CreditTransfer> {
        let creditor_type = match identification {
            Some(_) => Some(
                creditor_type
                    .map(CreditorType::from_str)
                    .transpose()?
                    .unwrap_or_default(),
            ),
            None => None,
        };

        let mut transfer =
            TransferInformation::with_normalizer(&self.config.normalizer(), amount, iban, name)?;
        transfer.set_currency(self.config.default_currency.as_str());

        match (identification, creditor_type) {
            (Some(identification), Some(creditor_type)) => {
                transfer.set_creditor_id(identification);
                transfer.set_creditor_type(creditor_type);
                transfer.set_end_to_end_id(identification);
            }
            _ => {
                let generated = self.next_identification();
                debug!("Generated end-to-end identification {}", generated);
                transfer.set_end_to_end_id(&generated);
            }
        }

        Ok(CreditTransfer(transfer))
    }

    /// Issues an identification from the clock according to the configured strategy.
    pub fn next_identification(&self) -> String {
        let now = truncate_to_micros(self.clock.now());

        let issued = match self.config.identification {
            IdentificationStrategy::WallClock => now,
            IdentificationStrategy::Monotonic => {
                let mut last = self
                    .last_issued
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                let next = match *last {
                    Some(previous) if now <= previous => previous + Duration::microseconds(1),
                    _ => now,
                };
                *last = Some(next);
                next
            }
        };

        issued.format(IDENTIFICATION_FORMAT).to_string()
    }
}

impl Default for CreditTransferFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_to_micros(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(time.nanosecond() / 1_000 * 1_000)
        .unwrap_or(time)
}
