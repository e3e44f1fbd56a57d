//! # SEPA Transfer
//!
//! Transaction records for a single credit-transfer instruction, ready to be
//! handed to an ISO 20022 (pain.001) encoder.
//!
//! ## Design Principles
//!
//! - **Exact amounts**: major-unit input is scaled with `rust_decimal`, never with floats
//! - **Explicit units**: [`Amount::MinorUnits`] and [`Amount::MajorUnits`] are distinct
//! - **Validated on construction**: a built transfer is always structurally valid
//! - **Format agnostic**: encoders read transfers through [`TransferVisitor`]
//!
//! ## Example
//!
//! ```
//! use sepa_transfer::{CreditTransferFactory, RegulatoryReporting};
//! use std::str::FromStr;
//!
//! let factory = CreditTransferFactory::new();
//! let amount = sepa_transfer::Amount::from_str("12.34").unwrap();
//! let mut transfer = factory
//!     .new_credit_transfer(amount, "DE89370400440532013000", "Jane Doe", Some("INV-001"), None)
//!     .unwrap();
//!
//! let mut reporting = RegulatoryReporting::new();
//! reporting.set_amount("EUR", "12.34");
//! transfer.set_regulatory_reporting(reporting);
//!
//! assert_eq!(transfer.transfer_amount(), 1234);
//! assert_eq!(transfer.end_to_end_id(), Some("INV-001"));
//! ```

pub mod amount;
pub mod clock;
pub mod config;
pub mod credit_transfer;
pub mod error;
pub mod preview;
pub mod regulatory;
pub mod sanitize;
pub mod transfer;

pub use amount::{Amount, AmountNormalizer};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{IdentificationStrategy, TransferConfig};
pub use credit_transfer::{CreditTransfer, CreditTransferFactory};
pub use error::{Result, TransferError};
pub use preview::{BatchPreview, CsvPreviewWriter};
pub use regulatory::{Authority, RegulatoryReporting, ReportedAmount, ReportingDetails};
pub use transfer::{CreditorType, PostalAddress, TransferInformation, TransferVisitor, Visitable};
