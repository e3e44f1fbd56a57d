//! Batch preview: reads transfer rows from CSV and writes the normalized records.
//!
//! Each row becomes a credit transfer built by the factory. The output is
//! produced by [`CsvPreviewWriter`], a [`TransferVisitor`] that reads the
//! entity through its accessors only.

use crate::amount::Amount;
use crate::credit_transfer::{CreditTransfer, CreditTransferFactory};
use crate::error::Result;
use crate::transfer::{TransferInformation, TransferVisitor, Visitable};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::io::{Read, Write};
use std::str::FromStr;

/// Column headers of the preview output.
pub const OUTPUT_HEADERS: [&str; 9] = [
    "end_to_end_id",
    "creditor_id",
    "creditor_type",
    "name",
    "iban",
    "bic",
    "currency",
    "amount",
    "remittance_information",
];

/// Raw transfer row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct TransferRecord {
    /// Minor units (`1234`) or major units (`12.34`)
    pub amount: String,

    pub iban: String,

    pub name: String,

    #[serde(default)]
    pub identification: Option<String>,

    #[serde(default)]
    pub creditor_type: Option<String>,

    #[serde(default)]
    pub bic: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub remittance_information: Option<String>,
}

impl TransferRecord {
    /// Builds a credit transfer from the row.
    pub fn build(&self, factory: &CreditTransferFactory) -> Result<CreditTransfer> {
        let amount = Amount::from_str(&self.amount)?;
        let mut transfer = factory.new_credit_transfer(
            amount,
            self.iban.trim(),
            &self.name,
            non_empty(&self.identification),
            non_empty(&self.creditor_type),
        )?;

        if let Some(bic) = non_empty(&self.bic) {
            transfer.set_bic(bic);
        }
        if let Some(currency) = non_empty(&self.currency) {
            transfer.set_currency(currency);
        }
        if let Some(remittance) = non_empty(&self.remittance_information) {
            transfer.set_remittance_information(remittance);
        }

        Ok(transfer)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Writes one CSV line per visited transfer.
pub struct CsvPreviewWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvPreviewWriter<W> {
    /// Creates the writer and emits the header line.
    pub fn new(writer: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(OUTPUT_HEADERS)?;
        Ok(CsvPreviewWriter { writer })
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TransferVisitor for CsvPreviewWriter<W> {
    type Error = csv::Error;

    fn visit_transfer_information(
        &mut self,
        transfer: &TransferInformation,
    ) -> std::result::Result<(), Self::Error> {
        let creditor_type = transfer
            .creditor_type()
            .map(|t| t.as_str())
            .unwrap_or_default();
        let amount = transfer.transfer_amount_major().to_string();

        self.writer.write_record([
            transfer.end_to_end_id().unwrap_or_default(),
            transfer.creditor_id().unwrap_or_default(),
            creditor_type,
            transfer.name(),
            transfer.iban(),
            transfer.bic().unwrap_or_default(),
            transfer.currency(),
            amount.as_str(),
            transfer.remittance_information().unwrap_or_default(),
        ])
    }
}

/// Collects credit transfers from CSV input, in input order.
pub struct BatchPreview {
    factory: CreditTransferFactory,
    transfers: Vec<CreditTransfer>,
}

impl BatchPreview {
    pub fn new(factory: CreditTransferFactory) -> Self {
        BatchPreview {
            factory,
            transfers: Vec::new(),
        }
    }

    /// Reads transfer rows from a CSV reader.
    ///
    /// Rows that cannot be turned into a transfer are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<TransferRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => match record.build(&self.factory) {
                    Ok(transfer) => {
                        debug!(
                            "Row {}: {} minor units to {}",
                            row_num,
                            transfer.transfer_amount(),
                            transfer.iban()
                        );
                        self.transfers.push(transfer);
                    }
                    Err(e) => warn!("Row {}: {}", row_num, e),
                },
                Err(e) => warn!("Row {}: CSV parse error: {}", row_num, e),
            }
        }

        Ok(())
    }

    pub fn transfers(&self) -> &[CreditTransfer] {
        &self.transfers
    }

    /// Writes every collected transfer through a [`CsvPreviewWriter`].
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut preview = CsvPreviewWriter::new(writer)?;
        for transfer in &self.transfers {
            transfer.accept(&mut preview)?;
        }
        preview.finish()
    }
}
