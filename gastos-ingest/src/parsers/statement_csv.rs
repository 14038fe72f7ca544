//! Issuer statement CSV parser (PicPay, Inter, Nubank exports)
//!
//! Expected header (column order and extra columns don't matter):
//!   Data;Estabelecimento;Portador;Valor;Parcela
//!   01/01/2025;Uber Trip;FULANO;R$ 25,00;Única
//!
//! Only `Valor` is required. `Data`, `Estabelecimento` and `Tags` are
//! picked up when present.

use std::path::Path;

use csv::StringRecord;
use gastos_core::Transaction;
use tracing::{debug, warn};

use crate::amount::normalize_amount;
use crate::error::ParseError;
use crate::tag_rules::derive_tag;
use crate::types::StatementTable;

pub const AMOUNT_COLUMN: &str = "Valor";
pub const ESTABLISHMENT_COLUMN: &str = "Estabelecimento";
pub const DATE_COLUMN: &str = "Data";
pub const TAGS_COLUMN: &str = "Tags";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column positions found in the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    amount: usize,
    establishment: Option<usize>,
    date: Option<usize>,
    tags: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, ParseError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let amount =
            find(AMOUNT_COLUMN).ok_or_else(|| ParseError::MissingColumn(AMOUNT_COLUMN.to_string()))?;
        Ok(Self {
            amount,
            establishment: find(ESTABLISHMENT_COLUMN),
            date: find(DATE_COLUMN),
            tags: find(TAGS_COLUMN),
        })
    }
}

/// Pick `;` or `,` by counting unquoted occurrences in the header line
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes
        .split(|b| *b == b'\n')
        .find(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
        .unwrap_or(bytes);

    let mut in_quotes = false;
    let (mut commas, mut semicolons) = (0usize, 0usize);
    for b in header {
        match b {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => commas += 1,
            b';' if !in_quotes => semicolons += 1,
            _ => {}
        }
    }

    if semicolons > commas { b';' } else { b',' }
}

/// Cell text exactly as written, `None` when the column is absent or the cell blank
fn cell(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    let value = record.get(idx?)?;
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse raw statement bytes into a cleaned table.
///
/// Rows with an empty amount are dropped; rows whose amount is not a number
/// are dropped and counted in [`StatementTable::skipped_rows`].
pub fn parse_statement(bytes: &[u8]) -> Result<StatementTable, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ParseError::Empty);
    }

    let delimiter = sniff_delimiter(bytes);
    debug!(delimiter = %(delimiter as char), "sniffed statement delimiter");

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let columns = Columns::locate(&headers)?;

    let mut table = StatementTable {
        has_date: columns.date.is_some(),
        has_establishment: columns.establishment.is_some(),
        has_tags: columns.establishment.is_some() || columns.tags.is_some(),
        ..StatementTable::default()
    };

    for result in rdr.records() {
        let record = result?;

        let Some(raw_amount) = cell(&record, Some(columns.amount)) else {
            table.empty_amount_rows += 1;
            continue;
        };

        let amount = match normalize_amount(&raw_amount) {
            Some(v) => v,
            None => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                warn!(line, amount = %raw_amount, "dropping row with non-numeric amount");
                table.skipped_rows += 1;
                continue;
            }
        };

        let establishment = cell(&record, columns.establishment);
        let tags = establishment
            .as_deref()
            .and_then(derive_tag)
            .map(str::to_string)
            .or_else(|| cell(&record, columns.tags));

        table.transactions.push(Transaction {
            date: cell(&record, columns.date),
            establishment,
            amount,
            tags,
        });
    }

    debug!(
        rows = table.len(),
        empty_amount = table.empty_amount_rows,
        skipped = table.skipped_rows,
        "parsed statement"
    );
    Ok(table)
}

/// Read a statement file and parse it
pub fn parse_statement_file(path: impl AsRef<Path>) -> Result<StatementTable, ParseError> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_statement(&bytes)
}
