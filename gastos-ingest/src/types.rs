use gastos_core::Transaction;
use serde::{Deserialize, Serialize};

/// Cleaned output of one statement file (issuer-agnostic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    pub transactions: Vec<Transaction>,
    /// The file had a `Data` column
    pub has_date: bool,
    /// The file had an `Estabelecimento` column
    pub has_establishment: bool,
    /// Rows carry a tags source (`Estabelecimento` or a `Tags` column)
    pub has_tags: bool,
    /// Rows dropped because the amount field was empty
    pub empty_amount_rows: usize,
    /// Rows dropped because the amount did not parse as a number
    pub skipped_rows: usize,
}

impl StatementTable {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// Total rows dropped during cleaning
    pub fn dropped_rows(&self) -> usize {
        self.empty_amount_rows + self.skipped_rows
    }
}
