//! Dashboard session state.
//!
//! One table slot and one table-visibility flag per issuer, plus the monthly
//! income used for the balance. The front end owns a `Session` and passes it
//! to the panel builders; nothing here is global.

use std::path::Path;

use gastos_core::{Issuer, Transaction};
use gastos_ingest::{parse_statement, parse_statement_file, ParseError, StatementTable};
use tracing::info;

/// Monthly income assumed until the user sets one
pub const DEFAULT_INCOME: f64 = 5000.0;

/// Income adjustment step in the dashboard
pub const INCOME_STEP: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    slots: [Option<StatementTable>; 3],
    show_table: [bool; 3],
    income: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_INCOME)
    }
}

impl Session {
    pub fn new(income: f64) -> Self {
        let mut session = Self {
            slots: [None, None, None],
            show_table: [false; 3],
            income: 0.0,
        };
        session.set_income(income);
        session
    }

    /// Parse a statement and make it the issuer's table.
    ///
    /// On error the issuer's previous table is left as it was.
    pub fn load(&mut self, issuer: Issuer, bytes: &[u8]) -> Result<&StatementTable, ParseError> {
        let table = parse_statement(bytes)?;
        Ok(self.install(issuer, table))
    }

    /// Same as [`Session::load`], reading the statement from disk
    pub fn load_file(
        &mut self,
        issuer: Issuer,
        path: impl AsRef<Path>,
    ) -> Result<&StatementTable, ParseError> {
        let table = parse_statement_file(path)?;
        Ok(self.install(issuer, table))
    }

    /// Replace the issuer's table wholesale
    pub fn install(&mut self, issuer: Issuer, table: StatementTable) -> &StatementTable {
        info!(
            issuer = issuer.code(),
            rows = table.len(),
            replaced = self.slots[issuer.index()].is_some(),
            "installed statement table"
        );
        self.slots[issuer.index()].insert(table)
    }

    /// Drop the issuer's table
    pub fn clear(&mut self, issuer: Issuer) -> Option<StatementTable> {
        self.slots[issuer.index()].take()
    }

    pub fn table(&self, issuer: Issuer) -> Option<&StatementTable> {
        self.slots[issuer.index()].as_ref()
    }

    /// Issuers with a table, in display order
    pub fn loaded_issuers(&self) -> Vec<Issuer> {
        Issuer::ALL
            .into_iter()
            .filter(|issuer| self.table(*issuer).is_some())
            .collect()
    }

    /// True when no issuer has a table
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Fresh concatenation of every loaded table, in issuer order
    pub fn combined(&self) -> Vec<Transaction> {
        self.slots
            .iter()
            .flatten()
            .flat_map(|table| table.transactions.iter().cloned())
            .collect()
    }

    /// True when any loaded table carries a tags source
    pub fn has_tags(&self) -> bool {
        self.slots.iter().flatten().any(|table| table.has_tags)
    }

    /// Flip the purchases-table visibility, returning the new state
    pub fn toggle_table(&mut self, issuer: Issuer) -> bool {
        let flag = &mut self.show_table[issuer.index()];
        *flag = !*flag;
        *flag
    }

    pub fn table_visible(&self, issuer: Issuer) -> bool {
        self.show_table[issuer.index()]
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    /// Set the monthly income; negative or non-numeric values become zero
    pub fn set_income(&mut self, income: f64) {
        self.income = income.max(0.0);
    }

    pub fn adjust_income(&mut self, delta: f64) {
        self.set_income(self.income + delta);
    }
}
