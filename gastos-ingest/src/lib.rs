//! gastos-ingest: statement CSV cleaning (amount normalization, tagging) into typed tables.

pub mod amount;
pub mod error;
pub mod parsers;
pub mod tag_rules;
pub mod types;

pub use amount::normalize_amount;
pub use error::ParseError;
pub use parsers::statement_csv::{parse_statement, parse_statement_file};
pub use tag_rules::derive_tag;
pub use types::StatementTable;
