//! Statement format parsers

pub mod statement_csv;
