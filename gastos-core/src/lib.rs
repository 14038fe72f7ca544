//! gastos-core: shared types for the statement dashboard

pub mod issuer;
pub mod money;
pub mod transaction;

pub use issuer::Issuer;
pub use money::{format_brl, format_thousands, round2, CURRENCY_PREFIX};
pub use transaction::{Transaction, UBER_TAG};
