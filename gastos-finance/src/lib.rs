//! gastos-finance: spending aggregations, session state and dashboard panels

pub mod dashboard;
pub mod session;
pub mod views;

pub use dashboard::{general_panel, issuer_panel, GeneralPanel, IssuerPanel, StatementPeriod};
pub use session::{Session, DEFAULT_INCOME, INCOME_STEP};
pub use views::{balance, by_tag, top_n, top_share, total_spend, TagSummary, TopPurchase};
