//! Cleaned statement rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tag given to ride-hailing charges
pub const UBER_TAG: &str = "UBER";

/// Date layouts seen in issuer exports, tried in order.
/// Two-digit years go first: `%Y` would accept "25" as year 25.
const DATE_FORMATS: [&str; 3] = ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d"];

/// A cleaned credit-card transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date text as it appeared in the statement (never reformatted)
    pub date: Option<String>,
    /// Merchant name
    pub establishment: Option<String>,
    /// Positive = purchase, negative = credit/refund
    pub amount: f64,
    /// Category label
    pub tags: Option<String>,
}

impl Transaction {
    /// Create an untagged transaction with no date or establishment
    pub fn new(amount: f64) -> Self {
        Self {
            date: None,
            establishment: None,
            amount,
            tags: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_establishment(mut self, establishment: impl Into<String>) -> Self {
        self.establishment = Some(establishment.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags = Some(tag.into());
        self
    }

    /// Best-effort parse of the date text. Only used for display.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let text = self.date.as_deref()?.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    }

    /// Tag name used in summaries; untagged rows show as "None"
    pub fn tag_label(&self) -> &str {
        self.tags.as_deref().unwrap_or("None")
    }
}
