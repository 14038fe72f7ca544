//! Render-ready panels for the dashboard tabs.
//!
//! `issuer_panel` is the single routine behind every issuer tab, and
//! `general_panel` backs the combined tab. Both front ends (plain report and
//! TUI) draw from these values.

use chrono::NaiveDate;
use gastos_core::{Issuer, Transaction};
use serde::Serialize;

use crate::session::Session;
use crate::views::{balance, by_tag, top_n, top_share, total_spend, TagSummary, TopPurchase};

/// First and last parseable transaction dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    pub fn of(txns: &[Transaction]) -> Option<Self> {
        let mut dates = txns.iter().filter_map(Transaction::parsed_date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

/// One issuer's tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuerPanel {
    pub issuer: Issuer,
    pub total: f64,
    pub row_count: usize,
    pub dropped_rows: usize,
    pub period: Option<StatementPeriod>,
    /// `None` when the statement has no establishment or tags column
    pub tags: Option<Vec<TagSummary>>,
    pub table_visible: bool,
    /// Purchases, present only while the table is visible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Transaction>>,
}

/// The combined tab across every loaded issuer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralPanel {
    pub issuers: Vec<Issuer>,
    pub row_count: usize,
    pub total: f64,
    pub income: f64,
    pub balance: f64,
    pub top: Vec<TopPurchase>,
    /// Share of the total taken by `top`, in percent
    pub top_share: f64,
    pub tags: Option<Vec<TagSummary>>,
    pub rows: Vec<Transaction>,
}

/// Build the issuer's tab, or `None` if nothing is loaded for it
pub fn issuer_panel(session: &Session, issuer: Issuer) -> Option<IssuerPanel> {
    let table = session.table(issuer)?;
    let txns = &table.transactions;
    let table_visible = session.table_visible(issuer);

    Some(IssuerPanel {
        issuer,
        total: total_spend(txns),
        row_count: table.len(),
        dropped_rows: table.dropped_rows(),
        period: StatementPeriod::of(txns),
        tags: table.has_tags.then(|| by_tag(txns)),
        table_visible,
        rows: table_visible.then(|| txns.clone()),
    })
}

/// Build the combined tab, or `None` when no statement is loaded yet
pub fn general_panel(session: &Session, top: usize) -> Option<GeneralPanel> {
    if session.is_empty() {
        return None;
    }

    let rows = session.combined();
    let total = total_spend(&rows);

    Some(GeneralPanel {
        issuers: session.loaded_issuers(),
        row_count: rows.len(),
        total,
        income: session.income(),
        balance: balance(session.income(), total),
        top: top_n(&rows, top),
        top_share: top_share(&rows, top),
        tags: session.has_tags().then(|| by_tag(&rows)),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTER: &str = "Data;Estabelecimento;Valor\n\
                         10/01/2025;Uber Trip;R$ 25,00\n\
                         02/01/2025;Market;1.200,00\n\
                         15/01/2025;Posto;;\n";
    const AMOUNTS_ONLY: &str = "Valor\n\"100,00\"\n\"50,00\"\n";

    #[test]
    fn test_issuer_panel_absent_until_loaded() {
        let session = Session::default();
        for issuer in Issuer::ALL {
            assert!(issuer_panel(&session, issuer).is_none());
        }
    }

    #[test]
    fn test_issuer_panel() {
        let mut session = Session::default();
        session.load(Issuer::Inter, INTER.as_bytes()).unwrap();

        let panel = issuer_panel(&session, Issuer::Inter).unwrap();
        assert_eq!(panel.issuer, Issuer::Inter);
        assert_eq!(panel.total, 1225.0);
        assert_eq!(panel.row_count, 2);
        assert_eq!(panel.dropped_rows, 1);

        let period = panel.period.unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(period.label(), "02/01/2025 to 10/01/2025");

        let tags = panel.tags.unwrap();
        assert_eq!(tags[0].label, "UBER - R$ 25.00");
        assert_eq!(tags[1].label, "None - R$ 1,200.00");

        assert!(!panel.table_visible);
        assert!(panel.rows.is_none());
    }

    #[test]
    fn test_issuer_panel_rows_follow_toggle() {
        let mut session = Session::default();
        session.load(Issuer::Inter, INTER.as_bytes()).unwrap();
        session.toggle_table(Issuer::Inter);

        let panel = issuer_panel(&session, Issuer::Inter).unwrap();
        assert!(panel.table_visible);
        assert_eq!(panel.rows.map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_issuer_panel_without_tag_source() {
        let mut session = Session::default();
        session.load(Issuer::Nubank, AMOUNTS_ONLY.as_bytes()).unwrap();

        let panel = issuer_panel(&session, Issuer::Nubank).unwrap();
        assert_eq!(panel.total, 150.0);
        assert!(panel.tags.is_none());
        assert!(panel.period.is_none());
    }

    #[test]
    fn test_general_panel_needs_a_statement() {
        assert!(general_panel(&Session::default(), 10).is_none());
    }

    #[test]
    fn test_general_panel_combines_issuers() {
        let mut session = Session::new(2000.0);
        session.load(Issuer::Inter, INTER.as_bytes()).unwrap();
        session.load(Issuer::Nubank, AMOUNTS_ONLY.as_bytes()).unwrap();

        let panel = general_panel(&session, 2).unwrap();
        assert_eq!(panel.issuers, vec![Issuer::Inter, Issuer::Nubank]);
        assert_eq!(panel.row_count, 4);
        assert_eq!(panel.total, 1375.0);
        assert_eq!(panel.income, 2000.0);
        assert_eq!(panel.balance, 625.0);

        assert_eq!(panel.top.len(), 2);
        assert_eq!(panel.top[0].amount, 1200.0);
        assert_eq!(panel.top[1].amount, 100.0);
        assert_eq!(panel.top_share, 94.55);

        // Untagged rows from both statements share the None group.
        let tags = panel.tags.unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].tag, None);
        assert_eq!(tags[1].total_amount, 1350.0);
    }

    #[test]
    fn test_general_panel_tags_hidden_without_source() {
        let mut session = Session::default();
        session.load(Issuer::PicPay, AMOUNTS_ONLY.as_bytes()).unwrap();
        let panel = general_panel(&session, 10).unwrap();
        assert!(panel.tags.is_none());
        assert_eq!(panel.top.len(), 2);
    }

    #[test]
    fn test_panels_serialize() {
        let mut session = Session::default();
        session.load(Issuer::Inter, INTER.as_bytes()).unwrap();

        let json = serde_json::to_value(issuer_panel(&session, Issuer::Inter).unwrap()).unwrap();
        assert_eq!(json["issuer"], "inter");
        assert_eq!(json["period"]["start"], "2025-01-02");
        assert!(json.get("rows").is_none());

        let json = serde_json::to_value(general_panel(&session, 10).unwrap()).unwrap();
        assert_eq!(json["top"][0]["percent_of_total"], 97.96);
    }
}
