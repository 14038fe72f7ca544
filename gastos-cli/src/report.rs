//! Plain-text rendering of the dashboard panels

use gastos_core::{format_brl, Issuer, Transaction};
use gastos_finance::{
    general_panel, issuer_panel, GeneralPanel, IssuerPanel, Session, TagSummary, TopPurchase,
};
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 30;
const ESTABLISHMENT_WIDTH: usize = 32;

pub const NO_STATEMENTS: &str = "No statements loaded. Pass --picpay, --inter or --nubank, \
or set statement paths in the config file (gastos config init).";

/// Everything `report --json` prints
#[derive(Debug, Serialize)]
pub struct ReportJson {
    pub general: Option<GeneralPanel>,
    pub issuers: Vec<IssuerPanel>,
}

pub fn report_json(session: &Session, top: usize) -> ReportJson {
    ReportJson {
        general: general_panel(session, top),
        issuers: Issuer::ALL
            .into_iter()
            .filter_map(|issuer| issuer_panel(session, issuer))
            .collect(),
    }
}

/// Horizontal bar scaled against `max`; negative values draw nothing
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn write_tags(out: &mut String, tags: &[TagSummary]) {
    let label_width = tags.iter().map(|t| t.label.chars().count()).max().unwrap_or(0);
    let max = tags.iter().map(|t| t.total_amount).fold(0.0, f64::max);
    for t in tags {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            t.label,
            bar(t.total_amount, max, BAR_WIDTH),
            width = label_width
        );
    }
}

fn write_top(out: &mut String, top: &[TopPurchase]) {
    let _ = writeln!(out, "{:<12} {:<32} {:>16} {:>11}", "Date", "Establishment", "Amount", "% of total");
    for t in top {
        let _ = writeln!(
            out,
            "{:<12} {:<32} {:>16} {:>11}",
            t.date.as_deref().unwrap_or("-"),
            truncate(t.establishment.as_deref().unwrap_or("-"), ESTABLISHMENT_WIDTH),
            format_brl(t.amount),
            t.percent_label()
        );
    }
}

fn write_rows(out: &mut String, rows: &[Transaction]) {
    let _ = writeln!(out, "{:<12} {:<32} {:>16} {}", "Date", "Establishment", "Amount", "Tags");
    for t in rows {
        let _ = writeln!(
            out,
            "{:<12} {:<32} {:>16} {}",
            t.date.as_deref().unwrap_or("-"),
            truncate(t.establishment.as_deref().unwrap_or("-"), ESTABLISHMENT_WIDTH),
            format_brl(t.amount),
            t.tag_label()
        );
    }
}

fn write_general(out: &mut String, panel: &GeneralPanel, show_table: bool) {
    let names: Vec<&str> = panel.issuers.iter().map(Issuer::name).collect();
    let _ = writeln!(out, "## General ({})\n", names.join(", "));
    let _ = writeln!(out, "Total purchases:  {}", format_brl(panel.total));
    let _ = writeln!(out, "Monthly income:   {}", format_brl(panel.income));
    let _ = writeln!(out, "Balance:          {}\n", format_brl(panel.balance));

    let _ = writeln!(out, "### Top {} purchases\n", panel.top.len());
    write_top(out, &panel.top);
    let _ = writeln!(
        out,
        "\nThe {} biggest purchases add up to {:.2}% of all statements.\n",
        panel.top.len(),
        panel.top_share
    );

    if let Some(tags) = &panel.tags {
        let _ = writeln!(out, "### Spending by tag (all cards)\n");
        write_tags(out, tags);
        out.push('\n');
    }

    if show_table {
        let _ = writeln!(out, "### All purchases ({})\n", panel.row_count);
        write_rows(out, &panel.rows);
        out.push('\n');
    }
}

/// One issuer section. The same routine renders every issuer.
fn write_issuer(out: &mut String, panel: &IssuerPanel) {
    let _ = writeln!(out, "## {}\n", panel.issuer);
    let _ = writeln!(out, "Total purchases:  {}", format_brl(panel.total));
    if let Some(period) = &panel.period {
        let _ = writeln!(out, "Period:           {}", period.label());
    }
    let _ = writeln!(out, "Purchases:        {}", panel.row_count);
    if panel.dropped_rows > 0 {
        let _ = writeln!(out, "Dropped rows:     {}", panel.dropped_rows);
    }
    out.push('\n');

    if let Some(tags) = &panel.tags {
        let _ = writeln!(out, "### Spending by tag - {}\n", panel.issuer);
        write_tags(out, tags);
        out.push('\n');
    }

    if let Some(rows) = &panel.rows {
        let _ = writeln!(out, "### Purchases\n");
        write_rows(out, rows);
        out.push('\n');
    }
}

/// Render the whole report: the general panel, then each loaded issuer
pub fn render_report(session: &Session, top: usize, show_tables: bool) -> String {
    let mut out = String::from("# Spending dashboard\n\n");

    let Some(general) = general_panel(session, top) else {
        out.push_str(NO_STATEMENTS);
        out.push('\n');
        return out;
    };
    write_general(&mut out, &general, show_tables);

    for issuer in Issuer::ALL {
        if let Some(panel) = issuer_panel(session, issuer) {
            write_issuer(&mut out, &panel);
        }
    }

    out
}
