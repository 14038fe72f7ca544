//! Aggregate views over cleaned transactions: totals, top purchases, tag sums.
//!
//! Every function here is total: empty input gives zero or an empty vector.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use gastos_core::{format_brl, round2, Transaction};
use serde::Serialize;

/// One row of the biggest-purchases ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPurchase {
    pub date: Option<String>,
    pub establishment: Option<String>,
    pub amount: f64,
    /// Share of the total spend, rounded to two decimals
    pub percent_of_total: f64,
}

impl TopPurchase {
    pub fn percent_label(&self) -> String {
        format!("{:.2}%", self.percent_of_total)
    }
}

/// Spend grouped under one tag. `tag == None` holds the untagged rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSummary {
    pub tag: Option<String>,
    pub total_amount: f64,
    pub label: String,
}

impl TagSummary {
    fn new(tag: Option<String>, total_amount: f64) -> Self {
        let label = format!(
            "{} - {}",
            tag.as_deref().unwrap_or("None"),
            format_brl(total_amount)
        );
        Self {
            tag,
            total_amount,
            label,
        }
    }
}

/// Sum of all amounts. Non-numeric amounts count as zero.
pub fn total_spend(txns: &[Transaction]) -> f64 {
    txns.iter().map(|t| t.amount).filter(|a| !a.is_nan()).sum()
}

/// `part` as a percentage of `total`, 0.0 when there is no total
fn percent_of(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round2(part / total * 100.0)
}

/// Descending by amount, non-numeric amounts last
fn by_amount_desc(a: &Transaction, b: &Transaction) -> Ordering {
    match (a.amount.is_nan(), b.amount.is_nan()) {
        (false, false) => b.amount.total_cmp(&a.amount),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

fn ranked(txns: &[Transaction]) -> Vec<&Transaction> {
    let mut rows: Vec<&Transaction> = txns.iter().collect();
    // stable: equal amounts keep statement order
    rows.sort_by(|a, b| by_amount_desc(a, b));
    rows
}

/// The `n` biggest purchases with their share of the total
pub fn top_n(txns: &[Transaction], n: usize) -> Vec<TopPurchase> {
    let total = total_spend(txns);
    ranked(txns)
        .into_iter()
        .take(n)
        .map(|t| TopPurchase {
            date: t.date.clone(),
            establishment: t.establishment.clone(),
            amount: t.amount,
            percent_of_total: percent_of(t.amount, total),
        })
        .collect()
}

/// Combined share of the `n` biggest purchases, as a percentage of the total
pub fn top_share(txns: &[Transaction], n: usize) -> f64 {
    let top: Vec<Transaction> = ranked(txns).into_iter().take(n).cloned().collect();
    percent_of(total_spend(&top), total_spend(txns))
}

/// Spend per tag, sorted by tag name, with the untagged group last.
/// Untagged rows are never discarded.
pub fn by_tag(txns: &[Transaction]) -> Vec<TagSummary> {
    let mut tagged: BTreeMap<&str, f64> = BTreeMap::new();
    let mut untagged: Option<f64> = None;

    for t in txns {
        let amount = if t.amount.is_nan() { 0.0 } else { t.amount };
        match t.tags.as_deref() {
            Some(tag) => *tagged.entry(tag).or_insert(0.0) += amount,
            None => *untagged.get_or_insert(0.0) += amount,
        }
    }

    tagged
        .into_iter()
        .map(|(tag, total)| TagSummary::new(Some(tag.to_string()), total))
        .chain(untagged.map(|total| TagSummary::new(None, total)))
        .collect()
}

/// What is left of the income after the card spend
pub fn balance(income: f64, total: f64) -> f64 {
    income - total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(establishment: &str, amount: f64) -> Transaction {
        Transaction::new(amount).with_establishment(establishment)
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            Transaction::new(25.0)
                .with_date("01/01")
                .with_establishment("Uber Trip")
                .with_tag("UBER"),
            Transaction::new(1200.0)
                .with_date("02/01")
                .with_establishment("Market"),
        ]
    }

    #[test]
    fn test_total_spend() {
        assert_eq!(total_spend(&scenario()), 1225.0);
        assert_eq!(total_spend(&[]), 0.0);
    }

    #[test]
    fn test_total_spend_skips_nan() {
        let txns = vec![txn("a", 10.0), txn("b", f64::NAN), txn("c", 5.0)];
        assert_eq!(total_spend(&txns), 15.0);
    }

    #[test]
    fn test_total_spend_is_additive() {
        let a = vec![txn("a", 10.25), txn("b", -3.5), txn("c", 99.75)];
        let b = vec![txn("d", 1200.0), txn("e", 0.5)];
        let joined: Vec<Transaction> = a.iter().chain(b.iter()).cloned().collect();
        let diff = total_spend(&joined) - (total_spend(&a) + total_spend(&b));
        assert!(diff.abs() < 1e-9);
    }

    #[test]
    fn test_top_n_sorted_and_bounded() {
        let txns = vec![txn("a", 10.0), txn("b", 300.0), txn("c", 45.5), txn("d", 7.0)];
        let top = top_n(&txns, 3);
        assert_eq!(top.len(), 3);
        let amounts: Vec<f64> = top.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![300.0, 45.5, 10.0]);

        assert_eq!(top_n(&txns, 10).len(), 4);
        assert!(top_n(&txns, 0).is_empty());
        assert!(top_n(&[], 10).is_empty());
    }

    #[test]
    fn test_top_n_ties_keep_statement_order() {
        let txns = vec![txn("first", 50.0), txn("big", 80.0), txn("second", 50.0)];
        let top = top_n(&txns, 3);
        let names: Vec<&str> = top.iter().map(|t| t.establishment.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["big", "first", "second"]);
    }

    #[test]
    fn test_top_n_percentages() {
        let top = top_n(&scenario(), 2);
        assert_eq!(top[0].amount, 1200.0);
        assert_eq!(top[0].percent_of_total, 97.96);
        assert_eq!(top[1].percent_of_total, 2.04);
        assert_eq!(top[1].percent_label(), "2.04%");
        assert_eq!(top[0].date.as_deref(), Some("02/01"));
    }

    #[test]
    fn test_top_n_full_percentages_sum_to_100() {
        let txns = vec![txn("a", 13.37), txn("b", 250.0), txn("c", 71.1), txn("d", 0.99), txn("e", 402.5)];
        let sum: f64 = top_n(&txns, txns.len()).iter().map(|t| t.percent_of_total).sum();
        assert!((sum - 100.0).abs() <= 0.05, "sum was {}", sum);
    }

    #[test]
    fn test_top_n_zero_total() {
        let txns = vec![txn("purchase", 50.0), txn("refund", -50.0)];
        let top = top_n(&txns, 2);
        assert!(top.iter().all(|t| t.percent_of_total == 0.0));
        assert_eq!(top[0].percent_label(), "0.00%");
    }

    #[test]
    fn test_top_n_nan_sorts_last() {
        let txns = vec![txn("nan", f64::NAN), txn("a", 1.0), txn("b", 2.0)];
        let top = top_n(&txns, 3);
        assert_eq!(top[0].amount, 2.0);
        assert!(top[2].amount.is_nan());
    }

    #[test]
    fn test_top_share() {
        let txns = vec![txn("a", 50.0), txn("b", 30.0), txn("c", 20.0)];
        assert_eq!(top_share(&txns, 2), 80.0);
        assert_eq!(top_share(&txns, 10), 100.0);
        assert_eq!(top_share(&[], 10), 0.0);
    }

    #[test]
    fn test_by_tag_scenario() {
        let groups = by_tag(&scenario());
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].tag.as_deref(), Some("UBER"));
        assert_eq!(groups[0].total_amount, 25.0);
        assert_eq!(groups[0].label, "UBER - R$ 25.00");

        assert_eq!(groups[1].tag, None);
        assert_eq!(groups[1].total_amount, 1200.0);
        assert_eq!(groups[1].label, "None - R$ 1,200.00");
    }

    #[test]
    fn test_by_tag_untagged_only() {
        let txns = vec![Transaction::new(10.0), Transaction::new(32.5)];
        let groups = by_tag(&txns);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tag, None);
        assert_eq!(groups[0].total_amount, total_spend(&txns));
    }

    #[test]
    fn test_by_tag_sorted_by_name() {
        let txns = vec![
            txn("x", 1.0).with_tag("UBER"),
            txn("y", 2.0),
            txn("z", 3.0).with_tag("FOOD"),
            txn("w", 4.0).with_tag("UBER"),
        ];
        let groups = by_tag(&txns);
        let tags: Vec<Option<&str>> = groups.iter().map(|g| g.tag.as_deref()).collect();
        assert_eq!(tags, vec![Some("FOOD"), Some("UBER"), None]);
        assert_eq!(groups[1].total_amount, 5.0);
    }

    #[test]
    fn test_by_tag_empty() {
        assert!(by_tag(&[]).is_empty());
    }

    #[test]
    fn test_balance() {
        assert_eq!(balance(5000.0, 1225.0), 3775.0);
        assert_eq!(balance(0.0, 10.0), -10.0);
    }
}
