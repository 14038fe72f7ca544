use gastos_core::Issuer;
use gastos_finance::{by_tag, general_panel, issuer_panel, top_n, total_spend, Session};
use gastos_ingest::{parse_statement_file, ParseError};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn loaded_session() -> Session {
    let mut session = Session::default();
    for issuer in Issuer::ALL {
        session
            .load_file(issuer, fixture(&format!("{}.csv", issuer.code())))
            .unwrap();
    }
    session
}

#[test]
fn test_picpay_fixture_cleaning() {
    let table = parse_statement_file(fixture("picpay.csv")).unwrap();
    assert_eq!(table.len(), 6);
    assert_eq!(table.empty_amount_rows, 1);
    assert!(approx(total_spend(&table.transactions), 1744.67));

    let furniture = table
        .iter()
        .find(|t| t.establishment.as_deref() == Some("LOJA DE MOVEIS CASA BELA"))
        .unwrap();
    assert_eq!(furniture.amount, 1250.0);
    assert_eq!(furniture.date.as_deref(), Some("11/06/2025"));

    let uber_rows = table.iter().filter(|t| t.tags.as_deref() == Some("UBER")).count();
    assert_eq!(uber_rows, 2);
}

#[test]
fn test_inter_fixture_drops_non_numeric() {
    let table = parse_statement_file(fixture("inter.csv")).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.skipped_rows, 1);
    assert!(table.iter().all(|t| t.establishment.as_deref() != Some("AJUSTE")));
    assert!(approx(total_spend(&table.transactions), 2559.69));
}

#[test]
fn test_nubank_fixture_single_untagged_group() {
    let table = parse_statement_file(fixture("nubank.csv")).unwrap();
    assert!(!table.has_establishment);

    let groups = by_tag(&table.transactions);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].tag, None);
    assert!(approx(groups[0].total_amount, total_spend(&table.transactions)));
    assert_eq!(groups[0].label, "None - R$ 1,077.85");
}

#[test]
fn test_combined_total_is_sum_of_issuers() {
    let session = loaded_session();
    let per_issuer: f64 = Issuer::ALL
        .iter()
        .map(|i| total_spend(&session.table(*i).unwrap().transactions))
        .sum();
    assert!(approx(total_spend(&session.combined()), per_issuer));
    assert!(approx(per_issuer, 5382.21));
}

#[test]
fn test_general_panel_from_fixtures() {
    let session = loaded_session();
    let panel = general_panel(&session, 10).unwrap();

    assert_eq!(panel.issuers, Issuer::ALL.to_vec());
    assert_eq!(panel.row_count, 13);
    assert!(approx(panel.balance, 5000.0 - 5382.21));

    assert_eq!(panel.top.len(), 10);
    assert_eq!(panel.top[0].establishment.as_deref(), Some("PASSAGEM AEREA GOL"));
    assert_eq!(panel.top[0].percent_label(), "43.66%");
    for pair in panel.top.windows(2) {
        assert!(pair[0].amount >= pair[1].amount);
    }

    let tags = panel.tags.unwrap();
    assert_eq!(tags[0].label, "UBER - R$ 99.57");
    assert_eq!(tags[1].label, "None - R$ 5,282.64");
}

#[test]
fn test_issuer_panels_from_fixtures() {
    let session = loaded_session();

    let picpay = issuer_panel(&session, Issuer::PicPay).unwrap();
    assert_eq!(picpay.dropped_rows, 1);
    assert_eq!(picpay.period.unwrap().label(), "02/06/2025 to 14/06/2025");
    assert!(picpay.tags.is_some());

    let nubank = issuer_panel(&session, Issuer::Nubank).unwrap();
    assert!(nubank.tags.is_none());
    assert_eq!(nubank.period.unwrap().label(), "03/06/2025 to 21/06/2025");
}

#[test]
fn test_top_n_over_full_table_sums_to_100() {
    let table = parse_statement_file(fixture("inter.csv")).unwrap();
    let top = top_n(&table.transactions, table.len());
    let sum: f64 = top.iter().map(|t| t.percent_of_total).sum();
    assert!((sum - 100.0).abs() <= 0.05);
}

#[test]
fn test_bad_upload_keeps_loaded_statement() {
    let mut session = loaded_session();
    let err = session
        .load(Issuer::PicPay, b"Data;Estabelecimento\n01/06/2025;Padaria\n")
        .unwrap_err();
    assert!(matches!(err, ParseError::MissingColumn(_)));
    assert_eq!(session.table(Issuer::PicPay).unwrap().len(), 6);
    assert_eq!(session.loaded_issuers().len(), 3);
}
