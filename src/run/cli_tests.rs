#![allow(clippy::unwrap_used)]

use super::*;
use crate::db::Database;
use crate::models::BillType;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn memory_store() -> Store {
    Store::new(Database::open_in_memory().unwrap())
}

// ── Argument helpers ──────────────────────────────────────────

#[test]
fn test_flag_value() {
    let a = args(&["--month", "2024-03", "--category", "Dining"]);
    assert_eq!(flag(&a, "--month"), Some("2024-03"));
    assert_eq!(flag(&a, "--category"), Some("Dining"));
    assert_eq!(flag(&a, "--date"), None);
}

#[test]
fn test_flag_without_value() {
    let a = args(&["--month"]);
    assert_eq!(flag(&a, "--month"), None);
}

#[test]
fn test_positionals_skip_flag_values() {
    let a = args(&["expense", "--date", "2024-03-01", "Dining", "12.5"]);
    assert_eq!(positionals(&a), vec!["expense", "Dining", "12.5"]);
}

#[test]
fn test_month_arg_validates() {
    assert_eq!(month_arg(Some("2024-03")).unwrap(), "2024-03");
    assert!(month_arg(Some("2024-13")).is_err());
    assert_eq!(month_arg(None).unwrap(), entry::month_of(today()));
}

#[test]
fn test_shellexpand_home() {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    assert_eq!(shellexpand("~/out.csv"), format!("{home}/out.csv"));
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn test_add_then_delete() {
    let mut store = memory_store();
    cli_add(
        &args(&["expense", "dining", "12.50", "--date", "2024-03-05"]),
        &mut store,
    )
    .unwrap();

    let bills = store.list_bills().unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].kind, BillType::Expense);
    assert_eq!(bills[0].category, "Dining");
    assert_eq!(bills[0].date, "2024-03-05");

    let id = bills[0].id.clone();
    cli_delete(&args(&[id.as_str()]), &mut store).unwrap();
    assert!(store.list_bills().unwrap().is_empty());
}

#[test]
fn test_add_rejects_bad_input_without_writing() {
    let mut store = memory_store();
    assert!(cli_add(&args(&["expense", "Dining", "0"]), &mut store).is_err());
    assert!(cli_add(&args(&["expense", "Dining"]), &mut store).is_err());
    assert!(cli_add(&args(&["refund", "Dining", "5"]), &mut store).is_err());
    assert!(cli_add(
        &args(&["expense", "Dining", "79228162514264337593543950335"]),
        &mut store
    )
    .is_err());
    assert!(store.list_bills().unwrap().is_empty());
}

#[test]
fn test_delete_unknown_id_is_ok() {
    let mut store = memory_store();
    cli_delete(&args(&["nope"]), &mut store).unwrap();
    assert!(cli_delete(&[], &mut store).is_err());
}

#[test]
fn test_budget_set_and_replace() {
    let mut store = memory_store();
    cli_budget(&args(&["500", "--month", "2024-03"]), &mut store).unwrap();
    cli_budget(&args(&["800", "--month", "2024-03"]), &mut store).unwrap();
    let budgets = store.list_budgets().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].amount, rust_decimal::Decimal::from(800));
    // show only
    cli_budget(&args(&["--month", "2024-04"]), &mut store).unwrap();
    assert_eq!(store.list_budgets().unwrap().len(), 1);
}

#[test]
fn test_chart_rejects_unknown_dimension() {
    let store = memory_store();
    assert!(cli_chart(&args(&["week"]), &store).is_err());
    cli_chart(&args(&["month"]), &store).unwrap();
}

#[test]
fn test_ranking_defaults_to_all_time() {
    let mut store = memory_store();
    for (category, amount, date) in [
        ("Dining", "30", "2023-11-02"),
        ("Transport", "20", "2024-03-01"),
        ("Dining", "5", "2024-03-04"),
    ] {
        cli_add(
            &args(&["expense", category, amount, "--date", date]),
            &mut store,
        )
        .unwrap();
    }
    let bills = store.list_bills().unwrap();

    let all_time = ranking_scope(&bills, None);
    assert_eq!(all_time.len(), 2);
    assert_eq!(all_time[0].category, "Dining");
    assert_eq!(all_time[0].total, rust_decimal::Decimal::from(35));

    let march = ranking_scope(&bills, Some("2024-03"));
    assert_eq!(march[0].category, "Transport");
    assert_eq!(march[1].total, rust_decimal::Decimal::from(5));

    cli_ranking(&[], &store).unwrap();
    cli_ranking(&args(&["--month", "2024-03"]), &store).unwrap();
    assert!(cli_ranking(&args(&["--month", "March"]), &store).is_err());
}

#[test]
fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut store = memory_store();
    cli_add(
        &args(&["income", "Salary", "3000", "--date", "2024-03-01"]),
        &mut store,
    )
    .unwrap();
    cli_export(&args(&[path.to_str().unwrap()]), &store).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_unknown_command() {
    let mut store = memory_store();
    let cfg = Config::default();
    assert!(as_cli(&args(&["billbook", "frobnicate"]), &mut store, &cfg).is_err());
    as_cli(&args(&["billbook", "version"]), &mut store, &cfg).unwrap();
}
