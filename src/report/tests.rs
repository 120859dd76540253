#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::aggregate::{budget_status, category_ranking, monthly_stats, user_stats};
use crate::models::Budget;

fn bill(id: &str, kind: BillType, category: &str, amount: Decimal, date: &str) -> Bill {
    Bill {
        id: id.into(),
        kind,
        category: category.into(),
        amount,
        date: date.into(),
        create_time: 0,
    }
}

fn sample() -> Vec<Bill> {
    vec![
        bill("a", BillType::Expense, "Dining", dec!(30), "2024-03-01"),
        bill("b", BillType::Expense, "Transport", dec!(10), "2024-03-02"),
        bill("c", BillType::Income, "Salary", dec!(1000), "2024-03-03"),
    ]
}

// ── Summary / budget ──────────────────────────────────────────

#[test]
fn test_summary_without_budget() {
    let bills = sample();
    let stats = monthly_stats(&bills, "2024-03");
    let status = budget_status(&bills, &[], "2024-03");
    let out = render_summary("2024-03", &stats, &status).unwrap();
    assert!(out.contains("2024-03"));
    assert!(out.contains("1,000.00"));
    assert!(out.contains("40.00"));
    assert!(out.contains("960.00"));
    assert!(out.contains("No budget set"));
}

#[test]
fn test_budget_under() {
    let budgets = vec![Budget::new("2024-03".into(), dec!(80))];
    let status = budget_status(&sample(), &budgets, "2024-03");
    let out = render_budget(&status).unwrap();
    assert!(out.contains("80.00"));
    assert!(out.contains("50.0%"));
    assert!(!out.contains("Over budget"));
}

#[test]
fn test_budget_over() {
    let budgets = vec![Budget::new("2024-03".into(), dec!(25))];
    let status = budget_status(&sample(), &budgets, "2024-03");
    let out = render_budget(&status).unwrap();
    assert!(out.contains("100.0%"));
    assert!(out.contains("Over budget by 15.00"));
}

// ── Bills ─────────────────────────────────────────────────────

#[test]
fn test_render_bills_signs() {
    let out = render_bills(&sample()).unwrap();
    assert!(out.contains("-30.00"));
    assert!(out.contains("+1,000.00"));
    assert_eq!(out.lines().count(), 5);
}

#[test]
fn test_render_bills_empty() {
    assert_eq!(render_bills(&[]).unwrap(), "No bills\n");
}

// ── Charts ────────────────────────────────────────────────────

#[test]
fn test_series_scales_to_max() {
    let points = vec![
        SeriesPoint {
            label: "1".into(),
            value: dec!(50),
        },
        SeriesPoint {
            label: "2".into(),
            value: dec!(100),
        },
        SeriesPoint {
            label: "3".into(),
            value: Decimal::ZERO,
        },
    ];
    let out = render_series(Dimension::Month, &points).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Expenses by month");
    assert_eq!(lines[2].matches('█').count(), BAR_WIDTH / 2);
    assert_eq!(lines[3].matches('█').count(), BAR_WIDTH);
    assert_eq!(lines[4].matches('█').count(), 0);
}

#[test]
fn test_series_empty() {
    assert!(render_series(Dimension::Year, &[]).unwrap().contains("No expenses yet"));
}

#[test]
fn test_ranking_lines() {
    let ranking = category_ranking(&sample());
    let out = render_ranking(&ranking).unwrap();
    assert!(out.starts_with("Spending ranking (2 categories)"));
    assert!(out.contains(" 1. Dining"));
    assert!(out.contains("75.0%"));
    assert!(out.contains(" 2. Transport"));
}

#[test]
fn test_ranking_empty() {
    assert!(render_ranking(&[]).unwrap().contains("No ranking data yet"));
}

// ── Misc ──────────────────────────────────────────────────────

#[test]
fn test_user_stats() {
    let out = render_user_stats(&user_stats(&sample()));
    assert!(out.contains("Days with bills: 3"));
    assert!(out.contains("Bills recorded:  3"));
}

#[test]
fn test_catalog_lists_both_kinds() {
    let out = render_catalog().unwrap();
    assert!(out.starts_with("expense"));
    assert!(out.contains("Dining"));
    assert!(out.contains("Salary"));
}
