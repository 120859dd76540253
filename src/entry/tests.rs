#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_valid() {
    assert_eq!(parse_amount("12").unwrap(), dec!(12));
    assert_eq!(parse_amount("12.5").unwrap(), dec!(12.5));
    assert_eq!(parse_amount("12.50").unwrap(), dec!(12.50));
    assert_eq!(parse_amount(" 0.01 ").unwrap(), dec!(0.01));
}

#[test]
fn test_parse_amount_trailing_dot() {
    assert_eq!(parse_amount("7.").unwrap(), dec!(7));
}

#[test]
fn test_parse_amount_rejects_zero() {
    assert!(parse_amount("0").is_err());
    assert!(parse_amount("0.00").is_err());
}

#[test]
fn test_parse_amount_rejects_negative() {
    assert!(parse_amount("-5").is_err());
}

#[test]
fn test_parse_amount_rejects_three_decimals() {
    assert!(parse_amount("1.234").is_err());
}

#[test]
fn test_parse_amount_rejects_garbage() {
    assert!(parse_amount("").is_err());
    assert!(parse_amount("abc").is_err());
    assert!(parse_amount("1,000").is_err());
    assert!(parse_amount(".5").is_err());
    assert!(parse_amount("$5").is_err());
}

#[test]
fn test_parse_amount_upper_bound() {
    assert_eq!(
        parse_amount("999999999999.99").unwrap(),
        dec!(999999999999.99)
    );
    assert_eq!(parse_amount("000123").unwrap(), dec!(123));
    assert!(parse_amount("1000000000000").is_err());
    assert!(parse_amount("12345678901234567.89").is_err());
    assert!(parse_amount("79228162514264337593543950335").is_err());
}

#[test]
fn test_new_budget_shares_amount_bound() {
    assert!(new_budget("2024-03", "1000000000000").is_err());
}

// ── parse_date / parse_month ──────────────────────────────────

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2024-03-15").unwrap(), "2024-03-15");
    assert_eq!(parse_date(" 2024-02-29 ").unwrap(), "2024-02-29");
}

#[test]
fn test_parse_date_rejects_impossible_dates() {
    assert!(parse_date("2023-02-29").is_err());
    assert!(parse_date("2024-13-01").is_err());
    assert!(parse_date("03/15/2024").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn test_parse_month() {
    assert_eq!(parse_month("2024-03").unwrap(), "2024-03");
    assert_eq!(parse_month("2024-12").unwrap(), "2024-12");
}

#[test]
fn test_parse_month_rejects_bad_keys() {
    assert!(parse_month("2024-00").is_err());
    assert!(parse_month("2024-13").is_err());
    assert!(parse_month("2024-3").is_err());
    assert!(parse_month("2024-03-01").is_err());
    assert!(parse_month("March").is_err());
}

#[test]
fn test_month_of() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert_eq!(month_of(date), "2024-03");
}

#[test]
fn test_parse_bill_type() {
    assert_eq!(parse_bill_type("expense").unwrap(), BillType::Expense);
    assert_eq!(parse_bill_type("Income").unwrap(), BillType::Income);
    assert!(parse_bill_type("gift").is_err());
}

// ── ids ───────────────────────────────────────────────────────

#[test]
fn test_generated_ids_are_base36() {
    for _ in 0..100 {
        let id = generate_bill_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}

#[test]
fn test_generated_ids_are_distinct() {
    let ids: std::collections::HashSet<String> = (0..1000).map(|_| generate_bill_id()).collect();
    assert_eq!(ids.len(), 1000);
}

// ── categories ────────────────────────────────────────────────

#[test]
fn test_normalize_known_category() {
    assert_eq!(
        normalize_category(BillType::Expense, "dining").unwrap(),
        "Dining"
    );
    assert_eq!(
        normalize_category(BillType::Income, "SALARY").unwrap(),
        "Salary"
    );
}

#[test]
fn test_normalize_keeps_free_text() {
    assert_eq!(
        normalize_category(BillType::Expense, "  Pet food ").unwrap(),
        "Pet food"
    );
}

#[test]
fn test_normalize_rejects_blank() {
    assert!(normalize_category(BillType::Expense, "   ").is_err());
}

// ── new_bill / new_budget ─────────────────────────────────────

#[test]
fn test_new_bill() {
    let bill = new_bill(BillType::Expense, "fruit", "3.20", "2024-03-15", 42).unwrap();
    assert_eq!(bill.kind, BillType::Expense);
    assert_eq!(bill.category, "Fruit");
    assert_eq!(bill.amount, dec!(3.2));
    assert_eq!(bill.date, "2024-03-15");
    assert_eq!(bill.create_time, 42);
    assert_eq!(bill.id.len(), ID_LEN);
}

#[test]
fn test_new_bill_rejects_invalid_input() {
    assert!(new_bill(BillType::Expense, "", "3", "2024-03-15", 0).is_err());
    assert!(new_bill(BillType::Expense, "Fruit", "0", "2024-03-15", 0).is_err());
    assert!(new_bill(BillType::Expense, "Fruit", "3", "2024-02-30", 0).is_err());
}

#[test]
fn test_new_budget() {
    let budget = new_budget("2024-03", "1500").unwrap();
    assert_eq!(budget.month, "2024-03");
    assert_eq!(budget.amount, dec!(1500));
    assert!(new_budget("2024-03", "0").is_err());
    assert!(new_budget("2024-3", "100").is_err());
}
