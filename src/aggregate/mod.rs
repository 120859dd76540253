//! Derived views over a snapshot of bills and budgets.
//!
//! Every function here is pure: same inputs, same output. Functions that
//! bucket by calendar take `today` explicitly instead of reading the clock.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{Bill, Budget};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Number of daily buckets in the day series, ending today.
pub(crate) const DAY_WINDOW: i64 = 30;

// ── Monthly stats ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyStats {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    /// Bills of the month, latest `create_time` first.
    pub(crate) bills: Vec<Bill>,
}

/// Totals for the bills whose date starts with `month` ("YYYY-MM").
pub(crate) fn monthly_stats(bills: &[Bill], month: &str) -> MonthlyStats {
    let mut filtered: Vec<Bill> = bills
        .iter()
        .filter(|b| b.date.starts_with(month))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.create_time.cmp(&a.create_time));

    let income = total(filtered.iter().filter(|b| b.is_income()));
    let expense = total(filtered.iter().filter(|b| b.is_expense()));

    MonthlyStats {
        income,
        expense,
        bills: filtered,
    }
}

/// Sum of bill amounts, pinned at `Decimal::MAX` instead of overflowing.
fn total<'a>(bills: impl Iterator<Item = &'a Bill>) -> Decimal {
    bills.fold(Decimal::ZERO, |acc, b| acc.saturating_add(b.amount))
}

// ── Budget ────────────────────────────────────────────────────

/// Share of the budget already spent, in percent, capped at 100.
/// A zero (or unset) budget yields 0.
pub(crate) fn budget_usage(expense: Decimal, budget: Decimal) -> Decimal {
    if budget <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    expense
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map_or(HUNDRED, |pct| pct.min(HUNDRED))
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetStatus {
    pub(crate) month: String,
    /// Zero when no budget is set for the month.
    pub(crate) budget: Decimal,
    pub(crate) expense: Decimal,
    /// `budget - expense`; negative once the budget is exceeded.
    pub(crate) remaining: Decimal,
    /// `remaining` floored at zero.
    pub(crate) unspent: Decimal,
    pub(crate) used_percent: Decimal,
}

impl BudgetStatus {
    pub(crate) fn has_budget(&self) -> bool {
        self.budget > Decimal::ZERO
    }

    pub(crate) fn is_over(&self) -> bool {
        self.has_budget() && self.remaining < Decimal::ZERO
    }
}

pub(crate) fn budget_status(bills: &[Bill], budgets: &[Budget], month: &str) -> BudgetStatus {
    let budget = Budget::find_by_month(budgets, month)
        .map(|b| b.amount)
        .unwrap_or_default();
    let expense = monthly_stats(bills, month).expense;
    let remaining = budget - expense;

    BudgetStatus {
        month: month.to_string(),
        budget,
        expense,
        remaining,
        unspent: remaining.max(Decimal::ZERO),
        used_percent: budget_usage(expense, budget),
    }
}

// ── Time series ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dimension {
    Day,
    Month,
    Year,
}

impl Dimension {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "d" | "days" => Some(Self::Day),
            "month" | "m" | "months" => Some(Self::Month),
            "year" | "y" | "years" => Some(Self::Year),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Dimension] {
        &[Self::Day, Self::Month, Self::Year]
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeriesPoint {
    pub(crate) label: String,
    pub(crate) value: Decimal,
}

impl SeriesPoint {
    fn zero(label: String) -> Self {
        Self {
            label,
            value: Decimal::ZERO,
        }
    }
}

/// Expense totals bucketed by `dimension`. Income never contributes.
pub(crate) fn expense_series(bills: &[Bill], dimension: Dimension, today: NaiveDate) -> Vec<SeriesPoint> {
    let expenses = bills.iter().filter(|b| b.is_expense());
    match dimension {
        Dimension::Day => day_series(expenses, today),
        Dimension::Month => month_series(expenses, today.year()),
        Dimension::Year => year_series(expenses),
    }
}

fn day_series<'a>(expenses: impl Iterator<Item = &'a Bill>, today: NaiveDate) -> Vec<SeriesPoint> {
    let mut points = Vec::with_capacity(DAY_WINDOW as usize);
    let mut index: HashMap<String, usize> = HashMap::with_capacity(DAY_WINDOW as usize);
    for offset in (0..DAY_WINDOW).rev() {
        let day = today - Duration::days(offset);
        index.insert(day.format("%Y-%m-%d").to_string(), points.len());
        points.push(SeriesPoint::zero(day.format("%m-%d").to_string()));
    }

    for bill in expenses {
        if let Some(&i) = index.get(bill.date.as_str()) {
            points[i].value = points[i].value.saturating_add(bill.amount);
        }
    }
    points
}

fn month_series<'a>(expenses: impl Iterator<Item = &'a Bill>, year: i32) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = (1..=12)
        .map(|m: u32| SeriesPoint::zero(m.to_string()))
        .collect();

    let prefix = format!("{year}-");
    for bill in expenses {
        let Some(rest) = bill.date.strip_prefix(&prefix) else {
            continue;
        };
        let month = rest.split('-').next().and_then(|m| m.parse::<usize>().ok());
        if let Some(m @ 1..=12) = month {
            points[m - 1].value = points[m - 1].value.saturating_add(bill.amount);
        }
    }
    points
}

fn year_series<'a>(expenses: impl Iterator<Item = &'a Bill>) -> Vec<SeriesPoint> {
    let mut years: BTreeMap<&str, Decimal> = BTreeMap::new();
    for bill in expenses {
        let year = bill.date.split('-').next().unwrap_or_default();
        let sum = years.entry(year).or_default();
        *sum = sum.saturating_add(bill.amount);
    }
    years
        .into_iter()
        .map(|(label, value)| SeriesPoint {
            label: label.to_string(),
            value,
        })
        .collect()
}

// ── Category ranking ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryShare {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    /// Percent of all expense spending, 0 when there is none.
    pub(crate) percent: Decimal,
}

/// Expense totals per category, largest first. Equal totals keep the order
/// in which their categories first appear in `bills`.
pub(crate) fn category_ranking(bills: &[Bill]) -> Vec<CategoryShare> {
    let mut groups: Vec<(&str, Decimal)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut overall = Decimal::ZERO;

    for bill in bills.iter().filter(|b| b.is_expense()) {
        overall = overall.saturating_add(bill.amount);
        match positions.get(bill.category.as_str()) {
            Some(&i) => groups[i].1 = groups[i].1.saturating_add(bill.amount),
            None => {
                positions.insert(bill.category.as_str(), groups.len());
                groups.push((bill.category.as_str(), bill.amount));
            }
        }
    }

    let mut ranking: Vec<CategoryShare> = groups
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            percent: if overall > Decimal::ZERO {
                total / overall * HUNDRED
            } else {
                Decimal::ZERO
            },
        })
        .collect();
    ranking.sort_by(|a, b| b.total.cmp(&a.total));
    ranking
}

// ── User stats ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UserStats {
    /// Distinct calendar days with at least one bill.
    pub(crate) total_days: usize,
    pub(crate) total_bills: usize,
}

pub(crate) fn user_stats(bills: &[Bill]) -> UserStats {
    let days: HashSet<&str> = bills.iter().map(|b| b.date.as_str()).collect();
    UserStats {
        total_days: days.len(),
        total_bills: bills.len(),
    }
}
