//! Plain-text views of aggregates, one `String` per view.

pub(crate) mod util;

use anyhow::Result;
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::aggregate::{BudgetStatus, CategoryShare, Dimension, MonthlyStats, SeriesPoint, UserStats};
use crate::models::{Bill, BillType, Category};
use util::{bar, format_amount, format_percent, truncate};

const BAR_WIDTH: usize = 30;
const RULE_WIDTH: usize = 44;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Month header: income, expense and, when set, budget progress.
pub(crate) fn render_summary(month: &str, stats: &MonthlyStats, budget: &BudgetStatus) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "billbook {month}")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "  Income:    {:>14}", format_amount(stats.income))?;
    writeln!(out, "  Expense:   {:>14}", format_amount(stats.expense))?;
    writeln!(
        out,
        "  Net:       {:>14}",
        format_amount(stats.income.saturating_sub(stats.expense))
    )?;
    writeln!(out, "  Bills:     {:>14}", stats.bills.len())?;
    out.push_str(&render_budget(budget)?);
    Ok(out)
}

pub(crate) fn render_budget(status: &BudgetStatus) -> Result<String> {
    let mut out = String::new();
    if !status.has_budget() {
        writeln!(out, "  No budget set for {}", status.month)?;
        return Ok(out);
    }
    writeln!(
        out,
        "  Budget:    {:>14}  [{:<width$}] {}",
        format_amount(status.budget),
        bar(status.used_percent, Decimal::ONE_HUNDRED, 20),
        format_percent(status.used_percent),
        width = 20
    )?;
    writeln!(out, "  Remaining: {:>14}", format_amount(status.remaining))?;
    if status.is_over() {
        writeln!(
            out,
            "  Over budget by {}",
            format_amount(-status.remaining)
        )?;
    }
    Ok(out)
}

/// Bill listing in the order given.
pub(crate) fn render_bills(bills: &[Bill]) -> Result<String> {
    if bills.is_empty() {
        return Ok("No bills\n".to_string());
    }
    let mut out = String::new();
    writeln!(
        out,
        "{:<10} {:<10} {:<16} {:>12}",
        "ID", "Date", "Category", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(51))?;
    for b in bills {
        writeln!(
            out,
            "{:<10} {:<10} {:<16} {:>12}",
            b.id,
            b.date,
            truncate(&b.category, 16),
            format!("{}{}", b.kind.sign(), format_amount(b.amount)),
        )?;
    }
    Ok(out)
}

/// Expense chart, one bar per bucket.
pub(crate) fn render_series(dimension: Dimension, points: &[SeriesPoint]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Expenses by {dimension}")?;
    writeln!(out, "{}", rule())?;
    if points.is_empty() {
        out.push_str("No expenses yet\n");
        return Ok(out);
    }
    let max = points
        .iter()
        .map(|p| p.value)
        .max()
        .unwrap_or(Decimal::ZERO);
    for p in points {
        writeln!(
            out,
            "{:>5} {:<width$} {}",
            p.label,
            bar(p.value, max, BAR_WIDTH),
            if p.value > Decimal::ZERO {
                format_amount(p.value)
            } else {
                String::new()
            },
            width = BAR_WIDTH
        )?;
    }
    Ok(out)
}

pub(crate) fn render_ranking(ranking: &[CategoryShare]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Spending ranking ({} categories)", ranking.len())?;
    writeln!(out, "{}", rule())?;
    if ranking.is_empty() {
        out.push_str("No ranking data yet\n");
        return Ok(out);
    }
    for (i, share) in ranking.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {:<16} {:>12} {:>7}  {}",
            i + 1,
            truncate(&share.category, 16),
            format_amount(share.total),
            format_percent(share.percent),
            bar(share.percent, Decimal::ONE_HUNDRED, 20),
        )?;
    }
    Ok(out)
}

pub(crate) fn render_user_stats(stats: &UserStats) -> String {
    format!(
        "Days with bills: {}\nBills recorded:  {}\n",
        stats.total_days, stats.total_bills
    )
}

pub(crate) fn render_catalog() -> Result<String> {
    let mut out = String::new();
    for kind in BillType::all() {
        let names: Vec<&str> = Category::catalog(*kind).iter().map(|c| c.name).collect();
        writeln!(out, "{:<8} {}", kind.as_str(), names.join(", "))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests;
