//! Input boundary: turns raw user input into bills and budgets.
//!
//! Nothing reaches the store without passing through here, so the store
//! itself never re-validates amounts, dates or categories.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

use crate::models::{Bill, BillType, Budget, Category};

/// Length of generated bill ids, in base-36 digits.
pub(crate) const ID_LEN: usize = 9;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Most integer digits an amount may have. Amounts persist as JSON numbers,
/// so everything accepted here must survive an f64 round trip exactly.
pub(crate) const MAX_AMOUNT_DIGITS: usize = 12;

// Whole units with at most two decimals; a trailing '.' is allowed.
const AMOUNT_PATTERN: &str = r"^([0-9]+)(\.[0-9]{0,2})?$";
const MONTH_PATTERN: &str = r"^[0-9]{4}-(0[1-9]|1[0-2])$";

fn amount_re() -> Result<&'static Regex> {
    static RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(AMOUNT_PATTERN))
        .as_ref()
        .map_err(|e| anyhow!("invalid amount pattern: {e}"))
}

fn month_re() -> Result<&'static Regex> {
    static RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MONTH_PATTERN))
        .as_ref()
        .map_err(|e| anyhow!("invalid month pattern: {e}"))
}

/// Parse a user-entered amount. Must be positive with at most two decimals.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let Some(caps) = amount_re()?.captures(trimmed) else {
        bail!("Invalid amount '{trimmed}': use digits with at most two decimals");
    };
    let whole = caps.get(1).map_or("", |m| m.as_str()).trim_start_matches('0');
    if whole.len() > MAX_AMOUNT_DIGITS {
        bail!("Amount '{trimmed}' is too large: at most {MAX_AMOUNT_DIGITS} digits before the decimal point");
    }
    let amount = Decimal::from_str(trimmed.trim_end_matches('.'))
        .with_context(|| format!("Invalid amount '{trimmed}'"))?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than zero");
    }
    Ok(amount.normalize())
}

/// Parse a calendar date in `YYYY-MM-DD` form, returning it canonically formatted.
pub(crate) fn parse_date(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{trimmed}': expected YYYY-MM-DD"))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Validate a `YYYY-MM` month key.
pub(crate) fn parse_month(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if !month_re()?.is_match(trimmed) {
        bail!("Invalid month '{trimmed}': expected YYYY-MM");
    }
    Ok(trimmed.to_string())
}

pub(crate) fn parse_bill_type(input: &str) -> Result<BillType> {
    BillType::parse(input)
        .ok_or_else(|| anyhow::anyhow!("Unknown bill type '{input}': use expense or income"))
}

/// Month key ("YYYY-MM") containing `date`.
pub(crate) fn month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Random 9-digit base-36 id.
///
/// Drawn from the random low bits of a v4 UUID; collisions are practically
/// impossible at personal-ledger scale, but this is not a secret.
pub(crate) fn generate_bill_id() -> String {
    let mut n = uuid::Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(char::from(ID_ALPHABET[(n % 36) as usize]));
        n /= 36;
    }
    id
}

/// Catalog spelling of `category` when it is a known one, otherwise the
/// trimmed input unchanged.
pub(crate) fn normalize_category(kind: BillType, category: &str) -> Result<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        bail!("Category is required");
    }
    match Category::find(kind, trimmed) {
        Some(known) => Ok(known.name.to_string()),
        None => {
            warn!(category = trimmed, %kind, "category not in catalog, keeping as entered");
            Ok(trimmed.to_string())
        }
    }
}

/// Build a validated bill. `created_at_ms` becomes `createTime`.
pub(crate) fn new_bill(
    kind: BillType,
    category: &str,
    amount: &str,
    date: &str,
    created_at_ms: i64,
) -> Result<Bill> {
    let category = normalize_category(kind, category)?;
    let amount = parse_amount(amount)?;
    let date = parse_date(date)?;
    Ok(Bill {
        id: generate_bill_id(),
        kind,
        category,
        amount,
        date,
        create_time: created_at_ms,
    })
}

pub(crate) fn new_budget(month: &str, amount: &str) -> Result<Budget> {
    Ok(Budget::new(parse_month(month)?, parse_amount(amount)?))
}

#[cfg(test)]
mod tests;
