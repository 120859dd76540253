use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending cap for one month. At most one per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Budget {
    /// Format: "YYYY-MM"
    pub(crate) month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
}

impl Budget {
    pub(crate) fn new(month: String, amount: Decimal) -> Self {
        Self { month, amount }
    }

    /// Find the budget for a month in a slice.
    pub(crate) fn find_by_month<'a>(budgets: &'a [Budget], month: &str) -> Option<&'a Budget> {
        budgets.iter().find(|b| b.month == month)
    }
}
