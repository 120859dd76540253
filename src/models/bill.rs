use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BillType {
    Expense,
    Income,
}

impl BillType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "e" | "out" => Some(Self::Expense),
            "income" | "i" | "in" => Some(Self::Income),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [BillType] {
        &[Self::Expense, Self::Income]
    }

    /// Sign shown in front of an amount in listings.
    pub(crate) fn sign(&self) -> char {
        match self {
            Self::Expense => '-',
            Self::Income => '+',
        }
    }
}

impl std::fmt::Display for BillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One income or expense entry.
///
/// Field names on the wire are fixed: `id`, `type`, `category`, `amount`,
/// `date`, `createTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Bill {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) kind: BillType,
    pub(crate) category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    /// Format: "YYYY-MM-DD"
    pub(crate) date: String,
    /// Epoch milliseconds at creation. Only used for ordering.
    #[serde(rename = "createTime")]
    pub(crate) create_time: i64,
}

impl Bill {
    pub(crate) fn is_income(&self) -> bool {
        self.kind == BillType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == BillType::Expense
    }

    /// "YYYY-MM" prefix of the bill date, if the date is long enough to have one.
    pub(crate) fn month_key(&self) -> Option<&str> {
        self.date.get(..7)
    }
}
