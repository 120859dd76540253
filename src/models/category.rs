use super::BillType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
}

const EXPENSE_CATEGORIES: &[Category] = &[
    Category { id: "dining", name: "Dining" },
    Category { id: "shopping", name: "Shopping" },
    Category { id: "snack", name: "Snacks" },
    Category { id: "fruit", name: "Fruit" },
    Category { id: "transport", name: "Transport" },
    Category { id: "daily", name: "Daily" },
    Category { id: "entertainment", name: "Entertainment" },
    Category { id: "communication", name: "Communication" },
    Category { id: "clothing", name: "Clothing" },
    Category { id: "transfer", name: "Transfer" },
    Category { id: "study", name: "Study" },
    Category { id: "digital", name: "Digital" },
    Category { id: "medical", name: "Medical" },
    Category { id: "other", name: "Other" },
];

const INCOME_CATEGORIES: &[Category] = &[
    Category { id: "salary", name: "Salary" },
    Category { id: "finance", name: "Investment" },
    Category { id: "transfer", name: "Transfer" },
    Category { id: "other", name: "Other" },
];

impl Category {
    /// Built-in categories offered for a bill type.
    pub(crate) fn catalog(kind: BillType) -> &'static [Category] {
        match kind {
            BillType::Expense => EXPENSE_CATEGORIES,
            BillType::Income => INCOME_CATEGORIES,
        }
    }

    /// Find a catalog category by name or id (case-insensitive).
    pub(crate) fn find(kind: BillType, name: &str) -> Option<&'static Category> {
        let lower = name.trim().to_lowercase();
        Self::catalog(kind)
            .iter()
            .find(|c| c.name.to_lowercase() == lower || c.id == lower)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
