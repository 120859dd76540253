use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::db::KeyValueStore;
use crate::models::{Bill, Budget};

pub(crate) const BILLS_KEY: &str = "billbook_bills";
pub(crate) const BUDGETS_KEY: &str = "billbook_budgets";

/// Whole-collection CRUD over the bill and budget collections.
///
/// Every mutation reads the full collection, changes it in memory and writes
/// it back before returning.
pub(crate) struct Store {
    kv: Box<dyn KeyValueStore>,
}

impl Store {
    pub(crate) fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self { kv: Box::new(kv) }
    }

    // ── Bills ─────────────────────────────────────────────────

    pub(crate) fn list_bills(&self) -> Result<Vec<Bill>> {
        self.read_collection(BILLS_KEY)
    }

    pub(crate) fn add_bill(&mut self, bill: &Bill) -> Result<()> {
        let mut bills = self.list_bills()?;
        bills.push(bill.clone());
        self.write_collection(BILLS_KEY, &bills)?;
        info!(id = %bill.id, kind = %bill.kind, "bill added");
        Ok(())
    }

    /// Remove the bill with `id`. Returns `false` (and writes nothing) when
    /// no bill matched.
    pub(crate) fn delete_bill(&mut self, id: &str) -> Result<bool> {
        let mut bills = self.list_bills()?;
        let before = bills.len();
        bills.retain(|b| b.id != id);
        if bills.len() == before {
            debug!(id, "delete_bill: no match");
            return Ok(false);
        }
        self.write_collection(BILLS_KEY, &bills)?;
        info!(id, "bill deleted");
        Ok(true)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.read_collection(BUDGETS_KEY)
    }

    /// Replace the budget for `budget.month`, or insert it if the month has none.
    pub(crate) fn upsert_budget(&mut self, budget: &Budget) -> Result<()> {
        let mut budgets = self.list_budgets()?;
        budgets.retain(|b| b.month != budget.month);
        budgets.push(budget.clone());
        self.write_collection(BUDGETS_KEY, &budgets)?;
        info!(month = %budget.month, amount = %budget.amount, "budget saved");
        Ok(())
    }

    pub(crate) fn budget_for_month(&self, month: &str) -> Result<Option<Budget>> {
        Ok(self
            .list_budgets()?
            .into_iter()
            .find(|b| b.month == month))
    }

    // ── Serialization ─────────────────────────────────────────

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("Persisted collection '{key}' is corrupt"))
    }

    fn write_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)
            .with_context(|| format!("Failed to serialize collection '{key}'"))?;
        self.kv.set(key, &json)?;
        debug!(key, count = items.len(), "collection written");
        Ok(())
    }
}
