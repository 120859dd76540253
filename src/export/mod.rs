use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::Bill;

pub(crate) const HEADER: [&str; 6] = ["id", "type", "category", "amount", "date", "createTime"];

/// Write bills to a CSV file, newest date first. With `month`, only bills
/// whose date starts with it are written. Returns the number of rows.
pub(crate) fn export_bills(bills: &[Bill], path: &Path, month: Option<&str>) -> Result<usize> {
    let mut rows: Vec<&Bill> = bills
        .iter()
        .filter(|b| month.map_or(true, |m| b.month_key() == Some(m)))
        .collect();
    rows.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.create_time.cmp(&a.create_time))
    });

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(HEADER)?;
    for bill in &rows {
        let amount = bill.amount.to_string();
        let created = bill.create_time.to_string();
        wtr.write_record([
            bill.id.as_str(),
            bill.kind.as_str(),
            bill.category.as_str(),
            amount.as_str(),
            bill.date.as_str(),
            created.as_str(),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "exported bills");
    Ok(rows.len())
}
