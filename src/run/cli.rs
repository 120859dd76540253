use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;

use crate::aggregate::{self, CategoryShare, Dimension};
use crate::config::Config;
use crate::entry;
use crate::export;
use crate::insight::{GeminiSummarizer, TipTask};
use crate::models::Bill;
use crate::report;
use crate::store::Store;

pub(crate) fn as_cli(args: &[String], store: &mut Store, cfg: &Config) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], store),
        "delete" | "rm" => cli_delete(&args[2..], store),
        "list" | "ls" => cli_list(&args[2..], store),
        "budget" | "b" => cli_budget(&args[2..], store),
        "summary" | "s" => cli_summary(&args[2..], store),
        "chart" => cli_chart(&args[2..], store),
        "ranking" => cli_ranking(&args[2..], store),
        "stats" => cli_stats(store),
        "tip" => cli_tip(store, cfg),
        "categories" => {
            print!("{}", report::render_catalog()?);
            Ok(())
        }
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("billbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("billbook - local-first bill and budget tracker");
    println!();
    println!("Usage: billbook [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Dashboard for the current month");
    println!("  add <expense|income> <category> <amount>");
    println!("    --date <YYYY-MM-DD>           Bill date (default: today)");
    println!("  delete <id>                     Delete a bill");
    println!("  list                            List bills, latest first");
    println!("    --month <YYYY-MM>             Month to list (default: current)");
    println!("    --category <name>             Only this category");
    println!("  budget [amount]                 Set or show the monthly budget");
    println!("    --month <YYYY-MM>             Month (default: current)");
    println!("  summary [YYYY-MM]               Income, expense and budget usage");
    println!("  chart [day|month|year]          Expense chart (default: day)");
    println!("  ranking                         Spending by category, all time");
    println!("    --month <YYYY-MM>             Only this month");
    println!("  stats                           Bookkeeping days and bill count");
    println!("  tip                             AI financial tip on recent bills");
    println!("  categories                      List built-in categories");
    println!("  export [path]                   Export bills to CSV");
    println!("    --month <YYYY-MM>             Only this month");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

/// Value following `--name`, if present.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Positional arguments with `--flag value` pairs removed.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn month_arg(value: Option<&str>) -> Result<String> {
    match value {
        Some(m) => entry::parse_month(m),
        None => Ok(entry::month_of(today())),
    }
}

pub(crate) fn dashboard(store: &Store) -> Result<()> {
    let bills = store.list_bills()?;
    let budgets = store.list_budgets()?;
    let month = entry::month_of(today());
    let stats = aggregate::monthly_stats(&bills, &month);
    let status = aggregate::budget_status(&bills, &budgets, &month);

    print!("{}", report::render_summary(&month, &stats, &status)?);
    println!();
    let recent: Vec<Bill> = stats.bills.iter().take(10).cloned().collect();
    print!("{}", report::render_bills(&recent)?);
    if stats.bills.len() > recent.len() {
        println!("  … {} more (billbook list)", stats.bills.len() - recent.len());
    }
    Ok(())
}

fn cli_add(args: &[String], store: &mut Store) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 3 {
        anyhow::bail!("Usage: billbook add <expense|income> <category> <amount> [--date YYYY-MM-DD]");
    }
    let kind = entry::parse_bill_type(pos[0])?;
    let now = Local::now();
    let date = flag(args, "--date")
        .map(str::to_string)
        .unwrap_or_else(|| now.format("%Y-%m-%d").to_string());

    let bill = entry::new_bill(kind, pos[1], pos[2], &date, now.timestamp_millis())?;
    store.add_bill(&bill)?;
    println!(
        "Added {} {} {} on {} (id {})",
        bill.kind,
        bill.category,
        report::util::format_amount(bill.amount),
        bill.date,
        bill.id
    );
    Ok(())
}

fn cli_delete(args: &[String], store: &mut Store) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: billbook delete <id>");
    };
    if store.delete_bill(id)? {
        println!("Deleted bill {id}");
    } else {
        println!("No bill with id {id}");
    }
    Ok(())
}

fn cli_list(args: &[String], store: &Store) -> Result<()> {
    let month = month_arg(flag(args, "--month"))?;
    let bills = store.list_bills()?;
    let mut stats = aggregate::monthly_stats(&bills, &month);
    if let Some(category) = flag(args, "--category") {
        stats.bills.retain(|b| b.category.eq_ignore_ascii_case(category));
    }
    println!("Bills for {month}");
    print!("{}", report::render_bills(&stats.bills)?);
    Ok(())
}

fn cli_budget(args: &[String], store: &mut Store) -> Result<()> {
    let month = month_arg(flag(args, "--month"))?;
    if let Some(amount) = positionals(args).first() {
        let budget = entry::new_budget(&month, amount)?;
        store.upsert_budget(&budget)?;
        println!(
            "Budget for {} set to {}",
            budget.month,
            report::util::format_amount(budget.amount)
        );
        return Ok(());
    }

    let bills = store.list_bills()?;
    let budgets = store.list_budgets()?;
    let status = aggregate::budget_status(&bills, &budgets, &month);
    println!("Budget for {month}");
    println!(
        "  Spent:     {:>14}",
        report::util::format_amount(status.expense)
    );
    print!("{}", report::render_budget(&status)?);
    if store.budget_for_month(&month)?.is_none() {
        println!("  Set one with: billbook budget <amount> --month {month}");
    }
    Ok(())
}

fn cli_summary(args: &[String], store: &Store) -> Result<()> {
    let month = month_arg(positionals(args).first().copied())?;
    let bills = store.list_bills()?;
    let budgets = store.list_budgets()?;
    let stats = aggregate::monthly_stats(&bills, &month);
    let status = aggregate::budget_status(&bills, &budgets, &month);
    print!("{}", report::render_summary(&month, &stats, &status)?);

    let ranking = aggregate::category_ranking(&stats.bills);
    if !ranking.is_empty() {
        println!();
        print!("{}", report::render_ranking(&ranking)?);
    }
    Ok(())
}

fn cli_chart(args: &[String], store: &Store) -> Result<()> {
    let dimension = match args.first() {
        Some(d) => Dimension::parse(d).ok_or_else(|| {
            let names: Vec<&str> = Dimension::all().iter().map(|d| d.as_str()).collect();
            anyhow::anyhow!("Unknown chart dimension '{d}' (expected {})", names.join(", "))
        })?,
        None => Dimension::Day,
    };
    let bills = store.list_bills()?;
    let points = aggregate::expense_series(&bills, dimension, today());
    print!("{}", report::render_series(dimension, &points)?);
    Ok(())
}

/// All-time ranking unless `--month` narrows it.
fn cli_ranking(args: &[String], store: &Store) -> Result<()> {
    let month = flag(args, "--month").map(entry::parse_month).transpose()?;
    let bills = store.list_bills()?;
    println!("{}", month.as_deref().unwrap_or("All time"));
    print!(
        "{}",
        report::render_ranking(&ranking_scope(&bills, month.as_deref()))?
    );
    Ok(())
}

fn ranking_scope(bills: &[Bill], month: Option<&str>) -> Vec<CategoryShare> {
    match month {
        Some(m) => aggregate::category_ranking(&aggregate::monthly_stats(bills, m).bills),
        None => aggregate::category_ranking(bills),
    }
}

fn cli_stats(store: &Store) -> Result<()> {
    let bills = store.list_bills()?;
    print!("{}", report::render_user_stats(&aggregate::user_stats(&bills)));
    Ok(())
}

fn cli_tip(store: &Store, cfg: &Config) -> Result<()> {
    let bills = store.list_bills()?;
    let summarizer = Arc::new(GeminiSummarizer::from_config(&cfg.insight)?);
    let settings = cfg.insight.tip_settings();

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let tip = rt.block_on(async move {
        let task = TipTask::spawn(summarizer, bills, settings);
        tokio::select! {
            tip = task.join() => tip,
            _ = tokio::signal::ctrl_c() => None,
        }
    });

    match tip {
        Some(tip) => println!("{tip}"),
        None => eprintln!("Tip cancelled"),
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let month = flag(args, "--month").map(entry::parse_month).transpose()?;

    let output_path = positionals(args)
        .first()
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let suffix = month.as_deref().unwrap_or("all");
            PathBuf::from(format!("{home}/billbook-export-{suffix}.csv"))
        });

    let bills = store.list_bills()?;
    let count = export::export_bills(&bills, &output_path, month.as_deref())?;
    if count == 0 {
        println!("No bills to export");
    } else {
        println!("Exported {count} bills to {}", output_path.display());
    }
    Ok(())
}

fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
