//! Short money tips from a generative model.
//!
//! The model is an unreliable collaborator: every failure ends in a fixed
//! fallback string and nothing here ever touches the store.

mod gemini;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::Bill;

pub(crate) use gemini::GeminiSummarizer;

/// Shown when there is nothing to analyse yet. No request is made.
pub(crate) const EMPTY_LEDGER_TIP: &str =
    "Record your first bill to unlock AI money tips.";
/// Shown when the model call fails or times out.
pub(crate) const FALLBACK_TIP: &str =
    "The money assistant is taking a break. Remember to spend wisely!";
/// Shown when the model answers with nothing.
pub(crate) const ENCOURAGEMENT_TIP: &str =
    "Bookkeeping is a marathon: keep going and you will win!";

const PROMPT_HEADER: &str = "Based on the following bookkeeping entries, give the user \
two sentences of money advice in a warm, humorous tone:";

/// Anything that can turn a prompt into a tip.
#[async_trait]
pub(crate) trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub(crate) struct TipSettings {
    pub(crate) max_entries: usize,
    pub(crate) timeout: Duration,
}

/// One `date: type category amount` line per bill, latest first, at most
/// `max_entries` lines.
pub(crate) fn summarize_bills(bills: &[Bill], max_entries: usize) -> String {
    let mut recent: Vec<&Bill> = bills.iter().collect();
    recent.sort_by(|a, b| b.create_time.cmp(&a.create_time));
    recent
        .into_iter()
        .take(max_entries)
        .map(|b| format!("{}: {} {} {}", b.date, b.kind, b.category, b.amount))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn build_prompt(bills: &[Bill], max_entries: usize) -> String {
    format!("{PROMPT_HEADER}\n{}", summarize_bills(bills, max_entries))
}

/// Ask `summarizer` for a tip about `bills`. Never fails.
pub(crate) async fn financial_tip(
    summarizer: &dyn Summarizer,
    bills: &[Bill],
    settings: &TipSettings,
) -> String {
    if bills.is_empty() {
        return EMPTY_LEDGER_TIP.to_string();
    }

    let prompt = build_prompt(bills, settings.max_entries);
    match tokio::time::timeout(settings.timeout, summarizer.summarize(&prompt)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(Ok(_)) => {
            debug!("summarizer returned an empty tip");
            ENCOURAGEMENT_TIP.to_string()
        }
        Ok(Err(e)) => {
            warn!(error = %format!("{e:#}"), "tip request failed");
            FALLBACK_TIP.to_string()
        }
        Err(_) => {
            warn!(timeout_ms = settings.timeout.as_millis() as u64, "tip request timed out");
            FALLBACK_TIP.to_string()
        }
    }
}

/// A tip computed in the background for as long as its owner wants it.
///
/// Dropping the task, or a pending [`TipTask::join`] future, aborts the
/// request so a late answer can never reach a view that is gone.
pub(crate) struct TipTask {
    handle: JoinHandle<String>,
}

impl TipTask {
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(
        summarizer: Arc<dyn Summarizer>,
        bills: Vec<Bill>,
        settings: TipSettings,
    ) -> Self {
        let handle = tokio::spawn(async move {
            financial_tip(summarizer.as_ref(), &bills, &settings).await
        });
        Self { handle }
    }

    /// The tip, or `None` if the task was aborted first.
    pub(crate) async fn join(mut self) -> Option<String> {
        match (&mut self.handle).await {
            Ok(tip) => Some(tip),
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                warn!(error = %e, "tip task failed");
                Some(FALLBACK_TIP.to_string())
            }
        }
    }
}

impl Drop for TipTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
