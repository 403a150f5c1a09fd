// Daily spending summary
// Sleeps until the configured local time, logs the store total, repeats

use crate::error::Result;
use crate::store::ExpenseStore;
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// What one run of the summary computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary {
    pub expense_count: usize,
    pub total: f64,
}

/// Next instant strictly after `now` whose local time is `at`. Days where
/// `at` does not exist (DST gap) are skipped.
pub fn next_run_after<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let mut day = now.date_naive();

    // A gap never spans more than a day, so this terminates quickly
    for _ in 0..3 {
        if let Some(candidate) = tz.from_local_datetime(&day.and_time(at)).earliest() {
            if candidate > *now {
                return Some(candidate);
            }
        }
        day = day.succ_opt()?;
    }
    None
}

/// Compute and log the current total.
pub fn summarize(store: &ExpenseStore) -> Result<DailySummary> {
    info!("Generating daily summary...");

    let summary = DailySummary {
        expense_count: store.len()?,
        total: store.total_spending()?,
    };

    info!(
        expenses = summary.expense_count,
        "Total spending today: {}", summary.total
    );
    Ok(summary)
}

/// One summary run with its own error boundary: errors and panics are
/// logged and swallowed.
pub async fn run_guarded(store: ExpenseStore) -> Option<DailySummary> {
    match tokio::spawn(async move { summarize(&store) }).await {
        Ok(Ok(summary)) => Some(summary),
        Ok(Err(e)) => {
            error!(error = %e, "daily summary failed, skipping this run");
            None
        }
        Err(e) => {
            error!(error = %e, "daily summary task aborted, skipping this run");
            None
        }
    }
}

/// Run the summary every day at `at` (local time), forever.
pub async fn run_daily(store: ExpenseStore, at: NaiveTime) {
    loop {
        let now = Local::now();
        let next = match next_run_after(&now, at) {
            Some(next) => next,
            None => {
                warn!(%at, "no future run time for daily summary, stopping scheduler");
                return;
            }
        };

        let delay = (next - now).to_std().unwrap_or_default();
        debug!(next_run = %next, "daily summary scheduled");
        tokio::time::sleep(delay).await;

        run_guarded(store.clone()).await;
    }
}

pub fn spawn_daily(store: ExpenseStore, at: NaiveTime) -> JoinHandle<()> {
    tokio::spawn(run_daily(store, at))
}
