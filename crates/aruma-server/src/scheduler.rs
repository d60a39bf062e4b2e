//! Background collection and refresh jobs.
//!
//! A daily cron job re-runs the producers and publishes the resulting
//! report; an interval task re-aggregates from disk between collections so
//! documents written by the CLI show up without waiting for the cron.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use aruma_collect::SnapshotStore;
use aruma_core::{AppConfig, SourceKind};

use crate::state::SharedReport;

const DAILY_COLLECT_SCHEDULE: &str = "0 0 2 * * *";

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    config: Arc<AppConfig>,
    store: SnapshotStore,
    report: SharedReport,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_collect_job(&scheduler, config, store, report).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the daily collection job (02:00 UTC).
async fn register_collect_job(
    scheduler: &JobScheduler,
    config: Arc<AppConfig>,
    store: SnapshotStore,
    report: SharedReport,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(DAILY_COLLECT_SCHEDULE, move |_uuid, _lock| {
        let config = Arc::clone(&config);
        let store = store.clone();
        let report = report.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting daily collection run");
            run_collect_job(&config, &store, &report).await;
            tracing::info!("scheduler: daily collection run complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Run the producers for every source, then publish a fresh report.
async fn run_collect_job(config: &AppConfig, store: &SnapshotStore, report: &SharedReport) {
    let watchlist = match aruma_core::load_watchlist(&config.watchlist_path) {
        Ok(watchlist) => watchlist,
        Err(e) => {
            tracing::error!(error = %e, "scheduler: failed to load watchlist; skipping run");
            return;
        }
    };

    let summary = aruma_collect::collect_all(config, &watchlist, store, &SourceKind::ALL).await;
    if summary.failed() > 0 {
        tracing::warn!(
            failed = summary.failed(),
            succeeded = summary.succeeded(),
            "scheduler: some sources failed to collect"
        );
    }

    report.refresh(store).await;
}

/// Spawns the periodic re-aggregation task. The first refresh happens one
/// full interval after startup; the caller is expected to have published an
/// initial report already.
pub fn spawn_interval_refresh(interval_secs: u64, store: SnapshotStore, report: SharedReport) {
    let period = Duration::from_secs(interval_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval fires immediately; consume that tick so the loop waits.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            report.refresh(&store).await;
        }
    });
}
