//! Cron-based scheduler driving scan cycles and the daily backtest

use crate::core::context::OrchestrationContext;
use crate::core::runtime::{CycleOutcome, SignalRuntime};
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Convert a scan interval into a six-field cron expression
/// (second minute hour day month weekday).
///
/// A `*/n` step restarts at every minute, hour or day boundary, so only
/// steps dividing that field evenly keep a constant cadence. Any other
/// interval (90s, 7m, 90m, 48h) returns `None`.
pub fn interval_to_cron(interval_seconds: u64) -> Option<String> {
    let divides =
        |unit: u64, span: u64| interval_seconds % unit == 0 && span % (interval_seconds / unit) == 0;

    match interval_seconds {
        0 => None,
        s if s < 60 && divides(1, 60) => Some(format!("*/{} * * * * *", s)),
        s if s < 3600 && divides(60, 60) => Some(format!("0 */{} * * * *", s / 60)),
        s if s < 86_400 && divides(3600, 24) => Some(format!("0 0 */{} * * *", s / 3600)),
        86_400 => Some("0 0 0 * * *".to_string()),
        _ => None,
    }
}

fn parse_schedule(expr: &str) -> Result<Schedule, BoxError> {
    Schedule::from_str(expr).map_err(|e| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Invalid cron expression '{}': {}", expr, e),
        )) as BoxError
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledJob {
    Scan,
    Backtest,
    Both,
}

/// Pick the job(s) due at the earliest of the two upcoming fire times.
pub fn next_job(
    next_scan: Option<DateTime<Utc>>,
    next_backtest: Option<DateTime<Utc>>,
) -> Option<(DateTime<Utc>, ScheduledJob)> {
    match (next_scan, next_backtest) {
        (Some(scan), Some(backtest)) if scan == backtest => Some((scan, ScheduledJob::Both)),
        (Some(scan), Some(backtest)) if backtest < scan => Some((backtest, ScheduledJob::Backtest)),
        (Some(scan), _) => Some((scan, ScheduledJob::Scan)),
        (None, Some(backtest)) => Some((backtest, ScheduledJob::Backtest)),
        (None, None) => None,
    }
}

/// Earliest of the scheduled scan and a pending news re-check.
pub fn next_scan_time(
    scheduled: Option<DateTime<Utc>>,
    retry_at: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match (scheduled, retry_at) {
        (Some(s), Some(r)) => Some(s.min(r)),
        (s, r) => s.or(r),
    }
}

/// Runs scan cycles on the evaluation interval and the backtest on its own
/// cron. The spawned task owns the orchestration context, so cycles never
/// overlap.
pub struct JobScheduler {
    runtime: Arc<SignalRuntime>,
    scan_schedule: Schedule,
    backtest_schedule: Schedule,
    news_retry: Option<chrono::Duration>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    /// # Arguments
    /// * `runtime` - orchestration runtime invoked on each tick
    /// * `interval_seconds` - scan interval in seconds (0 = disabled)
    /// * `backtest_cron` - six-field cron for the backtest report
    pub fn new(
        runtime: Arc<SignalRuntime>,
        interval_seconds: u64,
        backtest_cron: &str,
    ) -> Result<Self, BoxError> {
        if interval_seconds == 0 {
            return Err("Scheduler disabled: interval_seconds is 0".into());
        }

        let cron_expr = interval_to_cron(interval_seconds).ok_or_else(|| {
            format!(
                "Scan interval {}s does not divide a minute, hour or day evenly",
                interval_seconds
            )
        })?;
        let scan_schedule = parse_schedule(&cron_expr)?;
        let backtest_schedule = parse_schedule(backtest_cron)?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            backtest_cron = %backtest_cron,
            "JobScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            runtime,
            scan_schedule,
            backtest_schedule,
            news_retry: None,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Re-run the scan this long after a news blackout instead of waiting
    /// for the next scheduled tick.
    pub fn with_news_retry(mut self, seconds: u64) -> Self {
        self.news_retry = i64::try_from(seconds).ok().and_then(chrono::Duration::try_seconds);
        self
    }

    pub async fn start(&self) -> Result<(), BoxError> {
        let runtime = self.runtime.clone();
        let scan_schedule = self.scan_schedule.clone();
        let backtest_schedule = self.backtest_schedule.clone();
        let news_retry = self.news_retry;
        if let Some(delay) = news_retry {
            info!(seconds = delay.num_seconds(), "JobScheduler: news blackout re-check enabled");
        }

        let handle = tokio::spawn(async move {
            let mut ctx = OrchestrationContext::new();
            let retry_after = |outcome: Option<CycleOutcome>| match (outcome, news_retry) {
                (Some(CycleOutcome::NewsBlackout), Some(delay)) => Some(Utc::now() + delay),
                _ => None,
            };

            info!("JobScheduler: running initial scan");
            let mut retry_at = retry_after(runtime.tick(&mut ctx, Utc::now()).await);

            loop {
                let due = next_job(
                    next_scan_time(scan_schedule.upcoming(Utc).next(), retry_at),
                    backtest_schedule.upcoming(Utc).next(),
                );
                let Some((at, job)) = due else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };

                let now = Utc::now();
                if at > now {
                    let duration = (at - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }

                debug!(job = ?job, "JobScheduler: cron tick");
                if matches!(job, ScheduledJob::Backtest | ScheduledJob::Both) {
                    if let Err(e) = runtime.run_backtest_job().await {
                        error!(error = %e, "JobScheduler: backtest job failed");
                    }
                }
                if matches!(job, ScheduledJob::Scan | ScheduledJob::Both) {
                    retry_at = retry_after(runtime.tick(&mut ctx, Utc::now()).await);
                    if let Some(at) = retry_at {
                        debug!(retry_at = %at, "JobScheduler: news blackout, re-checking early");
                    }
                }
            }
        });

        *self.handle.write().await = Some(handle);

        info!("JobScheduler: started successfully");
        Ok(())
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
