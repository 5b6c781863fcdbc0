//! Unit tests for the job scheduler helpers

use chrono::{Duration, TimeZone, Utc};
use aurum::core::scheduler::{interval_to_cron, next_job, next_scan_time, ScheduledJob};

#[test]
fn test_interval_to_cron() {
    assert_eq!(interval_to_cron(30).as_deref(), Some("*/30 * * * * *"));
    assert_eq!(interval_to_cron(900).as_deref(), Some("0 */15 * * * *"));
    assert_eq!(interval_to_cron(7200).as_deref(), Some("0 0 */2 * * *"));
    assert_eq!(interval_to_cron(86_400).as_deref(), Some("0 0 0 * * *"));
}

#[test]
fn test_interval_to_cron_rejects_uneven_cadence() {
    // 7m leaves a 4m gap at every hour, 90m collapses to hourly.
    for interval in [0, 7, 90, 420, 5400, 25_200, 172_800] {
        assert_eq!(interval_to_cron(interval), None, "interval {}", interval);
    }
}

#[test]
fn test_interval_to_cron_fires_at_constant_cadence() {
    use cron::Schedule;
    use std::str::FromStr;

    for interval in [15, 300, 1200, 3600, 21_600] {
        let expr = interval_to_cron(interval).unwrap();
        let schedule = Schedule::from_str(&expr).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let times: Vec<_> = schedule.after(&start).take(50).collect();
        for pair in times.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_seconds(), interval as i64, "expr {}", expr);
        }
    }
}

#[test]
fn test_next_job_picks_earliest() {
    let t = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let later = t + Duration::minutes(15);

    assert_eq!(next_job(Some(t), Some(later)), Some((t, ScheduledJob::Scan)));
    assert_eq!(next_job(Some(later), Some(t)), Some((t, ScheduledJob::Backtest)));
    assert_eq!(next_job(Some(t), Some(t)), Some((t, ScheduledJob::Both)));
}

#[test]
fn test_next_job_with_missing_schedule() {
    let t = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    assert_eq!(next_job(Some(t), None), Some((t, ScheduledJob::Scan)));
    assert_eq!(next_job(None, Some(t)), Some((t, ScheduledJob::Backtest)));
    assert_eq!(next_job(None, None), None);
}

#[test]
fn test_news_retry_runs_before_next_scan() {
    let scheduled = Utc.with_ymd_and_hms(2024, 5, 1, 1, 0, 0).unwrap();
    let retry = scheduled - Duration::minutes(5);

    assert_eq!(next_scan_time(Some(scheduled), Some(retry)), Some(retry));
    assert_eq!(next_scan_time(Some(retry), Some(scheduled)), Some(retry));
    assert_eq!(next_scan_time(Some(scheduled), None), Some(scheduled));
    assert_eq!(next_scan_time(None, Some(retry)), Some(retry));
    assert_eq!(next_scan_time(None, None), None);
}
