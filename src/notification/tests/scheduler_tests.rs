//! Unit tests for the daily scheduler.

use crate::notification::services::{
    DailyTime, Schedule, ScheduledJob, ScheduledJobError, Scheduler, next_fire_after,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[rstest]
#[case(23, 59, true)]
#[case(0, 0, true)]
#[case(24, 0, false)]
#[case(9, 60, false)]
fn daily_time_validates_bounds(#[case] hour: u32, #[case] minute: u32, #[case] valid: bool) {
    assert_eq!(DailyTime::new(hour, minute).is_ok(), valid);
}

#[rstest]
fn fires_later_today_when_time_not_yet_reached() -> eyre::Result<()> {
    let now = Utc.with_ymd_and_hms(2024, 5, 14, 7, 30, 0).single();
    let now = now.ok_or_else(|| eyre::eyre!("bad fixture timestamp"))?;
    let at = DailyTime::new(9, 0)?;

    let next = next_fire_after(now, at);

    ensure!(next == Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0).single().unwrap_or(now));
    Ok(())
}

#[rstest]
fn fires_tomorrow_when_time_already_passed() -> eyre::Result<()> {
    let now = Utc.with_ymd_and_hms(2024, 5, 14, 10, 0, 0).single();
    let now = now.ok_or_else(|| eyre::eyre!("bad fixture timestamp"))?;
    let at = DailyTime::new(9, 0)?;

    let next = next_fire_after(now, at);

    ensure!(next == Utc.with_ymd_and_hms(2024, 5, 15, 9, 0, 0).single().unwrap_or(now));
    Ok(())
}

#[rstest]
fn firing_exactly_at_the_mark_schedules_tomorrow() -> eyre::Result<()> {
    let now = Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0).single();
    let now = now.ok_or_else(|| eyre::eyre!("bad fixture timestamp"))?;
    let at = DailyTime::new(9, 0)?;

    let next = next_fire_after(now, at);

    ensure!(next == Utc.with_ymd_and_hms(2024, 5, 15, 9, 0, 0).single().unwrap_or(now));
    Ok(())
}

struct CountingJob {
    runs: AtomicUsize,
}

#[async_trait]
impl ScheduledJob for CountingJob {
    async fn run(&self) -> Result<(), ScheduledJobError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct StuckJob {
    starts: AtomicUsize,
}

#[async_trait]
impl ScheduledJob for StuckJob {
    async fn run(&self) -> Result<(), ScheduledJobError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        Ok(())
    }
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn scheduler_fires_its_entries() -> eyre::Result<()> {
    let job = Arc::new(CountingJob {
        runs: AtomicUsize::new(0),
    });
    let entry: Arc<dyn ScheduledJob> = job.clone();
    let schedule = Schedule::new().with_entry("count", DailyTime::new(9, 0)?, entry);
    let scheduler = Scheduler::new(Arc::new(DefaultClock));

    let handles = scheduler.spawn(schedule);
    // Paused time auto-advances through the sleeps; two days cover at
    // least one fire regardless of the wall-clock start.
    tokio::time::sleep(Duration::from_secs(60 * 60 * 48)).await;
    for handle in &handles {
        handle.abort();
    }

    ensure!(job.runs.load(Ordering::SeqCst) >= 1);
    Ok(())
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn overlapping_fires_are_skipped_while_a_run_is_live() -> eyre::Result<()> {
    let job = Arc::new(StuckJob {
        starts: AtomicUsize::new(0),
    });
    let entry: Arc<dyn ScheduledJob> = job.clone();
    let schedule = Schedule::new().with_entry("stuck", DailyTime::new(9, 0)?, entry);
    let scheduler = Scheduler::new(Arc::new(DefaultClock));

    let handles = scheduler.spawn(schedule);
    // Several days of fires; the first run never finishes, so every later
    // fire must hit the run lock and skip.
    tokio::time::sleep(Duration::from_secs(60 * 60 * 24 * 5)).await;
    for handle in &handles {
        handle.abort();
    }

    ensure!(job.starts.load(Ordering::SeqCst) == 1);
    Ok(())
}
