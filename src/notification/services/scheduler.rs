//! Daily job scheduling.
//!
//! The schedule is an explicit table handed to the scheduler at process
//! start, not ambient configuration. Each entry fires at a fixed wall-clock
//! time every day, independent of whether the previous run finished; an
//! entry-level try-lock skips (and logs) a fire that would overlap a run
//! still in flight.

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A wall-clock time of day in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTime {
    hour: u32,
    minute: u32,
}

/// Error returned for out-of-range daily times.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid daily time {hour:02}:{minute:02}")]
pub struct InvalidDailyTime {
    /// Rejected hour value.
    pub hour: u32,
    /// Rejected minute value.
    pub minute: u32,
}

impl DailyTime {
    /// Creates a validated time of day.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDailyTime`] when `hour` is not below 24 or `minute`
    /// not below 60.
    pub const fn new(hour: u32, minute: u32) -> Result<Self, InvalidDailyTime> {
        if hour >= 24 || minute >= 60 {
            return Err(InvalidDailyTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(self) -> u32 {
        self.minute
    }
}

/// Returns the next instant strictly after `now` at which the given daily
/// time occurs.
#[must_use]
pub fn next_fire_after(now: DateTime<Utc>, at: DailyTime) -> DateTime<Utc> {
    let today = now
        .date_naive()
        .and_hms_opt(at.hour(), at.minute(), 0)
        .map(|naive| naive.and_utc());
    match today {
        Some(candidate) if candidate > now => candidate,
        Some(candidate) => candidate + Duration::days(1),
        // Unreachable for a validated DailyTime; fall back to one day out.
        None => now + Duration::days(1),
    }
}

/// Error surface for scheduled job runs.
#[derive(Debug, Clone, Error)]
#[error("scheduled job failed: {0}")]
pub struct ScheduledJobError(Arc<dyn std::error::Error + Send + Sync>);

impl ScheduledJobError {
    /// Wraps the underlying job error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// A job the scheduler can fire.
#[async_trait::async_trait]
pub trait ScheduledJob: Send + Sync {
    /// Runs the job once.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduledJobError`] when the run fails; the scheduler logs
    /// it and waits for the next fire.
    async fn run(&self) -> Result<(), ScheduledJobError>;
}

/// One named entry in the schedule table.
#[derive(Clone)]
pub struct ScheduleEntry {
    /// Job name used in logs.
    pub name: String,
    /// Daily fire time (UTC). The reference deployment runs the overdue
    /// reminder at 09:00.
    pub at: DailyTime,
    /// The job to fire.
    pub job: Arc<dyn ScheduledJob>,
}

/// Explicit schedule table passed to [`Scheduler::spawn`].
#[derive(Clone, Default)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a named daily entry.
    #[must_use]
    pub fn with_entry(
        mut self,
        name: impl Into<String>,
        at: DailyTime,
        job: Arc<dyn ScheduledJob>,
    ) -> Self {
        self.entries.push(ScheduleEntry {
            name: name.into(),
            at,
            job,
        });
        self
    }
}

/// Fires schedule entries at their daily times on dedicated tasks.
#[derive(Clone)]
pub struct Scheduler<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
}

impl<C> Scheduler<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a scheduler using the given clock.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Spawns one timer task per schedule entry and returns their handles.
    ///
    /// Each fire runs on its own task so a slow job never delays the timer;
    /// the entry's run lock turns an overlapping fire into a logged skip.
    pub fn spawn(&self, schedule: Schedule) -> Vec<JoinHandle<()>> {
        schedule
            .entries
            .into_iter()
            .map(|entry| {
                let clock = Arc::clone(&self.clock);
                tokio::spawn(async move {
                    let run_lock = Arc::new(Mutex::new(()));
                    loop {
                        let now = clock.utc();
                        let next = next_fire_after(now, entry.at);
                        let delay = (next - now).to_std().unwrap_or_default();
                        tokio::time::sleep(delay).await;
                        tokio::spawn(run_guarded(
                            entry.name.clone(),
                            Arc::clone(&entry.job),
                            Arc::clone(&run_lock),
                        ));
                    }
                })
            })
            .collect()
    }
}

async fn run_guarded(name: String, job: Arc<dyn ScheduledJob>, run_lock: Arc<Mutex<()>>) {
    let Ok(_guard) = run_lock.try_lock() else {
        warn!(job = %name, "previous run still active, skipping this fire");
        return;
    };
    match job.run().await {
        Ok(()) => info!(job = %name, "scheduled run finished"),
        Err(err) => warn!(job = %name, error = %err, "scheduled run failed"),
    }
}
