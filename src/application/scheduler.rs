// Snapshot scheduler - fixed-budget poll loop: fetch, store, sleep
use crate::application::clock::{Clock, Sleeper, SystemClock, TokioSleeper};
use crate::application::errors::StorageError;
use crate::application::snapshot_repository::SnapshotRepository;
use crate::application::vessel_provider::VesselProvider;
use crate::domain::geofence::BoundingBox;
use crate::domain::snapshot::{timestamp_token, Snapshot};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub interval: Duration,
    pub duration: Duration,
}

impl PollSchedule {
    pub fn from_secs(interval: u64, duration: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval),
            duration: Duration::from_secs(duration),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchedulerState {
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub polls: u64,
    pub vessels_written: usize,
    pub elapsed: Duration,
}

pub struct SnapshotScheduler {
    provider: Arc<dyn VesselProvider>,
    repository: Arc<dyn SnapshotRepository>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
    zone: BoundingBox,
    schedule: PollSchedule,
}

impl SnapshotScheduler {
    pub fn new(
        provider: Arc<dyn VesselProvider>,
        repository: Arc<dyn SnapshotRepository>,
        zone: BoundingBox,
        schedule: PollSchedule,
    ) -> Self {
        Self {
            provider,
            repository,
            clock: Arc::new(SystemClock),
            sleeper: Arc::new(TokioSleeper),
            zone,
            schedule,
        }
    }

    pub fn with_time_source(mut self, clock: Arc<dyn Clock>, sleeper: Arc<dyn Sleeper>) -> Self {
        self.clock = clock;
        self.sleeper = sleeper;
        self
    }

    /// Run ticks until the duration budget is spent.
    ///
    /// A tick is never interrupted, so the run can overshoot the budget by
    /// at most one tick's execution time. Only a storage failure ends the
    /// run early.
    pub async fn run(&self) -> Result<RunSummary, StorageError> {
        let started = self.clock.now();
        let mut poll_index = 0u64;
        let mut vessels_written = 0usize;

        tracing::info!(
            "Starting {} polling every {:?} for {:?} -> {}",
            self.provider.name(),
            self.schedule.interval,
            self.schedule.duration,
            self.repository.location()
        );

        let mut state = self.state_after(self.elapsed_since(started));
        while state == SchedulerState::Running {
            poll_index += 1;
            vessels_written += self.tick(poll_index).await?;

            let elapsed = self.elapsed_since(started);
            let remaining = self.schedule.duration.saturating_sub(elapsed);
            let sleep_for = self.schedule.interval.min(remaining);
            if !sleep_for.is_zero() {
                self.sleeper.sleep(sleep_for).await;
            }

            state = self.state_after(self.elapsed_since(started));
        }

        let summary = RunSummary {
            polls: poll_index,
            vessels_written,
            elapsed: self.elapsed_since(started),
        };
        tracing::info!(
            "Done. {} snapshots saved ({} vessel records) in {:?}",
            summary.polls,
            summary.vessels_written,
            summary.elapsed
        );

        Ok(summary)
    }

    async fn tick(&self, poll_index: u64) -> Result<usize, StorageError> {
        let captured_at = self.clock.now();
        tracing::debug!("Poll #{} at {}", poll_index, timestamp_token(&captured_at));

        let vessels = self.provider.fetch_in_zone(&self.zone).await;
        let snapshot = Snapshot::new(poll_index, captured_at, vessels);
        let path = self.repository.write(&snapshot).await?;

        tracing::info!(
            "Poll #{} | {} vessel(s) -> {}",
            poll_index,
            snapshot.vessel_count,
            path.display()
        );

        Ok(snapshot.vessel_count)
    }

    fn state_after(&self, elapsed: Duration) -> SchedulerState {
        if elapsed < self.schedule.duration {
            SchedulerState::Running
        } else {
            SchedulerState::Done
        }
    }

    /// A clock that steps backwards counts as no time elapsed.
    fn elapsed_since(&self, started: DateTime<Utc>) -> Duration {
        (self.clock.now() - started).to_std().unwrap_or(Duration::ZERO)
    }
}
