use std::time::{Duration, Instant};

/// Up-front estimate from a fixed per-video average; informational only
pub fn naive_estimate(count: usize, average_seconds_per_item: u64) -> Duration {
    Duration::from_secs((count as u64).saturating_mul(average_seconds_per_item))
}

/// Completion counter with throughput-based time projection
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    started: Instant,
}

/// Point-in-time view of run progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self::started_at(total, Instant::now())
    }

    pub fn started_at(total: usize, started: Instant) -> Self {
        Self {
            total,
            completed: 0,
            started,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Count one finished video and snapshot progress against the wall clock
    pub fn record_completion(&mut self) -> ProgressSnapshot {
        self.record_completion_at(self.started.elapsed())
    }

    /// Count one finished video at a known elapsed time
    pub fn record_completion_at(&mut self, elapsed: Duration) -> ProgressSnapshot {
        self.completed += 1;
        ProgressSnapshot::at(self.completed, self.total, elapsed)
    }
}

impl ProgressSnapshot {
    pub fn at(completed: usize, total: usize, elapsed: Duration) -> Self {
        Self {
            completed,
            total,
            elapsed,
        }
    }

    /// Videos per second, undefined before any time has passed
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return None;
        }
        Some(self.completed as f64 / secs)
    }

    /// Projected time for the remaining videos at the current throughput
    pub fn remaining(&self) -> Option<Duration> {
        let left = self.total.saturating_sub(self.completed);
        if left == 0 {
            return Some(Duration::ZERO);
        }

        let rate = self.throughput().filter(|rate| *rate > 0.0)?;
        Some(Duration::from_secs_f64(left as f64 / rate))
    }
}
