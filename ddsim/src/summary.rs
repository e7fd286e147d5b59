//! Run counters, progress lines and the end-of-run summary.

use crate::worker::UnitReport;
use log::info;
use std::fmt;
use std::time::{Duration, Instant};

/// Accumulated by the consuming thread as unit reports arrive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub requested: usize,
    pub rows_emitted: usize,
    pub deals_failed: usize,
    pub batches_completed: usize,
    pub units_crashed: usize,
}

impl RunCounters {
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    pub fn record(&mut self, report: &UnitReport) {
        self.rows_emitted += report.rows.len();
        self.deals_failed += report.failed;
        self.batches_completed += 1;
        if report.crashed {
            self.units_crashed += 1;
        }
    }

    /// Deals accounted for so far, successful or not
    pub fn processed(&self) -> usize {
        self.rows_emitted + self.deals_failed
    }

    pub fn finish(&self, elapsed: Duration) -> RunSummary {
        RunSummary {
            requested: self.requested,
            rows_emitted: self.rows_emitted,
            deals_failed: self.deals_failed,
            batches_completed: self.batches_completed,
            units_crashed: self.units_crashed,
            elapsed,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub requested: usize,
    pub rows_emitted: usize,
    pub deals_failed: usize,
    pub batches_completed: usize,
    pub units_crashed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Rows emitted over deals requested; 1.0 for an empty request
    pub fn success_ratio(&self) -> f64 {
        if self.requested == 0 {
            1.0
        } else {
            self.rows_emitted as f64 / self.requested as f64
        }
    }

    pub fn deals_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.rows_emitted + self.deals_failed) as f64 / secs
        } else {
            0.0
        }
    }

    /// Deals were requested but not a single row came out
    pub fn is_total_failure(&self) -> bool {
        self.requested > 0 && self.rows_emitted == 0
    }

    pub fn log(&self) {
        info!(
            "emitted {} of {} rows in {:.1}s ({:.1}% success, {:.1} deals/s)",
            self.rows_emitted,
            self.requested,
            self.elapsed.as_secs_f64(),
            self.success_ratio() * 100.0,
            self.deals_per_second()
        );
        if self.deals_failed > 0 {
            info!(
                "{} deals failed across {} batches ({} crashed units)",
                self.deals_failed, self.batches_completed, self.units_crashed
            );
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} rows, {} failed, {} batches, {} crashed, {:.1}s",
            self.rows_emitted,
            self.requested,
            self.deals_failed,
            self.batches_completed,
            self.units_crashed,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Throttled progress reporting on the log channel
pub struct Progress {
    started: Instant,
    interval: Duration,
    last_report: Instant,
}

impl Progress {
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            interval,
            last_report: now,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log a progress line if at least one interval has passed since the last
    pub fn tick(&mut self, counters: &RunCounters) {
        let now = Instant::now();
        if now.duration_since(self.last_report) >= self.interval {
            self.last_report = now;
            info!("{}", self.line(counters));
        }
    }

    /// Always log a closing progress line
    pub fn finish(&mut self, counters: &RunCounters) {
        self.last_report = Instant::now();
        info!("{}", self.line(counters));
    }

    fn line(&self, counters: &RunCounters) -> String {
        let processed = counters.processed();
        let elapsed = self.elapsed();
        let percent = if counters.requested == 0 {
            100.0
        } else {
            processed as f64 * 100.0 / counters.requested as f64
        };

        let mut line = format!(
            "progress: {}/{} ({:.1}%) rows={} failed={} elapsed={:.1}s",
            processed,
            counters.requested,
            percent,
            counters.rows_emitted,
            counters.deals_failed,
            elapsed.as_secs_f64()
        );
        if let Some(eta) = estimate_remaining(elapsed, processed, counters.requested) {
            line.push_str(&format!(" eta={:.1}s", eta.as_secs_f64()));
        }
        line
    }
}

/// Linear extrapolation from the rate so far
fn estimate_remaining(elapsed: Duration, processed: usize, requested: usize) -> Option<Duration> {
    if processed == 0 || processed >= requested {
        return None;
    }
    let remaining = (requested - processed) as f64;
    Some(Duration::from_secs_f64(
        elapsed.as_secs_f64() * remaining / processed as f64,
    ))
}
