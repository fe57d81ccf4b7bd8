//! Resource usage reporting behind `--monitor`.

#[cfg(feature = "cli")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::domain::model::RunSummary;

/// Memory and timing of this process at the end of a phase.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSample {
    pub cpu_usage: f32,
    pub resident_mb: u64,
    pub peak_resident_mb: u64,
    pub elapsed: Duration,
}

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: RefCell<System>,
    pid: Option<Pid>,
    started: Instant,
    peak_resident_mb: Cell<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid()
                .map_err(|e| tracing::warn!("⚠️ Process monitoring unavailable: {}", e))
                .ok()
        } else {
            None
        };

        Self {
            system: RefCell::new(System::new()),
            pid,
            started: Instant::now(),
            peak_resident_mb: Cell::new(0),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Refreshes only this process; `None` when disabled or unavailable.
    pub fn sample(&self) -> Option<ResourceSample> {
        if !self.enabled {
            return None;
        }
        let pid = self.pid?;

        let mut system = self.system.try_borrow_mut().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            false,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        let process = system.process(pid)?;

        let resident_mb = process.memory() / 1024 / 1024;
        let peak = self.peak_resident_mb.get().max(resident_mb);
        self.peak_resident_mb.set(peak);

        Some(ResourceSample {
            cpu_usage: process.cpu_usage(),
            resident_mb,
            peak_resident_mb: peak,
            elapsed: self.started.elapsed(),
        })
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(s) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, RSS: {}MB, Peak: {}MB, Elapsed: {:?}",
                phase,
                s.cpu_usage,
                s.resident_mb,
                s.peak_resident_mb,
                s.elapsed
            );
        }
    }

    /// Final line with row throughput over the whole run.
    pub fn log_summary(&self, summary: &RunSummary) {
        if let Some(s) = self.sample() {
            tracing::info!(
                "📊 Run - {} rows in {:?} ({:.0} rows/s), Peak: {}MB",
                summary.rows_read,
                s.elapsed,
                rows_per_second(summary.rows_read, s.elapsed),
                s.peak_resident_mb
            );
        }
    }
}

#[cfg(feature = "cli")]
fn rows_per_second(rows: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        rows as f64 / secs
    } else {
        0.0
    }
}

// 非 CLI 建置時不收集任何資料
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn log_phase(&self, _phase: &str) {}

    pub fn log_summary(&self, _summary: &RunSummary) {}
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = SystemMonitor::new(false);
        assert!(!monitor.is_enabled());
        assert!(monitor.sample().is_none());
        monitor.log_summary(&RunSummary::default());
    }

    #[test]
    fn test_enabled_monitor_tracks_peak() {
        let monitor = SystemMonitor::new(true);
        if let Some(first) = monitor.sample() {
            let second = monitor.sample().unwrap();
            assert!(second.peak_resident_mb >= first.resident_mb);
            assert!(second.elapsed >= first.elapsed);
        }
    }

    #[test]
    fn test_rows_per_second() {
        assert_eq!(rows_per_second(100, Duration::from_secs(2)), 50.0);
        assert_eq!(rows_per_second(100, Duration::ZERO), 0.0);
    }
}
