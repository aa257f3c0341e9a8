//! Frame statistics.

use std::time::Duration;

/// What one frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Zero-based frame number.
    pub frame: u64,
    /// Simulation ticks run.
    pub ticks: u32,
    /// True if the scheduler dropped its backlog.
    pub backlog_dropped: bool,
    /// True if the render cache was rebuilt.
    pub cache_rebuilt: bool,
    /// Draw calls issued.
    pub draw_calls: u32,
    /// Draw, clear or present calls the backend rejected.
    pub backend_failures: u32,
    /// Wall time spent in the frame, in microseconds.
    pub total_us: u64,
}

/// Running totals over many frames.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Frames recorded.
    pub frames_recorded: u64,
    /// Sum of frame times.
    pub total_us_sum: u64,
    /// Fastest frame.
    pub min_frame_us: u64,
    /// Slowest frame.
    pub max_frame_us: u64,
    /// Ticks run.
    pub ticks: u64,
    /// Frames where the backlog was dropped.
    pub backlog_drops: u64,
    /// Render cache rebuilds.
    pub cache_rebuilds: u64,
    /// Draw calls issued.
    pub draw_calls: u64,
    /// Backend calls rejected.
    pub backend_failures: u64,
    /// Frames slower than the budget.
    pub frames_over_budget: u64,
    budget_us: u64,
}

impl FrameStatsAccumulator {
    /// Creates an accumulator counting frames slower than `budget` as over.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            ticks: 0,
            backlog_drops: 0,
            cache_rebuilds: 0,
            draw_calls: 0,
            backend_failures: 0,
            frames_over_budget: 0,
            budget_us: budget.as_micros() as u64,
        }
    }

    /// Records a frame.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.ticks += u64::from(stats.ticks);
        self.backlog_drops += u64::from(stats.backlog_dropped);
        self.cache_rebuilds += u64::from(stats.cache_rebuilt);
        self.draw_calls += u64::from(stats.draw_calls);
        self.backend_failures += u64::from(stats.backend_failures);

        if stats.total_us > self.budget_us {
            self.frames_over_budget += 1;
        }
    }

    /// Average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Average frames per second.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Average ticks per frame.
    #[must_use]
    pub fn avg_ticks_per_frame(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.ticks as f64 / self.frames_recorded as f64
    }

    /// Logs a summary at `info`.
    pub fn log_summary(&self) {
        let min_frame_us = if self.frames_recorded == 0 { 0 } else { self.min_frame_us };
        tracing::info!(
            frames = self.frames_recorded,
            avg_frame_ms = self.avg_frame_ms(),
            avg_fps = self.avg_fps(),
            min_frame_us,
            max_frame_us = self.max_frame_us,
            over_budget = self.frames_over_budget,
            ticks = self.ticks,
            backlog_drops = self.backlog_drops,
            cache_rebuilds = self.cache_rebuilds,
            draw_calls = self.draw_calls,
            backend_failures = self.backend_failures,
            "frame statistics"
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new(Duration::from_micros(16_666))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulator() {
        let mut acc = FrameStatsAccumulator::default();

        for i in 0..100 {
            acc.record(FrameStats {
                frame: i,
                ticks: 1,
                cache_rebuilt: i == 0,
                draw_calls: 50,
                total_us: 10_000 + (i * 100),
                ..FrameStats::default()
            });
        }

        assert_eq!(acc.frames_recorded, 100);
        assert_eq!(acc.cache_rebuilds, 1);
        assert_eq!(acc.draw_calls, 5000);
        assert_eq!(acc.min_frame_us, 10_000);
        assert_eq!(acc.max_frame_us, 19_900);
        // 16_700 and up are over the 16_666 us budget.
        assert_eq!(acc.frames_over_budget, 33);
        assert!(acc.avg_fps() > 50.0);
        assert!(acc.avg_fps() < 100.0);
        assert!((acc.avg_ticks_per_frame() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_accumulator() {
        let acc = FrameStatsAccumulator::default();
        assert_eq!(acc.avg_frame_ms(), 0.0);
        assert_eq!(acc.avg_fps(), 0.0);
        acc.log_summary();
    }
}
