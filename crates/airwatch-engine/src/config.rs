//! Engine configuration.
//!
//! Every tunable lives here so that tests can run several independent engine
//! instances with their own tick rates and separation minima; nothing in the
//! engine reads global state.

use std::time::Duration;

/// Constructor-supplied engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Nominal period of the advance → detect → publish loop.
    pub tick_period: Duration,

    /// Horizontal separation minimum in nautical miles. Two aircraft closer
    /// than this (and closer than [`vertical_threshold_ft`] vertically)
    /// raise an alert.
    ///
    /// [`vertical_threshold_ft`]: EngineConfig::vertical_threshold_ft
    pub horizontal_threshold_nm: f64,

    /// Vertical separation minimum in feet.
    pub vertical_threshold_ft: f64,

    /// Radius of the tracked region in km. The engine does not prune
    /// aircraft by distance itself (the feed owns removal); this is
    /// operator documentation, logged at startup.
    pub coverage_radius_km: f64,

    /// Per-subscriber snapshot buffer. A viewer that falls this many ticks
    /// behind is dropped rather than allowed to stall the tick driver.
    pub subscriber_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            horizontal_threshold_nm: 5.0,
            vertical_threshold_ft: 1000.0,
            coverage_radius_km: 100.0,
            subscriber_buffer: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_aviation_like() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.tick_period, Duration::from_secs(1));
        assert!((cfg.horizontal_threshold_nm - 5.0).abs() < f64::EPSILON);
        assert!((cfg.vertical_threshold_ft - 1000.0).abs() < f64::EPSILON);
    }
}
