//! # Server Configuration
//!
//! Environment-based configuration for the airwatch server binary.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use airwatch_engine::EngineConfig;

/// Server configuration, one value per `AIRWATCH_*` environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Tick period of the simulation loop
    pub tick_period: Duration,

    /// Horizontal separation minimum, nautical miles
    pub horizontal_threshold_nm: f64,

    /// Vertical separation minimum, feet
    pub vertical_threshold_ft: f64,

    /// Tracked region radius, km
    pub coverage_radius_km: f64,

    /// Per-viewer snapshot buffer, in ticks
    pub subscriber_buffer: usize,

    /// Grace period for a viewer to accept a snapshot send
    pub ws_send_timeout: Duration,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server_addr: env::var("AIRWATCH_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
                .parse()
                .expect("Invalid AIRWATCH_ADDR"),

            tick_period: Duration::from_millis(
                env::var("AIRWATCH_TICK_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),

            horizontal_threshold_nm: env::var("AIRWATCH_HORIZ_NM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5.0),

            vertical_threshold_ft: env::var("AIRWATCH_VERT_FT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000.0),

            coverage_radius_km: env::var("AIRWATCH_RADIUS_KM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100.0),

            subscriber_buffer: env::var("AIRWATCH_SUB_BUFFER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(32),

            ws_send_timeout: Duration::from_millis(
                env::var("AIRWATCH_WS_GRACE_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10_000),
            ),

            log_level: env::var("AIRWATCH_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// The engine slice of this configuration.
    #[must_use]
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            tick_period: self.tick_period,
            horizontal_threshold_nm: self.horizontal_threshold_nm,
            vertical_threshold_ft: self.vertical_threshold_ft,
            coverage_radius_km: self.coverage_radius_km,
            subscriber_buffer: self.subscriber_buffer,
        }
    }
}
