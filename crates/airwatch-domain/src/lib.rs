//! # Airwatch Domain Model
//!
//! Core entities and value objects for the airspace surveillance and
//! conflict-alert engine. These types are the single source of truth across
//! the engine, the server surface, and the demo feed, and their serde
//! representation *is* the wire format consumed by display clients.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod geo;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENTITIES
// =============================================================================

/// One tracked flight. The `callsign` is the primary key within the
/// registry; all other fields are the current kinematic state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub callsign: String,
    pub aircraft_type: String,
    /// Degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Degrees, `[-180, 180]`.
    pub longitude: f64,
    /// Feet, non-negative.
    pub altitude_ft: f64,
    /// Ground speed in knots, non-negative.
    pub speed_kn: f64,
    /// True course in `[0, 360)`.
    pub heading_deg: f64,
}

impl Aircraft {
    /// Check the aircraft against the admissible ranges.
    ///
    /// Malformed reports are refused at this boundary, never clamped; a
    /// rejected upsert must be reported back to the feed that sent it.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.callsign.trim().is_empty() {
            return Err(DomainError::EmptyCallsign);
        }
        if !self.latitude.is_finite()
            || !self.longitude.is_finite()
            || !(-90.0..=90.0).contains(&self.latitude)
            || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(DomainError::InvalidCoordinates {
                lat: self.latitude,
                lon: self.longitude,
            });
        }
        if !self.altitude_ft.is_finite() || self.altitude_ft < 0.0 {
            return Err(DomainError::InvalidKinematics {
                field: "altitude_ft",
                value: self.altitude_ft,
            });
        }
        if !self.speed_kn.is_finite() || self.speed_kn < 0.0 {
            return Err(DomainError::InvalidKinematics {
                field: "speed_kn",
                value: self.speed_kn,
            });
        }
        if !self.heading_deg.is_finite() || !(0.0..360.0).contains(&self.heading_deg) {
            return Err(DomainError::InvalidKinematics {
                field: "heading_deg",
                value: self.heading_deg,
            });
        }
        Ok(())
    }

    /// Great-circle distance to another aircraft in nautical miles.
    #[must_use]
    pub fn distance_nm_to(&self, other: &Aircraft) -> f64 {
        geo::distance_nm(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// A separation-minima violation between two aircraft, recomputed from
/// scratch every tick. Carries no identity across ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub plane1_callsign: String,
    pub plane2_callsign: String,
    /// Horizontal separation at detection time, nautical miles.
    pub distance_nm: f64,
    /// Absolute vertical separation, feet.
    pub altitude_diff_ft: f64,
}

impl Alert {
    /// Build an alert with the callsign pair in canonical (lexicographic)
    /// order, so a pair is never reported twice and alert lists compare
    /// cleanly across ticks.
    #[must_use]
    pub fn new(callsign_a: &str, callsign_b: &str, distance_nm: f64, altitude_diff_ft: f64) -> Self {
        let (first, second) = if callsign_a <= callsign_b {
            (callsign_a, callsign_b)
        } else {
            (callsign_b, callsign_a)
        };
        Self {
            plane1_callsign: first.to_string(),
            plane2_callsign: second.to_string(),
            distance_nm,
            altitude_diff_ft,
        }
    }

    /// Whether this alert involves the given callsign.
    #[must_use]
    pub fn involves(&self, callsign: &str) -> bool {
        self.plane1_callsign == callsign || self.plane2_callsign == callsign
    }
}

/// The complete airspace picture at one tick boundary.
///
/// Produced once per tick, then shared read-only with every subscriber;
/// serialized as-is onto the wire. Both sequences are present even when
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    pub planes: Vec<Aircraft>,
    pub alerts: Vec<Alert>,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level validation errors.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("callsign must not be empty")]
    EmptyCallsign,

    #[error("invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("invalid {field}: {value}")]
    InvalidKinematics { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(callsign: &str) -> Aircraft {
        Aircraft {
            callsign: callsign.to_string(),
            aircraft_type: "A320".to_string(),
            latitude: 48.2386,
            longitude: 14.1915,
            altitude_ft: 18000.0,
            speed_kn: 420.0,
            heading_deg: 90.0,
        }
    }

    #[test]
    fn valid_aircraft_passes() {
        assert!(plane("AUA123").validate().is_ok());
    }

    #[test]
    fn nan_latitude_is_refused() {
        let mut p = plane("AUA123");
        p.latitude = f64::NAN;
        assert!(matches!(
            p.validate(),
            Err(DomainError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn out_of_range_longitude_is_refused() {
        let mut p = plane("AUA123");
        p.longitude = 181.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn negative_speed_is_refused() {
        let mut p = plane("AUA123");
        p.speed_kn = -1.0;
        assert!(matches!(
            p.validate(),
            Err(DomainError::InvalidKinematics {
                field: "speed_kn",
                ..
            })
        ));
    }

    #[test]
    fn heading_360_is_refused() {
        let mut p = plane("AUA123");
        p.heading_deg = 360.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn alert_pair_is_canonical_regardless_of_argument_order() {
        let a = Alert::new("ZZZ999", "AAA111", 3.0, 200.0);
        let b = Alert::new("AAA111", "ZZZ999", 3.0, 200.0);
        assert_eq!(a, b);
        assert_eq!(a.plane1_callsign, "AAA111");
        assert_eq!(a.plane2_callsign, "ZZZ999");
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = Snapshot {
            planes: vec![plane("AUA123"), plane("DLH456")],
            alerts: vec![Alert::new("AUA123", "DLH456", 2.5, 300.0)],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn empty_snapshot_serializes_empty_sequences() {
        let json = serde_json::to_string(&Snapshot::default()).unwrap();
        assert_eq!(json, r#"{"planes":[],"alerts":[]}"#);
    }
}
