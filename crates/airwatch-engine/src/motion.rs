//! Dead-reckoning motion model.
//!
//! Advances one aircraft along its current heading at its current ground
//! speed. Altitude, speed and heading are untouched; climb, descent and
//! turn dynamics are outside this engine.

use std::time::Duration;

use airwatch_domain::{geo, Aircraft, DomainError};

/// Move the aircraft forward by the elapsed time.
///
/// The travelled arc is `speed_kn * dt / 3600` nautical miles along the
/// great circle given by `heading_deg`. A zero `dt` or a parked aircraft is
/// an exact no-op. Negative elapsed time is unrepresentable by `Duration`.
///
/// If the geodesic step degenerates (non-finite output), the aircraft is
/// left at its previous position and the fault is returned so the caller
/// can report it and carry on with the rest of the fleet.
pub fn advance(aircraft: &mut Aircraft, dt: Duration) -> Result<(), DomainError> {
    let distance_nm = aircraft.speed_kn * dt.as_secs_f64() / 3600.0;
    if distance_nm == 0.0 {
        return Ok(());
    }

    let (lat, lon) = geo::destination(
        aircraft.latitude,
        aircraft.longitude,
        aircraft.heading_deg,
        distance_nm,
    );
    if !lat.is_finite() || !lon.is_finite() {
        return Err(DomainError::InvalidCoordinates { lat, lon });
    }

    aircraft.latitude = lat;
    aircraft.longitude = lon;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(speed_kn: f64, heading_deg: f64) -> Aircraft {
        Aircraft {
            callsign: "AUA123".to_string(),
            aircraft_type: "A320".to_string(),
            latitude: 48.2386,
            longitude: 14.1915,
            altitude_ft: 5000.0,
            speed_kn,
            heading_deg,
        }
    }

    #[test]
    fn zero_elapsed_time_is_a_noop() {
        let mut p = plane(450.0, 90.0);
        let before = p.clone();
        advance(&mut p, Duration::ZERO).unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn parked_aircraft_does_not_move() {
        let mut p = plane(0.0, 0.0);
        let before = p.clone();
        advance(&mut p, Duration::from_secs(60)).unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn sixty_seconds_at_360_knots_covers_six_nm() {
        let mut p = plane(360.0, 90.0);
        let (lat0, lon0) = (p.latitude, p.longitude);
        advance(&mut p, Duration::from_secs(60)).unwrap();
        let travelled = geo::distance_nm(lat0, lon0, p.latitude, p.longitude);
        assert!((travelled - 6.0).abs() < 1e-6, "got {travelled}");
    }

    #[test]
    fn altitude_speed_heading_are_untouched() {
        let mut p = plane(420.0, 135.0);
        advance(&mut p, Duration::from_secs(30)).unwrap();
        assert!((p.altitude_ft - 5000.0).abs() < f64::EPSILON);
        assert!((p.speed_kn - 420.0).abs() < f64::EPSILON);
        assert!((p.heading_deg - 135.0).abs() < f64::EPSILON);
    }

    #[test]
    fn eastbound_at_antimeridian_wraps_longitude() {
        let mut p = plane(600.0, 90.0);
        p.latitude = 0.0;
        p.longitude = 179.95;
        advance(&mut p, Duration::from_secs(120)).unwrap();
        assert!(
            p.longitude < -179.0,
            "expected wrap to the western side, got {}",
            p.longitude
        );
    }
}
