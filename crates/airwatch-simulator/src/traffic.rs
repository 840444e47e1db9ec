//! Demo traffic generation.

use std::collections::HashSet;

use airwatch_domain::Aircraft;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Airliner types the demo fleet is drawn from.
const AIRCRAFT_TYPES: &[&str] = &[
    "A320", "A321", "B738", "B77W", "A359", "E195", "DH8D", "CRJ9",
];

/// Airline designators for generated callsigns.
const AIRLINE_CODES: &[&str] = &["AUA", "DLH", "RYR", "EZY", "BAW", "SWR", "EWG", "WZZ"];

/// Random-traffic generator for one region.
pub struct TrafficGenerator {
    center_lat: f64,
    center_lon: f64,
    radius_km: f64,
    used_callsigns: HashSet<String>,
    altitude_noise: Normal<f64>,
    rng: rand::rngs::ThreadRng,
}

impl TrafficGenerator {
    /// Create a generator scattering traffic within `radius_km` of the
    /// center point.
    pub fn new(center_lat: f64, center_lon: f64, radius_km: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            radius_km,
            used_callsigns: HashSet::new(),
            altitude_noise: Normal::new(18_000.0, 2_000.0).expect("valid distribution"),
            rng: rand::thread_rng(),
        }
    }

    /// Generate a starting fleet with unique callsigns.
    pub fn demo_fleet(&mut self, count: usize) -> Vec<Aircraft> {
        (0..count).map(|_| self.spawn_aircraft()).collect()
    }

    /// Generate one new aircraft with a fresh callsign.
    pub fn spawn_aircraft(&mut self) -> Aircraft {
        let callsign = loop {
            let code = AIRLINE_CODES[self.rng.gen_range(0..AIRLINE_CODES.len())];
            let candidate = format!("{}{}", code, self.rng.gen_range(100..1000));
            if self.used_callsigns.insert(candidate.clone()) {
                break candidate;
            }
        };

        // Rough planar scatter around the center, the same approximation
        // the region radius itself uses (1 degree ~ 111 km).
        let angle: f64 = self.rng.gen_range(0.0_f64..360.0).to_radians();
        let distance_km = self.radius_km * self.rng.gen_range(0.0_f64..1.0).sqrt();
        let latitude = self.center_lat + (distance_km / 111.0) * angle.cos();
        let longitude = self.center_lon + (distance_km / 111.0) * angle.sin();

        Aircraft {
            callsign,
            aircraft_type: AIRCRAFT_TYPES[self.rng.gen_range(0..AIRCRAFT_TYPES.len())]
                .to_string(),
            latitude,
            longitude,
            altitude_ft: self.altitude_noise.sample(&mut self.rng).max(3_000.0),
            speed_kn: self.rng.gen_range(380.0..480.0),
            heading_deg: self.rng.gen_range(0.0..360.0),
        }
    }

    /// Nudge an aircraft's course and speed, as a live feed would between
    /// position reports.
    pub fn perturb(&mut self, aircraft: &mut Aircraft) {
        let heading_jitter: f64 = self.rng.gen_range(-15.0..15.0);
        aircraft.heading_deg = (aircraft.heading_deg + heading_jitter).rem_euclid(360.0);

        let speed_jitter: f64 = self.rng.gen_range(-10.0..10.0);
        aircraft.speed_kn = (aircraft.speed_kn + speed_jitter).clamp(250.0, 520.0);
    }

    /// Forget a retired callsign so it can eventually be reused.
    pub fn retire(&mut self, callsign: &str) {
        self.used_callsigns.remove(callsign);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_fleet_has_requested_size_and_unique_callsigns() {
        let mut generator = TrafficGenerator::new(48.2386, 14.1915, 100.0);
        let fleet = generator.demo_fleet(20);
        assert_eq!(fleet.len(), 20);

        let callsigns: HashSet<_> = fleet.iter().map(|p| p.callsign.as_str()).collect();
        assert_eq!(callsigns.len(), 20);
    }

    #[test]
    fn generated_aircraft_pass_boundary_validation() {
        let mut generator = TrafficGenerator::new(48.2386, 14.1915, 100.0);
        for plane in generator.demo_fleet(50) {
            plane.validate().unwrap_or_else(|err| {
                panic!("generated invalid aircraft {}: {err}", plane.callsign)
            });
        }
    }

    #[test]
    fn perturbed_aircraft_stay_valid() {
        let mut generator = TrafficGenerator::new(48.2386, 14.1915, 100.0);
        let mut plane = generator.spawn_aircraft();
        for _ in 0..100 {
            generator.perturb(&mut plane);
            assert!(plane.validate().is_ok());
        }
    }
}
