//! The authoritative in-memory aircraft set.
//!
//! Owned exclusively by the engine task; feed updates reach it as queued
//! commands, so the registry itself needs no locking. Enumeration order is
//! the insertion order of first-seen callsigns, which keeps snapshot
//! ordering deterministic across ticks. A `Vec` with a linear probe is the
//! right shape for the tens of aircraft a single region tracks.

use airwatch_domain::{Aircraft, DomainError};

/// Callsign-keyed aircraft store with stable enumeration order.
#[derive(Debug, Default)]
pub struct Registry {
    planes: Vec<Aircraft>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new aircraft or replace the kinematic state of an existing
    /// callsign in place. Malformed reports are refused here, before they
    /// can enter the tick pipeline; refusal never clamps or partially
    /// applies.
    pub fn upsert(&mut self, aircraft: Aircraft) -> Result<(), DomainError> {
        aircraft.validate()?;
        match self
            .planes
            .iter_mut()
            .find(|p| p.callsign == aircraft.callsign)
        {
            Some(slot) => *slot = aircraft,
            None => self.planes.push(aircraft),
        }
        Ok(())
    }

    /// Remove a callsign. Returns whether it was present; removing an
    /// unknown callsign is a no-op.
    pub fn remove(&mut self, callsign: &str) -> bool {
        let before = self.planes.len();
        self.planes.retain(|p| p.callsign != callsign);
        self.planes.len() != before
    }

    #[must_use]
    pub fn get(&self, callsign: &str) -> Option<&Aircraft> {
        self.planes.iter().find(|p| p.callsign == callsign)
    }

    /// All aircraft in first-seen order.
    #[must_use]
    pub fn all(&self) -> &[Aircraft] {
        &self.planes
    }

    /// Mutable pass over all aircraft for the motion step. Crate-private:
    /// external callers must go through `upsert` so callsign uniqueness
    /// holds.
    pub(crate) fn all_mut(&mut self) -> impl Iterator<Item = &mut Aircraft> {
        self.planes.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(callsign: &str, latitude: f64) -> Aircraft {
        Aircraft {
            callsign: callsign.to_string(),
            aircraft_type: "B738".to_string(),
            latitude,
            longitude: 14.1915,
            altitude_ft: 12000.0,
            speed_kn: 400.0,
            heading_deg: 270.0,
        }
    }

    #[test]
    fn upsert_inserts_then_replaces_in_place() {
        let mut registry = Registry::new();
        registry.upsert(plane("AUA123", 48.0)).unwrap();
        registry.upsert(plane("DLH456", 49.0)).unwrap();

        // Updating the first callsign must not move it or duplicate it.
        registry.upsert(plane("AUA123", 48.5)).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.all()[0].callsign, "AUA123");
        assert!((registry.all()[0].latitude - 48.5).abs() < f64::EPSILON);
    }

    #[test]
    fn upsert_with_same_fields_is_observably_a_noop() {
        let mut registry = Registry::new();
        registry.upsert(plane("AUA123", 48.0)).unwrap();
        let before = registry.all().to_vec();
        registry.upsert(plane("AUA123", 48.0)).unwrap();
        assert_eq!(registry.all(), before.as_slice());
    }

    #[test]
    fn enumeration_is_first_seen_order() {
        let mut registry = Registry::new();
        for callsign in ["CCC", "AAA", "BBB"] {
            registry.upsert(plane(callsign, 48.0)).unwrap();
        }
        registry.upsert(plane("AAA", 50.0)).unwrap();
        let order: Vec<_> = registry.all().iter().map(|p| p.callsign.as_str()).collect();
        assert_eq!(order, ["CCC", "AAA", "BBB"]);
    }

    #[test]
    fn remove_reports_presence_and_is_idempotent() {
        let mut registry = Registry::new();
        registry.upsert(plane("AUA123", 48.0)).unwrap();
        assert!(registry.remove("AUA123"));
        assert!(!registry.remove("AUA123"));
        assert!(registry.is_empty());
    }

    #[test]
    fn malformed_report_is_refused_without_side_effects() {
        let mut registry = Registry::new();
        let mut bad = plane("AUA123", 48.0);
        bad.latitude = 91.0;
        assert!(registry.upsert(bad).is_err());
        assert!(registry.get("AUA123").is_none());
    }
}
