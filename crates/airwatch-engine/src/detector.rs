//! Pairwise proximity conflict detection.

use airwatch_domain::{Aircraft, Alert};
use tracing::warn;

/// Scan every unordered pair of aircraft and collect an [`Alert`] for each
/// pair closer than both separation minima at once (strictly below the
/// horizontal threshold in nm AND strictly below the vertical threshold in
/// ft).
///
/// The scan is O(n²) over the registry, which is fine for the tens of
/// aircraft one region tracks; a spatial grid index is the upgrade path if
/// the population ever grows past that. Pairs are emitted in registry
/// order with the callsigns canonicalized, so a pair appears at most once
/// and alert lists compare cleanly between ticks.
#[must_use]
pub fn detect(
    planes: &[Aircraft],
    horizontal_threshold_nm: f64,
    vertical_threshold_ft: f64,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for (i, a) in planes.iter().enumerate() {
        for b in &planes[i + 1..] {
            let distance_nm = a.distance_nm_to(b);
            if !distance_nm.is_finite() {
                // Skip the pair, keep the pass alive for everyone else.
                warn!(
                    plane1 = %a.callsign,
                    plane2 = %b.callsign,
                    "non-finite separation, skipping pair"
                );
                continue;
            }

            let altitude_diff_ft = (a.altitude_ft - b.altitude_ft).abs();
            if distance_nm < horizontal_threshold_nm && altitude_diff_ft < vertical_threshold_ft {
                alerts.push(Alert::new(
                    &a.callsign,
                    &b.callsign,
                    distance_nm,
                    altitude_diff_ft,
                ));
            }
        }
    }

    alerts
}
