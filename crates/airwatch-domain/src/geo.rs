//! Great-circle geodesy on a spherical Earth.
//!
//! All functions are pure and operate on degrees. Distances are nautical
//! miles, bearings are true course in `[0, 360)`. Near the poles the bearing
//! loses meaning faster than the math loses precision; callers get finite
//! results there, not panics.

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Great-circle distance between two points, via the haversine formula.
///
/// Returns 0 for identical points. Symmetric in its arguments.
#[must_use]
pub fn distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_NM * c
}

/// Initial true bearing from the first point toward the second, in
/// `[0, 360)`. Coincident points yield 0 by convention.
#[must_use]
pub fn bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Point reached by travelling `distance_nm` from the origin along the
/// given initial bearing. Longitude wraps across the antimeridian into
/// `[-180, 180]`.
#[must_use]
pub fn destination(lat: f64, lon: f64, bearing_deg: f64, distance_nm: f64) -> (f64, f64) {
    let delta = distance_nm / EARTH_RADIUS_NM;
    let theta = bearing_deg.to_radians();
    let phi1 = lat.to_radians();
    let lambda1 = lon.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    let lat2 = phi2.to_degrees();
    let lon2 = (lambda2.to_degrees() + 180.0).rem_euclid(360.0) - 180.0;
    (lat2, lon2)
}
