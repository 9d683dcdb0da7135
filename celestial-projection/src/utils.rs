//! Angle wrapping and great-circle distances.
//!
//! | Function | Unit | Output range |
//! |----------|------|--------------|
//! | [`wrap_0_2pi`] | radians | [0, 2π) |
//! | [`wrap_pm_pi`] | radians | (-π, π] |
//! | [`normalize_ra`] | degrees | [0°, 360°) |
//! | [`normalize_longitude`] | degrees | (-180°, 180°] |
//!
//! Wrapping goes through `libm::fmod` so negative inputs reduce the same way on
//! every target.

use crate::constants::{DEG_TO_RAD, PI, RAD_TO_DEG, TWOPI};
use crate::coordinate::Point;

/// Wraps an angle in radians to [0, 2π).
#[inline]
pub fn wrap_0_2pi(x: f64) -> f64 {
    let w = libm::fmod(x, TWOPI);
    let w = if w < 0.0 { w + TWOPI } else { w };
    // -tiny + 2π rounds up to exactly 2π
    if w >= TWOPI {
        0.0
    } else {
        w
    }
}

/// Wraps an angle in radians to (-π, π].
#[inline]
pub fn wrap_pm_pi(x: f64) -> f64 {
    let w = libm::fmod(x, TWOPI);
    if w > PI {
        w - TWOPI
    } else if w <= -PI {
        w + TWOPI
    } else {
        w
    }
}

/// Normalizes a right ascension in degrees to [0°, 360°).
#[inline]
pub fn normalize_ra(ra: f64) -> f64 {
    let w = libm::fmod(ra, 360.0);
    let w = if w < 0.0 { w + 360.0 } else { w };
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

/// Normalizes a longitude in degrees to (-180°, 180°].
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    let w = libm::fmod(lon, 360.0);
    if w > 180.0 {
        w - 360.0
    } else if w <= -180.0 {
        w + 360.0
    } else {
        w
    }
}

#[inline]
pub fn asin_safe(sin_value: f64) -> f64 {
    sin_value.clamp(-1.0, 1.0).asin()
}

#[inline]
pub fn acos_safe(cos_value: f64) -> f64 {
    cos_value.clamp(-1.0, 1.0).acos()
}

/// Great-circle distance in degrees between two (lon, lat) points in degrees.
///
/// Uses the Vincenty form, which stays accurate for both tiny and nearly
/// antipodal separations.
pub fn angular_distance(p1: Point, p2: Point) -> f64 {
    let (sin_lat1, cos_lat1) = (p1.y() * DEG_TO_RAD).sin_cos();
    let (sin_lat2, cos_lat2) = (p2.y() * DEG_TO_RAD).sin_cos();
    let (sin_dlon, cos_dlon) = ((p1.x() - p2.x()).abs() * DEG_TO_RAD).sin_cos();

    let k = cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon;
    let num = ((cos_lat2 * sin_dlon).powi(2) + k * k).sqrt();
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

    num.atan2(den) * RAD_TO_DEG
}

/// Great-circle distance in degrees using the spherical law of cosines.
///
/// Cheaper than [`angular_distance`] but loses precision below roughly one
/// arcsecond.
pub fn angular_distance_fast(p1: Point, p2: Point) -> f64 {
    let (sin_lat1, cos_lat1) = (p1.y() * DEG_TO_RAD).sin_cos();
    let (sin_lat2, cos_lat2) = (p2.y() * DEG_TO_RAD).sin_cos();
    let cos_dlon = ((p1.x() - p2.x()) * DEG_TO_RAD).cos();

    acos_safe(sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon) * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HALF_PI;

    #[test]
    fn test_wrap_0_2pi() {
        assert_eq!(wrap_0_2pi(1.0), 1.0);
        assert!((wrap_0_2pi(-HALF_PI) - 3.0 * HALF_PI).abs() < 1e-15);
        assert!((wrap_0_2pi(3.0 * PI) - PI).abs() < 1e-15);
        assert_eq!(wrap_0_2pi(TWOPI), 0.0);
        assert_eq!(wrap_0_2pi(-1e-18), 0.0);
    }

    #[test]
    fn test_wrap_pm_pi() {
        assert_eq!(wrap_pm_pi(1.0), 1.0);
        assert!((wrap_pm_pi(3.0 * HALF_PI) + HALF_PI).abs() < 1e-15);
        assert!((wrap_pm_pi(-3.0 * HALF_PI) - HALF_PI).abs() < 1e-15);
        // upper bound is inclusive, lower bound exclusive
        assert_eq!(wrap_pm_pi(PI), PI);
        assert_eq!(wrap_pm_pi(-PI), PI);
    }

    #[test]
    fn test_normalize_ra() {
        assert_eq!(normalize_ra(45.0), 45.0);
        assert_eq!(normalize_ra(360.0), 0.0);
        assert_eq!(normalize_ra(-90.0), 270.0);
        assert_eq!(normalize_ra(725.0), 5.0);
        assert_eq!(normalize_ra(-1e-14), 0.0);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(10.0), 10.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(270.0), -90.0);
        assert_eq!(normalize_longitude(-270.0), 90.0);
    }

    #[test]
    fn test_asin_safe_clamping() {
        assert_eq!(asin_safe(1.0000000001), HALF_PI);
        assert_eq!(asin_safe(-1.0000000001), -HALF_PI);
        assert_eq!(asin_safe(0.5), 0.5_f64.asin());
    }

    #[test]
    fn test_angular_distance_known_values() {
        let d = angular_distance(Point::new(0.0, 0.0), Point::new(90.0, 0.0));
        assert!((d - 90.0).abs() < 1e-12);

        let d = angular_distance(Point::new(10.0, 90.0), Point::new(200.0, 90.0));
        assert!(d.abs() < 1e-12);

        let d = angular_distance(Point::new(0.0, 0.0), Point::new(180.0, 0.0));
        assert!((d - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_angular_distance_wraps_longitude() {
        let d = angular_distance(Point::new(359.0, 0.0), Point::new(1.0, 0.0));
        assert!((d - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_fast_distance_agrees_at_large_separation() {
        let p1 = Point::new(30.0, 20.0);
        let p2 = Point::new(75.0, -10.0);
        let exact = angular_distance(p1, p2);
        let fast = angular_distance_fast(p1, p2);
        assert!((exact - fast).abs() < 1e-9);
    }
}
