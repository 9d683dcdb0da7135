//! Plain map projections of the sphere, independent of the WCS frame machinery.
//!
//! These take and return radians and have no pole rotation: the latitude
//! origin is the equator and only the central longitude is configurable.

use std::fmt;

use crate::utils::{wrap_0_2pi, wrap_pm_pi};

pub trait MapProjection: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// (longitude, latitude) in radians to plane (x, y).
    fn spherical_to_rectangular(&self, lon: f64, lat: f64) -> (f64, f64);

    /// Plane (x, y) to (longitude, latitude) in radians, longitude in [0, 2π).
    fn rectangular_to_spherical(&self, x: f64, y: f64) -> (f64, f64);

    fn is_cylindrical(&self) -> bool {
        false
    }

    fn is_conformal(&self) -> bool {
        false
    }
}

/// Normal-aspect Mercator on the unit sphere.
///
/// `spherical_to_rectangular` does not guard the poles: `tan(±π/2)` diverges
/// and the caller has to keep latitudes strictly inside (-π/2, π/2). The
/// reverse direction is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorCylindricalProjection {
    lon0: f64,
}

impl MercatorCylindricalProjection {
    /// Projection centred on longitude `lon0` (radians).
    pub fn new(lon0: f64) -> Self {
        Self { lon0 }
    }

    #[inline]
    pub fn lon0(&self) -> f64 {
        self.lon0
    }
}

impl Default for MercatorCylindricalProjection {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl MapProjection for MercatorCylindricalProjection {
    fn name(&self) -> &'static str {
        "Mercator"
    }

    fn spherical_to_rectangular(&self, lon: f64, lat: f64) -> (f64, f64) {
        (wrap_pm_pi(lon - self.lon0), lat.tan().asinh())
    }

    fn rectangular_to_spherical(&self, x: f64, y: f64) -> (f64, f64) {
        (wrap_0_2pi(self.lon0 + x), y.sinh().atan())
    }

    fn is_cylindrical(&self) -> bool {
        true
    }

    fn is_conformal(&self) -> bool {
        true
    }
}

/// Lambert cylindrical equal-area projection on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalEqualAreaProjection {
    lon0: f64,
}

impl CylindricalEqualAreaProjection {
    pub fn new(lon0: f64) -> Self {
        Self { lon0 }
    }

    #[inline]
    pub fn lon0(&self) -> f64 {
        self.lon0
    }
}

impl Default for CylindricalEqualAreaProjection {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl MapProjection for CylindricalEqualAreaProjection {
    fn name(&self) -> &'static str {
        "Cylindrical Equal Area"
    }

    fn spherical_to_rectangular(&self, lon: f64, lat: f64) -> (f64, f64) {
        (wrap_pm_pi(lon - self.lon0), lat.sin())
    }

    fn rectangular_to_spherical(&self, x: f64, y: f64) -> (f64, f64) {
        (wrap_0_2pi(self.lon0 + x), y.clamp(-1.0, 1.0).asin())
    }

    fn is_cylindrical(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HALF_PI, PI, QUARTER_PI, TWOPI};

    #[test]
    fn test_mercator_equator_and_origin() {
        let mer = MercatorCylindricalProjection::new(1.0);
        let (x, y) = mer.spherical_to_rectangular(1.0, 0.0);
        assert_eq!(x, 0.0);
        assert_eq!(y, 0.0);

        let (x, y) = mer.spherical_to_rectangular(1.5, QUARTER_PI);
        assert!((x - 0.5).abs() < 1e-15);
        assert!((y - 1.0_f64.asinh()).abs() < 1e-15);
    }

    #[test]
    fn test_mercator_x_range() {
        let mer = MercatorCylindricalProjection::new(0.5);
        for lon in [-10.0, -PI, 0.0, 0.5 + PI, 3.0, 7.0, 20.0] {
            let (x, _) = mer.spherical_to_rectangular(lon, 0.1);
            assert!(x > -PI && x <= PI, "x = {x} for lon = {lon}");
        }
    }

    #[test]
    fn test_mercator_lon_range() {
        let mer = MercatorCylindricalProjection::new(6.0);
        for x in [-20.0, -PI, 0.0, 0.283185307179586, PI, 50.0] {
            let (lon, _) = mer.rectangular_to_spherical(x, 0.0);
            assert!((0.0..TWOPI).contains(&lon), "lon = {lon} for x = {x}");
        }
    }

    #[test]
    fn test_mercator_inverse_is_total() {
        let mer = MercatorCylindricalProjection::default();

        let (lon, lat) = mer.rectangular_to_spherical(0.0, 10.0);
        assert!(lon.is_finite() && lat.is_finite());
        assert!(lat < HALF_PI);
        assert!(lat > HALF_PI - 1e-3);

        let (_, lat) = mer.rectangular_to_spherical(0.0, -10.0);
        assert!(lat > -HALF_PI);

        let (_, lat) = mer.rectangular_to_spherical(0.0, 1.0e6);
        assert!(lat.is_finite());
        assert!(lat <= HALF_PI);
    }

    #[test]
    fn test_mercator_roundtrip() {
        let mer = MercatorCylindricalProjection::new(2.0);
        for (lon, lat) in [(2.5, 0.3), (5.9, -1.2), (0.1, 1.5)] {
            let (x, y) = mer.spherical_to_rectangular(lon, lat);
            let (lon2, lat2) = mer.rectangular_to_spherical(x, y);
            assert!((lon2 - lon).abs() < 1e-12);
            assert!((lat2 - lat).abs() < 1e-12);
        }
    }

    #[test]
    fn test_mercator_flags() {
        let mer = MercatorCylindricalProjection::default();
        assert!(mer.is_cylindrical());
        assert!(mer.is_conformal());
        assert_eq!(mer.name(), "Mercator");
    }

    #[test]
    fn test_cea_roundtrip_and_flags() {
        let cea = CylindricalEqualAreaProjection::new(PI);
        let (x, y) = cea.spherical_to_rectangular(PI + 0.25, -0.7);
        assert!((x - 0.25).abs() < 1e-15);
        assert!((y - (-0.7_f64).sin()).abs() < 1e-15);

        let (lon, lat) = cea.rectangular_to_spherical(x, y);
        assert!((lon - (PI + 0.25)).abs() < 1e-12);
        assert!((lat + 0.7).abs() < 1e-12);

        assert!(cea.is_cylindrical());
        assert!(!cea.is_conformal());
    }

    #[test]
    fn test_cea_clamps_beyond_poles() {
        let cea = CylindricalEqualAreaProjection::default();
        let (_, lat) = cea.rectangular_to_spherical(0.0, 1.5);
        assert_eq!(lat, HALF_PI);
    }

    #[test]
    fn test_trait_objects() {
        let projections: Vec<Box<dyn MapProjection>> = vec![
            Box::new(MercatorCylindricalProjection::default()),
            Box::new(CylindricalEqualAreaProjection::default()),
        ];
        for projection in &projections {
            let (x, y) = projection.spherical_to_rectangular(0.2, 0.1);
            let (lon, lat) = projection.rectangular_to_spherical(x, y);
            assert!((lon - 0.2).abs() < 1e-12, "{}", projection.name());
            assert!((lat - 0.1).abs() < 1e-12, "{}", projection.name());
        }
    }
}
