//! Rotation between celestial and native spherical coordinates.
//!
//! A projection's formulas are written in its own native frame (φ, θ). The
//! rotation carrying the celestial sphere onto that frame is fixed by three
//! angles: the celestial coordinates of the native pole (αₚ, δₚ) and the
//! native longitude of the celestial pole (φₚ). [`SphericalRotation::new`]
//! derives them from the reference point as described in FITS WCS paper II
//! (Calabretta & Greisen 2002, §2.4).
//!
//! All angles at the public boundary are degrees.

use crate::constants::{DEG_TO_RAD, RAD_TO_DEG};
use crate::coordinate::Point;
use crate::error::{ProjectionError, ProjectionResult};
use crate::utils::{normalize_longitude, normalize_ra};

const TRIG_EPSILON: f64 = 1.0e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalRotation {
    alpha_p: f64,
    delta_p: f64,
    phi_p: f64,
    sin_delta_p: f64,
    cos_delta_p: f64,
}

impl SphericalRotation {
    /// Slack, in degrees, when comparing derived latitudes with the poles.
    pub const TOLERANCE: f64 = 1.0e-5;

    /// Builds the rotation for a reference point.
    ///
    /// * `lon0`, `lat0` - celestial coordinates of the reference point
    /// * `phi0`, `theta0` - native coordinates of the same point
    /// * `phip` - native longitude of the celestial pole (LONPOLE)
    /// * `thetap` - native latitude of the celestial pole (LATPOLE), 90° when `None`
    ///
    /// `thetap` only matters when two pole latitudes satisfy the geometry; the
    /// one closer to it wins.
    ///
    /// # Errors
    ///
    /// [`ProjectionError::InvalidRotation`] when no celestial pole is
    /// consistent with the inputs.
    pub fn new(
        lon0: f64,
        lat0: f64,
        phi0: f64,
        theta0: f64,
        phip: f64,
        thetap: Option<f64>,
    ) -> ProjectionResult<Self> {
        if (theta0 - 90.0).abs() < Self::TOLERANCE {
            return Ok(Self::zenithal(lon0, lat0, phip));
        }
        if (theta0 + 90.0).abs() < Self::TOLERANCE {
            // Reference point at the native south pole: the native north pole
            // sits at its antipode.
            return Ok(Self::from_pole(lon0 + 180.0, -lat0, phip));
        }

        let latpole = thetap.unwrap_or(90.0);

        let (slat0, clat0) = (lat0 * DEG_TO_RAD).sin_cos();
        let (sthe0, cthe0) = (theta0 * DEG_TO_RAD).sin_cos();

        let (sphip, delta_p) = if phip == phi0 {
            let latp = Self::select_pole_latitude(theta0, 90.0 - lat0, latpole)?;
            (0.0, latp)
        } else {
            let (sphip, cphip) = ((phip - phi0) * DEG_TO_RAD).sin_cos();
            let x = cthe0 * cphip;
            let y = sthe0;
            let z = x.hypot(y);

            if z < TRIG_EPSILON {
                if slat0.abs() > TRIG_EPSILON {
                    return Err(ProjectionError::invalid_rotation(
                        "reference latitude must be zero when theta0 = 0 and |phip - phi0| = 90",
                    ));
                }
                // Pole latitude fixed by LATPOLE alone.
                (sphip, latpole.clamp(-90.0, 90.0))
            } else {
                let mut slz = slat0 / z;
                if slz.abs() > 1.0 {
                    if slz.abs() - 1.0 < TRIG_EPSILON {
                        slz = slz.signum();
                    } else {
                        return Err(ProjectionError::invalid_rotation(
                            "no pole latitude satisfies the reference point",
                        ));
                    }
                }
                let u = y.atan2(x) * RAD_TO_DEG;
                let v = slz.acos() * RAD_TO_DEG;
                (sphip, Self::select_pole_latitude(u, v, latpole)?)
            }
        };

        let (slatp, clatp) = (delta_p * DEG_TO_RAD).sin_cos();
        let z = clatp * clat0;
        let alpha_p = if z.abs() < TRIG_EPSILON {
            if clat0.abs() < TRIG_EPSILON {
                // Celestial pole at the reference point.
                lon0
            } else if delta_p > 0.0 {
                // Celestial north pole at the native pole.
                lon0 + phip - phi0 - 180.0
            } else {
                lon0 - phip + phi0
            }
        } else {
            let x = (sthe0 - slatp * slat0) / z;
            let y = sphip * cthe0 / clat0;
            if x == 0.0 && y == 0.0 {
                return Err(ProjectionError::invalid_rotation(
                    "celestial longitude of the native pole is undefined",
                ));
            }
            lon0 - y.atan2(x) * RAD_TO_DEG
        };

        Ok(Self::from_pole(alpha_p, delta_p, phip))
    }

    /// Rotation for a reference point at the native north pole (θ₀ = 90°).
    ///
    /// The native pole coincides with the reference point, so no triangle has
    /// to be solved and construction cannot fail.
    pub fn zenithal(lon0: f64, lat0: f64, phip: f64) -> Self {
        Self::from_pole(lon0, lat0, phip)
    }

    fn from_pole(alpha_p: f64, delta_p: f64, phi_p: f64) -> Self {
        let delta_p_rad = delta_p * DEG_TO_RAD;
        let (sin_delta_p, cos_delta_p) = delta_p_rad.sin_cos();
        Self {
            alpha_p: normalize_ra(alpha_p) * DEG_TO_RAD,
            delta_p: delta_p_rad,
            phi_p: phi_p * DEG_TO_RAD,
            sin_delta_p,
            cos_delta_p,
        }
    }

    /// Picks δₚ among the candidates `u ± v` (degrees).
    fn select_pole_latitude(u: f64, v: f64, latpole: f64) -> ProjectionResult<f64> {
        let wrap = |a: f64| {
            if a > 180.0 {
                a - 360.0
            } else if a < -180.0 {
                a + 360.0
            } else {
                a
            }
        };
        let latp1 = wrap(u + v);
        let latp2 = wrap(u - v);

        let limit = 90.0 + Self::TOLERANCE;
        let latp = if latp1.abs() < limit && latp2.abs() < limit {
            if (latpole - latp1).abs() < (latpole - latp2).abs() {
                latp1
            } else {
                latp2
            }
        } else if latp1.abs() < latp2.abs() {
            latp1
        } else {
            latp2
        };

        if latp.abs() >= limit {
            return Err(ProjectionError::invalid_rotation(
                "no valid solution for delta_p in [-90, 90]",
            ));
        }
        Ok(latp.clamp(-90.0, 90.0))
    }

    /// Native (φ, θ) to celestial (α, δ). α is returned in [0°, 360°).
    pub fn native_to_celestial(&self, native: Point) -> Point {
        let phi = native.x() * DEG_TO_RAD;
        let theta = native.y() * DEG_TO_RAD;

        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_d_phi, cos_d_phi) = (phi - self.phi_p).sin_cos();

        let sin_delta = sin_theta * self.sin_delta_p + cos_theta * self.cos_delta_p * cos_d_phi;

        // (x, y) = cos(delta) * (sin, cos) of alpha - alpha_p
        let x = -cos_theta * sin_d_phi;
        let y = sin_theta * self.cos_delta_p - cos_theta * self.sin_delta_p * cos_d_phi;
        let alpha = self.alpha_p + x.atan2(y);
        let delta = sin_delta.atan2(x.hypot(y));

        Point::new(normalize_ra(alpha * RAD_TO_DEG), delta * RAD_TO_DEG)
    }

    /// Celestial (α, δ) to native (φ, θ). φ is returned in (-180°, 180°].
    pub fn celestial_to_native(&self, celestial: Point) -> Point {
        let alpha = celestial.x() * DEG_TO_RAD;
        let delta = celestial.y() * DEG_TO_RAD;

        let (sin_delta, cos_delta) = delta.sin_cos();
        let (sin_d_alpha, cos_d_alpha) = (alpha - self.alpha_p).sin_cos();

        let sin_theta = sin_delta * self.sin_delta_p + cos_delta * self.cos_delta_p * cos_d_alpha;

        // atan2 keeps theta accurate next to the native pole, where asin is not
        let x = -cos_delta * sin_d_alpha;
        let y = sin_delta * self.cos_delta_p - cos_delta * self.sin_delta_p * cos_d_alpha;
        let phi = self.phi_p + x.atan2(y);
        let theta = sin_theta.atan2(x.hypot(y));

        Point::new(normalize_longitude(phi * RAD_TO_DEG), theta * RAD_TO_DEG)
    }

    #[inline]
    pub fn alpha_p_degrees(&self) -> f64 {
        self.alpha_p * RAD_TO_DEG
    }

    #[inline]
    pub fn delta_p_degrees(&self) -> f64 {
        self.delta_p * RAD_TO_DEG
    }

    #[inline]
    pub fn phi_p_degrees(&self) -> f64 {
        self.phi_p * RAD_TO_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_ulp_lt;
    use crate::test_helpers::{assert_angle_close, assert_point_close};

    fn rotation(lon0: f64, lat0: f64, theta0: f64, phip: f64) -> SphericalRotation {
        SphericalRotation::new(lon0, lat0, 0.0, theta0, phip, None).unwrap()
    }

    #[test]
    fn test_zenithal_reference_maps_to_native_pole() {
        let rot = rotation(180.0, 45.0, 90.0, 180.0);
        let celestial = rot.native_to_celestial(Point::new(0.0, 90.0));

        assert_ulp_lt!(celestial.ra(), 180.0, 4);
        assert_ulp_lt!(celestial.dec(), 45.0, 4);
    }

    #[test]
    fn test_zenithal_pole_parameters() {
        let rot = SphericalRotation::zenithal(120.0, -30.0, 180.0);
        assert_ulp_lt!(rot.alpha_p_degrees(), 120.0, 4);
        assert_ulp_lt!(rot.delta_p_degrees(), -30.0, 4);
        assert_ulp_lt!(rot.phi_p_degrees(), 180.0, 4);
    }

    #[test]
    fn test_celestial_to_native_at_reference() {
        let rot = rotation(180.0, 45.0, 90.0, 180.0);
        let native = rot.celestial_to_native(Point::new(180.0, 45.0));

        assert_ulp_lt!(native.y(), 90.0, 4);
    }

    #[test]
    fn test_north_of_reference_is_native_phi_180() {
        let rot = rotation(10.0, 20.0, 90.0, 180.0);
        let native = rot.celestial_to_native(Point::new(10.0, 21.0));

        assert_angle_close(native.x(), 180.0, 1e-9, "phi");
        assert!((native.y() - 89.0).abs() < 1e-9);
    }

    #[test]
    fn test_east_of_reference_is_native_phi_90() {
        let rot = rotation(10.0, 0.0, 90.0, 180.0);
        let native = rot.celestial_to_native(Point::new(11.0, 0.0));

        assert!((native.x() - 90.0).abs() < 1e-9);
        assert!((native.y() - 89.0).abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip_native_first() {
        let rot = rotation(120.0, 35.0, 90.0, 180.0);

        let original = Point::new(45.0, 60.0);
        let celestial = rot.native_to_celestial(original);
        let recovered = rot.celestial_to_native(celestial);

        assert_point_close(recovered, original, 1e-10);
    }

    #[test]
    fn test_roundtrip_celestial_first() {
        let rot = rotation(100.0, -25.0, 90.0, 180.0);

        let original = Point::new(110.0, -30.0);
        let native = rot.celestial_to_native(original);
        let recovered = rot.native_to_celestial(native);

        assert_point_close(recovered, original, 1e-10);
    }

    #[test]
    fn test_cylindrical_reference_maps_to_native_origin() {
        // theta0 = 0 with the default LONPOLE of a northern reference point
        let rot = SphericalRotation::new(150.0, 30.0, 0.0, 0.0, 0.0, None).unwrap();
        let native = rot.celestial_to_native(Point::new(150.0, 30.0));

        assert!(native.x().abs() < 1e-10);
        assert!(native.y().abs() < 1e-10);
        assert!((rot.delta_p_degrees() - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_cylindrical_southern_reference() {
        let rot = SphericalRotation::new(250.0, -40.0, 0.0, 0.0, 180.0, None).unwrap();
        let native = rot.celestial_to_native(Point::new(250.0, -40.0));

        assert!(native.x().abs() < 1e-10);
        assert!(native.y().abs() < 1e-10);
    }

    #[test]
    fn test_cylindrical_roundtrip() {
        let rot = SphericalRotation::new(300.0, 15.0, 0.0, 0.0, 0.0, None).unwrap();

        let original = Point::new(-40.0, 25.0);
        let celestial = rot.native_to_celestial(original);
        let recovered = rot.celestial_to_native(celestial);

        assert_point_close(recovered, original, 1e-10);
    }

    #[test]
    fn test_south_pole_reference() {
        let rot = SphericalRotation::new(60.0, 20.0, 0.0, -90.0, 0.0, None).unwrap();
        let celestial = rot.native_to_celestial(Point::new(0.0, -90.0));

        assert_angle_close(celestial.ra(), 60.0, 1e-9, "ra");
        assert!((celestial.dec() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_pole_branch_is_continuous() {
        let exact = SphericalRotation::new(180.0, 45.0, 0.0, 90.0, 180.0, None).unwrap();
        let near = SphericalRotation::new(180.0, 45.0, 0.0, 90.0 - 1e-4, 180.0, None).unwrap();

        for native in [
            Point::new(0.0, 89.0),
            Point::new(30.0, 80.0),
            Point::new(-120.0, 70.0),
        ] {
            let a = exact.native_to_celestial(native);
            let b = near.native_to_celestial(native);
            assert_angle_close(a.ra(), b.ra(), 1e-3, "ra");
            assert!((a.dec() - b.dec()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_latpole_disambiguates_pole_solutions() {
        let north = SphericalRotation::new(180.0, 45.0, 0.0, 0.0, 0.0, Some(90.0)).unwrap();
        let south = SphericalRotation::new(180.0, 45.0, 0.0, 0.0, 0.0, Some(-90.0)).unwrap();

        assert!((north.delta_p_degrees() - 45.0).abs() < 1e-10);
        assert!((south.delta_p_degrees() + 45.0).abs() < 1e-10);

        for rot in [north, south] {
            let reference = rot.celestial_to_native(Point::new(180.0, 45.0));
            assert!(reference.x().abs() < 1e-9);
            assert!(reference.y().abs() < 1e-9);
        }
    }

    #[test]
    fn test_explicit_lonpole_changes_orientation() {
        let default = rotation(180.0, 45.0, 90.0, 180.0);
        let rotated = rotation(180.0, 45.0, 90.0, 90.0);

        let native = Point::new(30.0, 60.0);
        let a = default.native_to_celestial(native);
        let b = rotated.native_to_celestial(native);

        assert!((a.ra() - b.ra()).abs() > 0.1 || (a.dec() - b.dec()).abs() > 0.1);
    }

    #[test]
    fn test_impossible_geometry_is_rejected() {
        // theta0 = 0 and phip - phi0 = 90 require a reference on the equator
        let result = SphericalRotation::new(0.0, 30.0, 0.0, 0.0, 90.0, None);
        assert!(matches!(
            result,
            Err(ProjectionError::InvalidRotation { .. })
        ));
    }

    #[test]
    fn test_outputs_are_normalized() {
        let rot = rotation(350.0, 10.0, 90.0, 180.0);
        for lon in [-720.0, -181.0, -1.0, 0.0, 359.0, 361.0, 1000.0] {
            let native = rot.celestial_to_native(Point::new(lon, 5.0));
            assert!(native.x() > -180.0 && native.x() <= 180.0);

            let celestial = rot.native_to_celestial(Point::new(lon, 45.0));
            assert!(celestial.ra() >= 0.0 && celestial.ra() < 360.0);
        }
    }
}
