use crate::constants::{DEG_TO_RAD, RAD_TO_DEG};
use crate::coordinate::Point;
use crate::error::ProjectionResult;
use crate::header::WcsKeywords;
use crate::utils::asin_safe;

use super::{native_point_from_radians, ProjectionFrame, ProjectionSystem};

const ANTIPODE_EPSILON: f64 = 1.0e-10;
const RIM_TOLERANCE: f64 = 1.0e-12;

/// Hammer-Aitoff (AIT) projection.
///
/// Equal-area all-sky map inside an ellipse with semi-axes 2√2 and √2 (radians).
/// The point opposite the reference point lies on the rim, where the map
/// splits.
#[derive(Debug, Clone, PartialEq)]
pub struct HammerAitoffProjection {
    frame: ProjectionFrame,
}

impl HammerAitoffProjection {
    pub fn new(ra0: f64, dec0: f64) -> ProjectionResult<Self> {
        Ok(Self {
            frame: ProjectionFrame::from_ref_point(ra0, dec0, 0.0, 0.0, None)?,
        })
    }

    pub fn from_wcs(wcs: &WcsKeywords) -> ProjectionResult<Self> {
        Ok(Self {
            frame: ProjectionFrame::from_wcs(wcs, 0.0, 0.0)?,
        })
    }
}

impl ProjectionSystem for HammerAitoffProjection {
    fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    fn proj_code(&self) -> &'static str {
        "AIT"
    }

    fn identifier(&self) -> &'static str {
        "HammerAitoff"
    }

    fn name(&self) -> &'static str {
        "Hammer-Aitoff"
    }

    fn project(&self, native: Point) -> Option<Point> {
        let half_phi = native.x() * DEG_TO_RAD / 2.0;
        let (sin_theta, cos_theta) = (native.y() * DEG_TO_RAD).sin_cos();
        let (sin_half_phi, cos_half_phi) = half_phi.sin_cos();

        let denom = 1.0 + cos_theta * cos_half_phi;
        if denom < ANTIPODE_EPSILON {
            return None;
        }

        let gamma = RAD_TO_DEG * (2.0 / denom).sqrt();
        Some(Point::new(
            2.0 * gamma * cos_theta * sin_half_phi,
            gamma * sin_theta,
        ))
    }

    fn unproject(&self, world: Point) -> Option<Point> {
        let x = world.x() * DEG_TO_RAD;
        let y = world.y() * DEG_TO_RAD;

        let z2 = 1.0 - (x / 4.0).powi(2) - (y / 2.0).powi(2);
        if z2 < 0.5 - RIM_TOLERANCE {
            return None;
        }
        let z = z2.max(0.5).sqrt();

        let theta = asin_safe(y * z);
        let phi = 2.0 * (x * z / 2.0).atan2(2.0 * z * z - 1.0);
        Some(native_point_from_radians(phi, theta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_point_close;

    #[test]
    fn test_origin_and_axes() {
        let ait = HammerAitoffProjection::new(0.0, 0.0).unwrap();

        let origin = ait.project(Point::new(0.0, 0.0)).unwrap();
        assert!(origin.x().abs() < 1e-12);
        assert!(origin.y().abs() < 1e-12);

        let pole = ait.project(Point::new(0.0, 90.0)).unwrap();
        assert!(pole.x().abs() < 1e-9);
        assert!((pole.y() - 2.0_f64.sqrt() * RAD_TO_DEG).abs() < 1e-9);

        let edge = ait.project(Point::new(179.999999, 0.0)).unwrap();
        assert!((edge.x() - 2.0 * 2.0_f64.sqrt() * RAD_TO_DEG).abs() < 1e-3);
    }

    #[test]
    fn test_antipode_on_rim() {
        let ait = HammerAitoffProjection::new(0.0, 0.0).unwrap();
        let rim = ait.direct(Point::new(180.0, 0.0)).unwrap();
        assert!((rim.x().abs() - 2.0 * 2.0_f64.sqrt() * RAD_TO_DEG).abs() < 1e-9);
        assert!(rim.y().abs() < 1e-9);

        // segments across the rim jump to the other side of the ellipse
        assert!(ait.check_broken_line(Point::new(179.0, 0.0), Point::new(181.0, 0.0)));
        assert!(!ait.check_broken_line(Point::new(10.0, 0.0), Point::new(12.0, 0.0)));
    }

    #[test]
    fn test_unnormalized_longitude_singularity() {
        let ait = HammerAitoffProjection::new(0.0, 0.0).unwrap();
        assert!(ait.project(Point::new(360.0, 0.0)).is_none());
    }

    #[test]
    fn test_outside_ellipse_rejected() {
        let ait = HammerAitoffProjection::new(0.0, 0.0).unwrap();
        assert!(ait.unproject(Point::new(3.0 * RAD_TO_DEG, 0.0)).is_none());
        assert!(ait.unproject(Point::new(0.0, 1.5 * RAD_TO_DEG)).is_none());
        assert!(ait.unproject(Point::new(2.0 * RAD_TO_DEG, 0.5 * RAD_TO_DEG)).is_some());
    }

    #[test]
    fn test_native_roundtrips() {
        let ait = HammerAitoffProjection::new(0.0, 0.0).unwrap();
        for native in [
            Point::new(30.0, 20.0),
            Point::new(-150.0, -60.0),
            Point::new(170.0, 85.0),
            Point::new(0.0, -89.0),
        ] {
            let world = ait.project(native).unwrap();
            let back = ait.unproject(world).unwrap();
            assert_point_close(back, native, 1e-9);
        }
    }

    #[test]
    fn test_celestial_roundtrip_galactic_like_center() {
        let ait = HammerAitoffProjection::new(266.4, -28.9).unwrap();
        let origin = ait.direct(Point::new(266.4, -28.9)).unwrap();
        assert!(origin.distance_to(Point::new(0.0, 0.0)) < 1e-9);

        for target in [Point::new(10.0, 40.0), Point::new(200.0, -70.0)] {
            let back = ait.inverse(ait.direct(target).unwrap()).unwrap();
            assert_point_close(back, target, 1e-9);
        }
    }

    #[test]
    fn test_classification() {
        let ait = HammerAitoffProjection::new(0.0, 0.0).unwrap();
        assert!(!ait.is_zenithal());
        assert!(!ait.is_cylindrical());
        assert!(!ait.is_conformal());
        assert_eq!(ait.proj_code(), "AIT");
        assert_eq!(ait.identifier(), "HammerAitoff");
    }
}
