//! Zenithal projections: the reference point sits at the native pole and the
//! plane radius depends on native latitude alone.
//!
//! All three share the polar layout `x = R sin φ`, `y = -R cos φ`.

use crate::constants::{DEG_TO_RAD, HALF_PI, RAD_TO_DEG};
use crate::coordinate::Point;
use crate::error::ProjectionResult;
use crate::header::WcsKeywords;

use super::{native_point_from_radians, ProjectionFrame, ProjectionSystem};

const POLE_EPSILON: f64 = 1.0e-10;

/// Plane point at radius `r` (degrees) and native longitude `phi` (radians).
#[inline]
fn polar_to_plane(r: f64, phi: f64) -> Point {
    let (sin_phi, cos_phi) = phi.sin_cos();
    Point::new(r * sin_phi, -r * cos_phi)
}

/// (φ in radians, radius in radians) of a plane point.
#[inline]
fn plane_to_polar(world: Point) -> (f64, f64) {
    let r = world.x().hypot(world.y());
    let phi = if r == 0.0 {
        0.0
    } else {
        world.x().atan2(-world.y())
    };
    (phi, r * DEG_TO_RAD)
}

macro_rules! zenithal_constructors {
    ($ty:ident) => {
        impl $ty {
            /// Projection centred on (`ra0`, `dec0`) in degrees with the default LONPOLE.
            pub fn new(ra0: f64, dec0: f64) -> Self {
                Self {
                    frame: ProjectionFrame::zenithal(ra0, dec0, None),
                }
            }

            /// Builds from WCS keywords (CRVAL, PV1_1, PV1_2, LONPOLE, LATPOLE).
            pub fn from_wcs(wcs: &WcsKeywords) -> ProjectionResult<Self> {
                Ok(Self {
                    frame: ProjectionFrame::from_wcs(wcs, 0.0, 90.0)?,
                })
            }
        }
    };
}

/// Stereographic (STG) projection. Conformal; every point but the antipode of
/// the reference point has an image.
#[derive(Debug, Clone, PartialEq)]
pub struct StereographicProjection {
    frame: ProjectionFrame,
}

zenithal_constructors!(StereographicProjection);

impl ProjectionSystem for StereographicProjection {
    fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    fn proj_code(&self) -> &'static str {
        "STG"
    }

    fn identifier(&self) -> &'static str {
        "Stereographic"
    }

    fn name(&self) -> &'static str {
        "Stereographic"
    }

    fn project(&self, native: Point) -> Option<Point> {
        let phi = native.x() * DEG_TO_RAD;
        let (sin_theta, cos_theta) = (native.y() * DEG_TO_RAD).sin_cos();

        let denom = 1.0 + sin_theta;
        if denom < POLE_EPSILON {
            return None;
        }

        Some(polar_to_plane(2.0 * RAD_TO_DEG * cos_theta / denom, phi))
    }

    fn unproject(&self, world: Point) -> Option<Point> {
        let (phi, r) = plane_to_polar(world);
        let theta = HALF_PI - 2.0 * (r / 2.0).atan();
        Some(native_point_from_radians(phi, theta))
    }

    fn is_zenithal(&self) -> bool {
        true
    }

    fn is_conformal(&self) -> bool {
        true
    }
}

/// Zenithal equal-area (ZEA) projection. The whole sphere maps inside a disc
/// of radius 2 rad; the antipode of the reference point becomes its rim.
#[derive(Debug, Clone, PartialEq)]
pub struct ZenithalEqualAreaProjection {
    frame: ProjectionFrame,
}

zenithal_constructors!(ZenithalEqualAreaProjection);

impl ProjectionSystem for ZenithalEqualAreaProjection {
    fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    fn proj_code(&self) -> &'static str {
        "ZEA"
    }

    fn identifier(&self) -> &'static str {
        "ZenithalEqualArea"
    }

    fn name(&self) -> &'static str {
        "Zenithal Equal Area"
    }

    fn project(&self, native: Point) -> Option<Point> {
        let phi = native.x() * DEG_TO_RAD;
        let theta = native.y() * DEG_TO_RAD;
        let r = 2.0 * RAD_TO_DEG * ((HALF_PI - theta) / 2.0).sin();
        Some(polar_to_plane(r, phi))
    }

    fn unproject(&self, world: Point) -> Option<Point> {
        let (phi, r) = plane_to_polar(world);
        let half = r / 2.0;
        if half > 1.0 + POLE_EPSILON {
            return None;
        }
        let theta = HALF_PI - 2.0 * half.min(1.0).asin();
        Some(native_point_from_radians(phi, theta))
    }

    fn is_zenithal(&self) -> bool {
        true
    }
}

/// Orthographic (SIN) projection: the hemisphere around the reference point
/// as seen from infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicProjection {
    frame: ProjectionFrame,
}

zenithal_constructors!(OrthographicProjection);

impl ProjectionSystem for OrthographicProjection {
    fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    fn proj_code(&self) -> &'static str {
        "SIN"
    }

    fn identifier(&self) -> &'static str {
        "Orthographic"
    }

    fn name(&self) -> &'static str {
        "Orthographic"
    }

    fn project(&self, native: Point) -> Option<Point> {
        if native.y() < 0.0 {
            return None;
        }
        let phi = native.x() * DEG_TO_RAD;
        let cos_theta = (native.y() * DEG_TO_RAD).cos();
        Some(polar_to_plane(RAD_TO_DEG * cos_theta, phi))
    }

    fn unproject(&self, world: Point) -> Option<Point> {
        let (phi, r) = plane_to_polar(world);
        if r > 1.0 + POLE_EPSILON {
            return None;
        }
        let theta = r.min(1.0).acos();
        Some(native_point_from_radians(phi, theta))
    }

    fn is_zenithal(&self) -> bool {
        true
    }
}
