use crate::constants::{DEG_TO_RAD, HALF_PI, QUARTER_PI, RAD_TO_DEG};
use crate::coordinate::Point;
use crate::error::ProjectionResult;
use crate::header::WcsKeywords;
use crate::utils::normalize_longitude;

use super::{ProjectionFrame, ProjectionSystem};

const POLE_EPSILON: f64 = 1.0e-10;

macro_rules! cylindrical_constructors {
    ($ty:ident) => {
        impl $ty {
            /// Projection with its native origin at (`ra0`, `dec0`) in degrees.
            pub fn new(ra0: f64, dec0: f64) -> ProjectionResult<Self> {
                Ok(Self {
                    frame: ProjectionFrame::from_ref_point(ra0, dec0, 0.0, 0.0, None)?,
                })
            }

            /// Builds from WCS keywords (CRVAL, PV1_1, PV1_2, LONPOLE, LATPOLE).
            pub fn from_wcs(wcs: &WcsKeywords) -> ProjectionResult<Self> {
                Ok(Self {
                    frame: ProjectionFrame::from_wcs(wcs, 0.0, 0.0)?,
                })
            }
        }
    };
}

/// Plate carrée (CAR): native longitude and latitude used directly as plane
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateCarreeProjection {
    frame: ProjectionFrame,
}

cylindrical_constructors!(PlateCarreeProjection);

impl ProjectionSystem for PlateCarreeProjection {
    fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    fn proj_code(&self) -> &'static str {
        "CAR"
    }

    fn identifier(&self) -> &'static str {
        "PlateCarree"
    }

    fn name(&self) -> &'static str {
        "Plate-Carrée"
    }

    fn project(&self, native: Point) -> Option<Point> {
        Some(native)
    }

    fn unproject(&self, world: Point) -> Option<Point> {
        if world.y().abs() > 90.0 {
            return None;
        }
        Some(Point::new(normalize_longitude(world.x()), world.y()))
    }

    fn is_cylindrical(&self) -> bool {
        true
    }
}

/// Mercator (MER) projection. Conformal; the native poles go to infinity and
/// have no image.
#[derive(Debug, Clone, PartialEq)]
pub struct MercatorProjection {
    frame: ProjectionFrame,
}

cylindrical_constructors!(MercatorProjection);

impl ProjectionSystem for MercatorProjection {
    fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    fn proj_code(&self) -> &'static str {
        "MER"
    }

    fn identifier(&self) -> &'static str {
        "Mercator"
    }

    fn name(&self) -> &'static str {
        "Mercator"
    }

    fn project(&self, native: Point) -> Option<Point> {
        let theta = native.y() * DEG_TO_RAD;
        if theta.abs() >= HALF_PI - POLE_EPSILON {
            return None;
        }
        let y = (QUARTER_PI + theta / 2.0).tan().ln() * RAD_TO_DEG;
        Some(Point::new(native.x(), y))
    }

    fn unproject(&self, world: Point) -> Option<Point> {
        let theta = 2.0 * (world.y() * DEG_TO_RAD).exp().atan() - HALF_PI;
        Some(Point::new(
            normalize_longitude(world.x()),
            theta * RAD_TO_DEG,
        ))
    }

    fn is_cylindrical(&self) -> bool {
        true
    }

    fn is_conformal(&self) -> bool {
        true
    }
}
