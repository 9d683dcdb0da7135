use crate::constants::{DEG_TO_RAD, GNOMONIC_HORIZON_COS, RAD_TO_DEG};
use crate::coordinate::Point;
use crate::error::ProjectionResult;
use crate::header::WcsKeywords;
use crate::utils::{asin_safe, normalize_ra};

use super::{ProjectionFrame, ProjectionSystem};

/// Gnomonic (TAN) projection.
///
/// Great circles map to straight lines. The plane is tangent at the reference
/// point, north up and east toward +x; only the hemisphere around the
/// reference point has an image.
///
/// Both directions are evaluated in closed form from the reference point, so
/// the native-frame hooks are unused and the frame's LONPOLE is fixed at 180°.
#[derive(Debug, Clone, PartialEq)]
pub struct GnomonicProjection {
    frame: ProjectionFrame,
    sin_dec0: f64,
    cos_dec0: f64,
}

impl GnomonicProjection {
    /// Tangent plane at (`ra0`, `dec0`) in degrees.
    pub fn new(ra0: f64, dec0: f64) -> Self {
        let frame = ProjectionFrame::zenithal(ra0, dec0, Some(180.0));
        let (sin_dec0, cos_dec0) = frame.dec0().sin_cos();
        Self {
            frame,
            sin_dec0,
            cos_dec0,
        }
    }

    /// Builds from WCS keywords. Only CRVAL1/CRVAL2 are honoured.
    pub fn from_wcs(wcs: &WcsKeywords) -> ProjectionResult<Self> {
        let (ra0, dec0) = wcs.require_crval()?;

        if wcs.lonpole.is_some_and(|l| l != 180.0) {
            tracing::warn!(lonpole = wcs.lonpole, "gnomonic projection ignores LONPOLE");
        }
        if wcs.pv1_1.is_some_and(|p| p != 0.0) || wcs.pv1_2.is_some_and(|p| p != 90.0) {
            tracing::warn!(
                pv1_1 = wcs.pv1_1,
                pv1_2 = wcs.pv1_2,
                "gnomonic projection ignores PV1_1/PV1_2"
            );
        }

        Ok(Self::new(ra0, dec0))
    }
}

impl ProjectionSystem for GnomonicProjection {
    fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    fn proj_code(&self) -> &'static str {
        "TAN"
    }

    fn identifier(&self) -> &'static str {
        "Gnomonic"
    }

    fn name(&self) -> &'static str {
        "Gnomonic"
    }

    fn project(&self, _native: Point) -> Option<Point> {
        None
    }

    fn unproject(&self, _world: Point) -> Option<Point> {
        None
    }

    fn direct(&self, celestial: Point) -> Option<Point> {
        if !celestial.is_finite() {
            return None;
        }

        let (sin_dra, cos_dra) = (celestial.ra() * DEG_TO_RAD - self.frame.ra0()).sin_cos();
        let (sin_dec, cos_dec) = (celestial.dec() * DEG_TO_RAD).sin_cos();

        let a = cos_dec * cos_dra;
        let cos_d = self.sin_dec0 * sin_dec + self.cos_dec0 * a;
        if cos_d < GNOMONIC_HORIZON_COS {
            return None;
        }

        let f = RAD_TO_DEG / cos_d;
        Some(Point::new(
            f * cos_dec * sin_dra,
            f * (self.cos_dec0 * sin_dec - self.sin_dec0 * a),
        ))
    }

    fn inverse(&self, world: Point) -> Option<Point> {
        if !world.is_finite() {
            return None;
        }

        let x = world.x() * DEG_TO_RAD;
        let y = world.y() * DEG_TO_RAD;

        let d = x.hypot(y).atan();
        let b = x.atan2(-y);
        let (sin_d, cos_d) = d.sin_cos();
        let (sin_b, cos_b) = b.sin_cos();

        let dec = asin_safe(self.sin_dec0 * cos_d - self.cos_dec0 * sin_d * cos_b);
        let ra = self.frame.ra0()
            + (sin_d * sin_b).atan2(self.cos_dec0 * cos_d + self.sin_dec0 * sin_d * cos_b);

        Some(Point::new(normalize_ra(ra * RAD_TO_DEG), dec * RAD_TO_DEG))
    }

    fn is_zenithal(&self) -> bool {
        true
    }
}
