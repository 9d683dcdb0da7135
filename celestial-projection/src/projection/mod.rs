//! WCS sky projections.
//!
//! Every projection embeds a [`ProjectionFrame`], which fixes the reference
//! point and the [`SphericalRotation`] into the projection's native frame, and
//! implements [`ProjectionSystem`]. The [`Projection`] enum is the closed set of
//! built-in systems, dispatching to the concrete types.
//!
//! ```
//! use celestial_projection::{GnomonicProjection, Point, ProjectionSystem};
//!
//! let tan = GnomonicProjection::new(180.0, 45.0);
//! let world = tan.direct(Point::new(181.0, 44.0)).unwrap();
//! let back = tan.inverse(world).unwrap();
//! assert!((back.ra() - 181.0).abs() < 1e-9);
//! assert!((back.dec() - 44.0).abs() < 1e-9);
//! ```

use std::fmt;

use crate::constants::{BROKEN_LINE_THRESHOLD, DEG_TO_RAD, RAD_TO_DEG};
use crate::coordinate::Point;
use crate::error::{ProjectionError, ProjectionResult};
use crate::header::WcsKeywords;
use crate::rotation::SphericalRotation;
use crate::utils::normalize_longitude;

mod cylindrical;
mod gnomonic;
mod hammer_aitoff;
mod zenithal;

pub use cylindrical::{MercatorProjection, PlateCarreeProjection};
pub use gnomonic::GnomonicProjection;
pub use hammer_aitoff::HammerAitoffProjection;
pub use zenithal::{OrthographicProjection, StereographicProjection, ZenithalEqualAreaProjection};

/// FITS WCS codes of the built-in projections with their serializable identifiers.
pub const BUILTIN_PROJECTIONS: [(&str, &str); 7] = [
    ("TAN", "Gnomonic"),
    ("STG", "Stereographic"),
    ("CAR", "PlateCarree"),
    ("MER", "Mercator"),
    ("AIT", "HammerAitoff"),
    ("ZEA", "ZenithalEqualArea"),
    ("SIN", "Orthographic"),
];

/// Maps a FITS WCS projection code to its identifier. Case-insensitive,
/// surrounding whitespace ignored.
pub fn wcs_code_to_identifier(code: &str) -> ProjectionResult<&'static str> {
    let key = code.trim();
    BUILTIN_PROJECTIONS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(key))
        .map(|(_, id)| *id)
        .ok_or_else(|| ProjectionError::unsupported_projection(code))
}

/// Maps a projection identifier to its FITS WCS code. Case-sensitive,
/// surrounding whitespace ignored.
pub fn identifier_to_wcs_code(identifier: &str) -> ProjectionResult<&'static str> {
    let key = identifier.trim();
    BUILTIN_PROJECTIONS
        .iter()
        .find(|(_, id)| *id == key)
        .map(|(c, _)| *c)
        .ok_or_else(|| ProjectionError::unknown_identifier(identifier))
}

/// Outcome of checking a segment for a projection discontinuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// Both endpoints project and lie close enough to draw the segment.
    Continuous,
    /// Both endpoints project but jump across the plane.
    Broken,
    /// At least one endpoint has no image under the projection.
    Unprojectable,
}

/// Reference point and celestial/native rotation shared by all projections.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionFrame {
    ra0: f64,
    dec0: f64,
    phi0: f64,
    theta0: f64,
    lonpole: Option<f64>,
    latpole: Option<f64>,
    rotation: SphericalRotation,
}

impl ProjectionFrame {
    /// Default native longitude of the celestial pole: 180° when the reference
    /// latitude is below the native reference latitude, 0° otherwise, offset by `phi0`.
    pub fn default_lonpole(lat0: f64, phi0: f64, theta0: f64) -> f64 {
        let phip = if lat0 < theta0 { 180.0 } else { 0.0 } + phi0;
        if phip < -180.0 {
            phip + 360.0
        } else if phip > 180.0 {
            phip - 360.0
        } else {
            phip
        }
    }

    /// Frame from a reference point, with an optional explicit LONPOLE.
    pub fn from_ref_point(
        lng0: f64,
        lat0: f64,
        phi0: f64,
        theta0: f64,
        lonpole: Option<f64>,
    ) -> ProjectionResult<Self> {
        let phip = lonpole.unwrap_or_else(|| Self::default_lonpole(lat0, phi0, theta0));
        let rotation = SphericalRotation::new(lng0, lat0, phi0, theta0, phip, None)?;
        Ok(Self {
            ra0: lng0 * DEG_TO_RAD,
            dec0: lat0 * DEG_TO_RAD,
            phi0,
            theta0,
            lonpole,
            latpole: None,
            rotation,
        })
    }

    /// Frame for a reference point at the native pole (φ₀ = 0, θ₀ = 90°).
    pub fn zenithal(lng0: f64, lat0: f64, lonpole: Option<f64>) -> Self {
        let phip = lonpole.unwrap_or_else(|| Self::default_lonpole(lat0, 0.0, 90.0));
        Self {
            ra0: lng0 * DEG_TO_RAD,
            dec0: lat0 * DEG_TO_RAD,
            phi0: 0.0,
            theta0: 90.0,
            lonpole,
            latpole: None,
            rotation: SphericalRotation::zenithal(lng0, lat0, phip),
        }
    }

    /// Frame from WCS keywords. `phi0`/`theta0` are the projection's native
    /// reference, overridden by `PV1_1`/`PV1_2` when present.
    pub fn from_wcs(wcs: &WcsKeywords, phi0: f64, theta0: f64) -> ProjectionResult<Self> {
        let (ra0, dec0) = wcs.require_crval()?;
        let phi0 = wcs.pv1_1.unwrap_or(phi0);
        let theta0 = match wcs.pv1_2 {
            Some(t) => Self::checked_theta0(t)?,
            None => theta0,
        };

        let phip = wcs
            .lonpole
            .unwrap_or_else(|| Self::default_lonpole(dec0, phi0, theta0));
        let rotation = SphericalRotation::new(ra0, dec0, phi0, theta0, phip, wcs.latpole)?;

        Ok(Self {
            ra0: ra0 * DEG_TO_RAD,
            dec0: dec0 * DEG_TO_RAD,
            phi0,
            theta0,
            lonpole: wcs.lonpole,
            latpole: wcs.latpole,
            rotation,
        })
    }

    fn checked_theta0(theta0: f64) -> ProjectionResult<f64> {
        if theta0.abs() <= 90.0 {
            return Ok(theta0);
        }
        if theta0.abs() > 90.0 + SphericalRotation::TOLERANCE {
            return Err(ProjectionError::invalid_keyword(
                "PV1_2",
                format!("theta0 = {theta0} exceeds 90 deg"),
            ));
        }
        let clamped = 90.0_f64.copysign(theta0);
        tracing::warn!(theta0, clamped, "PV1_2 slightly beyond the pole, clamping");
        Ok(clamped)
    }

    #[inline]
    pub fn rotation(&self) -> &SphericalRotation {
        &self.rotation
    }

    /// Celestial longitude of the reference point in radians.
    #[inline]
    pub fn ra0(&self) -> f64 {
        self.ra0
    }

    /// Celestial latitude of the reference point in radians.
    #[inline]
    pub fn dec0(&self) -> f64 {
        self.dec0
    }

    #[inline]
    pub fn lonpole(&self) -> Option<f64> {
        self.lonpole
    }

    #[inline]
    pub fn latpole(&self) -> Option<f64> {
        self.latpole
    }

    /// (α₀, δ₀) of the reference point in degrees.
    pub fn reference_celestial_coordinates(&self) -> Point {
        Point::new(self.ra0 * RAD_TO_DEG, self.dec0 * RAD_TO_DEG)
    }

    /// (φ₀, θ₀) of the reference point in degrees.
    pub fn reference_native_coordinates(&self) -> Point {
        Point::new(self.phi0, self.theta0)
    }

    /// Native (longitude, latitude) of the north celestial pole in degrees, as
    /// resolved by the rotation.
    pub fn celestial_pole_native_coordinates(&self) -> Point {
        Point::new(
            self.rotation.phi_p_degrees(),
            self.rotation.delta_p_degrees(),
        )
    }

    /// WCS keywords describing this frame under projection `code`.
    pub fn to_wcs(&self, code: &str) -> WcsKeywords {
        WcsKeywords {
            ctype1: Some(format!("RA---{code}")),
            ctype2: Some(format!("DEC--{code}")),
            crval1: Some(self.ra0 * RAD_TO_DEG),
            crval2: Some(self.dec0 * RAD_TO_DEG),
            pv1_1: Some(self.phi0),
            pv1_2: Some(self.theta0),
            lonpole: self.lonpole,
            latpole: self.latpole,
        }
    }
}

/// Capabilities shared by every sky projection.
///
/// Implementors supply the native-frame hooks [`project`](Self::project) and
/// [`unproject`](Self::unproject); the celestial transforms compose them with
/// the frame's rotation. A projection with a closed-form celestial transform
/// may override [`direct`](Self::direct) and [`inverse`](Self::inverse)
/// instead and leave the hooks returning `None`.
pub trait ProjectionSystem: fmt::Debug + Send + Sync {
    fn frame(&self) -> &ProjectionFrame;

    /// FITS WCS projection code, e.g. `TAN`.
    fn proj_code(&self) -> &'static str;

    /// Serializable identifier, e.g. `Gnomonic`.
    fn identifier(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Native (φ, θ) to world coordinates. `None` outside the projection's domain.
    fn project(&self, native: Point) -> Option<Point>;

    /// World coordinates to native (φ, θ). `None` outside the projection's domain.
    fn unproject(&self, world: Point) -> Option<Point>;

    /// Celestial (α, δ) in degrees to world coordinates.
    fn direct(&self, celestial: Point) -> Option<Point> {
        let native = self.frame().rotation().celestial_to_native(celestial);
        if !native.is_finite() {
            return None;
        }
        self.project(native).filter(Point::is_finite)
    }

    /// World coordinates to celestial (α, δ) in degrees, α in [0°, 360°).
    fn inverse(&self, world: Point) -> Option<Point> {
        let native = self.unproject(world).filter(Point::is_finite)?;
        Some(self.frame().rotation().native_to_celestial(native))
    }

    /// Classifies the segment between two celestial points.
    ///
    /// The rule compares plane distance with
    /// [`BROKEN_LINE_THRESHOLD`](crate::constants::BROKEN_LINE_THRESHOLD) and
    /// knows nothing about seams. Projections whose plane scale grows without
    /// bound (STG, MER, TAN) report short segments far from the reference
    /// point as `Broken`: on STG centred at (0, 0) the 5° segment from
    /// (150, 0) to (155, 0) spans about 89 plane units.
    fn line_status(&self, cp1: Point, cp2: Point) -> LineStatus {
        match (self.direct(cp1), self.direct(cp2)) {
            (Some(w1), Some(w2)) if w1.distance_to(w2) > BROKEN_LINE_THRESHOLD => {
                LineStatus::Broken
            }
            (Some(_), Some(_)) => LineStatus::Continuous,
            _ => LineStatus::Unprojectable,
        }
    }

    /// `true` when both endpoints project but land implausibly far apart.
    ///
    /// A segment with an unprojectable endpoint is not reported as broken; use
    /// [`line_status`](Self::line_status) to tell the two cases apart.
    fn check_broken_line(&self, cp1: Point, cp2: Point) -> bool {
        self.line_status(cp1, cp2) == LineStatus::Broken
    }

    /// Equatorial coordinates of the projection origin in degrees.
    fn projection_origin(&self) -> Point {
        self.frame().reference_celestial_coordinates()
    }

    fn is_zenithal(&self) -> bool {
        false
    }

    fn is_cylindrical(&self) -> bool {
        false
    }

    fn is_conformal(&self) -> bool {
        false
    }

    fn wcs_keywords(&self) -> WcsKeywords {
        self.frame().to_wcs(self.proj_code())
    }
}

/// The built-in projection systems.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Gnomonic(GnomonicProjection),
    Stereographic(StereographicProjection),
    ZenithalEqualArea(ZenithalEqualAreaProjection),
    Orthographic(OrthographicProjection),
    PlateCarree(PlateCarreeProjection),
    Mercator(MercatorProjection),
    HammerAitoff(HammerAitoffProjection),
}

macro_rules! dispatch {
    ($self:ident, $p:ident => $body:expr) => {
        match $self {
            Projection::Gnomonic($p) => $body,
            Projection::Stereographic($p) => $body,
            Projection::ZenithalEqualArea($p) => $body,
            Projection::Orthographic($p) => $body,
            Projection::PlateCarree($p) => $body,
            Projection::Mercator($p) => $body,
            Projection::HammerAitoff($p) => $body,
        }
    };
}

impl ProjectionSystem for Projection {
    fn frame(&self) -> &ProjectionFrame {
        dispatch!(self, p => p.frame())
    }

    fn proj_code(&self) -> &'static str {
        dispatch!(self, p => p.proj_code())
    }

    fn identifier(&self) -> &'static str {
        dispatch!(self, p => p.identifier())
    }

    fn name(&self) -> &'static str {
        dispatch!(self, p => p.name())
    }

    fn project(&self, native: Point) -> Option<Point> {
        dispatch!(self, p => p.project(native))
    }

    fn unproject(&self, world: Point) -> Option<Point> {
        dispatch!(self, p => p.unproject(world))
    }

    fn direct(&self, celestial: Point) -> Option<Point> {
        dispatch!(self, p => p.direct(celestial))
    }

    fn inverse(&self, world: Point) -> Option<Point> {
        dispatch!(self, p => p.inverse(world))
    }

    fn line_status(&self, cp1: Point, cp2: Point) -> LineStatus {
        dispatch!(self, p => p.line_status(cp1, cp2))
    }

    fn is_zenithal(&self) -> bool {
        dispatch!(self, p => p.is_zenithal())
    }

    fn is_cylindrical(&self) -> bool {
        dispatch!(self, p => p.is_cylindrical())
    }

    fn is_conformal(&self) -> bool {
        dispatch!(self, p => p.is_conformal())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Projection {
                fn from(p: $ty) -> Self {
                    Projection::$variant(p)
                }
            }
        )*
    };
}

impl_from_variant!(
    Gnomonic(GnomonicProjection),
    Stereographic(StereographicProjection),
    ZenithalEqualArea(ZenithalEqualAreaProjection),
    Orthographic(OrthographicProjection),
    PlateCarree(PlateCarreeProjection),
    Mercator(MercatorProjection),
    HammerAitoff(HammerAitoffProjection),
);

/// Native longitude in degrees from a radian value, in (-180°, 180°].
#[inline]
pub(crate) fn native_point_from_radians(phi: f64, theta: f64) -> Point {
    Point::new(normalize_longitude(phi * RAD_TO_DEG), theta * RAD_TO_DEG)
}
