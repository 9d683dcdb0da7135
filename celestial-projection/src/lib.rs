//! Celestial sky projections and the spherical rotations behind them.
//!
//! Projections map equatorial coordinates (α, δ) in degrees to a projection
//! plane and back, following the FITS WCS conventions. Points outside a
//! projection's domain come back as `None`; construction problems are
//! [`ProjectionError`]s.

pub mod builder;
pub mod constants;
pub mod coordinate;
pub mod error;
pub mod factory;
pub mod header;
pub mod map;
pub mod projection;
pub mod rotation;
pub mod test_helpers;
pub mod utils;

pub use builder::ProjectionBuilder;
pub use coordinate::Point;
pub use error::{ProjectionError, ProjectionResult};
pub use factory::{ProjectionConstructor, ProjectionEntry, ProjectionRegistry};
pub use header::{KeywordMap, KeywordProvider, WcsKeywords};
pub use map::{CylindricalEqualAreaProjection, MapProjection, MercatorCylindricalProjection};
pub use projection::{
    identifier_to_wcs_code, wcs_code_to_identifier, GnomonicProjection, HammerAitoffProjection,
    LineStatus, MercatorProjection, OrthographicProjection, PlateCarreeProjection, Projection,
    ProjectionFrame, ProjectionSystem, StereographicProjection, ZenithalEqualAreaProjection,
};
pub use rotation::SphericalRotation;
