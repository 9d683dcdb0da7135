use crate::error::{ProjectionError, ProjectionResult};
use crate::factory::ProjectionRegistry;
use crate::header::{KeywordProvider, WcsKeywords};
use crate::projection::Projection;

/// Chainable configuration for a [`Projection`].
///
/// ```
/// use celestial_projection::{Point, ProjectionBuilder, ProjectionSystem};
///
/// let projection = ProjectionBuilder::new()
///     .wcs_code("STG")
///     .reference_point(266.4, -28.9)
///     .build()
///     .unwrap();
///
/// let origin = projection.direct(Point::new(266.4, -28.9)).unwrap();
/// assert!(origin.x().abs() < 1e-9 && origin.y().abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder<'a> {
    wcs_code: Option<String>,
    identifier: Option<String>,
    crval: Option<[f64; 2]>,
    lonpole: Option<f64>,
    latpole: Option<f64>,
    phi0: Option<f64>,
    theta0: Option<f64>,
    registry: Option<&'a ProjectionRegistry>,
}

impl<'a> ProjectionBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wcs_code(mut self, code: impl Into<String>) -> Self {
        self.wcs_code = Some(code.into());
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn reference_point(mut self, ra: f64, dec: f64) -> Self {
        self.crval = Some([ra, dec]);
        self
    }

    pub fn lonpole(mut self, lonpole: f64) -> Self {
        self.lonpole = Some(lonpole);
        self
    }

    pub fn latpole(mut self, latpole: f64) -> Self {
        self.latpole = Some(latpole);
        self
    }

    /// Native coordinates of the reference point (PV1_1, PV1_2).
    pub fn native_reference(mut self, phi0: f64, theta0: f64) -> Self {
        self.phi0 = Some(phi0);
        self.theta0 = Some(theta0);
        self
    }

    /// Registry to resolve codes and identifiers against. Defaults to
    /// [`ProjectionRegistry::global`].
    pub fn registry(mut self, registry: &'a ProjectionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builder pre-filled from header keywords.
    pub fn from_header(header: &impl KeywordProvider) -> ProjectionResult<Self> {
        let wcs = WcsKeywords::from_provider(header);
        let code = wcs.projection_code()?;
        let (ra, dec) = wcs.require_crval()?;

        let mut builder = Self::new().wcs_code(code).reference_point(ra, dec);
        builder.lonpole = wcs.lonpole;
        builder.latpole = wcs.latpole;
        builder.phi0 = wcs.pv1_1;
        builder.theta0 = wcs.pv1_2;
        Ok(builder)
    }

    pub fn build(self) -> ProjectionResult<Projection> {
        let registry = match self.registry {
            Some(registry) => registry,
            None => ProjectionRegistry::global(),
        };

        let [ra, dec] = self
            .crval
            .ok_or_else(|| ProjectionError::missing_keyword("CRVAL1"))?;

        let code = match (&self.wcs_code, &self.identifier) {
            (Some(code), Some(identifier)) => {
                let expected = registry.wcs_code_to_identifier(code)?;
                if expected != identifier.trim() {
                    return Err(ProjectionError::invalid_parameter(format!(
                        "WCS code '{code}' is '{expected}', not '{identifier}'"
                    )));
                }
                code.clone()
            }
            (Some(code), None) => code.clone(),
            (None, Some(identifier)) => registry.identifier_to_wcs_code(identifier)?.to_string(),
            (None, None) => {
                return Err(ProjectionError::invalid_parameter(
                    "a WCS code or a projection identifier is required",
                ))
            }
        };

        let wcs = WcsKeywords {
            crval1: Some(ra),
            crval2: Some(dec),
            pv1_1: self.phi0,
            pv1_2: self.theta0,
            lonpole: self.lonpole,
            latpole: self.latpole,
            ..WcsKeywords::default()
        };

        registry.create_with_code(&code, &wcs)
    }
}
