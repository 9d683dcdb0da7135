//! Run-time lookup of projections by FITS WCS code or identifier.
//!
//! ```
//! use celestial_projection::{ProjectionRegistry, ProjectionSystem};
//!
//! let registry = ProjectionRegistry::global();
//! let stg = registry.create_by_wcs_code("STG", 83.6, -5.4).unwrap();
//! assert_eq!(stg.identifier(), "Stereographic");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{ProjectionError, ProjectionResult};
use crate::header::WcsKeywords;
use crate::projection::{
    GnomonicProjection, HammerAitoffProjection, MercatorProjection, OrthographicProjection,
    PlateCarreeProjection, Projection, StereographicProjection, ZenithalEqualAreaProjection,
    BUILTIN_PROJECTIONS,
};

/// Builds a projection from WCS keywords.
pub type ProjectionConstructor = fn(&WcsKeywords) -> ProjectionResult<Projection>;

/// One registered projection.
#[derive(Clone)]
pub struct ProjectionEntry {
    /// FITS WCS code, e.g. `TAN`.
    pub code: String,
    /// Serializable identifier, e.g. `Gnomonic`.
    pub identifier: String,
    pub constructor: ProjectionConstructor,
}

impl ProjectionEntry {
    pub fn new(
        code: impl Into<String>,
        identifier: impl Into<String>,
        constructor: ProjectionConstructor,
    ) -> Self {
        Self {
            code: code.into().trim().to_ascii_uppercase(),
            identifier: identifier.into().trim().to_string(),
            constructor,
        }
    }
}

impl fmt::Debug for ProjectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionEntry")
            .field("code", &self.code)
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct ProjectionRegistry {
    entries: HashMap<String, ProjectionEntry>,
}

impl Default for ProjectionRegistry {
    /// Registry holding the built-in projections.
    fn default() -> Self {
        let mut registry = Self::empty();
        for (code, identifier) in BUILTIN_PROJECTIONS {
            if let Some(constructor) = builtin_constructor(code) {
                registry.register(ProjectionEntry::new(code, identifier, constructor));
            }
        }
        registry
    }
}

impl ProjectionRegistry {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Shared registry with the built-in projections.
    pub fn global() -> &'static ProjectionRegistry {
        static INSTANCE: OnceLock<ProjectionRegistry> = OnceLock::new();
        INSTANCE.get_or_init(ProjectionRegistry::default)
    }

    /// Adds `entry`, replacing any entry with the same code. An entry under
    /// another code that holds the same identifier is evicted, so each
    /// identifier names exactly one code.
    pub fn register(&mut self, mut entry: ProjectionEntry) -> &mut Self {
        entry.code = entry.code.trim().to_ascii_uppercase();
        let code = entry.code.clone();
        let identifier = entry.identifier.clone();
        self.entries.retain(|existing_code, existing| {
            let evict = existing.identifier == identifier && *existing_code != code;
            if evict {
                tracing::debug!(
                    code = %existing_code,
                    identifier = %identifier,
                    replacement = %code,
                    "evicted projection registry entry"
                );
            }
            !evict
        });
        if let Some(previous) = self.entries.insert(code.clone(), entry) {
            tracing::debug!(
                code = %code,
                previous = %previous.identifier,
                "replaced projection registry entry"
            );
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered codes in alphabetical order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    fn entry_by_code(&self, code: &str) -> ProjectionResult<&ProjectionEntry> {
        self.entries
            .get(&code.trim().to_ascii_uppercase())
            .ok_or_else(|| ProjectionError::unsupported_projection(code))
    }

    fn entry_by_identifier(&self, identifier: &str) -> ProjectionResult<&ProjectionEntry> {
        let key = identifier.trim();
        self.entries
            .values()
            .find(|entry| entry.identifier == key)
            .ok_or_else(|| ProjectionError::unknown_identifier(identifier))
    }

    pub fn wcs_code_to_identifier(&self, code: &str) -> ProjectionResult<&str> {
        self.entry_by_code(code).map(|e| e.identifier.as_str())
    }

    pub fn identifier_to_wcs_code(&self, identifier: &str) -> ProjectionResult<&str> {
        self.entry_by_identifier(identifier).map(|e| e.code.as_str())
    }

    /// Projection named by the CTYPE keywords, configured from the rest of `wcs`.
    pub fn create(&self, wcs: &WcsKeywords) -> ProjectionResult<Projection> {
        let code = wcs.projection_code()?;
        let entry = self.entry_by_code(&code)?;
        Self::construct(entry, wcs)
    }

    /// Projection `code` configured from `wcs`. CTYPE keywords are not consulted.
    pub fn create_with_code(&self, code: &str, wcs: &WcsKeywords) -> ProjectionResult<Projection> {
        let entry = self.entry_by_code(code)?;
        Self::construct(entry, wcs)
    }

    pub fn create_by_wcs_code(&self, code: &str, ra: f64, dec: f64) -> ProjectionResult<Projection> {
        self.create_with_code(code, &WcsKeywords::from_reference(ra, dec))
    }

    pub fn create_by_identifier(
        &self,
        identifier: &str,
        ra: f64,
        dec: f64,
    ) -> ProjectionResult<Projection> {
        let entry = self.entry_by_identifier(identifier)?;
        Self::construct(entry, &WcsKeywords::from_reference(ra, dec))
    }

    fn construct(entry: &ProjectionEntry, wcs: &WcsKeywords) -> ProjectionResult<Projection> {
        let projection = (entry.constructor)(wcs)?;
        tracing::debug!(
            code = %entry.code,
            identifier = %entry.identifier,
            crval1 = wcs.crval1,
            crval2 = wcs.crval2,
            "created projection"
        );
        Ok(projection)
    }
}

fn builtin_constructor(code: &str) -> Option<ProjectionConstructor> {
    let constructor: ProjectionConstructor = match code {
        "TAN" => |wcs| GnomonicProjection::from_wcs(wcs).map(Projection::from),
        "STG" => |wcs| StereographicProjection::from_wcs(wcs).map(Projection::from),
        "CAR" => |wcs| PlateCarreeProjection::from_wcs(wcs).map(Projection::from),
        "MER" => |wcs| MercatorProjection::from_wcs(wcs).map(Projection::from),
        "AIT" => |wcs| HammerAitoffProjection::from_wcs(wcs).map(Projection::from),
        "ZEA" => |wcs| ZenithalEqualAreaProjection::from_wcs(wcs).map(Projection::from),
        "SIN" => |wcs| OrthographicProjection::from_wcs(wcs).map(Projection::from),
        _ => return None,
    };
    Some(constructor)
}
