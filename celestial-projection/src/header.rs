use std::collections::HashMap;

use crate::error::{ProjectionError, ProjectionResult};

pub trait KeywordProvider {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_float(&self, key: &str) -> Option<f64>;
}

#[derive(Debug, Clone, Default)]
pub struct KeywordMap {
    strings: HashMap<String, String>,
    floats: HashMap<String, f64>,
}

impl KeywordMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    pub fn set_float(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.floats.insert(key.into(), value);
        self
    }
}

impl KeywordProvider for KeywordMap {
    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        self.floats.get(key).copied()
    }
}

/// The WCS keywords a projection reads on construction and writes back.
///
/// CTYPE values are held unquoted (`RA---TAN`).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WcsKeywords {
    pub ctype1: Option<String>,
    pub ctype2: Option<String>,
    pub crval1: Option<f64>,
    pub crval2: Option<f64>,
    pub pv1_1: Option<f64>,
    pub pv1_2: Option<f64>,
    pub lonpole: Option<f64>,
    pub latpole: Option<f64>,
}

impl WcsKeywords {
    /// Keywords holding only a reference point.
    pub fn from_reference(ra: f64, dec: f64) -> Self {
        Self {
            crval1: Some(ra),
            crval2: Some(dec),
            ..Self::default()
        }
    }

    pub fn from_provider<P: KeywordProvider + ?Sized>(provider: &P) -> Self {
        Self {
            ctype1: provider.get_string("CTYPE1"),
            ctype2: provider.get_string("CTYPE2"),
            crval1: provider.get_float("CRVAL1"),
            crval2: provider.get_float("CRVAL2"),
            pv1_1: provider.get_float("PV1_1"),
            pv1_2: provider.get_float("PV1_2"),
            lonpole: provider.get_float("LONPOLE"),
            latpole: provider.get_float("LATPOLE"),
        }
    }

    /// Writes every defined keyword into `map`.
    pub fn write_to(&self, map: &mut KeywordMap) {
        let strings = [("CTYPE1", &self.ctype1), ("CTYPE2", &self.ctype2)];
        for (key, value) in strings {
            if let Some(v) = value {
                map.set_string(key, v.as_str());
            }
        }

        let floats = [
            ("CRVAL1", self.crval1),
            ("CRVAL2", self.crval2),
            ("PV1_1", self.pv1_1),
            ("PV1_2", self.pv1_2),
            ("LONPOLE", self.lonpole),
            ("LATPOLE", self.latpole),
        ];
        for (key, value) in floats {
            if let Some(v) = value {
                map.set_float(key, v);
            }
        }
    }

    pub fn require_crval(&self) -> ProjectionResult<(f64, f64)> {
        let ra = self
            .crval1
            .ok_or_else(|| ProjectionError::missing_keyword("CRVAL1"))?;
        let dec = self
            .crval2
            .ok_or_else(|| ProjectionError::missing_keyword("CRVAL2"))?;
        Ok((ra, dec))
    }

    /// Projection code shared by both axes, e.g. `TAN` for `RA---TAN` / `DEC--TAN`.
    pub fn projection_code(&self) -> ProjectionResult<String> {
        let ctype1 = self
            .ctype1
            .as_deref()
            .ok_or_else(|| ProjectionError::missing_keyword("CTYPE1"))?;
        let ctype2 = self
            .ctype2
            .as_deref()
            .ok_or_else(|| ProjectionError::missing_keyword("CTYPE2"))?;

        let code1 = ctype_projection_code("CTYPE1", ctype1)?;
        let code2 = ctype_projection_code("CTYPE2", ctype2)?;
        if code1 != code2 {
            return Err(ProjectionError::mismatched_axes(code1, code2));
        }
        Ok(code1.to_string())
    }
}

fn ctype_projection_code<'a>(keyword: &str, ctype: &'a str) -> ProjectionResult<&'a str> {
    let ctype = ctype.trim().trim_matches('\'').trim_end();
    ctype.get(5..8).ok_or_else(|| {
        ProjectionError::invalid_keyword(keyword, format!("no projection code in '{ctype}'"))
    })
}
