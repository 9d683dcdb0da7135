use thiserror::Error;

pub type ProjectionResult<T> = Result<T, ProjectionError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Invalid/unsupported WCS projection code '{code}'")]
    UnsupportedProjection { code: String },

    #[error("Invalid/unsupported projection identifier '{identifier}'")]
    UnknownIdentifier { identifier: String },

    #[error("Missing required WCS keyword: {keyword}")]
    MissingKeyword { keyword: String },

    #[error("Invalid WCS keyword '{keyword}': {message}")]
    InvalidKeyword { keyword: String, message: String },

    #[error("Axes with different projections: '{axis1}' and '{axis2}'")]
    MismatchedAxes { axis1: String, axis2: String },

    #[error("Invalid spherical rotation: {message}")]
    InvalidRotation { message: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl ProjectionError {
    pub fn unsupported_projection(code: impl Into<String>) -> Self {
        Self::UnsupportedProjection { code: code.into() }
    }

    pub fn unknown_identifier(identifier: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            identifier: identifier.into(),
        }
    }

    pub fn missing_keyword(keyword: impl Into<String>) -> Self {
        Self::MissingKeyword {
            keyword: keyword.into(),
        }
    }

    pub fn invalid_keyword(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    pub fn mismatched_axes(axis1: impl Into<String>, axis2: impl Into<String>) -> Self {
        Self::MismatchedAxes {
            axis1: axis1.into(),
            axis2: axis2.into(),
        }
    }

    pub fn invalid_rotation(message: impl Into<String>) -> Self {
        Self::InvalidRotation {
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
