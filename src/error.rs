#![warn(missing_docs)]
//! Lensmaker specific error structures
use std::{error::Error, fmt::Display};

/// Lensmaker application specific Result type
pub type LmResult<T> = std::result::Result<T, LensmakerError>;

/// Errors that can be returned by various lensmaker functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LensmakerError {
    /// a form value could not be interpreted as a real number
    Parse(String),
    /// a zero divisor in the formula chain (e.g. a radius of curvature or refractive index of 0.0)
    UndefinedOpticalResult(String),
    /// errors console io
    Console(String),
    /// errors while reading or writing a lens description file
    Document(String),
    /// errors while rendering a lens cross-section
    Plot(String),
    /// errors while writing an analysis report
    Report(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for LensmakerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => {
                write!(f, "Parse:{m}")
            }
            Self::UndefinedOpticalResult(m) => {
                write!(f, "UndefinedOpticalResult:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Document(m) => {
                write!(f, "Document:{m}")
            }
            Self::Plot(m) => {
                write!(f, "Plot:{m}")
            }
            Self::Report(m) => {
                write!(f, "Report:{m}")
            }
            Self::Other(m) => write!(f, "Lensmaker Error:Other:{m}"),
        }
    }
}
impl Error for LensmakerError {}

impl std::convert::From<String> for LensmakerError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
