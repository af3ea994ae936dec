#![warn(missing_docs)]
//! lenstrace specific error structures
use std::{error::Error, fmt::Display};

/// lenstrace specific Result type
pub type TraceResult<T> = std::result::Result<T, TraceError>;

/// Errors that can be returned by various lenstrace functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// degenerate geometry such as zero-length vectors or coincident surface endpoints
    Geometry(String),
    /// invalid parameters while sampling a lens profile
    Profile(String),
    /// errors while loading or validating a scene description
    Scene(String),
    /// errors while handling command line arguments
    Console(String),
    /// errors of a drawing sink
    Render(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(m) => {
                write!(f, "Geometry:{m}")
            }
            Self::Profile(m) => {
                write!(f, "Profile:{m}")
            }
            Self::Scene(m) => {
                write!(f, "Scene:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Render(m) => {
                write!(f, "Render:{m}")
            }
            Self::Other(m) => write!(f, "lenstrace Error:Other:{m}"),
        }
    }
}
impl Error for TraceError {}

impl std::convert::From<String> for TraceError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
