#![warn(missing_docs)]
//! Verniersim specific error structures
use std::{error::Error, fmt::Display};

/// Verniersim application specific Result type
pub type SimResult<T> = std::result::Result<T, SimulationError>;

/// Errors that can be returned by the various verniersim functions.
#[derive(Debug, PartialEq, Eq)]
pub enum SimulationError {
    /// the external engine failed during entity registration or while running
    Solver(String),
    /// a (monitor, dataset) pair is unknown or was requested before a successful run
    DataNotFound(String),
    /// coordinate and field arrays cannot be aligned for plotting
    ShapeMismatch(String),
    /// errors in connection with entity parameter handling
    Properties(String),
    /// errors while assembling a simulation model
    Setup(String),
    /// errors during command line handling
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solver(m) => {
                write!(f, "Solver:{m}")
            }
            Self::DataNotFound(m) => {
                write!(f, "DataNotFound:{m}")
            }
            Self::ShapeMismatch(m) => {
                write!(f, "ShapeMismatch:{m}")
            }
            Self::Properties(m) => {
                write!(f, "Properties:{m}")
            }
            Self::Setup(m) => {
                write!(f, "Setup:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Verniersim Error:Other:{m}"),
        }
    }
}
impl Error for SimulationError {}

impl std::convert::From<String> for SimulationError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
