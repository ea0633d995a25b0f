//! Typed configuration structures for the simulation entities understood by the
//! external engine.
//!
//! Each entity kind gets its own config struct with named, SI-typed fields. The structs
//! lower to the flat, engine-defined parameter sets ([`Properties`]) at the solver
//! boundary, so mismatched parameter keys are caught at compile time instead of being
//! rejected by the engine at run time.
pub mod fdtd_region;
pub mod mode_source;
pub mod monitor;
pub mod ring;

pub use fdtd_region::{Dimension, FdtdRegion, MeshType};
pub use mode_source::ModeSource;
pub use monitor::{FieldMonitor, MonitorKind};
pub use ring::Ring;

use crate::error::SimResult;
use crate::properties::Properties;
use strum_macros::Display;

/// The entity kinds that can be registered with a solver session.
///
/// The `Display` strings are the verbatim creation commands of the engine wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntityKind {
    /// a ring resonator structure
    #[strum(serialize = "addring")]
    Ring,
    /// the solver region defining the simulation domain
    #[strum(serialize = "addfdtd")]
    FdtdRegion,
    /// a mode source injecting light over a spectral band
    #[strum(serialize = "addmode")]
    ModeSource,
    /// a power monitor recording an aggregate field magnitude
    #[strum(serialize = "addpower")]
    PowerMonitor,
    /// a field profile monitor recording the individual field components
    #[strum(serialize = "addprofile")]
    ProfileMonitor,
}

/// Trait for all entity configurations that can be submitted to a solver session.
pub trait SolverEntity {
    /// Returns the [`EntityKind`] under which this entity is registered.
    fn kind(&self) -> EntityKind;
    /// Returns the entity name used as lookup key for data retrieval.
    fn name(&self) -> &str;
    /// Lower this entity to its flat, engine-defined parameter set.
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameter set could not be assembled.
    fn properties(&self) -> SimResult<Properties>;
}
