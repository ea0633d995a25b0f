//! The boundary to the electromagnetic solver.
//!
//! The FDTD solve itself is owned by an external engine. This module only defines the
//! session interface the pipeline talks to: entity registration, a synchronous blocking
//! [`Solver::run`] and data retrieval keyed by (monitor name, dataset). Implementations
//! are passed explicitly as `&mut dyn Solver` handles so that tests can substitute a
//! scripted double for the engine.
pub mod synthetic;

pub use synthetic::SyntheticEngine;

use crate::{entities::EntityKind, error::SimResult, properties::Properties};
use ndarray::{Array1, Array4};
use num::complex::Complex64;
use strum_macros::Display;

/// Axis datasets retrievable for a monitor. The `Display` strings are the verbatim
/// retrieval keys of the engine wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Axis {
    /// spatial x axis
    #[strum(serialize = "x")]
    X,
    /// spatial y axis
    #[strum(serialize = "y")]
    Y,
    /// spatial z axis
    #[strum(serialize = "z")]
    Z,
    /// frequency axis
    #[strum(serialize = "f")]
    Frequency,
}

/// Complex field component datasets retrievable for a profile monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FieldComponent {
    /// in-plane electric field component along x
    #[strum(serialize = "Ex")]
    Ex,
    /// in-plane electric field component along y
    #[strum(serialize = "Ey")]
    Ey,
    /// out-of-plane electric field component
    #[strum(serialize = "Ez")]
    Ez,
}

/// A session with an electromagnetic solver.
///
/// All entity submissions and data retrievals are scoped to one session. A session is
/// single-shot: entities are registered, [`Solver::run`] executes the simulation
/// (blocking, no retry at this layer) and afterwards field samples can be read back.
pub trait Solver {
    /// Register one entity with the pending solver configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if the engine rejects the entity (e.g. a
    /// duplicate name or a missing parameter).
    fn add_entity(&mut self, kind: EntityKind, properties: &Properties) -> SimResult<()>;
    /// Execute the simulation. Blocks the calling thread until the engine completes.
    ///
    /// # Errors
    ///
    /// This function will return a [`SimulationError::Solver`](crate::error::SimulationError)
    /// on invalid geometry, numerical divergence or resource exhaustion inside the engine.
    fn run(&mut self) -> SimResult<()>;
    /// Retrieve one axis array recorded by the given monitor.
    ///
    /// # Errors
    ///
    /// This function will return a [`SimulationError::DataNotFound`](crate::error::SimulationError)
    /// if the monitor is unknown or [`Solver::run`] did not complete successfully before.
    fn axis_data(&self, monitor: &str, axis: Axis) -> SimResult<Array1<f64>>;
    /// Retrieve one complex field component recorded by the given profile monitor,
    /// indexed (x, y, z, frequency).
    ///
    /// # Errors
    ///
    /// Same error conditions as [`Solver::axis_data`]; additionally fails for monitors
    /// that do not record per-component data.
    fn field_component(&self, monitor: &str, component: FieldComponent)
        -> SimResult<Array4<Complex64>>;
    /// Retrieve the aggregate field magnitude recorded by the given power monitor,
    /// indexed (x, y, z, frequency).
    ///
    /// # Errors
    ///
    /// Same error conditions as [`Solver::axis_data`]; additionally fails for monitors
    /// that do not record aggregate data.
    fn field_magnitude(&self, monitor: &str) -> SimResult<Array4<f64>>;
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn axis_retrieval_keys() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Y.to_string(), "y");
        assert_eq!(Axis::Z.to_string(), "z");
        assert_eq!(Axis::Frequency.to_string(), "f");
    }
    #[test]
    fn component_retrieval_keys() {
        assert_eq!(FieldComponent::Ex.to_string(), "Ex");
        assert_eq!(FieldComponent::Ey.to_string(), "Ey");
        assert_eq!(FieldComponent::Ez.to_string(), "Ez");
    }
}
