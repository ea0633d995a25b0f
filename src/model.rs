//! Aggregation and persistence of a complete simulation setup.
use crate::entities::{
    Dimension, FdtdRegion, FieldMonitor, MeshType, ModeSource, MonitorKind, Ring, SolverEntity,
};
use crate::error::{SimResult, SimulationError};
use crate::solver::Solver;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uom::si::f64::{Frequency, Length};
use uom::si::{frequency::terahertz, length::micrometer};

/// A complete, self-contained simulation setup.
///
/// The model owns all entity configurations of one run. Entity names must be unique
/// since they serve as lookup keys for data retrieval after the run. Models are plain
/// data and can be stored to / loaded from YAML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationModel {
    region: FdtdRegion,
    source: ModeSource,
    rings: Vec<Ring>,
    monitors: Vec<FieldMonitor>,
}
impl SimulationModel {
    /// Creates a new, empty [`SimulationModel`] with the given solver region and source.
    #[must_use]
    pub const fn new(region: FdtdRegion, source: ModeSource) -> Self {
        Self {
            region,
            source,
            rings: Vec::new(),
            monitors: Vec::new(),
        }
    }
    fn check_unique_name(&self, name: &str) -> SimResult<()> {
        let taken = name == self.region.name()
            || name == self.source.name()
            || self.rings.iter().any(|r| r.name() == name)
            || self.monitors.iter().any(|m| m.name() == name);
        if taken {
            return Err(SimulationError::Setup(format!(
                "entity name {name} is already in use"
            )));
        }
        Ok(())
    }
    /// Adds a ring resonator to the model.
    ///
    /// # Errors
    ///
    /// This function will return an error if the ring name is already in use.
    pub fn add_ring(&mut self, ring: Ring) -> SimResult<()> {
        self.check_unique_name(ring.name())?;
        self.rings.push(ring);
        Ok(())
    }
    /// Adds a monitor to the model.
    ///
    /// # Errors
    ///
    /// This function will return an error if the monitor name is already in use.
    pub fn add_monitor(&mut self, monitor: FieldMonitor) -> SimResult<()> {
        self.check_unique_name(monitor.name())?;
        self.monitors.push(monitor);
        Ok(())
    }
    /// Returns the source of this model.
    #[must_use]
    pub const fn source(&self) -> &ModeSource {
        &self.source
    }
    /// Returns the monitors of this model.
    #[must_use]
    pub fn monitors(&self) -> &[FieldMonitor] {
        &self.monitors
    }
    /// Returns the first monitor of the given kind, if any.
    #[must_use]
    pub fn monitor_of_kind(&self, kind: MonitorKind) -> Option<&FieldMonitor> {
        self.monitors.iter().find(|m| m.monitor_kind() == kind)
    }
    /// Submits all entities of this model to the given solver session.
    ///
    /// The submission mutates the pending configuration of the session and is not
    /// reversible within a run.
    ///
    /// # Errors
    ///
    /// This function will return an error if the solver rejects one of the entities.
    pub fn submit(&self, solver: &mut dyn Solver) -> SimResult<()> {
        let mut entities: Vec<&dyn SolverEntity> = vec![&self.region, &self.source];
        entities.extend(self.rings.iter().map(|r| r as &dyn SolverEntity));
        entities.extend(self.monitors.iter().map(|m| m as &dyn SolverEntity));
        for entity in entities {
            solver.add_entity(entity.kind(), &entity.properties()?)?;
        }
        info!(
            "submitted {} entities to the solver session",
            2 + self.rings.len() + self.monitors.len()
        );
        Ok(())
    }
    /// Serialize this model to a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SimulationError::Setup(format!("model serialization failed: {e}")))
    }
    /// Deserialize a model from a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given string is no valid model.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| SimulationError::Setup(format!("parsing of model failed: {e}")))
    }
    /// Read a model from the YAML file at the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> SimResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SimulationError::Console(format!("cannot read file {} : {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }
    /// Write this model to the YAML file at the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file cannot be written.
    pub fn save_to_file(&self, path: &Path) -> SimResult<()> {
        fs::write(path, self.to_yaml()?).map_err(|e| {
            SimulationError::Console(format!("cannot write file {} : {}", path.display(), e))
        })
    }
    /// Creates the vernier filter reference model: two silicon rings with slightly
    /// different radii, a 2D solver region, a broadband mode source and one power plus
    /// one profile monitor behind the rings.
    ///
    /// # Errors
    ///
    /// This function will return an error if the model could not be assembled.
    pub fn vernier_filter() -> SimResult<Self> {
        let micro = Length::new::<micrometer>;
        let region = FdtdRegion::new(
            Dimension::TwoDimensional,
            micro(0.0),
            micro(0.0),
            micro(2.0),
            micro(2.0),
            MeshType::Auto,
        );
        let source = ModeSource::new(
            "source",
            micro(-0.5),
            micro(0.0),
            micro(0.3),
            Frequency::new::<terahertz>(250.0),
            Frequency::new::<terahertz>(100.0),
        )?;
        let mut model = Self::new(region, source);
        model.add_ring(Ring::new(
            "ring1",
            micro(0.0),
            micro(0.0),
            micro(0.5),
            micro(1.0),
            micro(0.22),
            "Si (Silicon) - Palik",
        )?)?;
        // the second ring is offset in x and slightly larger, which detunes its free
        // spectral range against the first one
        model.add_ring(Ring::new(
            "ring2",
            micro(1.5),
            micro(0.0),
            micro(0.6),
            micro(1.1),
            micro(0.22),
            "Si (Silicon) - Palik",
        )?)?;
        model.add_monitor(FieldMonitor::new(
            "monitor",
            MonitorKind::Power,
            micro(0.5),
            micro(0.0),
            micro(0.5),
            true,
            true,
        )?)?;
        model.add_monitor(FieldMonitor::new(
            "E_monitor",
            MonitorKind::Profile,
            micro(0.5),
            micro(0.0),
            micro(0.5),
            true,
            true,
        )?)?;
        Ok(model)
    }
}
