//! The post-run analysis pipeline.
//!
//! The two historical use modes of the vernier filter study are exposed as explicit
//! variants via [`MonitorKind`]: a field profile analysis retrieves the in-plane
//! components from a profile monitor and reduces them to a Euclidean magnitude, while a
//! power analysis reads the single aggregate magnitude dataset of a power monitor. Both
//! end in the same plot-ready [`FieldMap`].
use crate::entities::{MonitorKind, SolverEntity};
use crate::error::{SimResult, SimulationError};
use crate::fields::{magnitude, nearest_index, plane_slice, FieldMap};
use crate::model::SimulationModel;
use crate::solver::{Axis, FieldComponent, Solver};
use log::{debug, info};
use uom::si::f64::Frequency;

/// Configuration of one field map extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAnalysis {
    monitor: String,
    kind: MonitorKind,
    target_frequency: Frequency,
    z_index: usize,
}
impl FieldAnalysis {
    /// Creates a new [`FieldAnalysis`] reading the given monitor at the frequency sample
    /// closest to `target_frequency`.
    ///
    /// The out-of-plane index defaults to 0 (the only z plane of a 2D run).
    #[must_use]
    pub fn new(monitor: &str, kind: MonitorKind, target_frequency: Frequency) -> Self {
        Self {
            monitor: monitor.to_string(),
            kind,
            target_frequency,
            z_index: 0,
        }
    }
    /// Derives a [`FieldAnalysis`] from a model: the first monitor of the given kind is
    /// read at the source center frequency.
    ///
    /// # Errors
    ///
    /// This function will return an error if the model contains no monitor of this kind.
    pub fn for_model(model: &SimulationModel, kind: MonitorKind) -> SimResult<Self> {
        let monitor = model.monitor_of_kind(kind).ok_or_else(|| {
            SimulationError::Setup(format!("model contains no {kind} monitor"))
        })?;
        Ok(Self::new(
            monitor.name(),
            kind,
            model.source().center_frequency(),
        ))
    }
    /// Sets the out-of-plane sampling index for 3D runs.
    pub fn set_z_index(&mut self, z_index: usize) {
        self.z_index = z_index;
    }
    /// Returns the name of the analyzed monitor.
    #[must_use]
    pub fn monitor(&self) -> &str {
        &self.monitor
    }
    /// Extracts and reduces the monitor data from a solver session after a successful
    /// run.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    /// - the monitor or one of its datasets is unknown or the run did not complete
    /// - the retrieved arrays cannot be aligned onto the coordinate mesh
    pub fn analyze(&self, solver: &dyn Solver) -> SimResult<FieldMap> {
        let x = solver.axis_data(&self.monitor, Axis::X)?;
        let y = solver.axis_data(&self.monitor, Axis::Y)?;
        let f = solver.axis_data(&self.monitor, Axis::Frequency)?;
        let frequency_index = nearest_index(&f, self.target_frequency.value)?;
        debug!(
            "monitor {}: frequency sample {frequency_index} selected for target {:.3e} Hz",
            self.monitor, self.target_frequency.value
        );
        let reduced = match self.kind {
            MonitorKind::Profile => {
                let e_x = solver.field_component(&self.monitor, FieldComponent::Ex)?;
                let e_y = solver.field_component(&self.monitor, FieldComponent::Ey)?;
                magnitude(
                    &plane_slice(&e_x, self.z_index, frequency_index)?,
                    &plane_slice(&e_y, self.z_index, frequency_index)?,
                )?
            }
            MonitorKind::Power => plane_slice(
                &solver.field_magnitude(&self.monitor)?,
                self.z_index,
                frequency_index,
            )?,
        };
        FieldMap::new(&x, &y, &reduced)
    }
}

/// Runs the full pipeline: submit the model, execute the solver and reduce the monitor
/// data to a [`FieldMap`].
///
/// The stages are strictly sequential and single-shot. A failure in any stage aborts
/// the run; in particular no data extraction happens after a failed solver run.
///
/// # Errors
///
/// This function will return an error if one of the pipeline stages fails.
pub fn run_analysis(
    model: &SimulationModel,
    analysis: &FieldAnalysis,
    solver: &mut dyn Solver,
) -> SimResult<FieldMap> {
    model.submit(solver)?;
    solver.run()?;
    info!("solver run completed, extracting monitor {}", analysis.monitor());
    analysis.analyze(solver)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::EntityKind;
    use crate::properties::Properties;
    use crate::solver::SyntheticEngine;
    use assert_matches::assert_matches;
    use ndarray::{Array1, Array4};
    use num::complex::Complex64;
    use std::cell::Cell;
    use uom::si::frequency::terahertz;

    #[test]
    fn for_model_picks_matching_monitor() {
        let model = SimulationModel::vernier_filter().unwrap();
        let analysis = FieldAnalysis::for_model(&model, MonitorKind::Profile).unwrap();
        assert_eq!(analysis.monitor(), "E_monitor");
        let analysis = FieldAnalysis::for_model(&model, MonitorKind::Power).unwrap();
        assert_eq!(analysis.monitor(), "monitor");
    }
    #[test]
    fn profile_pipeline() {
        let model = SimulationModel::vernier_filter().unwrap();
        let analysis = FieldAnalysis::for_model(&model, MonitorKind::Profile).unwrap();
        let mut engine = SyntheticEngine::new();
        let map = run_analysis(&model, &analysis, &mut engine).unwrap();
        // mesh-grid convention: rows follow y, columns follow x
        assert_eq!(map.distribution().nrows(), map.y_data().len());
        assert_eq!(map.distribution().ncols(), map.x_data().len());
        assert!(map.peak() > 0.0);
        assert!(map.distribution().iter().all(|v| *v >= 0.0));
    }
    #[test]
    fn power_pipeline() {
        let model = SimulationModel::vernier_filter().unwrap();
        let analysis = FieldAnalysis::for_model(&model, MonitorKind::Power).unwrap();
        let mut engine = SyntheticEngine::new();
        let map = run_analysis(&model, &analysis, &mut engine).unwrap();
        assert_eq!(map.distribution().nrows(), map.y_data().len());
        assert!(map.peak() > 0.0);
    }
    #[test]
    fn wrong_monitor_kind() {
        let model = SimulationModel::vernier_filter().unwrap();
        // ask the profile pipeline to read the power monitor
        let analysis = FieldAnalysis::new(
            "monitor",
            MonitorKind::Profile,
            Frequency::new::<terahertz>(250.0),
        );
        let mut engine = SyntheticEngine::new();
        assert_matches!(
            run_analysis(&model, &analysis, &mut engine),
            Err(SimulationError::DataNotFound(_))
        );
    }

    /// scripted engine whose run always fails and which counts data retrievals
    struct FailingEngine {
        data_requests: Cell<usize>,
    }
    impl Solver for FailingEngine {
        fn add_entity(&mut self, _kind: EntityKind, _properties: &Properties) -> SimResult<()> {
            Ok(())
        }
        fn run(&mut self) -> SimResult<()> {
            Err(SimulationError::Solver("numerical divergence".into()))
        }
        fn axis_data(&self, _monitor: &str, _axis: Axis) -> SimResult<Array1<f64>> {
            self.data_requests.set(self.data_requests.get() + 1);
            Err(SimulationError::DataNotFound("no data".into()))
        }
        fn field_component(
            &self,
            _monitor: &str,
            _component: FieldComponent,
        ) -> SimResult<Array4<Complex64>> {
            self.data_requests.set(self.data_requests.get() + 1);
            Err(SimulationError::DataNotFound("no data".into()))
        }
        fn field_magnitude(&self, _monitor: &str) -> SimResult<Array4<f64>> {
            self.data_requests.set(self.data_requests.get() + 1);
            Err(SimulationError::DataNotFound("no data".into()))
        }
    }
    #[test]
    fn failed_run_prevents_extraction() {
        let model = SimulationModel::vernier_filter().unwrap();
        let analysis = FieldAnalysis::for_model(&model, MonitorKind::Profile).unwrap();
        let mut engine = FailingEngine {
            data_requests: Cell::new(0),
        };
        assert_matches!(
            run_analysis(&model, &analysis, &mut engine),
            Err(SimulationError::Solver(_))
        );
        assert_eq!(engine.data_requests.get(), 0);
    }
}
