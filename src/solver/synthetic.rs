//! Deterministic in-process stand-in for an external FDTD engine.
//!
//! [`SyntheticEngine`] implements the full [`Solver`] session protocol (registration,
//! run gating, data retrieval) but performs no electromagnetic computation: after
//! `run()` it fabricates smooth, deterministic field samples whose shapes and axes are
//! derived from the registered entities. This keeps the whole pipeline runnable and
//! testable without a licensed solver installation.
use super::{Axis, FieldComponent, Solver};
use crate::{
    entities::{fdtd_region::FDTD_REGION_NAME, EntityKind},
    error::{SimResult, SimulationError},
    properties::Properties,
    utils::linspace,
};
use log::{debug, info};
use ndarray::{Array1, Array4};
use num::complex::Complex64;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

const X_SAMPLES: usize = 73;
const Y_SAMPLES: usize = 19;
const FREQUENCY_SAMPLES: usize = 11;
const VACUUM_SPEED_OF_LIGHT: f64 = 299_792_458.0;

struct RegisteredEntity {
    kind: EntityKind,
    props: Properties,
}

struct MonitorRecord {
    x: Array1<f64>,
    y: Array1<f64>,
    z: Array1<f64>,
    f: Array1<f64>,
    components: Option<[Array4<Complex64>; 3]>,
    magnitude: Option<Array4<f64>>,
}

/// In-process stand-in engine.
#[derive(Default)]
pub struct SyntheticEngine {
    entities: BTreeMap<String, RegisteredEntity>,
    records: BTreeMap<String, MonitorRecord>,
    completed: bool,
}

impl SyntheticEngine {
    /// Creates a new, empty [`SyntheticEngine`] session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns the number of registered entities.
    #[must_use]
    pub fn nr_of_entities(&self) -> usize {
        self.entities.len()
    }
    fn entity_of_kind(&self, wanted: &[EntityKind]) -> Option<&RegisteredEntity> {
        self.entities.values().find(|e| wanted.contains(&e.kind))
    }
    fn record(&self, monitor: &str) -> SimResult<&MonitorRecord> {
        if !self.completed {
            return Err(SimulationError::DataNotFound(
                "no data available before a successful run".into(),
            ));
        }
        self.records.get(monitor).ok_or_else(|| {
            SimulationError::DataNotFound(format!("unknown monitor {monitor}"))
        })
    }
    fn sample_monitor(
        kind: EntityKind,
        props: &Properties,
        region: &Properties,
        f_axis: &Array1<f64>,
    ) -> SimResult<MonitorRecord> {
        let monitor_x = props.base_value("x")?;
        let x_span = props.base_value("x span")?;
        let monitor_y = props.base_value("y")?;
        let region_y = region.base_value("y")?;
        let y_span = region.base_value("y span")?;
        let x_axis = linspace(monitor_x - x_span / 2.0, monitor_x + x_span / 2.0, X_SAMPLES)?;
        let y_axis = linspace(region_y - y_span / 2.0, region_y + y_span / 2.0, Y_SAMPLES)?;
        let z_axis = Array1::from_vec(vec![0.0]);

        let waist = if x_span > 0.0 { x_span / 2.0 } else { 1.0 };
        let shape = (X_SAMPLES, Y_SAMPLES, 1, f_axis.len());
        let mut ex = Array4::<Complex64>::zeros(shape);
        let mut ey = Array4::<Complex64>::zeros(shape);
        let ez = Array4::<Complex64>::zeros(shape);
        for (i, &x) in x_axis.iter().enumerate() {
            for (j, &y) in y_axis.iter().enumerate() {
                let r2 = (x - monitor_x).powi(2) + (y - monitor_y).powi(2);
                let envelope = (-r2 / waist.powi(2)).exp();
                for (k, &f) in f_axis.iter().enumerate() {
                    let phase = TAU * x * f / VACUUM_SPEED_OF_LIGHT;
                    ex[[i, j, 0, k]] = Complex64::from_polar(envelope, phase);
                    ey[[i, j, 0, k]] =
                        Complex64::from_polar(0.5 * envelope, phase + std::f64::consts::FRAC_PI_2);
                }
            }
        }
        let (components, magnitude) = if kind == EntityKind::ProfileMonitor {
            (Some([ex, ey, ez]), None)
        } else {
            let mut magnitude = Array4::<f64>::zeros(shape);
            for ((idx, e_x), e_y) in ex.indexed_iter().zip(ey.iter()) {
                magnitude[idx] = (e_x.norm_sqr() + e_y.norm_sqr()).sqrt();
            }
            (None, Some(magnitude))
        };
        Ok(MonitorRecord {
            x: x_axis,
            y: y_axis,
            z: z_axis,
            f: f_axis.clone(),
            components,
            magnitude,
        })
    }
}

impl Solver for SyntheticEngine {
    fn add_entity(&mut self, kind: EntityKind, properties: &Properties) -> SimResult<()> {
        let name = if properties.contains("name") {
            properties.string_value("name")?
        } else if kind == EntityKind::FdtdRegion {
            FDTD_REGION_NAME.to_string()
        } else {
            return Err(SimulationError::Properties(
                "entity parameter set has no name".into(),
            ));
        };
        if self.entities.contains_key(&name) {
            return Err(SimulationError::Solver(format!(
                "entity {name} already registered"
            )));
        }
        debug!("registering {kind} entity {name}");
        self.entities.insert(
            name,
            RegisteredEntity {
                kind,
                props: properties.clone(),
            },
        );
        Ok(())
    }

    fn run(&mut self) -> SimResult<()> {
        let region = self
            .entity_of_kind(&[EntityKind::FdtdRegion])
            .ok_or_else(|| SimulationError::Solver("no solver region defined".into()))?
            .props
            .clone();
        let source = self
            .entity_of_kind(&[EntityKind::ModeSource])
            .ok_or_else(|| SimulationError::Solver("no source defined".into()))?
            .props
            .clone();
        let center = source.base_value("center frequency")?;
        let span = source.base_value("frequency span")?;
        let f_axis = linspace(center - span / 2.0, center + span / 2.0, FREQUENCY_SAMPLES)?;

        self.records.clear();
        for (name, entity) in &self.entities {
            if matches!(
                entity.kind,
                EntityKind::PowerMonitor | EntityKind::ProfileMonitor
            ) {
                let record = Self::sample_monitor(entity.kind, &entity.props, &region, &f_axis)?;
                self.records.insert(name.clone(), record);
            }
        }
        self.completed = true;
        info!(
            "synthetic run completed, {} monitor record(s) sampled",
            self.records.len()
        );
        Ok(())
    }

    fn axis_data(&self, monitor: &str, axis: Axis) -> SimResult<Array1<f64>> {
        let record = self.record(monitor)?;
        let data = match axis {
            Axis::X => &record.x,
            Axis::Y => &record.y,
            Axis::Z => &record.z,
            Axis::Frequency => &record.f,
        };
        Ok(data.clone())
    }

    fn field_component(
        &self,
        monitor: &str,
        component: FieldComponent,
    ) -> SimResult<Array4<Complex64>> {
        let record = self.record(monitor)?;
        let components = record.components.as_ref().ok_or_else(|| {
            SimulationError::DataNotFound(format!(
                "monitor {monitor} does not record per-component data"
            ))
        })?;
        let data = match component {
            FieldComponent::Ex => &components[0],
            FieldComponent::Ey => &components[1],
            FieldComponent::Ez => &components[2],
        };
        Ok(data.clone())
    }

    fn field_magnitude(&self, monitor: &str) -> SimResult<Array4<f64>> {
        let record = self.record(monitor)?;
        record.magnitude.clone().ok_or_else(|| {
            SimulationError::DataNotFound(format!(
                "monitor {monitor} does not record aggregate magnitude data"
            ))
        })
    }
}
