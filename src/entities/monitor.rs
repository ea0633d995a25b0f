//! Field and power monitors
use super::{EntityKind, SolverEntity};
use crate::error::{SimResult, SimulationError};
use crate::properties::{Properties, Proptype};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uom::si::f64::Length;

/// The two monitor flavors of the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MonitorKind {
    /// records the individual complex field components (Ex, Ey, Ez)
    #[default]
    Profile,
    /// records a single aggregate field magnitude
    Power,
}

/// Configuration of a field sampling region.
///
/// Monitors record data over the source band. The two override flags control whether the
/// monitor replaces the global frequency sampling and whether sample points are spaced
/// uniformly in wavelength instead of frequency. Both flags travel as integers (0/1) on
/// the engine wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMonitor {
    name: String,
    kind: MonitorKind,
    x: Length,
    y: Length,
    x_span: Length,
    override_global_settings: bool,
    use_wavelength_spacing: bool,
}
impl FieldMonitor {
    /// Creates a new [`FieldMonitor`] of the given kind at (`x`, `y`) with width `x_span`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given name is empty.
    pub fn new(
        name: &str,
        kind: MonitorKind,
        x: Length,
        y: Length,
        x_span: Length,
        override_global_settings: bool,
        use_wavelength_spacing: bool,
    ) -> SimResult<Self> {
        if name.is_empty() {
            return Err(SimulationError::Setup(
                "monitor name must not be empty".into(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            kind,
            x,
            y,
            x_span,
            override_global_settings,
            use_wavelength_spacing,
        })
    }
    /// Returns the monitor flavor.
    #[must_use]
    pub const fn monitor_kind(&self) -> MonitorKind {
        self.kind
    }
}
impl SolverEntity for FieldMonitor {
    fn kind(&self) -> EntityKind {
        match self.kind {
            MonitorKind::Profile => EntityKind::ProfileMonitor,
            MonitorKind::Power => EntityKind::PowerMonitor,
        }
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn properties(&self) -> SimResult<Properties> {
        let mut props = Properties::default();
        props.create("name", "entity name", self.name.as_str().into())?;
        props.create("x", "sampling region x position", self.x.into())?;
        props.create("y", "sampling region y position", self.y.into())?;
        props.create("x span", "sampling region width", self.x_span.into())?;
        props.create(
            "override global monitor settings",
            "replace global frequency sampling",
            Proptype::I32(i32::from(self.override_global_settings)),
        )?;
        props.create(
            "use wavelength spacing",
            "sample uniformly in wavelength",
            Proptype::I32(i32::from(self.use_wavelength_spacing)),
        )?;
        Ok(props)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use std::str::FromStr;
    use uom::si::length::micrometer;

    fn test_monitor(kind: MonitorKind) -> FieldMonitor {
        FieldMonitor::new(
            "E_monitor",
            kind,
            Length::new::<micrometer>(0.5),
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.5),
            true,
            true,
        )
        .unwrap()
    }
    #[test]
    fn new() {
        assert!(FieldMonitor::new(
            "",
            MonitorKind::Profile,
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.5),
            true,
            true,
        )
        .is_err());
        assert_eq!(test_monitor(MonitorKind::Profile).name(), "E_monitor");
    }
    #[test]
    fn kind_mapping() {
        assert_eq!(
            test_monitor(MonitorKind::Profile).kind(),
            EntityKind::ProfileMonitor
        );
        assert_eq!(
            test_monitor(MonitorKind::Power).kind(),
            EntityKind::PowerMonitor
        );
    }
    #[test]
    fn kind_from_str() {
        assert_eq!(MonitorKind::from_str("profile").unwrap(), MonitorKind::Profile);
        assert_eq!(MonitorKind::from_str("power").unwrap(), MonitorKind::Power);
        assert!(MonitorKind::from_str("spectral").is_err());
    }
    #[test]
    fn properties_flags_as_integers() {
        let props = test_monitor(MonitorKind::Profile).properties().unwrap();
        assert_eq!(props.nr_of_props(), 6);
        assert_matches!(
            props.get("override global monitor settings").unwrap(),
            &Proptype::I32(1)
        );
        assert_matches!(props.get("use wavelength spacing").unwrap(), &Proptype::I32(1));
        assert_relative_eq!(
            props.base_value("x span").unwrap(),
            0.5e-6,
            max_relative = 1e-12
        );
    }
}
