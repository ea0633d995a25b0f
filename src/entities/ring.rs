//! Ring resonator structure
use super::{EntityKind, SolverEntity};
use crate::error::{SimResult, SimulationError};
use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

/// Configuration of a ring resonator structure.
///
/// A vernier filter uses two of these with slightly different radii, so that the beat
/// between their free spectral ranges widens the effective filter period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    name: String,
    x: Length,
    y: Length,
    inner_radius: Length,
    outer_radius: Length,
    z_span: Length,
    material: String,
}
impl Ring {
    /// Creates a new [`Ring`] centered at (`x`, `y`).
    ///
    /// Physical plausibility (positive radii, non-overlapping geometry) is not checked
    /// here; the external engine rejects ill-formed structures during `run()`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given name is empty.
    pub fn new(
        name: &str,
        x: Length,
        y: Length,
        inner_radius: Length,
        outer_radius: Length,
        z_span: Length,
        material: &str,
    ) -> SimResult<Self> {
        if name.is_empty() {
            return Err(SimulationError::Setup("ring name must not be empty".into()));
        }
        Ok(Self {
            name: name.to_string(),
            x,
            y,
            inner_radius,
            outer_radius,
            z_span,
            material: material.to_string(),
        })
    }
    /// Returns the outer radius of this [`Ring`].
    #[must_use]
    pub const fn outer_radius(&self) -> Length {
        self.outer_radius
    }
    /// Returns the inner radius of this [`Ring`].
    #[must_use]
    pub const fn inner_radius(&self) -> Length {
        self.inner_radius
    }
}
impl SolverEntity for Ring {
    fn kind(&self) -> EntityKind {
        EntityKind::Ring
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn properties(&self) -> SimResult<Properties> {
        let mut props = Properties::default();
        props.create("name", "entity name", self.name.as_str().into())?;
        props.create("x", "center x position", self.x.into())?;
        props.create("y", "center y position", self.y.into())?;
        props.create("inner radius", "inner ring radius", self.inner_radius.into())?;
        props.create("outer radius", "outer ring radius", self.outer_radius.into())?;
        props.create("z span", "out-of-plane thickness", self.z_span.into())?;
        props.create("material", "material name", self.material.as_str().into())?;
        Ok(props)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use uom::si::length::micrometer;

    fn test_ring() -> Ring {
        Ring::new(
            "ring1",
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.5),
            Length::new::<micrometer>(1.0),
            Length::new::<micrometer>(0.22),
            "Si (Silicon) - Palik",
        )
        .unwrap()
    }
    #[test]
    fn new() {
        assert!(Ring::new(
            "",
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.5),
            Length::new::<micrometer>(1.0),
            Length::new::<micrometer>(0.22),
            "Si (Silicon) - Palik",
        )
        .is_err());
        assert_eq!(test_ring().name(), "ring1");
    }
    #[test]
    fn kind() {
        assert_eq!(test_ring().kind(), EntityKind::Ring);
    }
    #[test]
    fn properties_wire_keys() {
        let props = test_ring().properties().unwrap();
        assert_eq!(props.nr_of_props(), 7);
        for key in [
            "name",
            "x",
            "y",
            "inner radius",
            "outer radius",
            "z span",
            "material",
        ] {
            assert!(props.contains(key), "missing wire key {key}");
        }
        assert_eq!(props.string_value("name").unwrap(), "ring1");
        assert_eq!(
            props.string_value("material").unwrap(),
            "Si (Silicon) - Palik"
        );
        assert_relative_eq!(
            props.base_value("inner radius").unwrap(),
            0.5e-6,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            props.base_value("z span").unwrap(),
            0.22e-6,
            max_relative = 1e-12
        );
    }
}
