//! Solver region defining the simulation domain
use super::{EntityKind, SolverEntity};
use crate::error::SimResult;
use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uom::si::f64::Length;

/// Name under which the engine registers the (single) solver region.
pub const FDTD_REGION_NAME: &str = "FDTD";

/// Dimensionality of the simulation domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum Dimension {
    /// planar simulation, fields sampled on a single z plane
    #[default]
    #[strum(serialize = "2D")]
    #[serde(rename = "2D")]
    TwoDimensional,
    /// full volumetric simulation
    #[strum(serialize = "3D")]
    #[serde(rename = "3D")]
    ThreeDimensional,
}

/// Meshing strategy of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshType {
    /// engine-controlled graded meshing
    #[default]
    #[strum(serialize = "auto")]
    Auto,
    /// user-defined mesh cells
    #[strum(serialize = "custom")]
    Custom,
}

/// Configuration of the solver region.
///
/// The domain span must be large enough to enclose all structures with margin. This is a
/// modeling responsibility of the caller and not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FdtdRegion {
    dimension: Dimension,
    x: Length,
    y: Length,
    x_span: Length,
    y_span: Length,
    mesh_type: MeshType,
}
impl FdtdRegion {
    /// Creates a new [`FdtdRegion`] centered at (`x`, `y`) with the given spans.
    #[must_use]
    pub const fn new(
        dimension: Dimension,
        x: Length,
        y: Length,
        x_span: Length,
        y_span: Length,
        mesh_type: MeshType,
    ) -> Self {
        Self {
            dimension,
            x,
            y,
            x_span,
            y_span,
            mesh_type,
        }
    }
    /// Returns the dimensionality of this [`FdtdRegion`].
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }
}
impl SolverEntity for FdtdRegion {
    fn kind(&self) -> EntityKind {
        EntityKind::FdtdRegion
    }
    fn name(&self) -> &str {
        FDTD_REGION_NAME
    }
    fn properties(&self) -> SimResult<Properties> {
        let mut props = Properties::default();
        props.create(
            "dimension",
            "domain dimensionality",
            self.dimension.to_string().into(),
        )?;
        props.create("x", "center x position", self.x.into())?;
        props.create("y", "center y position", self.y.into())?;
        props.create("x span", "domain width", self.x_span.into())?;
        props.create("y span", "domain height", self.y_span.into())?;
        props.create(
            "mesh type",
            "meshing strategy",
            self.mesh_type.to_string().into(),
        )?;
        Ok(props)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use uom::si::length::micrometer;

    fn test_region() -> FdtdRegion {
        FdtdRegion::new(
            Dimension::TwoDimensional,
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(0.0),
            Length::new::<micrometer>(2.0),
            Length::new::<micrometer>(2.0),
            MeshType::Auto,
        )
    }
    #[test]
    fn display_strings() {
        assert_eq!(Dimension::TwoDimensional.to_string(), "2D");
        assert_eq!(Dimension::ThreeDimensional.to_string(), "3D");
        assert_eq!(MeshType::Auto.to_string(), "auto");
        assert_eq!(MeshType::Custom.to_string(), "custom");
    }
    #[test]
    fn properties_wire_keys() {
        let props = test_region().properties().unwrap();
        assert_eq!(props.nr_of_props(), 6);
        assert_eq!(props.string_value("dimension").unwrap(), "2D");
        assert_eq!(props.string_value("mesh type").unwrap(), "auto");
        assert_relative_eq!(
            props.base_value("x span").unwrap(),
            2.0e-6,
            max_relative = 1e-12
        );
        assert_relative_eq!(props.base_value("y").unwrap(), 0.0);
    }
    #[test]
    fn fixed_name() {
        assert_eq!(test_region().name(), FDTD_REGION_NAME);
        assert_eq!(test_region().kind(), EntityKind::FdtdRegion);
    }
}
