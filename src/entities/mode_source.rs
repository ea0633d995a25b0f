//! Mode source injecting light over a spectral band
use super::{EntityKind, SolverEntity};
use crate::error::{SimResult, SimulationError};
use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use uom::si::f64::{Frequency, Length};

/// Configuration of a mode source.
///
/// The source excites the structure over the band `center_frequency ± frequency_span/2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSource {
    name: String,
    x: Length,
    y: Length,
    y_span: Length,
    center_frequency: Frequency,
    frequency_span: Frequency,
}
impl ModeSource {
    /// Creates a new [`ModeSource`] injecting along a line of height `y_span` at (`x`, `y`).
    ///
    /// # Errors
    ///
    /// This function will return an error if the given name is empty.
    pub fn new(
        name: &str,
        x: Length,
        y: Length,
        y_span: Length,
        center_frequency: Frequency,
        frequency_span: Frequency,
    ) -> SimResult<Self> {
        if name.is_empty() {
            return Err(SimulationError::Setup(
                "source name must not be empty".into(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            x,
            y,
            y_span,
            center_frequency,
            frequency_span,
        })
    }
    /// Returns the center frequency of the injected band.
    #[must_use]
    pub const fn center_frequency(&self) -> Frequency {
        self.center_frequency
    }
    /// Returns the width of the injected band.
    #[must_use]
    pub const fn frequency_span(&self) -> Frequency {
        self.frequency_span
    }
}
impl SolverEntity for ModeSource {
    fn kind(&self) -> EntityKind {
        EntityKind::ModeSource
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn properties(&self) -> SimResult<Properties> {
        let mut props = Properties::default();
        props.create("name", "entity name", self.name.as_str().into())?;
        props.create("x", "injection x position", self.x.into())?;
        props.create("y", "injection y position", self.y.into())?;
        props.create("y span", "injection region height", self.y_span.into())?;
        props.create(
            "center frequency",
            "spectral band center",
            self.center_frequency.into(),
        )?;
        props.create(
            "frequency span",
            "spectral band width",
            self.frequency_span.into(),
        )?;
        Ok(props)
    }
}
