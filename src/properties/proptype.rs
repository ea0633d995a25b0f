use serde::{Deserialize, Serialize};
use uom::si::f64::{Frequency, Length};

use crate::error::{SimResult, SimulationError};

/// The type of a [`Property`](crate::properties::Property).
///
/// External FDTD engines only understand flat scalar parameters. Typed variants such as
/// [`Proptype::Length`] keep SI units explicit inside the crate and are lowered to their
/// base value (meters, hertz) at the solver boundary.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Proptype {
    /// A string property (e.g. a material name)
    String(String),
    /// An integer property. Engine flags are encoded as integers (0/1).
    I32(i32),
    /// A float property (raw SI base value)
    F64(f64),
    /// A boolean property
    Bool(bool),
    /// a geometrical length
    Length(Length),
    /// a spectral frequency
    Frequency(Frequency),
}
impl Proptype {
    /// Lower this property to the raw SI base value used on the engine wire format.
    ///
    /// Lengths lower to meters, frequencies to hertz and booleans to `0`/`1`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property is a string and hence has no
    /// numeric representation.
    pub fn base_value(&self) -> SimResult<f64> {
        match self {
            Self::String(_) => Err(SimulationError::Properties(
                "string property has no numeric base value".into(),
            )),
            Self::I32(value) => Ok(f64::from(*value)),
            Self::F64(value) => Ok(*value),
            Self::Bool(value) => Ok(f64::from(i32::from(*value))),
            Self::Length(value) => Ok(value.value),
            Self::Frequency(value) => Ok(value.value),
        }
    }
}
impl From<bool> for Proptype {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
impl From<f64> for Proptype {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}
impl From<String> for Proptype {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
impl From<&str> for Proptype {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
impl From<i32> for Proptype {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}
impl From<Length> for Proptype {
    fn from(value: Length) -> Self {
        Self::Length(value)
    }
}
impl From<Frequency> for Proptype {
    fn from(value: Frequency) -> Self {
        Self::Frequency(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use uom::si::{frequency::terahertz, length::micrometer};
    #[test]
    fn from_string() {
        assert_matches!(Proptype::from(String::new()), Proptype::String(_));
        assert_matches!(Proptype::from(""), Proptype::String(_));
    }
    #[test]
    fn base_value_numeric() {
        assert_relative_eq!(Proptype::F64(1.5).base_value().unwrap(), 1.5);
        assert_relative_eq!(Proptype::I32(-3).base_value().unwrap(), -3.0);
        assert_relative_eq!(Proptype::Bool(true).base_value().unwrap(), 1.0);
        assert_relative_eq!(Proptype::Bool(false).base_value().unwrap(), 0.0);
    }
    #[test]
    fn base_value_si() {
        let len = Proptype::from(Length::new::<micrometer>(0.22));
        assert_relative_eq!(len.base_value().unwrap(), 0.22e-6, max_relative = 1e-12);
        let freq = Proptype::from(Frequency::new::<terahertz>(250.0));
        assert_relative_eq!(freq.base_value().unwrap(), 250.0e12, max_relative = 1e-12);
    }
    #[test]
    fn base_value_string() {
        assert!(Proptype::from("Si (Silicon) - Palik").base_value().is_err());
    }
}
