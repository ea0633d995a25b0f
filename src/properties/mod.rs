//! Module for handling entity parameter sets
pub mod property;
pub mod proptype;

pub use property::Property;
pub use proptype::Proptype;

use crate::error::{SimResult, SimulationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A flat set of entity parameters.
///
/// The property system stores the wire-level parameter set of one simulation entity
/// (ring geometry, region spans, source band, monitor flags, ...). Parameter names must
/// reproduce the exact strings the external engine expects (e.g. `"inner radius"` or
/// `"z span"`). Properties have to be created once before they can be set and used.
///
/// ## Example
/// ```rust
/// use verniersim::properties::Properties;
/// let mut props = Properties::default();
/// props.create("my float", "my floating point value", 3.14.into()).unwrap();
/// props.set("my float", 2.71.into()).unwrap();
/// ```
#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Properties {
    props: BTreeMap<String, Property>,
}
impl Properties {
    /// Create a new property with the given name.
    ///
    /// # Errors
    ///
    /// This function will return a [`SimulationError`] if a property with the same name
    /// was already created before.
    pub fn create(&mut self, name: &str, description: &str, value: Proptype) -> SimResult<()> {
        if self.props.contains_key(name) {
            return Err(SimulationError::Properties(format!(
                "property {name} already created",
            )));
        }
        let new_property = Property::new(value, description.into());
        self.props.insert(name.into(), new_property);
        Ok(())
    }
    /// Returns the number of properties that have been set
    #[must_use]
    pub fn nr_of_props(&self) -> usize {
        self.props.len()
    }
    /// Set the value of the property with the given name.
    ///
    /// # Errors
    ///
    /// This function will return a [`SimulationError`] if
    ///   - the property with the given name does not exist (i.e. has not been created before).
    ///   - the new value has a different type than the created one.
    pub fn set(&mut self, name: &str, value: Proptype) -> SimResult<()> {
        let property = self
            .props
            .get_mut(name)
            .ok_or_else(|| SimulationError::Properties(format!("property {name} does not exist")))?;
        property.set_value(value)?;
        Ok(())
    }
    /// Returns the iter of this [`Properties`].
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, Property> {
        self.props.iter()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
    /// Return `true` if a property with the given name exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }
    /// Return the value of the given property.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property with the given name does not exist.
    pub fn get(&self, name: &str) -> SimResult<&Proptype> {
        self.props.get(name).map_or_else(
            || {
                Err(SimulationError::Properties(format!(
                    "property {name} does not exist"
                )))
            },
            |prop| Ok(prop.prop()),
        )
    }
    /// Return the raw SI base value of the given property.
    ///
    /// This is a convenience function for solver implementations reading the wire format.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property does not exist or has no
    /// numeric representation.
    pub fn base_value(&self, name: &str) -> SimResult<f64> {
        self.get(name)?.base_value()
    }
    /// Return the value of a string property.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property does not exist or is not a
    /// string property.
    pub fn string_value(&self, name: &str) -> SimResult<String> {
        if let Proptype::String(value) = self.get(name)? {
            Ok(value.clone())
        } else {
            Err(SimulationError::Properties(format!(
                "property {name} is not a string property"
            )))
        }
    }
}

impl<'a> IntoIterator for &'a Properties {
    type IntoIter = std::collections::btree_map::Iter<'a, String, Property>;
    type Item = (&'a std::string::String, &'a Property);
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    #[test]
    fn properties_create() {
        let mut props = Properties::default();
        assert!(props.create("test", "my description", 1.into()).is_ok());
        assert_eq!(props.props.len(), 1);
        assert!(props.create("test2", "my description", 1.into()).is_ok());
        assert_eq!(props.props.len(), 2);
        assert!(props.create("test", "my description", 2.into()).is_err());
        assert_eq!(props.props.len(), 2);
    }
    #[test]
    fn properties_get() {
        let mut props = Properties::default();
        props.create("test", "my description", 1.into()).unwrap();
        let prop = props.get("test").unwrap();
        assert_matches!(prop, &Proptype::I32(1));
        assert!(props.get("wrong").is_err());
    }
    #[test]
    fn properties_set() {
        let mut props = Properties::default();
        props.create("test", "my description", 1.into()).unwrap();
        assert!(props.set("test", 2.into()).is_ok());
        assert_matches!(props.get("test").unwrap(), &Proptype::I32(2));
        assert!(props.set("wrong", 2.into()).is_err());
    }
    #[test]
    fn properties_base_value() {
        let mut props = Properties::default();
        props.create("flag", "a flag", true.into()).unwrap();
        props.create("mat", "a material", "Si".into()).unwrap();
        assert_relative_eq!(props.base_value("flag").unwrap(), 1.0);
        assert!(props.base_value("mat").is_err());
        assert!(props.base_value("wrong").is_err());
    }
    #[test]
    fn properties_string_value() {
        let mut props = Properties::default();
        props.create("mat", "a material", "Si".into()).unwrap();
        props.create("flag", "a flag", true.into()).unwrap();
        assert_eq!(props.string_value("mat").unwrap(), "Si");
        assert!(props.string_value("flag").is_err());
    }
    #[test]
    fn is_empty() {
        let mut props = Properties::default();
        assert_eq!(props.is_empty(), true);
        props.create("my prop", "my description", 1.into()).unwrap();
        assert_eq!(props.is_empty(), false);
    }
}
